// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board constants and the persisted configuration.
//!
//! The persisted form is line-oriented text stored at [`CONFIG_PATH`]:
//!
//! ```text
//! # rotorbank config
//! actuator,0,0,1000,Left wheel
//! remote,2,seq,wave
//! ```
//!
//! `actuator,<index>,<pin>,<full_turn_ms>,<description>` and `remote,<slot>,<kind>,<value>`.
//! Lines that fail to parse are reported and skipped; the rest still apply.

use core::fmt::{self, Write};

use crate::label::Label;
use crate::remote::{RemoteKind, RemoteMapping, RemoteTable};

/// Number of actuators on the board.
pub const NUM_ACTUATORS: usize = 6;
/// Number of remote button slots.
pub const NUM_REMOTE_SLOTS: usize = 6;

pub const MIN_POWER: i8 = -100;
pub const MAX_POWER: i8 = 100;

/// Servo pulse widths (µs) for full reverse, stop and full forward.
pub const PULSE_MIN_US: u16 = 1000;
pub const PULSE_MID_US: u16 = 1500;
pub const PULSE_MAX_US: u16 = 2000;
/// Servo frame rate.
pub const SERVO_FRAME_HZ: u32 = 50;

/// Longest manual pulse or sequence step.
pub const MAX_DURATION_MS: u32 = 30_000;
/// Shortest pulse produced from an angle request.
pub const MIN_MOVE_MS: u32 = 10;
/// Power used for angle moves when none is given.
pub const DEFAULT_MOVE_POWER: u8 = 50;

/// Sequence capacity.
pub const MAX_STEPS: usize = 256;

pub const DEFAULT_FULL_TURN_MS: u32 = 1000;
pub const FULL_TURN_MIN_MS: u32 = 100;
pub const FULL_TURN_MAX_MS: u32 = 60_000;

/// PWM channels wired to servo headers (TIM3 CH1–4, TIM4 CH1–4).
pub const ALLOWED_PINS: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

pub const DESCRIPTION_LEN: usize = 32;
pub const NAME_LEN: usize = 32;
pub const REMOTE_VALUE_LEN: usize = 64;

pub const CONFIG_PATH: &str = "/config.txt";
pub const SEQUENCE_DIR: &str = "/seq/";
pub const SEQUENCE_EXT: &str = ".txt";

/// Persisted settings of one actuator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ActuatorConfig {
    pub pin: u8,
    pub full_turn_ms: u32,
    pub description: Label<DESCRIPTION_LEN>,
}

impl ActuatorConfig {
    /// Defaults for actuator `index`: channel `index`, 1 s per turn, "Motor <n>".
    pub fn default_for(index: usize) -> Self {
        let mut description = Label::new();
        let _ = write!(description, "Motor {}", index + 1);
        Self {
            pin: ALLOWED_PINS[index % ALLOWED_PINS.len()],
            full_turn_ms: DEFAULT_FULL_TURN_MS,
            description,
        }
    }
}

/// Everything restored at boot.
#[derive(Clone, Debug)]
pub struct BoardConfig {
    pub actuators: [ActuatorConfig; NUM_ACTUATORS],
    pub remotes: RemoteTable,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            actuators: core::array::from_fn(ActuatorConfig::default_for),
            remotes: RemoteTable::default(),
        }
    }
}

/// Returns true if `pin` is one of the board's servo outputs.
#[inline]
pub fn pin_allowed(pin: u8) -> bool {
    ALLOWED_PINS.contains(&pin)
}

impl BoardConfig {
    /// Parse persisted text on top of the defaults, logging skipped lines to `log`.
    pub fn parse(text: &str, log: &mut impl Write) -> Self {
        let mut cfg = Self::default();

        for (n, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Err(reason) = cfg.apply_line(line) {
                let _ = write!(log, "config: line {} skipped: {}\r\n", n + 1, reason);
            }
        }

        cfg
    }

    fn apply_line(&mut self, line: &str) -> core::result::Result<(), &'static str> {
        let (tag, rest) = line.split_once(',').ok_or("missing fields")?;

        match tag.trim() {
            "actuator" => {
                let mut fields = rest.splitn(4, ',');
                let index = parse_field::<usize>(fields.next())?;
                let pin = parse_field::<u8>(fields.next())?;
                // Missing or unparsable turn time falls back to the default below.
                let full_turn_ms = fields
                    .next()
                    .and_then(|f| f.trim().parse::<i64>().ok())
                    .unwrap_or(0);
                let description = fields.next();

                let slot = self.actuators.get_mut(index).ok_or("actuator index")?;
                if !pin_allowed(pin) {
                    return Err("pin not allowed");
                }
                slot.pin = pin;
                slot.full_turn_ms = if full_turn_ms > 0 {
                    (full_turn_ms as u64).clamp(
                        FULL_TURN_MIN_MS as u64,
                        FULL_TURN_MAX_MS as u64,
                    ) as u32
                } else {
                    DEFAULT_FULL_TURN_MS
                };
                // An absent field keeps the default; a present one (even empty) is taken as is.
                if let Some(text) = description {
                    slot.description = Label::single_line(text);
                }
                Ok(())
            }
            "remote" => {
                let mut fields = rest.splitn(3, ',');
                let slot = parse_field::<usize>(fields.next())?;
                let kind = fields
                    .next()
                    .and_then(|k| RemoteKind::parse(k.trim()))
                    .ok_or("remote kind")?;
                let value = fields.next().unwrap_or("").trim();

                self.remotes
                    .set(slot, RemoteMapping::new(kind, value))
                    .map_err(|_| "remote slot")
            }
            _ => Err("unknown entry"),
        }
    }

    /// Write the persisted text form.
    pub fn write_to(&self, out: &mut impl Write) -> fmt::Result {
        out.write_str("# rotorbank config\n")?;
        for (i, a) in self.actuators.iter().enumerate() {
            writeln!(
                out,
                "actuator,{},{},{},{}",
                i, a.pin, a.full_turn_ms, a.description
            )?;
        }
        for (i, r) in self.remotes.iter().enumerate() {
            writeln!(out, "remote,{},{},{}", i, r.kind.as_str(), r.value)?;
        }
        Ok(())
    }
}

fn parse_field<T: core::str::FromStr>(
    field: Option<&str>,
) -> core::result::Result<T, &'static str> {
    field
        .ok_or("missing fields")?
        .trim()
        .parse()
        .map_err(|_| "not a number")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_text_is_empty() {
        let mut log = String::new();
        let cfg = BoardConfig::parse("", &mut log);

        assert_eq!(cfg.actuators[3].pin, 3);
        assert_eq!(cfg.actuators[3].full_turn_ms, DEFAULT_FULL_TURN_MS);
        assert_eq!(cfg.actuators[3].description, "Motor 4");
        assert!(log.is_empty());
    }

    #[test]
    fn parses_actuators_and_remotes() {
        let text = "\
# comment
actuator,1,7,2500,Left wheel, rear
remote,0,seq,wave
remote,5,action,stop
";
        let mut log = String::new();
        let cfg = BoardConfig::parse(text, &mut log);

        assert_eq!(cfg.actuators[1].pin, 7);
        assert_eq!(cfg.actuators[1].full_turn_ms, 2500);
        assert_eq!(cfg.actuators[1].description, "Left wheel, rear");
        assert_eq!(cfg.remotes.get(0).unwrap().kind, RemoteKind::Sequence);
        assert_eq!(cfg.remotes.get(0).unwrap().value, "wave");
        assert_eq!(cfg.remotes.get(5).unwrap().kind, RemoteKind::Action);
        assert!(log.is_empty());
    }

    #[test]
    fn invalid_full_turn_falls_back_to_default() {
        let mut log = String::new();
        let cfg = BoardConfig::parse("actuator,0,0,-5\nactuator,2,2,5", &mut log);

        assert_eq!(cfg.actuators[0].full_turn_ms, DEFAULT_FULL_TURN_MS);
        assert_eq!(cfg.actuators[2].full_turn_ms, FULL_TURN_MIN_MS);
        assert_eq!(cfg.actuators[0].description, "Motor 1");
    }

    #[test]
    fn missing_full_turn_keeps_rest_of_line() {
        let mut log = String::new();
        let cfg = BoardConfig::parse("actuator,1,7,,Left\nactuator,2,6\nactuator,3,5,slow,Arm", &mut log);

        assert!(log.is_empty(), "{}", log);
        assert_eq!(cfg.actuators[1].pin, 7);
        assert_eq!(cfg.actuators[1].full_turn_ms, DEFAULT_FULL_TURN_MS);
        assert_eq!(cfg.actuators[1].description, "Left");
        assert_eq!(cfg.actuators[2].pin, 6);
        assert_eq!(cfg.actuators[2].description, "Motor 3");
        assert_eq!(cfg.actuators[3].pin, 5);
        assert_eq!(cfg.actuators[3].full_turn_ms, DEFAULT_FULL_TURN_MS);
        assert_eq!(cfg.actuators[3].description, "Arm");
    }

    #[test]
    fn empty_description_field_is_kept_empty() {
        let mut log = String::new();
        let cfg = BoardConfig::parse("actuator,0,0,1000,", &mut log);
        assert_eq!(cfg.actuators[0].description, "");
    }

    #[test]
    fn bad_lines_are_logged_and_skipped() {
        let text = "actuator,9,0,1000,x\nactuator,0,42,1000,x\nremote,1,bogus,x\nactuator,4,5,800,ok";
        let mut log = String::new();
        let cfg = BoardConfig::parse(text, &mut log);

        assert_eq!(log.matches("skipped").count(), 3);
        assert!(log.contains("line 2 skipped: pin not allowed"));
        assert_eq!(cfg.actuators[0].pin, 0);
        assert_eq!(cfg.actuators[4].pin, 5);
        assert_eq!(cfg.actuators[4].full_turn_ms, 800);
    }

    #[test]
    fn written_config_parses_back() {
        let mut cfg = BoardConfig::default();
        cfg.actuators[2].pin = 6;
        cfg.actuators[2].full_turn_ms = 1800;
        cfg.actuators[2].description = Label::single_line("Gripper");
        cfg.actuators[4].description = Label::new();
        cfg.remotes
            .set(3, RemoteMapping::new(RemoteKind::Action, "center"))
            .unwrap();

        let mut text = String::new();
        cfg.write_to(&mut text).unwrap();

        let mut log = String::new();
        let back = BoardConfig::parse(&text, &mut log);
        assert!(log.is_empty(), "{}", log);
        assert_eq!(back.actuators, cfg.actuators);
        assert_eq!(back.remotes.get(3).unwrap(), cfg.remotes.get(3).unwrap());
    }
}
