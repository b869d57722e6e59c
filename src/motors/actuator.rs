// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Logical state of one continuous-rotation actuator.
//!
//! An `Actuator` remembers the last commanded power and whether its channel is attached, and
//! forwards pulse writes to a [`ServoDriver`]. Every mutation keeps `power == 0` while detached.

use crate::config::{ActuatorConfig, DESCRIPTION_LEN, MAX_POWER, MIN_POWER};
use crate::control::Calibration;
use crate::drivers::{pulse_width_us, ServoDriver};
use crate::label::Label;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Actuator {
    index: usize,
    pin: u8,
    power: i8,
    attached: bool,
    description: Label<DESCRIPTION_LEN>,
    calibration: Calibration,
}

impl Actuator {
    /// Detached, stopped actuator built from its persisted settings.
    pub fn new(index: usize, cfg: &ActuatorConfig) -> Self {
        Self {
            index,
            pin: cfg.pin,
            power: 0,
            attached: false,
            description: cfg.description,
            calibration: Calibration {
                full_turn_ms: cfg.full_turn_ms,
                current_deg: 0.0,
                center_deg: 0.0,
            },
        }
    }

    /// Clamp and apply `power`, attaching the channel first if needed. Returns the stored power.
    pub fn set_power<D: ServoDriver>(&mut self, driver: &mut D, power: i32) -> i8 {
        let power = power.clamp(MIN_POWER as i32, MAX_POWER as i32) as i8;
        if !self.attached {
            driver.attach(self.pin);
            self.attached = true;
        }
        self.power = power;
        driver.write_pulse_us(self.pin, pulse_width_us(power));
        power
    }

    /// Detach the channel and zero the power.
    pub fn stop<D: ServoDriver>(&mut self, driver: &mut D) {
        if self.attached {
            driver.detach(self.pin);
            self.attached = false;
        }
        self.power = 0;
    }

    /// Zero the power without changing attachment.
    pub fn neutral<D: ServoDriver>(&mut self, driver: &mut D) {
        self.power = 0;
        if self.attached {
            driver.write_pulse_us(self.pin, pulse_width_us(0));
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Move to a new channel. The caller stops the actuator first.
    pub(crate) fn reassign(&mut self, pin: u8) {
        debug_assert!(!self.attached);
        self.pin = pin;
    }

    #[inline]
    pub fn power(&self) -> i8 {
        self.power
    }

    #[inline]
    pub fn attached(&self) -> bool {
        self.attached
    }

    #[inline]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Replace the label. Kept to one line so it always fits the config file.
    pub fn set_description(&mut self, text: &str) {
        self.description = Label::single_line(text);
    }

    #[inline]
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    #[inline]
    pub(crate) fn calibration_mut(&mut self) -> &mut Calibration {
        &mut self.calibration
    }

    /// Persisted form of this actuator's settings.
    pub fn config(&self) -> ActuatorConfig {
        ActuatorConfig {
            pin: self.pin,
            full_turn_ms: self.calibration.full_turn_ms,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::mock::{MockDriver, Op};

    fn actuator() -> Actuator {
        Actuator::new(2, &ActuatorConfig::default_for(2))
    }

    #[test]
    fn set_power_attaches_and_clamps() {
        let mut drv = MockDriver::default();
        let mut a = actuator();

        for (req, stored) in [(150, 100), (-250, -100), (42, 42), (0, 0)] {
            assert_eq!(a.set_power(&mut drv, req), stored);
            assert_eq!(a.power(), stored);
            assert!(a.attached());
        }
        assert_eq!(drv.ops[0], Op::Attach(2));
        assert_eq!(drv.ops.iter().filter(|o| matches!(o, Op::Attach(_))).count(), 1);
        assert_eq!(drv.pulse_us[2], 1500);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut drv = MockDriver::default();
        let mut a = actuator();
        a.set_power(&mut drv, 60);

        a.stop(&mut drv);
        let once = a;
        a.stop(&mut drv);

        assert_eq!(a, once);
        assert!(!a.attached());
        assert_eq!(a.power(), 0);
        assert_eq!(drv.ops.iter().filter(|o| matches!(o, Op::Detach(_))).count(), 1);
    }

    #[test]
    fn neutral_keeps_attachment() {
        let mut drv = MockDriver::default();
        let mut a = actuator();

        a.neutral(&mut drv);
        assert!(!a.attached());
        assert!(drv.ops.is_empty());

        a.set_power(&mut drv, -40);
        a.neutral(&mut drv);
        assert!(a.attached());
        assert_eq!(a.power(), 0);
        assert_eq!(drv.ops.last(), Some(&Op::Pulse(2, 1500)));
    }

    #[test]
    fn long_description_is_truncated() {
        let mut a = actuator();
        a.set_description("a description that is far longer than thirty-two bytes");
        assert_eq!(a.description().len(), DESCRIPTION_LEN);
    }
}
