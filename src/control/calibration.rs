// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Open-loop angle control for continuous-rotation servos.
//!
//! Each actuator is calibrated with the time it takes to turn 360° at full power. An angle request
//! becomes a power pulse whose length scales with the angle and inversely with the power. There is
//! no position feedback: the tracked angle is whatever was commanded, and it drifts from the real
//! shaft angle until the next [`recalibrate_center`](crate::control::MotionScheduler::recalibrate_center).

#[cfg(not(test))]
use micromath::F32Ext;

use crate::config::{DEFAULT_MOVE_POWER, MAX_DURATION_MS, MIN_MOVE_MS};

/// A signed power to hold for a duration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveCommand {
    pub power: i8,
    pub duration_ms: u32,
}

/// Calibration and open-loop angle estimate of one actuator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Calibration {
    /// Time for one full turn at 100 % power.
    pub full_turn_ms: u32,
    /// Degrees commanded since the last recalibration.
    pub current_deg: f32,
    /// `current_deg` at the last recalibration.
    pub center_deg: f32,
}

/// Convert a rotation of `angle_deg` at `abs_power` into a timed power command.
///
/// `abs_power` of 0 selects the default power; other values are clamped to 1..=100. The duration
/// is clamped to 10..=30000 ms. The sign of the angle selects the direction.
pub fn angle_to_command(full_turn_ms: u32, angle_deg: f32, abs_power: u8) -> MoveCommand {
    let power = match abs_power {
        0 => DEFAULT_MOVE_POWER,
        p => p.clamp(1, 100),
    };

    let turns = angle_deg.abs() / 360.0;
    let ms = full_turn_ms as f32 * turns * (100.0 / power as f32);
    let duration_ms = ms.clamp(MIN_MOVE_MS as f32, MAX_DURATION_MS as f32).round() as u32;

    let power = power as i8;
    MoveCommand {
        power: if angle_deg < 0.0 { -power } else { power },
        duration_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_turn_at_full_power() {
        let cmd = angle_to_command(1000, 180.0, 100);
        assert_eq!(cmd, MoveCommand { power: 100, duration_ms: 500 });
    }

    #[test]
    fn halving_power_doubles_duration() {
        let cmd = angle_to_command(1000, 180.0, 50);
        assert_eq!(cmd.duration_ms, 1000);
        assert_eq!(cmd.power, 50);
    }

    #[test]
    fn negative_angle_reverses() {
        let cmd = angle_to_command(1000, -90.0, 100);
        assert_eq!(cmd, MoveCommand { power: -100, duration_ms: 250 });
    }

    #[test]
    fn zero_power_uses_default_and_power_is_capped() {
        assert_eq!(angle_to_command(1000, 360.0, 0).power, DEFAULT_MOVE_POWER as i8);
        assert_eq!(angle_to_command(1000, 360.0, 0).duration_ms, 2000);
        assert_eq!(angle_to_command(1000, 360.0, 250).power, 100);
    }

    #[test]
    fn duration_is_clamped() {
        assert_eq!(angle_to_command(1000, 1.0, 100).duration_ms, MIN_MOVE_MS);
        assert_eq!(angle_to_command(60_000, 3600.0, 1).duration_ms, MAX_DURATION_MS);
    }
}
