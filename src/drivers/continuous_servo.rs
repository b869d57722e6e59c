// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Power mapping for continuous-rotation servos.
//!
//! These servos read the standard 1–2 ms hobby pulse as a speed command: 1500 µs holds still,
//! shorter pulses turn one way, longer pulses the other.

use crate::config::{MAX_POWER, MIN_POWER, PULSE_MAX_US, PULSE_MID_US, PULSE_MIN_US};

/// Map a signed power (-100..=100, clamped) to a pulse width.
///
/// Linear through (-100, 1000 µs), (0, 1500 µs) and (100, 2000 µs).
pub fn pulse_width_us(power: i8) -> u16 {
    let p = power.clamp(MIN_POWER, MAX_POWER) as i32;
    let half_span = (PULSE_MAX_US - PULSE_MIN_US) as i32 / 2;
    (PULSE_MID_US as i32 + p * half_span / MAX_POWER as i32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_at_named_points() {
        assert_eq!(pulse_width_us(-100), PULSE_MIN_US);
        assert_eq!(pulse_width_us(0), PULSE_MID_US);
        assert_eq!(pulse_width_us(100), PULSE_MAX_US);
        assert_eq!(pulse_width_us(50), 1750);
        assert_eq!(pulse_width_us(-30), 1350);
    }

    #[test]
    fn monotonic_and_clamped() {
        let mut prev = pulse_width_us(i8::MIN);
        assert_eq!(prev, PULSE_MIN_US);
        for p in i8::MIN + 1..=i8::MAX {
            let us = pulse_width_us(p);
            assert!(us >= prev);
            prev = us;
        }
        assert_eq!(prev, PULSE_MAX_US);
    }
}
