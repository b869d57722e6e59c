// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Servo Output Drivers
//!
//! This module defines the capability the scheduler needs from the hardware: attach a PWM channel,
//! detach it, and set its pulse width. The board implementation lives in
//! [`hw::ServoBank`](crate::hw) behind the `firmware` feature.
//!
//! ## Modules
//!
//! - [`continuous_servo`] – Power to pulse-width mapping for continuous-rotation servos.

pub mod continuous_servo;

pub use continuous_servo::pulse_width_us;

/// PWM output capability for servo-style actuators.
///
/// `channel` is an abstract output number from [`ALLOWED_PINS`](crate::config::ALLOWED_PINS).
/// Output is driven at a fixed frame rate; only the high time changes.
pub trait ServoDriver {
    /// Start emitting pulses on `channel`.
    fn attach(&mut self, channel: u8);

    /// Stop emitting pulses on `channel`. Detaching an idle channel is harmless.
    fn detach(&mut self, channel: u8);

    /// Set the pulse high time on `channel` in microseconds.
    fn write_pulse_us(&mut self, channel: u8, us: u16);
}

impl<T: ServoDriver + ?Sized> ServoDriver for &mut T {
    fn attach(&mut self, channel: u8) {
        (**self).attach(channel)
    }

    fn detach(&mut self, channel: u8) {
        (**self).detach(channel)
    }

    fn write_pulse_us(&mut self, channel: u8, us: u16) {
        (**self).write_pulse_us(channel, us)
    }
}
