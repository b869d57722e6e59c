// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Servo outputs on STM32F7 timer PWM channels.
//!
//! Each channel runs at the servo frame rate (50 Hz, 20 ms period). A pulse width in µs becomes a
//! duty cycle of `us / 20000` of the channel's max duty. Detaching disables the channel output so
//! the servo sees no pulses at all.

use stm32f7xx_hal::prelude::*;

use crate::config::{PULSE_MID_US, SERVO_FRAME_HZ};
use crate::drivers::ServoDriver;

/// Borrowed PWM channel with 16-bit duty.
pub type PwmOutput<'a> = &'a mut dyn _embedded_hal_PwmPin<Duty = u16>;

const FRAME_US: u32 = 1_000_000 / SERVO_FRAME_HZ;

/// `N` PWM channels addressed by channel number `0..N`.
pub struct ServoBank<'a, const N: usize> {
    outputs: [PwmOutput<'a>; N],
}

impl<'a, const N: usize> ServoBank<'a, N> {
    /// Take the channels with every output disabled.
    pub fn new(mut outputs: [PwmOutput<'a>; N]) -> Self {
        for o in outputs.iter_mut() {
            o.disable();
        }
        Self { outputs }
    }

    fn duty_for(max_duty: u16, us: u16) -> u16 {
        (us as u32 * max_duty as u32 / FRAME_US) as u16
    }
}

impl<const N: usize> ServoDriver for ServoBank<'_, N> {
    fn attach(&mut self, channel: u8) {
        if let Some(o) = self.outputs.get_mut(channel as usize) {
            // Start from the stop pulse so the servo never sees a stale duty.
            let duty = Self::duty_for(o.get_max_duty(), PULSE_MID_US);
            o.set_duty(duty);
            o.enable();
        }
    }

    fn detach(&mut self, channel: u8) {
        if let Some(o) = self.outputs.get_mut(channel as usize) {
            o.disable();
        }
    }

    fn write_pulse_us(&mut self, channel: u8, us: u16) {
        if let Some(o) = self.outputs.get_mut(channel as usize) {
            let duty = Self::duty_for(o.get_max_duty(), us);
            o.set_duty(duty);
        }
    }
}
