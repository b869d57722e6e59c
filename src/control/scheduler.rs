// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Non-blocking motion scheduler for the six actuators.
//!
//! `MotionScheduler` exclusively owns the actuator table, the auto-stop timers and the sequence
//! engine. Requests mutate it through the methods below; the main loop calls
//! [`tick`](MotionScheduler::tick) as often as it can.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! scheduler.move_by_angle(0, 90.0, 60, clock.now())?;
//!
//! loop {
//!     poll_console(&mut scheduler);
//!     scheduler.tick(clock.now());
//! }
//! ```
//!
//! Nothing here sleeps or waits. Timing resolution is the interval between ticks, so the loop should
//! run well under a millisecond per pass; the shortest pulse is 10 ms.

use crate::config::{
    pin_allowed, ActuatorConfig, BoardConfig, FULL_TURN_MAX_MS, FULL_TURN_MIN_MS, NUM_ACTUATORS,
};
use crate::control::calibration::{angle_to_command, Calibration, MoveCommand};
use crate::control::pulse::{PulseScheduler, PulseState};
use crate::control::sequence::{SequenceEngine, SequenceEvent, SequenceStatus, SequenceStep};
use crate::drivers::ServoDriver;
use crate::error::{Error, Result};
use crate::motors::Actuator;
use crate::time::Millis;

pub struct MotionScheduler<D> {
    driver: D,
    actuators: [Actuator; NUM_ACTUATORS],
    pulses: PulseScheduler,
    sequence: SequenceEngine,
}

#[inline]
fn check(index: usize) -> Result<usize> {
    if index < NUM_ACTUATORS {
        Ok(index)
    } else {
        Err(Error::InvalidIndex)
    }
}

impl<D: ServoDriver> MotionScheduler<D> {
    /// All actuators start detached at power 0 with idle timers and no sequence.
    pub fn new(driver: D, cfg: &BoardConfig) -> Self {
        Self {
            driver,
            actuators: core::array::from_fn(|i| Actuator::new(i, &cfg.actuators[i])),
            pulses: PulseScheduler::new(),
            sequence: SequenceEngine::new(),
        }
    }

    // ----- Power model -----

    /// Set the power of actuator `index` (clamped to -100..=100), attaching it if needed.
    ///
    /// A resulting power of 0 cancels any armed auto-stop. Returns the stored power.
    pub fn set_power(&mut self, index: usize, power: i32) -> Result<i8> {
        let i = check(index)?;
        Ok(self.apply_power(i, power))
    }

    fn apply_power(&mut self, i: usize, power: i32) -> i8 {
        let stored = self.actuators[i].set_power(&mut self.driver, power);
        if stored == 0 {
            self.pulses.cancel(i);
        }
        stored
    }

    /// Detach actuator `index`, zero its power and cancel its auto-stop.
    pub fn stop(&mut self, index: usize) -> Result<()> {
        let i = check(index)?;
        self.actuators[i].stop(&mut self.driver);
        self.pulses.cancel(i);
        Ok(())
    }

    /// Stop and detach every actuator.
    pub fn stop_all(&mut self) {
        for a in self.actuators.iter_mut() {
            a.stop(&mut self.driver);
        }
        self.pulses.cancel_all();
    }

    /// Bring every actuator to power 0 without detaching any.
    pub fn center_all(&mut self) {
        self.neutral_all();
    }

    fn neutral_all(&mut self) {
        for a in self.actuators.iter_mut() {
            a.neutral(&mut self.driver);
        }
        self.pulses.cancel_all();
    }

    /// Move actuator `index` to PWM channel `pin`.
    ///
    /// A change of channel stops and detaches the actuator first.
    pub fn set_pin(&mut self, index: usize, pin: u8) -> Result<()> {
        let i = check(index)?;
        if !pin_allowed(pin) {
            return Err(Error::InvalidPin);
        }
        if self.actuators[i].pin() != pin {
            self.actuators[i].stop(&mut self.driver);
            self.pulses.cancel(i);
            self.actuators[i].reassign(pin);
        }
        Ok(())
    }

    /// Replace the free-text label (one line, at most 32 bytes).
    pub fn set_description(&mut self, index: usize, text: &str) -> Result<()> {
        let i = check(index)?;
        self.actuators[i].set_description(text);
        Ok(())
    }

    // ----- Pulse scheduler -----

    /// Arm the auto-stop of actuator `index` to fire `duration_ms` from `now` (0 disarms).
    pub fn arm(&mut self, index: usize, duration_ms: u32, now: Millis) -> Result<()> {
        let i = check(index)?;
        self.pulses.arm(i, duration_ms, now);
        Ok(())
    }

    /// Run actuator `index` at `power` for `duration_ms`, then revert to stop.
    ///
    /// With a zero duration the power is held until changed.
    pub fn pulse(&mut self, index: usize, power: i32, duration_ms: u32, now: Millis) -> Result<()> {
        let i = check(index)?;
        if self.apply_power(i, power) != 0 {
            self.pulses.arm(i, duration_ms, now);
        }
        Ok(())
    }

    // ----- Calibration -----

    /// Power and duration that would turn actuator `index` by `angle_deg`.
    pub fn angle_to_command(&self, index: usize, angle_deg: f32, abs_power: u8) -> Result<MoveCommand> {
        let i = check(index)?;
        let full_turn_ms = self.actuators[i].calibration().full_turn_ms;
        Ok(angle_to_command(full_turn_ms, angle_deg, abs_power))
    }

    /// Turn actuator `index` by `angle_deg` using a timed pulse.
    ///
    /// The angle estimate is updated immediately and is never corrected afterwards.
    pub fn move_by_angle(
        &mut self,
        index: usize,
        angle_deg: f32,
        abs_power: u8,
        now: Millis,
    ) -> Result<()> {
        let i = check(index)?;
        if angle_deg == 0.0 || !angle_deg.is_finite() {
            return Ok(());
        }

        let cmd = self.angle_to_command(i, angle_deg, abs_power)?;
        self.apply_power(i, cmd.power as i32);
        self.pulses.arm(i, cmd.duration_ms, now);
        self.actuators[i].calibration_mut().current_deg += angle_deg;
        Ok(())
    }

    /// Make the current angle estimate the new zero, remembering the old one as the center.
    pub fn recalibrate_center(&mut self, index: usize) -> Result<()> {
        let i = check(index)?;
        let cal = self.actuators[i].calibration_mut();
        cal.center_deg = cal.current_deg;
        cal.current_deg = 0.0;
        Ok(())
    }

    /// Set the full-turn time (clamped to 100..=60000 ms). Returns the stored value.
    pub fn set_full_turn_ms(&mut self, index: usize, ms: u32) -> Result<u32> {
        let i = check(index)?;
        let ms = ms.clamp(FULL_TURN_MIN_MS, FULL_TURN_MAX_MS);
        self.actuators[i].calibration_mut().full_turn_ms = ms;
        Ok(ms)
    }

    // ----- Sequence engine -----

    /// Start a new sequence, cancelling any current one.
    ///
    /// On success every actuator is brought to power 0 and every auto-stop is cleared before the
    /// first step runs on the next tick. A refused list changes nothing.
    pub fn load_sequence(&mut self, name: &str, steps: &[SequenceStep]) -> Result<()> {
        self.sequence.load(name, steps)?;
        self.neutral_all();
        Ok(())
    }

    // ----- Control loop -----

    /// Advance auto-stops, then the sequence, by one pass. Never blocks.
    pub fn tick(&mut self, now: Millis) {
        let Self {
            driver,
            actuators,
            pulses,
            ..
        } = self;
        pulses.expire(now, |i| actuators[i].neutral(driver));

        match self.sequence.tick(now) {
            SequenceEvent::Idle => {}
            SequenceEvent::Dispatch(step) => {
                self.apply_power(step.actuator(), step.power() as i32);
            }
            SequenceEvent::Finished => self.neutral_all(),
        }
    }

    // ----- Status -----

    pub fn actuator(&self, index: usize) -> Result<&Actuator> {
        self.actuators.get(index).ok_or(Error::InvalidIndex)
    }

    pub fn actuators(&self) -> &[Actuator] {
        &self.actuators
    }

    pub fn calibration(&self, index: usize) -> Result<&Calibration> {
        Ok(self.actuator(index)?.calibration())
    }

    pub fn pulse_state(&self, index: usize) -> Result<PulseState> {
        let i = check(index)?;
        Ok(self.pulses.state(i))
    }

    pub fn sequence_status(&self) -> SequenceStatus {
        self.sequence.status()
    }

    /// Persisted settings of every actuator.
    pub fn actuator_configs(&self) -> [ActuatorConfig; NUM_ACTUATORS] {
        core::array::from_fn(|i| self.actuators[i].config())
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }
}
