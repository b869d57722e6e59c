// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Background interpreter for timed step lists.
//!
//! A run alternates between two states: `StepPending` (dispatch the next step on this tick) and
//! `StepRunning` (wait for the current step's duration, then dispatch the next one on the tick that
//! reaches the deadline). The engine never touches actuators
//! itself; [`SequenceEngine::tick`] returns a [`SequenceEvent`] and the owning
//! [`MotionScheduler`](crate::control::MotionScheduler) applies it.
//!
//! At most one step is dispatched per tick, so zero-duration steps run back to back on
//! successive ticks.

use crate::config::{MAX_DURATION_MS, MAX_POWER, MAX_STEPS, MIN_POWER, NAME_LEN, NUM_ACTUATORS};
use crate::error::{Error, Result, SequenceFault};
use crate::label::Label;
use crate::time::Millis;

/// One timed power command.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceStep {
    actuator: u8,
    power: i8,
    duration_ms: u16,
}

impl SequenceStep {
    /// Build a step. Power and duration are clamped into range; the actuator index must be valid.
    pub fn new(actuator: usize, power: i32, duration_ms: i64) -> Result<Self> {
        if actuator >= NUM_ACTUATORS {
            return Err(Error::InvalidIndex);
        }
        Ok(Self {
            actuator: actuator as u8,
            power: power.clamp(MIN_POWER as i32, MAX_POWER as i32) as i8,
            duration_ms: duration_ms.clamp(0, MAX_DURATION_MS as i64) as u16,
        })
    }

    #[inline]
    pub fn actuator(&self) -> usize {
        self.actuator as usize
    }

    #[inline]
    pub fn power(&self) -> i8 {
        self.power
    }

    #[inline]
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms as u32
    }
}

/// Bounded step list.
#[derive(Clone)]
pub struct Steps {
    buf: [SequenceStep; MAX_STEPS],
    len: usize,
}

impl Steps {
    pub fn new() -> Self {
        Self {
            buf: [SequenceStep::default(); MAX_STEPS],
            len: 0,
        }
    }

    /// Append a step. Fails with `TooLong` once the buffer is full.
    pub fn push(&mut self, step: SequenceStep) -> Result<()> {
        let slot = self
            .buf
            .get_mut(self.len)
            .ok_or(Error::InvalidSequence(SequenceFault::TooLong))?;
        *slot = step;
        self.len += 1;
        Ok(())
    }

    #[inline]
    pub fn as_slice(&self) -> &[SequenceStep] {
        &self.buf[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for Steps {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Steps {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum RunState {
    Idle,
    StepPending,
    StepRunning { end: Millis },
}

/// What the owner must do after a tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SequenceEvent {
    /// Nothing to apply.
    Idle,
    /// Apply this step's power now.
    Dispatch(SequenceStep),
    /// The last step has elapsed; bring every actuator to power 0.
    Finished,
}

/// Read-only view of the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SequenceStatus {
    pub name: Label<NAME_LEN>,
    pub running: bool,
    /// Index of the next step to dispatch.
    pub step_index: usize,
    pub step_active: bool,
    pub len: usize,
}

pub struct SequenceEngine {
    steps: Steps,
    name: Label<NAME_LEN>,
    next: usize,
    state: RunState,
}

impl SequenceEngine {
    pub fn new() -> Self {
        Self {
            steps: Steps::new(),
            name: Label::new(),
            next: 0,
            state: RunState::Idle,
        }
    }

    /// Replace any current run with `steps`, starting at the first step on the next tick.
    ///
    /// Empty or over-capacity lists are refused and the current run is left untouched.
    pub fn load(&mut self, name: &str, steps: &[SequenceStep]) -> Result<()> {
        if steps.is_empty() {
            return Err(Error::InvalidSequence(SequenceFault::Empty));
        }
        if steps.len() > MAX_STEPS {
            return Err(Error::InvalidSequence(SequenceFault::TooLong));
        }

        self.steps.buf[..steps.len()].copy_from_slice(steps);
        self.steps.len = steps.len();
        self.name = Label::truncated(name);
        self.next = 0;
        self.state = RunState::StepPending;
        Ok(())
    }

    /// Advance the run by at most one step.
    pub fn tick(&mut self, now: Millis) -> SequenceEvent {
        match self.state {
            RunState::Idle => SequenceEvent::Idle,
            RunState::StepPending => self.dispatch_next(now),
            RunState::StepRunning { end } if now.reached(end) => self.dispatch_next(now),
            RunState::StepRunning { .. } => SequenceEvent::Idle,
        }
    }

    fn dispatch_next(&mut self, now: Millis) -> SequenceEvent {
        let Some(&step) = self.steps.as_slice().get(self.next) else {
            self.state = RunState::Idle;
            return SequenceEvent::Finished;
        };
        self.next += 1;
        self.state = match step.duration_ms() {
            0 => RunState::StepPending,
            d => RunState::StepRunning { end: now.after(d) },
        };
        SequenceEvent::Dispatch(step)
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.state != RunState::Idle
    }

    pub fn status(&self) -> SequenceStatus {
        SequenceStatus {
            name: self.name,
            running: self.running(),
            step_index: self.next,
            step_active: matches!(self.state, RunState::StepRunning { .. }),
            len: self.steps.len(),
        }
    }
}

impl Default for SequenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(a: usize, p: i32, d: i64) -> SequenceStep {
        SequenceStep::new(a, p, d).unwrap()
    }

    #[test]
    fn step_construction_clamps() {
        let s = step(2, 150, 40_000);
        assert_eq!(s.power(), 100);
        assert_eq!(s.duration_ms(), 30_000);

        let s = step(0, -300, -5);
        assert_eq!(s.power(), -100);
        assert_eq!(s.duration_ms(), 0);

        assert_eq!(SequenceStep::new(6, 0, 0), Err(Error::InvalidIndex));
    }

    #[test]
    fn rejects_empty_and_oversized() {
        let mut engine = SequenceEngine::new();
        assert_eq!(
            engine.load("x", &[]),
            Err(Error::InvalidSequence(SequenceFault::Empty))
        );

        let big = [step(0, 10, 1); MAX_STEPS + 1];
        assert_eq!(
            engine.load("x", &big),
            Err(Error::InvalidSequence(SequenceFault::TooLong))
        );
        assert!(!engine.running());
    }

    #[test]
    fn rejected_load_keeps_current_run() {
        let mut engine = SequenceEngine::new();
        engine.load("a", &[step(0, 50, 100)]).unwrap();
        engine.tick(Millis(0));

        assert!(engine.load("b", &[]).is_err());
        let status = engine.status();
        assert!(status.running);
        assert_eq!(status.name, "a");
        assert_eq!(status.step_index, 1);
    }

    #[test]
    fn next_step_dispatches_at_deadline() {
        let mut engine = SequenceEngine::new();
        let (a, b) = (step(0, 50, 100), step(1, -20, 100));
        engine.load("s", &[a, b]).unwrap();

        assert_eq!(engine.tick(Millis(0)), SequenceEvent::Dispatch(a));
        assert_eq!(engine.tick(Millis(99)), SequenceEvent::Idle);
        assert!(engine.status().step_active);

        assert_eq!(engine.tick(Millis(100)), SequenceEvent::Dispatch(b));
        assert_eq!(engine.status().step_index, 2);

        assert_eq!(engine.tick(Millis(199)), SequenceEvent::Idle);
        assert_eq!(engine.tick(Millis(200)), SequenceEvent::Finished);
        assert!(!engine.running());
        assert_eq!(engine.tick(Millis(201)), SequenceEvent::Idle);
    }

    #[test]
    fn zero_duration_steps_take_one_tick_each() {
        let mut engine = SequenceEngine::new();
        let steps = [step(0, 10, 0), step(1, 20, 0), step(2, 30, 0)];
        engine.load("z", &steps).unwrap();

        let now = Millis(7);
        for s in steps {
            assert_eq!(engine.tick(now), SequenceEvent::Dispatch(s));
        }
        assert_eq!(engine.tick(now), SequenceEvent::Finished);
    }

    #[test]
    fn step_deadline_across_wrap() {
        let mut engine = SequenceEngine::new();
        engine.load("w", &[step(0, 50, 20)]).unwrap();

        let start = Millis(u32::MAX - 5);
        engine.tick(start);
        assert_eq!(engine.tick(Millis(u32::MAX)), SequenceEvent::Idle);
        assert_eq!(engine.tick(Millis(13)), SequenceEvent::Idle);
        assert!(engine.status().step_active);
        assert_eq!(engine.tick(Millis(14)), SequenceEvent::Finished);
    }
}
