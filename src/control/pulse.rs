// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Per-actuator auto-stop timers.
//!
//! Arming a timer lets a caller run an actuator for a bounded time without waiting for it. The
//! timers are polled: [`PulseScheduler::expire`] reports each timer whose deadline has passed
//! exactly once and returns it to idle.

use crate::config::{MAX_DURATION_MS, NUM_ACTUATORS};
use crate::time::Millis;

/// Timer state of one actuator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PulseState {
    #[default]
    Idle,
    Pending { end: Millis },
}

#[derive(Debug, Default)]
pub struct PulseScheduler {
    slots: [PulseState; NUM_ACTUATORS],
}

impl PulseScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer of `index` to fire `duration_ms` after `now`.
    ///
    /// A zero duration clears the timer. Durations are capped at 30 s.
    pub fn arm(&mut self, index: usize, duration_ms: u32, now: Millis) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        *slot = match duration_ms {
            0 => PulseState::Idle,
            d => PulseState::Pending {
                end: now.after(d.min(MAX_DURATION_MS)),
            },
        };
    }

    pub fn cancel(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = PulseState::Idle;
        }
    }

    pub fn cancel_all(&mut self) {
        self.slots = [PulseState::Idle; NUM_ACTUATORS];
    }

    /// Idle every timer whose deadline is reached and call `fired` with its index.
    pub fn expire(&mut self, now: Millis, mut fired: impl FnMut(usize)) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let PulseState::Pending { end } = *slot {
                if now.reached(end) {
                    *slot = PulseState::Idle;
                    fired(i);
                }
            }
        }
    }

    #[inline]
    pub fn state(&self, index: usize) -> PulseState {
        self.slots.get(index).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fired_at(p: &mut PulseScheduler, now: u32) -> Vec<usize> {
        let mut out = Vec::new();
        p.expire(Millis(now), |i| out.push(i));
        out
    }

    #[test]
    fn fires_once_at_deadline() {
        let mut p = PulseScheduler::new();
        p.arm(3, 50, Millis(1_000));

        assert!(fired_at(&mut p, 1_049).is_empty());
        assert_eq!(fired_at(&mut p, 1_050), [3]);
        assert!(fired_at(&mut p, 1_051).is_empty());
        assert_eq!(p.state(3), PulseState::Idle);
    }

    #[test]
    fn rearm_replaces_previous_deadline() {
        let mut p = PulseScheduler::new();
        p.arm(0, 100, Millis(0));
        p.arm(0, 300, Millis(50));

        assert!(fired_at(&mut p, 100).is_empty());
        assert_eq!(fired_at(&mut p, 350), [0]);
    }

    #[test]
    fn zero_duration_clears_and_long_duration_is_capped() {
        let mut p = PulseScheduler::new();
        p.arm(1, 500, Millis(0));
        p.arm(1, 0, Millis(10));
        assert_eq!(p.state(1), PulseState::Idle);

        p.arm(2, 90_000, Millis(0));
        assert_eq!(
            p.state(2),
            PulseState::Pending {
                end: Millis(MAX_DURATION_MS)
            }
        );
    }

    #[test]
    fn fires_across_counter_wrap() {
        let mut p = PulseScheduler::new();
        p.arm(4, 40, Millis(u32::MAX - 9));

        assert!(fired_at(&mut p, u32::MAX).is_empty());
        assert!(fired_at(&mut p, 29).is_empty());
        assert_eq!(fired_at(&mut p, 30), [4]);
        assert!(fired_at(&mut p, 31).is_empty());
    }

    #[test]
    fn timers_are_independent() {
        let mut p = PulseScheduler::new();
        p.arm(0, 10, Millis(0));
        p.arm(5, 20, Millis(0));

        assert_eq!(fired_at(&mut p, 15), [0]);
        assert_eq!(fired_at(&mut p, 25), [5]);
    }
}
