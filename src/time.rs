// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Millisecond timestamps for the polling scheduler.
//!
//! All timing is measured against a free-running `u32` millisecond counter that wraps roughly
//! every 49.7 days. Deadlines are compared with a signed difference so that a deadline armed just
//! before the wrap still fires just after it.

/// A point on the wrapping millisecond counter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Millis(pub u32);

impl Millis {
    /// Timestamp `ms` milliseconds after `self`, wrapping on overflow.
    #[inline]
    pub fn after(self, ms: u32) -> Self {
        Millis(self.0.wrapping_add(ms))
    }

    /// Returns true once `self` is at or past `deadline`.
    ///
    /// Valid as long as the two timestamps are less than 2^31 ms apart.
    #[inline]
    pub fn reached(self, deadline: Millis) -> bool {
        (self.0.wrapping_sub(deadline.0) as i32) >= 0
    }
}

/// Monotonic millisecond clock.
pub trait Clock {
    fn now(&self) -> Millis;
}
