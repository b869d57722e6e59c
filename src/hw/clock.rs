// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Millisecond clock driven by the SysTick exception.

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::{syst::SystClkSource, SYST};
use cortex_m_rt::exception;

use crate::time::{Clock, Millis};

static MILLIS: AtomicU32 = AtomicU32::new(0);

/// Owns SysTick and counts milliseconds since it was started. Wraps after ~49.7 days.
pub struct SysTickClock {
    _syst: SYST,
}

impl SysTickClock {
    /// Configure SysTick for a 1 kHz interrupt from the core clock.
    pub fn start(mut syst: SYST, sysclk_hz: u32) -> Self {
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(sysclk_hz / 1_000 - 1);
        syst.clear_current();
        syst.enable_interrupt();
        syst.enable_counter();
        Self { _syst: syst }
    }
}

impl Clock for SysTickClock {
    #[inline]
    fn now(&self) -> Millis {
        Millis(MILLIS.load(Ordering::Relaxed))
    }
}

#[exception]
fn SysTick() {
    MILLIS.fetch_add(1, Ordering::Relaxed);
}
