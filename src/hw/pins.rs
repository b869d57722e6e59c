// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 servo board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpiod, Alternate},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub usart1: Usart1Pins,
    pub tim3: Tim3ServoPins,
    pub tim4: Tim4ServoPins,
}

// USART1 TX/RX
pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// Servo headers 0–3 (TIM3 CH1–CH4).
pub struct Tim3ServoPins {
    pub ch1: gpioa::PA6<Alternate<2>>,
    pub ch2: gpioa::PA7<Alternate<2>>,
    pub ch3: gpiob::PB0<Alternate<2>>,
    pub ch4: gpiob::PB1<Alternate<2>>,
}

/// Servo headers 4–7 (TIM4 CH1–CH4).
pub struct Tim4ServoPins {
    pub ch1: gpiod::PD12<Alternate<2>>,
    pub ch2: gpiod::PD13<Alternate<2>>,
    pub ch3: gpiod::PD14<Alternate<2>>,
    pub ch4: gpiod::PD15<Alternate<2>>,
}

impl BoardPins {
    pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();

        Self {
            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },
            tim3: Tim3ServoPins {
                ch1: gpioa.pa6.into_alternate::<2>(),
                ch2: gpioa.pa7.into_alternate::<2>(),
                ch3: gpiob.pb0.into_alternate::<2>(),
                ch4: gpiob.pb1.into_alternate::<2>(),
            },
            tim4: Tim4ServoPins {
                ch1: gpiod.pd12.into_alternate::<2>(),
                ch2: gpiod.pd13.into_alternate::<2>(),
                ch3: gpiod.pd14.into_alternate::<2>(),
                ch4: gpiod.pd15.into_alternate::<2>(),
            },
        }
    }
}
