// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod clock;
pub mod pins;
pub mod servo_bank;
pub mod usart;

pub use clock::SysTickClock;
pub use pins::BoardPins;
pub use servo_bank::{PwmOutput, ServoBank};
pub use usart::Usart;
