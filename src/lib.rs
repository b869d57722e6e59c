// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # rotorbank Firmware
//!
//! This crate drives six continuous-rotation servos from an STM32F777 MCU. It offers live power
//! control, timed pulses that stop on their own, open-loop angle moves from per-motor calibration,
//! and stored multi-step motion sequences. All of it runs from one polling main loop that never
//! blocks.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`control`] | Motion scheduler: auto-stop timers, sequence engine, angle calibration |
//! | [`motors`] | Logical actuator state (power, attachment, calibration) |
//! | [`drivers`] | Servo output capability and power to pulse-width mapping |
//! | [`storage`] | Named-blob store and the sequence text format |
//! | [`protocol`] | Serial command framing |
//! | [`app`] | `Controller` tying scheduler, files and remote buttons together |
//! | `hw` | MCU-level wrappers for USART, SysTick and timer PWM (feature `firmware`) |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features firmware --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod label;
pub mod motors;
pub mod protocol;
pub mod remote;
pub mod storage;
pub mod time;

#[cfg(feature = "firmware")]
pub mod hw;

pub use app::Controller;
pub use control::MotionScheduler;
pub use error::{Error, Result};
