// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Actuator Abstractions
//!
//! This module contains the actuator-level state that sits above the output drivers in `drivers`.
//!
//! ## Modules
//!
//! - [`actuator`] - Power, attachment, description and calibration of one continuous servo.

pub mod actuator;

pub use actuator::Actuator;
