// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Motion Control
//!
//! This module provides the cooperative, poll-driven motion scheduler.
//!
//! ## Modules
//!
//! - [`pulse`] - Per-actuator auto-stop timers.
//! - [`sequence`] - Background interpreter for timed step lists.
//! - [`calibration`] - Angle to timed-pulse conversion for open-loop moves.
//! - [`scheduler`] - `MotionScheduler`, which owns the actuators and ties the above together.

pub mod calibration;
pub mod pulse;
pub mod scheduler;
pub mod sequence;

pub use calibration::{angle_to_command, Calibration, MoveCommand};
pub use pulse::{PulseScheduler, PulseState};
pub use scheduler::MotionScheduler;
pub use sequence::{SequenceEngine, SequenceEvent, SequenceStatus, SequenceStep, Steps};
