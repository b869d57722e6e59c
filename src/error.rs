// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error type shared by the scheduler, storage and controller.

use core::fmt;

use crate::storage::StoreError;

pub type Result<T> = core::result::Result<T, Error>;

/// Why a step list was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SequenceFault {
    /// No valid steps.
    Empty,
    /// More steps than the engine can hold.
    TooLong,
    /// Stored text is not valid UTF-8.
    Unreadable,
}

/// Error type for scheduler and controller operations.
///
/// A rejected operation never leaves partial changes behind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Actuator or remote slot index out of range.
    InvalidIndex,
    /// Channel is not one of the board's PWM outputs.
    InvalidPin,
    /// Step list refused; nothing was loaded.
    InvalidSequence(SequenceFault),
    /// A single sequence line failed to parse (1-based line number).
    MalformedLine { line: usize },
    /// Sequence name is empty, too long or has characters outside `[A-Za-z0-9_-]`.
    InvalidName,
    /// Blob store failure.
    Store(StoreError),
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Error::Store(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidIndex => f.write_str("invalid index"),
            Error::InvalidPin => f.write_str("invalid pin"),
            Error::InvalidSequence(SequenceFault::Empty) => f.write_str("sequence has no steps"),
            Error::InvalidSequence(SequenceFault::TooLong) => f.write_str("sequence too long"),
            Error::InvalidSequence(SequenceFault::Unreadable) => {
                f.write_str("sequence is not valid text")
            }
            Error::MalformedLine { line } => write!(f, "malformed line {}", line),
            Error::InvalidName => f.write_str("invalid name"),
            Error::Store(e) => write!(f, "store: {}", e),
        }
    }
}
