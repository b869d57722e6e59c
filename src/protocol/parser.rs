// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Message parser for the actuator command protocol.
//!
//! Bytes are fed in one at a time as they arrive on the serial port, so a frame may span many
//! main-loop passes without blocking.

use crate::protocol::messages::*;

enum State {
    WaitStart,
    WaitId,
    Payload { id: u8, len: usize, got: usize },
    WaitChecksum { id: u8, len: usize },
}

pub struct Parser {
    state: State,
    checksum: u8,
    payload: [u8; MAX_PAYLOAD],
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::WaitStart,
            checksum: 0,
            payload: [0; MAX_PAYLOAD],
        }
    }

    /// Process a single incoming byte. Returns `Some(Command)` if a complete packet is received.
    pub fn push(&mut self, byte: u8) -> Option<Command> {
        match self.state {
            State::WaitStart => {
                if byte == START_BYTE {
                    self.state = State::WaitId;
                    self.checksum = 0;
                }
            }
            State::WaitId => {
                self.checksum = self.checksum.wrapping_add(byte);

                self.state = match payload_len(byte) {
                    Some(0) => State::WaitChecksum { id: byte, len: 0 },
                    Some(len) => State::Payload {
                        id: byte,
                        len,
                        got: 0,
                    },
                    // Unknown message ID, reset state
                    None => State::WaitStart,
                };
            }
            State::Payload { id, len, got } => {
                self.checksum = self.checksum.wrapping_add(byte);
                self.payload[got] = byte;

                self.state = if got + 1 == len {
                    State::WaitChecksum { id, len }
                } else {
                    State::Payload {
                        id,
                        len,
                        got: got + 1,
                    }
                };
            }
            State::WaitChecksum { id, len } => {
                // Verify checksum
                let valid = byte == self.checksum;
                self.state = State::WaitStart; // Reset for next message

                if valid {
                    return Command::decode(id, &self.payload[..len]);
                }
            }
        }
        None
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
