// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command message protocol used to drive the actuators over the serial console.
//!
//! Frame: `START_BYTE, id, payload..., checksum`, where `checksum` is the wrapping sum of `id` and
//! the payload bytes. Multi-byte fields are big-endian.

/// Sync byte for the protocol.
pub const START_BYTE: u8 = 0xA5;

// Message IDs
pub const MSG_SET_POWER: u8 = 0x10;
pub const MSG_STOP: u8 = 0x11;
pub const MSG_STOP_ALL: u8 = 0x12;
pub const MSG_CENTER_ALL: u8 = 0x13;
pub const MSG_PULSE: u8 = 0x14;

pub const MSG_MOVE_ANGLE: u8 = 0x20;
pub const MSG_SET_FULL_TURN: u8 = 0x21;
pub const MSG_RECENTER: u8 = 0x22;
pub const MSG_SET_PIN: u8 = 0x23;

pub const MSG_REMOTE: u8 = 0x30;
pub const MSG_STATUS: u8 = 0x40;

/// Longest payload of any message.
pub const MAX_PAYLOAD: usize = 4;

/// Payload length of message `id`, or `None` for unknown IDs.
pub fn payload_len(id: u8) -> Option<usize> {
    match id {
        MSG_STOP_ALL | MSG_CENTER_ALL | MSG_STATUS => Some(0),
        MSG_STOP | MSG_RECENTER | MSG_REMOTE => Some(1),
        MSG_SET_POWER | MSG_SET_PIN => Some(2),
        MSG_SET_FULL_TURN => Some(3),
        MSG_PULSE | MSG_MOVE_ANGLE => Some(4),
        _ => None,
    }
}

/// Decoded commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetPower { index: u8, power: i8 },
    Stop { index: u8 },
    StopAll,
    CenterAll,
    /// Run at `power` for `duration_ms`, then stop.
    Pulse { index: u8, power: i8, duration_ms: u16 },
    MoveByAngle { index: u8, angle_deg: i16, power: u8 },
    SetFullTurn { index: u8, ms: u16 },
    Recenter { index: u8 },
    SetPin { index: u8, pin: u8 },
    /// Press remote button `slot`.
    Remote { slot: u8 },
    /// Print a status report to the console.
    Status,
}

impl Command {
    /// Decode a checksummed payload. `payload` has exactly `payload_len(id)` bytes.
    pub fn decode(id: u8, payload: &[u8]) -> Option<Self> {
        let be16 = |hi: u8, lo: u8| u16::from_be_bytes([hi, lo]);

        Some(match (id, payload) {
            (MSG_SET_POWER, &[index, power]) => Command::SetPower {
                index,
                power: power as i8,
            },
            (MSG_STOP, &[index]) => Command::Stop { index },
            (MSG_STOP_ALL, &[]) => Command::StopAll,
            (MSG_CENTER_ALL, &[]) => Command::CenterAll,
            (MSG_PULSE, &[index, power, hi, lo]) => Command::Pulse {
                index,
                power: power as i8,
                duration_ms: be16(hi, lo),
            },
            (MSG_MOVE_ANGLE, &[index, hi, lo, power]) => Command::MoveByAngle {
                index,
                angle_deg: be16(hi, lo) as i16,
                power,
            },
            (MSG_SET_FULL_TURN, &[index, hi, lo]) => Command::SetFullTurn {
                index,
                ms: be16(hi, lo),
            },
            (MSG_RECENTER, &[index]) => Command::Recenter { index },
            (MSG_SET_PIN, &[index, pin]) => Command::SetPin { index, pin },
            (MSG_REMOTE, &[slot]) => Command::Remote { slot },
            (MSG_STATUS, &[]) => Command::Status,
            _ => return None,
        })
    }
}
