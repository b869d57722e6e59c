// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Remote button mappings.
//!
//! Each of the six remote slots points at a stored sequence, a built-in action, or nothing. The
//! table is a plain lookup; [`Controller::trigger_remote`](crate::app::Controller::trigger_remote)
//! does the dispatch.

use crate::config::{NUM_REMOTE_SLOTS, REMOTE_VALUE_LEN};
use crate::error::{Error, Result};
use crate::label::Label;

/// What a remote slot refers to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RemoteKind {
    #[default]
    None,
    /// Name of a stored sequence.
    Sequence,
    /// Name of a built-in [`Action`].
    Action,
}

impl RemoteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RemoteKind::None => "none",
            RemoteKind::Sequence => "seq",
            RemoteKind::Action => "action",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(RemoteKind::None),
            "seq" => Some(RemoteKind::Sequence),
            "action" => Some(RemoteKind::Action),
            _ => None,
        }
    }
}

/// Built-in actions a remote slot can trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Stop and detach every actuator.
    StopAll,
    /// Bring every actuator to power 0 without detaching.
    CenterAll,
}

impl Action {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "stop" => Some(Action::StopAll),
            "center" => Some(Action::CenterAll),
            _ => None,
        }
    }
}

/// One remote slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RemoteMapping {
    pub kind: RemoteKind,
    pub value: Label<REMOTE_VALUE_LEN>,
}

impl RemoteMapping {
    pub fn new(kind: RemoteKind, value: &str) -> Self {
        Self {
            kind,
            value: Label::single_line(value),
        }
    }
}

/// Fixed table of remote slots.
#[derive(Clone, Debug, Default)]
pub struct RemoteTable {
    slots: [RemoteMapping; NUM_REMOTE_SLOTS],
}

impl RemoteTable {
    pub fn get(&self, slot: usize) -> Result<&RemoteMapping> {
        self.slots.get(slot).ok_or(Error::InvalidIndex)
    }

    pub fn set(&mut self, slot: usize, mapping: RemoteMapping) -> Result<()> {
        let entry = self.slots.get_mut(slot).ok_or(Error::InvalidIndex)?;
        *entry = mapping;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RemoteMapping> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_slot() {
        let mut table = RemoteTable::default();
        table
            .set(2, RemoteMapping::new(RemoteKind::Sequence, "wave"))
            .unwrap();

        let m = table.get(2).unwrap();
        assert_eq!(m.kind, RemoteKind::Sequence);
        assert_eq!(m.value, "wave");
        assert_eq!(table.get(0).unwrap().kind, RemoteKind::None);
    }

    #[test]
    fn out_of_range_slot_is_rejected() {
        let mut table = RemoteTable::default();
        assert_eq!(table.get(6).unwrap_err(), Error::InvalidIndex);
        assert_eq!(
            table.set(6, RemoteMapping::default()).unwrap_err(),
            Error::InvalidIndex
        );
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in [RemoteKind::None, RemoteKind::Sequence, RemoteKind::Action] {
            assert_eq!(RemoteKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RemoteKind::parse("macro"), None);
    }
}
