// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Top-level controller: scheduler, persisted files and remote buttons.
//!
//! The `Controller` is what the request layer talks to. It owns the [`MotionScheduler`], the blob
//! store holding the configuration and named sequences, and the remote button table. Diagnostics
//! go to any `core::fmt::Write` sink, normally the debug USART.

use core::fmt::Write;

use crate::config::{BoardConfig, CONFIG_PATH, NAME_LEN, SEQUENCE_DIR, SEQUENCE_EXT};
use crate::control::{MotionScheduler, SequenceStep};
use crate::drivers::ServoDriver;
use crate::error::{Error, Result, SequenceFault};
use crate::label::Label;
use crate::protocol::Command;
use crate::remote::{Action, RemoteKind, RemoteMapping, RemoteTable};
use crate::storage::{self, mem::PATH_LEN, BlobStore, SliceWriter, StoreError};
use crate::time::Millis;

/// Largest config or sequence file handled.
pub const FILE_BUF_LEN: usize = 4096;

pub struct Controller<D, S> {
    scheduler: MotionScheduler<D>,
    store: S,
    remotes: RemoteTable,
}

/// Returns true for 1–32 characters of `[A-Za-z0-9_-]`.
pub fn valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= NAME_LEN
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn sequence_path(name: &str) -> Result<Label<PATH_LEN>> {
    if !valid_name(name) {
        return Err(Error::InvalidName);
    }
    let mut path = Label::new();
    let _ = write!(path, "{}{}{}", SEQUENCE_DIR, name, SEQUENCE_EXT);
    Ok(path)
}

fn read_text<'b, S: BlobStore>(store: &S, path: &str, buf: &'b mut [u8]) -> Result<&'b str> {
    let n = store.read(path, buf)?;
    core::str::from_utf8(&buf[..n]).map_err(|_| Error::InvalidSequence(SequenceFault::Unreadable))
}

impl<D: ServoDriver, S: BlobStore> Controller<D, S> {
    /// Restore the configuration from `store` (or defaults) and start with everything stopped.
    pub fn boot(driver: D, store: S, log: &mut impl Write) -> Self {
        let mut buf = [0u8; FILE_BUF_LEN];
        let cfg = if store.exists(CONFIG_PATH) {
            match read_text(&store, CONFIG_PATH, &mut buf) {
                Ok(text) => BoardConfig::parse(text, log),
                Err(e) => {
                    let _ = write!(log, "config: {}, using defaults\r\n", e);
                    BoardConfig::default()
                }
            }
        } else {
            let _ = write!(log, "config: none stored, using defaults\r\n");
            BoardConfig::default()
        };

        Self {
            scheduler: MotionScheduler::new(driver, &cfg),
            store,
            remotes: cfg.remotes,
        }
    }

    /// Write the current actuator settings and remote table to the store.
    pub fn save_config(&mut self) -> Result<()> {
        let cfg = BoardConfig {
            actuators: self.scheduler.actuator_configs(),
            remotes: self.remotes.clone(),
        };

        let mut buf = [0u8; FILE_BUF_LEN];
        let mut w = SliceWriter::new(&mut buf);
        cfg.write_to(&mut w)
            .map_err(|_| Error::Store(StoreError::TooLarge))?;
        self.store.write(CONFIG_PATH, w.written())?;
        Ok(())
    }

    // ----- Sequences -----

    /// Validate sequence text and store it under `name`. Returns the number of valid steps.
    ///
    /// Malformed lines are reported to `log`; the text is stored as given.
    pub fn save_sequence(&mut self, name: &str, text: &str, log: &mut impl Write) -> Result<usize> {
        let path = sequence_path(name)?;
        let steps = storage::parse_steps(text, log)?;
        self.store.write(path.as_str(), text.as_bytes())?;
        Ok(steps.len())
    }

    /// Store a step list under `name` in the text format.
    pub fn store_steps(&mut self, name: &str, steps: &[SequenceStep]) -> Result<()> {
        let path = sequence_path(name)?;
        if steps.is_empty() {
            return Err(Error::InvalidSequence(SequenceFault::Empty));
        }

        let mut buf = [0u8; FILE_BUF_LEN];
        let mut w = SliceWriter::new(&mut buf);
        storage::write_steps(steps, &mut w).map_err(|_| Error::Store(StoreError::TooLarge))?;
        self.store.write(path.as_str(), w.written())?;
        Ok(())
    }

    /// Load the stored sequence `name` and start it, replacing any running sequence.
    pub fn run_sequence(&mut self, name: &str, log: &mut impl Write) -> Result<()> {
        let path = sequence_path(name)?;
        let mut buf = [0u8; FILE_BUF_LEN];
        let text = read_text(&self.store, path.as_str(), &mut buf)?;
        let steps = storage::parse_steps(text, log)?;
        self.scheduler.load_sequence(name, steps.as_slice())?;

        let _ = write!(log, "seq: {} started ({} steps)\r\n", name, steps.len());
        Ok(())
    }

    /// Start an in-memory step list under `name`, replacing any running sequence.
    pub fn load_sequence(&mut self, name: &str, steps: &[SequenceStep]) -> Result<()> {
        self.scheduler.load_sequence(name, steps)
    }

    /// Remove the stored sequence `name`. Returns false if there was none.
    pub fn delete_sequence(&mut self, name: &str) -> Result<bool> {
        let path = sequence_path(name)?;
        Ok(self.store.delete(path.as_str()))
    }

    /// Call `visit` with the name of every stored sequence.
    pub fn list_sequences(&self, visit: &mut dyn FnMut(&str)) {
        self.store.list(SEQUENCE_DIR, &mut |file: &str| {
            if let Some(name) = file.strip_suffix(SEQUENCE_EXT) {
                visit(name);
            }
        });
    }

    // ----- Remote buttons -----

    pub fn remotes(&self) -> &RemoteTable {
        &self.remotes
    }

    pub fn set_remote(&mut self, slot: usize, mapping: RemoteMapping) -> Result<()> {
        self.remotes.set(slot, mapping)
    }

    /// Perform whatever remote `slot` is mapped to.
    pub fn trigger_remote(&mut self, slot: usize, log: &mut impl Write) -> Result<()> {
        let mapping = *self.remotes.get(slot)?;

        match mapping.kind {
            RemoteKind::None => Ok(()),
            RemoteKind::Sequence => self.run_sequence(mapping.value.as_str(), log),
            RemoteKind::Action => match Action::parse(mapping.value.as_str()) {
                Some(Action::StopAll) => {
                    self.scheduler.stop_all();
                    Ok(())
                }
                Some(Action::CenterAll) => {
                    self.scheduler.center_all();
                    Ok(())
                }
                None => {
                    let _ = write!(log, "remote: unknown action '{}'\r\n", mapping.value);
                    Ok(())
                }
            },
        }
    }

    // ----- Requests -----

    /// Apply a command received from the console.
    pub fn execute(&mut self, cmd: Command, now: Millis, log: &mut impl Write) -> Result<()> {
        let s = &mut self.scheduler;

        match cmd {
            Command::SetPower { index, power } => {
                s.set_power(index as usize, power as i32)?;
            }
            Command::Stop { index } => s.stop(index as usize)?,
            Command::StopAll => s.stop_all(),
            Command::CenterAll => s.center_all(),
            Command::Pulse {
                index,
                power,
                duration_ms,
            } => s.pulse(index as usize, power as i32, duration_ms as u32, now)?,
            Command::MoveByAngle {
                index,
                angle_deg,
                power,
            } => s.move_by_angle(index as usize, angle_deg as f32, power, now)?,
            Command::SetFullTurn { index, ms } => {
                s.set_full_turn_ms(index as usize, ms as u32)?;
                self.persist(log);
            }
            Command::Recenter { index } => s.recalibrate_center(index as usize)?,
            Command::SetPin { index, pin } => {
                s.set_pin(index as usize, pin)?;
                self.persist(log);
            }
            Command::Remote { slot } => self.trigger_remote(slot as usize, log)?,
            Command::Status => {
                let _ = self.report(log);
            }
        }
        Ok(())
    }

    fn persist(&mut self, log: &mut impl Write) {
        if let Err(e) = self.save_config() {
            let _ = write!(log, "config: save failed: {}\r\n", e);
        }
    }

    /// Advance the scheduler. Call from the main loop.
    #[inline]
    pub fn tick(&mut self, now: Millis) {
        self.scheduler.tick(now);
    }

    /// Write one line per actuator plus the sequence state.
    pub fn report(&self, log: &mut impl Write) -> core::fmt::Result {
        for a in self.scheduler.actuators() {
            let cal = a.calibration();
            write!(
                log,
                "m{} pin={} power={} attached={} turn={}ms deg={:.1} center={:.1} \"{}\"\r\n",
                a.index(),
                a.pin(),
                a.power(),
                a.attached() as u8,
                cal.full_turn_ms,
                cal.current_deg,
                cal.center_deg,
                a.description(),
            )?;
        }

        let seq = self.scheduler.sequence_status();
        if seq.running {
            write!(
                log,
                "seq {} running step={}/{} active={}\r\n",
                seq.name, seq.step_index, seq.len, seq.step_active as u8
            )
        } else {
            write!(log, "seq idle\r\n")
        }
    }

    pub fn scheduler(&self) -> &MotionScheduler<D> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut MotionScheduler<D> {
        &mut self.scheduler
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
