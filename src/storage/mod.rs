// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Named-Blob Storage
//!
//! The scheduler persists its configuration and named sequences as small text files. The backing
//! store is abstracted behind [`BlobStore`] so the firmware can keep files in RAM (or flash) while
//! tests use the same in-memory implementation.
//!
//! ## Modules
//!
//! - [`mem`] - Fixed-capacity in-RAM store.
//! - [`sequence_file`] - Line-oriented sequence text format.

pub mod mem;
pub mod sequence_file;

pub use mem::MemStore;
pub use sequence_file::{parse_steps, write_steps};

use core::fmt;

/// Error type for [`BlobStore`] operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// No file at the path.
    NotFound,
    /// No free file slot.
    Full,
    /// File or path exceeds the store's (or the caller's buffer) capacity.
    TooLarge,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound => f.write_str("not found"),
            StoreError::Full => f.write_str("store full"),
            StoreError::TooLarge => f.write_str("too large"),
        }
    }
}

/// Read/write/list/delete of named byte blobs.
pub trait BlobStore {
    fn exists(&self, path: &str) -> bool;

    /// Copy the file into `buf`, returning its length.
    fn read(&self, path: &str, buf: &mut [u8]) -> Result<usize, StoreError>;

    /// Create or replace a file.
    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Remove a file. Returns false if it did not exist.
    fn delete(&mut self, path: &str) -> bool;

    /// Call `visit` with the name (relative to `dir`) of every file directly inside `dir`.
    fn list(&self, dir: &str, visit: &mut dyn FnMut(&str));
}

/// `core::fmt::Write` over a byte slice. Fails instead of truncating.
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.pos + s.len();
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.pos..end].copy_from_slice(s.as_bytes());
        self.pos = end;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn slice_writer_refuses_overflow() {
        let mut buf = [0u8; 8];
        let mut w = SliceWriter::new(&mut buf);
        write!(w, "0,50,").unwrap();
        assert!(write!(w, "1000").is_err());
        assert_eq!(w.written(), b"0,50,");
    }
}
