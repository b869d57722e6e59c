// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! In-RAM blob store with `FILES` slots of up to `CAP` bytes each.
//!
//! Contents are lost on reset; the firmware seeds it with defaults at boot.

use crate::label::Label;
use crate::storage::{BlobStore, StoreError};

/// Longest path the store accepts.
pub const PATH_LEN: usize = 48;

struct Entry<const CAP: usize> {
    path: Label<PATH_LEN>,
    data: [u8; CAP],
    len: usize,
}

pub struct MemStore<const FILES: usize, const CAP: usize> {
    entries: [Option<Entry<CAP>>; FILES],
}

impl<const FILES: usize, const CAP: usize> MemStore<FILES, CAP> {
    pub fn new() -> Self {
        Self {
            entries: core::array::from_fn(|_| None),
        }
    }

    fn find(&self, path: &str) -> Option<&Entry<CAP>> {
        self.entries.iter().flatten().find(|e| e.path == path)
    }

    /// Number of files stored.
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const FILES: usize, const CAP: usize> Default for MemStore<FILES, CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const FILES: usize, const CAP: usize> BlobStore for MemStore<FILES, CAP> {
    fn exists(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    fn read(&self, path: &str, buf: &mut [u8]) -> Result<usize, StoreError> {
        let entry = self.find(path).ok_or(StoreError::NotFound)?;
        let dst = buf.get_mut(..entry.len).ok_or(StoreError::TooLarge)?;
        dst.copy_from_slice(&entry.data[..entry.len]);
        Ok(entry.len)
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), StoreError> {
        if bytes.len() > CAP {
            return Err(StoreError::TooLarge);
        }
        let label = Label::<PATH_LEN>::exact(path).ok_or(StoreError::TooLarge)?;

        // Replace in place, else take the first free slot.
        let idx = self
            .entries
            .iter()
            .position(|e| matches!(e, Some(e) if e.path == path))
            .or_else(|| self.entries.iter().position(Option::is_none))
            .ok_or(StoreError::Full)?;

        let mut data = [0u8; CAP];
        data[..bytes.len()].copy_from_slice(bytes);
        self.entries[idx] = Some(Entry {
            path: label,
            data,
            len: bytes.len(),
        });
        Ok(())
    }

    fn delete(&mut self, path: &str) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|e| matches!(e, Some(e) if e.path == path))
        {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    fn list(&self, dir: &str, visit: &mut dyn FnMut(&str)) {
        for entry in self.entries.iter().flatten() {
            if let Some(name) = entry.path.as_str().strip_prefix(dir) {
                if !name.is_empty() && !name.contains('/') {
                    visit(name);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_replace_delete() {
        let mut store = MemStore::<4, 64>::new();
        store.write("/seq/a.txt", b"0,50,100").unwrap();
        assert!(store.exists("/seq/a.txt"));

        store.write("/seq/a.txt", b"1,20,5").unwrap();
        assert_eq!(store.len(), 1);

        let mut buf = [0u8; 64];
        let n = store.read("/seq/a.txt", &mut buf).unwrap();
        assert_eq!(&buf[..n], b"1,20,5");

        assert!(store.delete("/seq/a.txt"));
        assert!(!store.delete("/seq/a.txt"));
        assert_eq!(
            store.read("/seq/a.txt", &mut buf),
            Err(StoreError::NotFound)
        );
    }

    #[test]
    fn capacity_limits() {
        let mut store = MemStore::<1, 4>::new();
        assert_eq!(store.write("/a", b"12345"), Err(StoreError::TooLarge));
        store.write("/a", b"1234").unwrap();
        assert_eq!(store.write("/b", b"1"), Err(StoreError::Full));

        let mut small = [0u8; 2];
        assert_eq!(store.read("/a", &mut small), Err(StoreError::TooLarge));
    }

    #[test]
    fn list_only_direct_children() {
        let mut store = MemStore::<4, 8>::new();
        store.write("/seq/a.txt", b"").unwrap();
        store.write("/seq/b.txt", b"").unwrap();
        store.write("/seq/old/c.txt", b"").unwrap();
        store.write("/config.txt", b"").unwrap();

        let mut names = Vec::new();
        store.list("/seq/", &mut |n| names.push(n.to_string()));
        names.sort();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }
}
