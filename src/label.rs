// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed-capacity text without allocation.
//!
//! Used for actuator descriptions, sequence names and remote mapping values.

use core::fmt;

/// UTF-8 string stored inline in at most `N` bytes.
#[derive(Copy, Clone)]
pub struct Label<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Label<N> {
    /// Empty label.
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    /// Copy `s`, cutting it at the last char boundary that fits in `N` bytes.
    pub fn truncated(s: &str) -> Self {
        let mut end = s.len().min(N);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        let mut label = Self::new();
        label.buf[..end].copy_from_slice(&s.as_bytes()[..end]);
        label.len = end;
        label
    }

    /// Copy `s` as one line of persisted text: outer whitespace trimmed, control characters
    /// (including `\r` and `\n`) replaced by spaces, cut to fit without trailing whitespace.
    pub fn single_line(s: &str) -> Self {
        let mut label = Self::new();
        for c in s.trim().chars() {
            let c = if c.is_control() { ' ' } else { c };
            let mut utf8 = [0u8; 4];
            let bytes = c.encode_utf8(&mut utf8).as_bytes();
            let end = label.len + bytes.len();
            if end > N {
                break;
            }
            label.buf[label.len..end].copy_from_slice(bytes);
            label.len = end;
        }
        label.len = label.as_str().trim_end().len();
        label
    }

    /// Copy `s` if it fits in `N` bytes.
    pub fn exact(s: &str) -> Option<Self> {
        if s.len() > N {
            return None;
        }
        Some(Self::truncated(s))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        // Only ever filled from whole `&str` prefixes cut at char boundaries.
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> Default for Label<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PartialEq for Label<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<const N: usize> Eq for Label<N> {}

impl<const N: usize> PartialEq<str> for Label<N> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<const N: usize> PartialEq<&str> for Label<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<const N: usize> fmt::Debug for Label<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> fmt::Display for Label<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `core::fmt::Write` into a label, silently dropping what does not fit.
impl<const N: usize> fmt::Write for Label<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = N - self.len;
        let mut take = s.len().min(room);
        while !s.is_char_boundary(take) {
            take -= 1;
        }
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn truncates_on_char_boundary() {
        let l = Label::<4>::truncated("abcdef");
        assert_eq!(l, "abcd");

        // 'é' is two bytes; it must not be split.
        let l = Label::<4>::truncated("abcé");
        assert_eq!(l, "abc");
    }

    #[test]
    fn single_line_strips_line_breaks() {
        assert_eq!(Label::<32>::single_line("x\nremote,0,action,stop"), "x remote,0,action,stop");
        assert_eq!(Label::<16>::single_line("  a\r\nb\t "), "a  b");
        assert_eq!(Label::<8>::single_line(""), "");

        // Cut lands right after a space; it must not be kept.
        assert_eq!(Label::<6>::single_line("front wheel"), "front");
    }

    #[test]
    fn exact_rejects_overflow() {
        assert!(Label::<3>::exact("abcd").is_none());
        assert_eq!(Label::<3>::exact("abc").unwrap(), "abc");
    }

    #[test]
    fn formatted_writes_are_bounded() {
        let mut l = Label::<8>::new();
        write!(l, "Motor {}", 12345).unwrap();
        assert_eq!(l, "Motor 12");
    }
}
