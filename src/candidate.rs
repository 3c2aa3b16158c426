//! Candidate texts and the quick-reject pre-filter.
//!
//! A [`Candidate`] borrows one text to be scored and carries the presence
//! mask consulted by [`could_match`]. Candidates are cheap to build, one per
//! text, and discarded after scoring.

use crate::pattern::Pattern;
use crate::util::ByteSet;

/// Maximum candidate text length in bytes; spans and highlight columns are
/// carried in `u16` fields. Longer texts must be truncated or rejected by
/// the caller, the matcher never clips them silently.
pub const MAX_TEXT_LEN: usize = u16::MAX as usize;

/// A candidate text, e.g. a symbol name or a line of source.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<'a> {
    bytes: &'a [u8],
    present: ByteSet,
    column_offset: u16,
}

impl<'a> Candidate<'a> {
    /// Build a candidate whose text starts at column 0.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_column_offset(bytes, 0)
    }

    /// Build a candidate whose text starts at `column_offset` in its
    /// original line; the offset is added to every reported span bound and
    /// highlight column.
    ///
    /// `bytes` must not exceed [`MAX_TEXT_LEN`] (debug-asserted).
    pub fn with_column_offset(bytes: &'a [u8], column_offset: u16) -> Self {
        debug_assert!(
            bytes.len() <= MAX_TEXT_LEN,
            "candidate text of {} bytes exceeds the 16-bit length bound",
            bytes.len()
        );
        let mut present = ByteSet::default();
        for &byte in bytes {
            present.insert(byte.to_ascii_lowercase());
        }
        Self {
            bytes,
            present,
            column_offset,
        }
    }

    /// The candidate's text.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The text's starting column in its original line.
    pub fn column_offset(&self) -> u16 {
        self.column_offset
    }

    pub(crate) fn present(&self) -> &ByteSet {
        &self.present
    }
}

/// Cheap necessary-but-not-sufficient test: can `candidate` possibly contain
/// `pattern` as an ordered subsequence?
///
/// Checks that every distinct pattern byte occurs somewhere in the text,
/// ignoring order and ASCII case. A `false` answer guarantees [`score`]
/// would find no match; a `true` answer guarantees nothing. Skipping this
/// test and calling [`score`] directly only costs throughput, never
/// correctness.
///
/// [`score`]: crate::score()
pub fn could_match(pattern: &Pattern, candidate: &Candidate) -> bool {
    pattern.present().is_subset_of(candidate.present())
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;

    fn compiled(pattern: &[u8]) -> Pattern {
        Pattern::compile(pattern).unwrap()
    }

    #[test]
    fn test_rejects_missing_byte() {
        let candidate = Candidate::new(b"hello world");
        assert!(could_match(&compiled(b"hw"), &candidate));
        assert!(could_match(&compiled(b"dlrow"), &candidate)); // order-insensitive
        assert!(!could_match(&compiled(b"hwx"), &candidate));
    }

    #[test]
    fn test_case_insensitive() {
        let candidate = Candidate::new(b"FooBar");
        assert!(could_match(&compiled(b"FOB"), &candidate));
        assert!(could_match(&compiled(b"fob"), &candidate));
    }

    #[test]
    fn test_empty_pattern_passes() {
        assert!(could_match(&compiled(b""), &Candidate::new(b"anything")));
        assert!(could_match(&compiled(b""), &Candidate::new(b"")));
        assert!(!could_match(&compiled(b"a"), &Candidate::new(b"")));
    }

    #[test]
    fn test_column_offset() {
        let candidate = Candidate::with_column_offset(b"foo", 12);
        assert_eq!(candidate.column_offset(), 12);
        assert_eq!(candidate.bytes(), b"foo");
        assert_eq!(Candidate::new(b"foo").column_offset(), 0);
    }

    #[test]
    fn test_long_pattern_still_exact() {
        // Presence tracking does not degrade past the 64-index mask limit.
        let mut pattern = vec![b'a'; 70];
        pattern[69] = b'q';
        let with_q = Candidate::new(b"aaq");
        let without_q = Candidate::new(b"aaa");
        assert!(could_match(&compiled(&pattern), &with_q));
        assert!(!could_match(&compiled(&pattern), &without_q));
    }
}
