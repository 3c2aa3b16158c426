//! Query pattern compilation.
//!
//! A [`Pattern`] is built once per query and reused across every candidate
//! scored against it. Compilation precomputes two lookup structures:
//!
//! - a per-byte-value mask of the pattern indices where that byte occurs
//!   (ASCII letters are registered under both cases, so matching stays
//!   case-insensitive without re-folding candidate text), and
//! - the set of distinct folded byte values in the pattern, consumed by the
//!   quick-reject pre-filter.
//!
//! The position masks track the first [`TRACKED_POSITIONS`] indices exactly;
//! longer patterns fall back to direct byte comparison past that point and
//! still match correctly up to [`MAX_PATTERN_LEN`].

use thiserror::Error;

use crate::util::ByteSet;

/// Maximum pattern length in bytes; lengths are carried in `u16` fields.
pub const MAX_PATTERN_LEN: usize = u16::MAX as usize;

/// Number of pattern indices tracked bit-exactly by the position masks.
pub const TRACKED_POSITIONS: usize = 64;

/// Error raised when compiling a query pattern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern does not fit the 16-bit length field. Non-retryable:
    /// truncate or reject the query before compiling.
    #[error("pattern is {len} bytes, longer than the maximum of {MAX_PATTERN_LEN}")]
    TooLong {
        /// Length of the rejected pattern, in bytes.
        len: usize,
    },
}

/// A compiled query pattern.
///
/// Immutable after compilation and safe to share across threads scoring
/// candidates in parallel.
#[derive(Clone, PartialEq)]
pub struct Pattern {
    bytes: Vec<u8>,
    /// positions[b] bit i set ⇔ pattern byte i equals b (mod ASCII case),
    /// for i < TRACKED_POSITIONS.
    positions: [u64; 256],
    present: ByteSet,
    case_folded: bool,
}

impl Pattern {
    /// Compile `pattern` into the lookup structures used for matching.
    ///
    /// Pure and idempotent: the same bytes always produce a pattern with
    /// identical matching behavior.
    ///
    /// # Errors
    ///
    /// [`PatternError::TooLong`] if `pattern` exceeds [`MAX_PATTERN_LEN`].
    pub fn compile(pattern: &[u8]) -> Result<Self, PatternError> {
        if pattern.len() > MAX_PATTERN_LEN {
            return Err(PatternError::TooLong { len: pattern.len() });
        }

        let mut positions = [0u64; 256];
        let mut present = ByteSet::default();
        let mut case_folded = true;

        for (i, &byte) in pattern.iter().enumerate() {
            if byte.is_ascii_uppercase() {
                case_folded = false;
            }
            present.insert(byte.to_ascii_lowercase());
            if i < TRACKED_POSITIONS {
                let bit = 1u64 << i;
                positions[byte as usize] |= bit;
                if byte.is_ascii_alphabetic() {
                    positions[(byte ^ 0x20) as usize] |= bit;
                }
            }
        }

        debug!("compiled {}-byte pattern (case_folded: {})", pattern.len(), case_folded);

        Ok(Self {
            bytes: pattern.to_vec(),
            positions,
            present,
            case_folded,
        })
    }

    /// The raw pattern bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Pattern length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the pattern is empty. An empty pattern matches every text
    /// with score 0.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True if the pattern contains no upper-case ASCII letter.
    pub fn case_folded(&self) -> bool {
        self.case_folded
    }

    /// Whether text byte `byte` matches the pattern byte at `index`,
    /// ignoring ASCII case.
    #[inline]
    pub(crate) fn matches_at(&self, index: usize, byte: u8) -> bool {
        if index < TRACKED_POSITIONS {
            self.positions[byte as usize] & (1u64 << index) != 0
        } else {
            self.bytes[index].eq_ignore_ascii_case(&byte)
        }
    }

    /// Distinct folded byte values occurring anywhere in the pattern.
    #[inline]
    pub(crate) fn present(&self) -> &ByteSet {
        &self.present
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("bytes", &String::from_utf8_lossy(&self.bytes))
            .field("case_folded", &self.case_folded)
            .finish_non_exhaustive()
    }
}
