//! Subsequence alignment and scoring.
//!
//! [`score`] walks the candidate text left to right, placing each pattern
//! byte at the earliest feasible position at or after the cursor. A backward
//! pre-pass computes, per pattern index, the latest position that still lets
//! the rest of the pattern embed; it doubles as the match-existence check,
//! so the forward walk never dead-ends.
//!
//! Greedy-earliest alone can miss alignments that start a longer consecutive
//! run, so each placement considers a bounded window past the earliest
//! candidate and takes a strictly better-scoring feasible alternative when
//! one exists (ties resolve to the earliest position, keeping the result
//! deterministic). This is not guaranteed to be the global score optimum.
//!
//! The score is a weighted sum accumulated during the walk: a base credit
//! per matched byte, a larger credit for extending a consecutive run, a
//! credit for landing on a word or camelCase boundary, a credit for exact
//! byte equality, and a penalty per text byte skipped between two matches.
//! The weights are exported as named constants; relative order is what
//! matters (contiguous beats scattered, boundary-aligned beats mid-word).
//!
//! # Example
//!
//! ```
//! use sift::{score, Candidate, Pattern};
//!
//! let pattern = Pattern::compile(b"abc")?;
//! let tight = score(&pattern, &Candidate::new(b"xabcx"), false).unwrap();
//! let sparse = score(&pattern, &Candidate::new(b"axbxc"), false).unwrap();
//! assert_eq!((tight.begin, tight.end), (1, 4));
//! assert!(tight.score > sparse.score);
//! # Ok::<(), sift::PatternError>(())
//! ```

use memchr::memrchr3;

use crate::candidate::Candidate;
use crate::pattern::{Pattern, TRACKED_POSITIONS};

/// Credit for every matched byte.
pub const BASE_BONUS: f32 = 1.0;

/// Credit for matching at the text position right after the previous match;
/// larger than [`BASE_BONUS`] so contiguous runs outrank scattered hits.
pub const CONSECUTIVE_BONUS: f32 = 2.0;

/// Credit for matching at the text start, after a non-alphanumeric byte, or
/// at a camelCase transition.
pub const BOUNDARY_BONUS: f32 = 1.5;

/// Credit when the matched byte equals the pattern byte exactly; a case
/// mismatch under case-insensitive matching loses this, nothing more.
pub const EXACT_CASE_BONUS: f32 = 0.5;

/// Penalty per unmatched text byte strictly between two matched bytes.
pub const GAP_PENALTY: f32 = 0.1;

/// Capacity of the highlight buffer; runs beyond it are dropped.
pub const MAX_HIGHLIGHTS: usize = 64;

/// How far past the earliest feasible position the aligner looks for a
/// better-scoring placement.
const LOOKAHEAD_WINDOW: usize = 8;

/// One maximal run of consecutively matched bytes, for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Highlight {
    /// Starting column (text index plus the candidate's column offset).
    pub col: u16,
    /// Run length in bytes; never 0.
    pub len: u16,
}

/// Matched-byte runs of one result, in a fixed [`MAX_HIGHLIGHTS`]-slot
/// buffer. Dereferences to a slice of the populated runs.
#[derive(Clone, Copy)]
pub struct Highlights {
    runs: [Highlight; MAX_HIGHLIGHTS],
    len: u16,
}

impl Highlights {
    const EMPTY: Self = Self {
        runs: [Highlight { col: 0, len: 0 }; MAX_HIGHLIGHTS],
        len: 0,
    };

    /// The populated runs, non-overlapping and strictly increasing in
    /// starting column.
    pub fn as_slice(&self) -> &[Highlight] {
        &self.runs[..self.len as usize]
    }

    /// Record one matched column. Extends the last run when adjacent,
    /// otherwise opens a new run; once all slots are used, further
    /// non-adjacent columns are dropped (the span still covers them).
    fn push_column(&mut self, col: u16) {
        let used = self.len as usize;
        if let Some(run) = self.runs[..used].last_mut() {
            if run.col.checked_add(run.len) == Some(col) {
                run.len += 1;
                return;
            }
        }
        if used < MAX_HIGHLIGHTS {
            self.runs[used] = Highlight { col, len: 1 };
            self.len += 1;
        }
    }
}

impl std::ops::Deref for Highlights {
    type Target = [Highlight];

    fn deref(&self) -> &[Highlight] {
        self.as_slice()
    }
}

impl PartialEq for Highlights {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl std::fmt::Debug for Highlights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a> IntoIterator for &'a Highlights {
    type Item = &'a Highlight;
    type IntoIter = std::slice::Iter<'a, Highlight>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Highlights {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

/// The outcome of scoring one candidate. Owned by the caller; the matcher
/// retains nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MatchResult {
    /// Relevance; higher is better. 0 for the trivial empty-pattern match.
    pub score: f32,
    /// Column of the first matched byte.
    pub begin: u16,
    /// One past the column of the last matched byte.
    pub end: u16,
    /// Matched runs for rendering.
    pub highlights: Highlights,
}

/// Score `pattern` against `candidate`.
///
/// Returns `None` when the pattern does not occur as an ordered subsequence
/// of the text — the routine negative outcome for unrelated strings, not an
/// error. Matching is ASCII-case-insensitive throughout; case only affects
/// the [`EXACT_CASE_BONUS`].
///
/// With `name_only`, only the trailing segment after the last `.`, `:` or
/// `/` participates in matching, while reported columns stay relative to
/// the whole text. This ranks qualified identifiers by their leaf name.
pub fn score(pattern: &Pattern, candidate: &Candidate, name_only: bool) -> Option<MatchResult> {
    let offset = candidate.column_offset();

    if pattern.is_empty() {
        return Some(MatchResult {
            score: 0.0,
            begin: offset,
            end: offset,
            highlights: Highlights::EMPTY,
        });
    }

    let full = candidate.bytes();
    let (text, segment_start) = if name_only { leaf_segment(full) } else { (full, 0) };

    let n = pattern.len();
    if text.len() < n {
        return None;
    }

    // Latest feasible position for each pattern index, found by scanning
    // backwards; failure here means no embedding exists at all. The buffer
    // lives on the stack for patterns up to TRACKED_POSITIONS bytes.
    let mut stack_buf = [0u16; TRACKED_POSITIONS];
    let mut heap_buf = Vec::new();
    let last_pos: &mut [u16] = if n <= TRACKED_POSITIONS {
        &mut stack_buf[..n]
    } else {
        heap_buf.resize(n, 0u16);
        &mut heap_buf
    };
    let mut limit = text.len();
    for i in (0..n).rev() {
        let found = text[..limit].iter().rposition(|&b| pattern.matches_at(i, b))?;
        last_pos[i] = found as u16;
        limit = found;
    }

    let mut total = 0.0f32;
    let mut highlights = Highlights::EMPTY;
    let mut begin = 0usize;
    let mut last = 0usize;
    let mut prev: Option<usize> = None;
    let mut cursor = 0usize;

    for (i, &ceiling) in last_pos.iter().enumerate() {
        let ceiling = ceiling as usize;
        let earliest = (cursor..=ceiling).find(|&j| pattern.matches_at(i, text[j]))?;
        let j = lookahead(pattern, text, i, earliest, ceiling, prev);

        total += match_bonus(pattern, text, i, j, prev);
        if let Some(p) = prev {
            total -= (j - p - 1) as f32 * GAP_PENALTY;
        } else {
            begin = j;
        }
        highlights.push_column(column_at(offset, segment_start, j));
        prev = Some(j);
        last = j;
        cursor = j + 1;
    }

    let result = MatchResult {
        score: total,
        begin: column_at(offset, segment_start, begin),
        end: column_at(offset, segment_start, last).saturating_add(1),
        highlights,
    };
    trace!(
        "match at {}..{} over {} runs, score {}",
        result.begin,
        result.end,
        result.highlights.len(),
        result.score
    );
    Some(result)
}

/// Tail of `text` after the last scoping separator, plus its offset.
fn leaf_segment(text: &[u8]) -> (&[u8], usize) {
    match memrchr3(b'.', b':', b'/', text) {
        Some(idx) => (&text[idx + 1..], idx + 1),
        None => (text, 0),
    }
}

#[inline]
fn column_at(offset: u16, segment_start: usize, index: usize) -> u16 {
    offset.saturating_add((segment_start + index) as u16)
}

/// Pick the position for pattern byte `i`: the earliest feasible one, unless
/// a strictly better-scoring feasible alternative sits within the lookahead
/// window. Alternatives past `ceiling` would strand the rest of the pattern
/// and are never considered.
fn lookahead(
    pattern: &Pattern,
    text: &[u8],
    i: usize,
    earliest: usize,
    ceiling: usize,
    prev: Option<usize>,
) -> usize {
    let mut best = earliest;
    let mut best_gain = local_gain(pattern, text, i, earliest, prev);
    for j in earliest + 1..=ceiling.min(earliest + LOOKAHEAD_WINDOW) {
        if !pattern.matches_at(i, text[j]) {
            continue;
        }
        let mut gain = local_gain(pattern, text, i, j, prev);
        if prev.is_some() {
            // Deferring costs the extra gap it introduces.
            gain -= (j - earliest) as f32 * GAP_PENALTY;
        }
        if gain > best_gain {
            best = j;
            best_gain = gain;
        }
    }
    best
}

/// Immediate bonus of placing pattern byte `i` at `j`, plus a one-byte peek:
/// a placement that lines the next pattern byte up for a consecutive match
/// is worth as much as the run it starts.
fn local_gain(pattern: &Pattern, text: &[u8], i: usize, j: usize, prev: Option<usize>) -> f32 {
    let mut gain = match_bonus(pattern, text, i, j, prev);
    if i + 1 < pattern.len() && j + 1 < text.len() && pattern.matches_at(i + 1, text[j + 1]) {
        gain += CONSECUTIVE_BONUS;
    }
    gain
}

fn match_bonus(pattern: &Pattern, text: &[u8], i: usize, j: usize, prev: Option<usize>) -> f32 {
    let mut bonus = BASE_BONUS;
    if prev.is_some_and(|p| p + 1 == j) {
        bonus += CONSECUTIVE_BONUS;
    }
    if is_boundary(text, j) {
        bonus += BOUNDARY_BONUS;
    }
    if text[j] == pattern.bytes()[i] {
        bonus += EXACT_CASE_BONUS;
    }
    bonus
}

/// Word or camelCase boundary at text index `j`.
fn is_boundary(text: &[u8], j: usize) -> bool {
    if j == 0 {
        return true;
    }
    let before = text[j - 1];
    !before.is_ascii_alphanumeric() || (before.is_ascii_lowercase() && text[j].is_ascii_uppercase())
}

// ---------------------------------------------------------------------------
// Convenience free functions
// ---------------------------------------------------------------------------

/// Compile `pattern` and score it against `text` in one call, returning only
/// the score. `None` covers both no-match and an uncompilable (over-long)
/// pattern; compile explicitly via [`Pattern::compile`] to tell them apart.
pub fn match_score(text: &[u8], pattern: &[u8]) -> Option<f32> {
    match_highlights(text, pattern).map(|result| result.score)
}

/// Compile `pattern` and score it against `text` in one call, returning the
/// full result with highlights.
pub fn match_highlights(text: &[u8], pattern: &[u8]) -> Option<MatchResult> {
    let compiled = Pattern::compile(pattern).ok()?;
    score(&compiled, &Candidate::new(text), false)
}
