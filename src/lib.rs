//! Sift is a fuzzy subsequence matcher and scorer.
//!
//! Given a short query pattern and a candidate text (a symbol name, a line
//! of source), it decides whether the pattern occurs in the text as an
//! ordered, not necessarily contiguous, subsequence — and if so, produces a
//! relevance score and the matched spans for highlighting. Collecting
//! candidates, sorting by score and rendering results are the caller's job.
//!
//! Matching is byte-oriented and ASCII-case-insensitive. Patterns compile
//! once per query and are reused, read-only, across every candidate; the
//! scoring loop is trivially parallelizable.
//!
//! # Examples
//!
//! ```
//! use sift::{could_match, score, Candidate, Pattern};
//!
//! let pattern = Pattern::compile(b"abc")?;
//!
//! let mut ranked = Vec::new();
//! for text in [&b"xabcx"[..], b"axbxc", b"nothing here"] {
//!     let candidate = Candidate::new(text);
//!     if !could_match(&pattern, &candidate) {
//!         continue;
//!     }
//!     if let Some(result) = score(&pattern, &candidate, false) {
//!         ranked.push((text, result));
//!     }
//! }
//!
//! ranked.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));
//! assert_eq!(ranked[0].0, b"xabcx");
//! # Ok::<(), sift::PatternError>(())
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod candidate;
mod pattern;
mod score;
mod util;

pub use crate::candidate::{Candidate, MAX_TEXT_LEN, could_match};
pub use crate::pattern::{MAX_PATTERN_LEN, Pattern, PatternError, TRACKED_POSITIONS};
pub use crate::score::{
    BASE_BONUS, BOUNDARY_BONUS, CONSECUTIVE_BONUS, EXACT_CASE_BONUS, GAP_PENALTY, Highlight, Highlights,
    MAX_HIGHLIGHTS, MatchResult, match_highlights, match_score, score,
};
