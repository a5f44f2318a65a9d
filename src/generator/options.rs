//! Search configuration for voicing generation.

use crate::scoring::DifficultyLevel;
use crate::theory::Tuning;
use serde::{Deserialize, Serialize};

/// Options controlling a single generation call.
///
/// Every field can be overridden independently; the defaults describe an
/// average player on a standard-tuned 6-string. The struct is a pure value:
/// nothing mutates it once a generation call starts.
///
/// # Example
/// ```
/// use fretwork::SearchOptions;
///
/// let options = SearchOptions {
///     max_muted_strings: 1,
///     require_root_in_bass: true,
///     ..SearchOptions::default()
/// };
/// assert_eq!(options.max_fret, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    /// Highest fret the search considers.
    pub max_fret: u8,
    /// Minimum number of sounded (non-muted) strings.
    pub min_strings: u8,
    /// Maximum number of muted strings a candidate may have.
    pub max_muted_strings: u8,
    /// Whether the barre-shape strategy runs at all.
    pub allow_barre: bool,
    /// Results harder than this are filtered out.
    pub max_difficulty: DifficultyLevel,
    /// Require the root pitch class on one of the three lowest strings.
    pub require_root_in_bass: bool,
    /// Widest allowed distance between lowest and highest fretted note.
    pub max_fret_span: u8,
    /// Result list cap.
    pub max_results: usize,
    /// Tuning override; standard tuning when absent.
    pub tuning: Option<Tuning>,
    /// Advisory: steer toward voicings with ringing open strings.
    pub prefer_open_strings: bool,
    /// Results scoring below this are filtered out.
    pub min_playability_score: u8,
    /// Advisory: keep voicings whose bass note is not the root.
    pub include_inversions: bool,
    /// Restrict the search window to (min, max), overriding `max_fret`.
    pub fret_range: Option<(u8, u8)>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            max_fret: 12,
            min_strings: 3,
            max_muted_strings: 3,
            allow_barre: true,
            max_difficulty: DifficultyLevel::Expert,
            require_root_in_bass: false,
            max_fret_span: 4,
            max_results: 10,
            tuning: None,
            prefer_open_strings: true,
            min_playability_score: 0,
            include_inversions: true,
            fret_range: None,
        }
    }
}

impl SearchOptions {
    /// The search window as (floor, ceiling): `fret_range` when set,
    /// otherwise frets 0 through `max_fret`.
    pub fn window(&self) -> (u8, u8) {
        self.fret_range.unwrap_or((0, self.max_fret))
    }
}
