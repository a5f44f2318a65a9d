//! # fretwork
//!
//! Generate physically playable guitar chord voicings and rank them by
//! estimated playability.
//!
//! The engine is a constrained combinatorial search over a fretted-instrument
//! geometry followed by a weighted heuristic scorer. It is pure and
//! synchronous: no I/O, no shared state, and deterministic output for a fixed
//! chord and options.
//!
//! ## Example
//! ```rust
//! use fretwork::{generate_best_voicing, score_voicing, Chord, SearchOptions};
//!
//! let chord = Chord::parse("Am")?;
//! let best = generate_best_voicing(&chord, &SearchOptions::default())?
//!     .expect("A minor has playable voicings");
//!
//! let score = score_voicing(&best);
//! assert!(score.total >= 70); // an open Am shape is beginner territory
//! # Ok::<(), fretwork::FretworkError>(())
//! ```

pub mod error;
pub mod fretboard;
pub mod generator;
pub mod scoring;
pub mod theory;
pub mod voicing;

pub use error::FretworkError;
pub use fretboard::{Fretboard, FretboardPosition};
pub use generator::{generate_voicings, SearchOptions};
pub use scoring::{score_voicing, DifficultyLevel, PlayabilityScore};
pub use theory::{Chord, ChordQuality, Note, Tuning};
pub use voicing::Voicing;

/// Generate voicings and keep only the best one, or `None` when nothing
/// satisfies the constraints.
pub fn generate_best_voicing(
    chord: &Chord,
    options: &SearchOptions,
) -> Result<Option<Voicing>, FretworkError> {
    let mut voicings = generate_voicings(chord, options)?;
    if voicings.is_empty() {
        Ok(None)
    } else {
        Ok(Some(voicings.remove(0)))
    }
}

/// Generate voicings confined to a fret window, with default options
/// otherwise.
pub fn generate_voicings_in_range(
    chord: &Chord,
    min_fret: u8,
    max_fret: u8,
) -> Result<Vec<Voicing>, FretworkError> {
    let options = SearchOptions {
        fret_range: Some((min_fret, max_fret)),
        ..SearchOptions::default()
    };
    generate_voicings(chord, &options)
}
