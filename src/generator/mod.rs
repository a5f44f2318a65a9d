//! # Voicing Generator
//!
//! Turn an abstract chord into ranked, physically playable fingerings.
//!
//! ## Pipeline
//! 1. **Candidate generation** - three heuristic strategies (open position,
//!    movable barre shapes, sliding fret windows) each propose raw
//!    fret-per-string arrays.
//! 2. **Validation** - candidates violating the search constraints (muted
//!    strings, chord-tone coverage, fret span, root in bass) are dropped.
//! 3. **Orchestration** - survivors are deduplicated, scored with the
//!    playability scorer, filtered against [`SearchOptions`], stably sorted
//!    best first, and truncated to the result limit.
//!
//! ## Sub-modules
//! - `options` - [`SearchOptions`] configuration struct
//! - `engine` - strategies, per-string assignment, orchestration
//!
//! ## Determinism
//! For a fixed chord and fixed options the output is byte-identical across
//! calls: strategies run in a fixed order, candidate positions are visited in
//! (fret, string) order, and the final sort is stable so generation order
//! breaks score ties.
//!
//! ## Example
//! ```rust
//! use fretwork::{generate_voicings, Chord, SearchOptions};
//!
//! let chord = Chord::parse("C").unwrap();
//! let voicings = generate_voicings(&chord, &SearchOptions::default()).unwrap();
//!
//! assert!(!voicings.is_empty());
//! assert!(voicings.len() <= 10);
//! ```

mod engine;
mod options;


pub use engine::generate_voicings;
pub use options::SearchOptions;
