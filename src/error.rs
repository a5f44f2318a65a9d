//! # Error Types
//!
//! This module defines all error types for the fretwork engine.
//!
//! Configuration errors (bad string index, bad fret, malformed fret arrays,
//! unparseable chord symbols) fail fast at the boundary that received the bad
//! input and carry enough location information to identify it. A search that
//! finds no playable voicing is *not* an error; it yields an empty result.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FretworkError {
    /// Unparseable or unsupported chord symbol.
    ///
    /// # Example
    /// ```
    /// # use fretwork::FretworkError;
    /// let err = FretworkError::ChordError("unknown root note 'H'".to_string());
    /// assert_eq!(err.to_string(), "Invalid chord symbol: unknown root note 'H'");
    /// ```
    #[error("Invalid chord symbol: {0}")]
    ChordError(String),

    /// String index outside `[0, string_count)`.
    #[error("String index {string} out of range: tuning has {string_count} strings")]
    StringOutOfRange { string: usize, string_count: usize },

    /// Fret number outside `[0, max_fret]`.
    #[error("Fret {fret} out of range: fretboard has {max_fret} frets")]
    FretOutOfRange { fret: i8, max_fret: u8 },

    /// Malformed fret-per-string array handed to `Voicing::new`.
    ///
    /// Covers length mismatches against the tuning and entries below -1.
    #[error("Invalid voicing: {message}")]
    InvalidVoicing { message: String },

    /// Inconsistent search options, e.g. an inverted fret range.
    #[error("Invalid search options: {0}")]
    OptionsError(String),
}
