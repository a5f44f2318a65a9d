//! # Fretboard Model
//!
//! Precomputed (string, fret) to pitch-class grid for a tuning.
//!
//! A [`Fretboard`] is built once from a [`Tuning`] and a fret count, then
//! queried read-only for the rest of its life. Construction is O(strings x
//! frets); lookups are O(1) and the filter queries are linear in their match
//! count. Instances carry no interior mutability and may be shared freely
//! across threads.
//!
//! Out-of-range queries are reported as errors, never clamped.

use crate::error::FretworkError;
use crate::theory::{Note, Tuning};
use serde::Serialize;

/// One playable position on the fretboard.
///
/// `pitch_class = (open_string_pitch_class + fret) mod 12`. String 0 is the
/// lowest-pitched string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretboardPosition {
    pub string: usize,
    pub fret: u8,
    pub pitch_class: u8,
}

/// A fretted instrument's geometry: tuning plus a precomputed position grid.
#[derive(Debug, Clone)]
pub struct Fretboard {
    tuning: Tuning,
    max_fret: u8,
    /// All positions, ordered by (string, fret). Length is
    /// `strings * (max_fret + 1)`.
    positions: Vec<FretboardPosition>,
}

impl Fretboard {
    /// Build the grid for a tuning with `max_fret` frets per string.
    pub fn new(tuning: Tuning, max_fret: u8) -> Self {
        let mut positions = Vec::with_capacity(tuning.len() * (max_fret as usize + 1));
        for (string, open) in tuning.open_notes().iter().enumerate() {
            for fret in 0..=max_fret {
                positions.push(FretboardPosition {
                    string,
                    fret,
                    pitch_class: open.transposed(fret).pitch_class(),
                });
            }
        }
        Fretboard {
            tuning,
            max_fret,
            positions,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn string_count(&self) -> usize {
        self.tuning.len()
    }

    pub fn max_fret(&self) -> u8 {
        self.max_fret
    }

    /// The note sounding at (string, fret).
    pub fn note_at(&self, string: usize, fret: u8) -> Result<Note, FretworkError> {
        if string >= self.string_count() {
            return Err(FretworkError::StringOutOfRange {
                string,
                string_count: self.string_count(),
            });
        }
        if fret > self.max_fret {
            return Err(FretworkError::FretOutOfRange {
                fret: fret as i8,
                max_fret: self.max_fret,
            });
        }
        let index = string * (self.max_fret as usize + 1) + fret as usize;
        Ok(Note::from_pitch_class(self.positions[index].pitch_class))
    }

    /// All positions sounding `pitch_class` at or below `max_fret`,
    /// ordered by (fret asc, string asc).
    pub fn positions_for_pitch_class(&self, pitch_class: u8, max_fret: u8) -> Vec<FretboardPosition> {
        let mut matches: Vec<FretboardPosition> = self
            .positions
            .iter()
            .filter(|p| p.pitch_class == pitch_class % 12 && p.fret <= max_fret)
            .copied()
            .collect();
        matches.sort_by_key(|p| (p.fret, p.string));
        matches
    }

    /// All positions with `min_fret <= fret <= max_fret`, in (string, fret)
    /// order.
    pub fn positions_in_range(&self, min_fret: u8, max_fret: u8) -> Vec<FretboardPosition> {
        self.positions
            .iter()
            .filter(|p| p.fret >= min_fret && p.fret <= max_fret)
            .copied()
            .collect()
    }
}
