//! # Music Theory Types
//!
//! Pitch classes, chord qualities, chord-symbol parsing, and tunings.
//!
//! This module supplies the note and chord-tone data the voicing engine
//! consumes. It deliberately owns no search or scoring logic: the engine only
//! needs `Note::pitch_class()`, `Chord::chord_tones()`, and
//! `Tuning::open_notes()`.
//!
//! ## Pitch Classes
//! A [`Note`] is a pitch class: 0-11 semitones above C, octave-free. The
//! engine works entirely in pitch classes because a fretted position sounding
//! "a G" satisfies a G chord tone regardless of octave.
//!
//! ## Chord Symbols
//! [`Chord::parse`] accepts the common symbol grammar: root letter A-G, an
//! optional `#`/`b` accidental, then a quality suffix (`""`, `m`, `7`, `maj7`,
//! `m7`, `dim`, `aug`, `sus2`, `sus4`, `9`, `maj9`, `m9`). Unknown roots or
//! suffixes are reported as [`FretworkError::ChordError`], never silently
//! defaulted.

use crate::error::FretworkError;
use serde::{Deserialize, Serialize};

/// Note names using sharp spellings, indexed by pitch class.
const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A pitch class: 0-11 semitones above C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub struct Note {
    pitch_class: u8,
}

impl From<u8> for Note {
    fn from(semitones: u8) -> Self {
        Note::from_pitch_class(semitones)
    }
}

impl From<Note> for u8 {
    fn from(note: Note) -> Self {
        note.pitch_class
    }
}

impl Note {
    /// Build a note from a semitone count, reduced modulo 12.
    pub fn from_pitch_class(semitones: u8) -> Self {
        Note {
            pitch_class: semitones % 12,
        }
    }

    /// Parse a note name like "C", "F#", or "Bb".
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let letter = chars.next()?;
        let base: i8 = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };
        let accidental: i8 = match chars.next() {
            None => 0,
            Some('#') => 1,
            Some('b') => -1,
            Some(_) => return None,
        };
        if chars.next().is_some() {
            return None;
        }
        Some(Note {
            pitch_class: (base + accidental).rem_euclid(12) as u8,
        })
    }

    /// Semitones above C, 0-11.
    pub fn pitch_class(&self) -> u8 {
        self.pitch_class
    }

    /// Note name using sharp spellings ("C#", not "Db").
    pub fn name(&self) -> &'static str {
        NOTE_NAMES[self.pitch_class as usize]
    }

    /// The note this many semitones higher.
    pub fn transposed(&self, semitones: u8) -> Self {
        Note {
            pitch_class: ((self.pitch_class as u16 + semitones as u16) % 12) as u8,
        }
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Chord quality, i.e. the interval structure above the root.
///
/// Only `Major`, `Minor`, `Dominant7`, `Minor7`, and `Major7` have movable
/// barre templates; the rest still generate through the open-position and
/// fret-window strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChordQuality {
    Major,
    Minor,
    Dominant7,
    Minor7,
    Major7,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Dominant9,
    Major9,
    Minor9,
}

impl ChordQuality {
    /// Intervals in semitones above the root, reduced to one octave.
    ///
    /// Ninths fold down to 2 (14 mod 12) since voicings care only about
    /// pitch classes.
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::Dominant9 => &[0, 4, 7, 10, 2],
            ChordQuality::Major9 => &[0, 4, 7, 11, 2],
            ChordQuality::Minor9 => &[0, 3, 7, 10, 2],
        }
    }

    /// Parse a quality suffix like "m7" or "maj9".
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" | "maj" | "M" => Some(ChordQuality::Major),
            "m" | "min" | "-" => Some(ChordQuality::Minor),
            "7" => Some(ChordQuality::Dominant7),
            "m7" | "min7" | "-7" => Some(ChordQuality::Minor7),
            "maj7" | "M7" => Some(ChordQuality::Major7),
            "dim" | "°" => Some(ChordQuality::Diminished),
            "aug" | "+" => Some(ChordQuality::Augmented),
            "sus2" => Some(ChordQuality::Sus2),
            "sus4" => Some(ChordQuality::Sus4),
            "9" => Some(ChordQuality::Dominant9),
            "maj9" | "M9" => Some(ChordQuality::Major9),
            "m9" | "min9" => Some(ChordQuality::Minor9),
            _ => None,
        }
    }
}

/// A chord: root pitch class plus quality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chord {
    root: Note,
    quality: ChordQuality,
    symbol: String,
}

impl Chord {
    pub fn new(root: Note, quality: ChordQuality) -> Self {
        let suffix = match quality {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Dominant9 => "9",
            ChordQuality::Major9 => "maj9",
            ChordQuality::Minor9 => "m9",
        };
        let symbol = format!("{}{}", root.name(), suffix);
        Chord {
            root,
            quality,
            symbol,
        }
    }

    /// Parse a chord symbol into root and quality.
    ///
    /// # Examples
    /// ```
    /// use fretwork::{Chord, ChordQuality};
    ///
    /// let chord = Chord::parse("F#m7").unwrap();
    /// assert_eq!(chord.root().name(), "F#");
    /// assert_eq!(chord.quality(), ChordQuality::Minor7);
    ///
    /// assert!(Chord::parse("H").is_err());
    /// assert!(Chord::parse("Cmaj13").is_err());
    /// ```
    pub fn parse(symbol: &str) -> Result<Self, FretworkError> {
        let chars: Vec<char> = symbol.chars().collect();
        if chars.is_empty() {
            return Err(FretworkError::ChordError("empty symbol".to_string()));
        }

        // Root letter, then an optional accidental.
        let mut idx = 1;
        if idx < chars.len() && (chars[idx] == '#' || chars[idx] == 'b') {
            idx += 1;
        }
        let root_name: String = chars[..idx].iter().collect();
        let root = Note::from_name(&root_name).ok_or_else(|| {
            FretworkError::ChordError(format!("unknown root note '{}'", root_name))
        })?;

        let suffix: String = chars[idx..].iter().collect();
        let quality = ChordQuality::from_suffix(&suffix).ok_or_else(|| {
            FretworkError::ChordError(format!("unknown chord quality '{}'", suffix))
        })?;

        Ok(Chord {
            root,
            quality,
            symbol: symbol.to_string(),
        })
    }

    pub fn root(&self) -> Note {
        self.root
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The chord's tones as notes, root first, deduplicated by pitch class.
    pub fn chord_tones(&self) -> Vec<Note> {
        let mut tones: Vec<Note> = Vec::new();
        for &interval in self.quality.intervals() {
            let note = self.root.transposed(interval);
            if !tones.contains(&note) {
                tones.push(note);
            }
        }
        tones
    }

    /// Distinct chord-tone pitch classes, root first.
    pub fn pitch_classes(&self) -> Vec<u8> {
        self.chord_tones().iter().map(|n| n.pitch_class()).collect()
    }
}

impl std::fmt::Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Open-string notes, ordered low to high. String 0 is the lowest-pitched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    open_notes: Vec<Note>,
}

impl Tuning {
    /// Standard 6-string guitar tuning: E A D G B E, low to high.
    pub fn standard() -> Self {
        Tuning {
            open_notes: [4, 9, 2, 7, 11, 4]
                .iter()
                .map(|&pc| Note::from_pitch_class(pc))
                .collect(),
        }
    }

    /// Drop-D tuning: D A D G B E.
    pub fn drop_d() -> Self {
        Tuning {
            open_notes: [2, 9, 2, 7, 11, 4]
                .iter()
                .map(|&pc| Note::from_pitch_class(pc))
                .collect(),
        }
    }

    pub fn new(open_notes: Vec<Note>) -> Self {
        Tuning { open_notes }
    }

    pub fn open_notes(&self) -> &[Note] {
        &self.open_notes
    }

    /// Number of strings.
    pub fn len(&self) -> usize {
        self.open_notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open_notes.is_empty()
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning::standard()
    }
}
