//! # Voicing Entity
//!
//! One concrete fingering of a chord: a fret-or-mute assignment for every
//! string, plus everything derivable from it.
//!
//! A [`Voicing`] is immutable once built. Construction takes the raw
//! fret-per-string array and derives, in order:
//!
//! 1. Span metrics: lowest/highest fretted fret, fret span, base fret.
//! 2. Barre detection: the first fret (scanning fret values ascending) where
//!    two or more strings sit on the same fret and the group is contiguous or
//!    has at most one internal gap.
//! 3. Finger assignment: barred strings take finger 1; the remaining fretted
//!    strings are numbered in (fret, string) order. Positions past the 4th
//!    finger stay unassigned rather than failing; this is a known heuristic
//!    limitation, kept deliberately.
//! 4. Fingers required and a position label ("Open", "Barre 5", "Position 7").
//!
//! Two voicings are equal (and deduplicated) iff their fret arrays match;
//! every derived field follows from the array, so comparing more is
//! redundant.
//!
//! ## Fret array encoding
//! - `-1`: string muted
//! - `0`: open string
//! - `n > 0`: fretted at fret n

use crate::error::FretworkError;
use crate::fretboard::Fretboard;
use crate::theory::Note;
use serde::Serialize;
use std::collections::BTreeMap;

/// A chord voicing with derived fingering and position data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Voicing {
    /// Fret per string: -1 muted, 0 open, positive fretted.
    frets: Vec<i8>,
    /// Sounding note per string; `None` where muted.
    notes: Vec<Option<Note>>,
    lowest_fret: u8,
    highest_fret: u8,
    fret_span: u8,
    base_fret: u8,
    is_barre: bool,
    barre_fret: Option<u8>,
    /// String indices covered by the barre, ascending. Empty when not a barre.
    barred_strings: Vec<usize>,
    /// Finger per string: -1 unused, 0 open, 1-4. Fretted strings past the
    /// 4th finger keep -1 (silent exhaustion).
    fingers: Vec<i8>,
    fingers_required: u8,
    strings_played: u8,
    open_strings: u8,
    muted_strings: u8,
    position_label: String,
}

impl Voicing {
    /// Build a voicing from a raw fret array against a fretboard.
    ///
    /// Fails fast on a length mismatch with the tuning, entries below -1, or
    /// frets beyond the board; no partially-derived voicing is observable.
    pub fn new(frets: &[i8], fretboard: &Fretboard) -> Result<Self, FretworkError> {
        let string_count = fretboard.string_count();
        if frets.len() != string_count {
            return Err(FretworkError::InvalidVoicing {
                message: format!(
                    "fret array has {} entries but tuning has {} strings",
                    frets.len(),
                    string_count
                ),
            });
        }
        for (string, &fret) in frets.iter().enumerate() {
            if fret < -1 {
                return Err(FretworkError::InvalidVoicing {
                    message: format!("string {} has fret {} (below -1)", string, fret),
                });
            }
            if fret > fretboard.max_fret() as i8 {
                return Err(FretworkError::FretOutOfRange {
                    fret,
                    max_fret: fretboard.max_fret(),
                });
            }
        }

        let notes: Vec<Option<Note>> = frets
            .iter()
            .enumerate()
            .map(|(string, &fret)| {
                if fret >= 0 {
                    fretboard.note_at(string, fret as u8).ok()
                } else {
                    None
                }
            })
            .collect();

        let fretted: Vec<(usize, u8)> = frets
            .iter()
            .enumerate()
            .filter(|(_, &f)| f > 0)
            .map(|(s, &f)| (s, f as u8))
            .collect();

        let lowest_fret = fretted.iter().map(|&(_, f)| f).min().unwrap_or(0);
        let highest_fret = fretted.iter().map(|&(_, f)| f).max().unwrap_or(0);
        let fret_span = if lowest_fret > 0 && highest_fret > 0 {
            highest_fret - lowest_fret
        } else {
            0
        };
        let base_fret = lowest_fret;

        let (is_barre, barre_fret, barred_strings) = detect_barre(&fretted);
        let fingers = assign_fingers(frets, barre_fret, &barred_strings);
        let fingers_required = count_fingers_required(&fretted, barre_fret, &barred_strings);

        let muted_strings = frets.iter().filter(|&&f| f == -1).count() as u8;
        let open_strings = frets.iter().filter(|&&f| f == 0).count() as u8;
        let strings_played = string_count as u8 - muted_strings;

        let position_label = if open_strings > 0 && lowest_fret <= 3 {
            "Open".to_string()
        } else if let Some(fret) = barre_fret {
            format!("Barre {}", fret)
        } else if lowest_fret > 0 {
            format!("Position {}", lowest_fret)
        } else {
            "Open".to_string()
        };

        Ok(Voicing {
            frets: frets.to_vec(),
            notes,
            lowest_fret,
            highest_fret,
            fret_span,
            base_fret,
            is_barre,
            barre_fret,
            barred_strings,
            fingers,
            fingers_required,
            strings_played,
            open_strings,
            muted_strings,
            position_label,
        })
    }

    pub fn frets(&self) -> &[i8] {
        &self.frets
    }

    pub fn notes(&self) -> &[Option<Note>] {
        &self.notes
    }

    /// Distinct sounding pitch classes, in string order.
    pub fn pitch_classes(&self) -> Vec<u8> {
        let mut seen = Vec::new();
        for note in self.notes.iter().flatten() {
            if !seen.contains(&note.pitch_class()) {
                seen.push(note.pitch_class());
            }
        }
        seen
    }

    pub fn lowest_fret(&self) -> u8 {
        self.lowest_fret
    }

    pub fn highest_fret(&self) -> u8 {
        self.highest_fret
    }

    /// Distance between the highest and lowest fretted (non-open) notes.
    pub fn fret_span(&self) -> u8 {
        self.fret_span
    }

    pub fn base_fret(&self) -> u8 {
        self.base_fret
    }

    pub fn is_barre(&self) -> bool {
        self.is_barre
    }

    pub fn barre_fret(&self) -> Option<u8> {
        self.barre_fret
    }

    pub fn barred_strings(&self) -> &[usize] {
        &self.barred_strings
    }

    pub fn fingers(&self) -> &[i8] {
        &self.fingers
    }

    pub fn fingers_required(&self) -> u8 {
        self.fingers_required
    }

    pub fn strings_played(&self) -> u8 {
        self.strings_played
    }

    pub fn open_strings(&self) -> u8 {
        self.open_strings
    }

    pub fn muted_strings(&self) -> u8 {
        self.muted_strings
    }

    pub fn position_label(&self) -> &str {
        &self.position_label
    }

    /// Largest index gap between consecutive fretted strings; 0 when fewer
    /// than two strings are fretted.
    pub fn max_string_gap(&self) -> usize {
        let fretted: Vec<usize> = self
            .frets
            .iter()
            .enumerate()
            .filter(|(_, &f)| f > 0)
            .map(|(s, _)| s)
            .collect();
        fretted
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .max()
            .unwrap_or(0)
    }

    /// Compact fret-pattern string, e.g. "x32010".
    pub fn pattern(&self) -> String {
        self.frets
            .iter()
            .map(|&f| match f {
                -1 => "x".to_string(),
                n if n > 9 => format!("({})", n),
                n => n.to_string(),
            })
            .collect()
    }
}

/// Voicings are duplicates iff their fret arrays match element-wise.
impl PartialEq for Voicing {
    fn eq(&self, other: &Self) -> bool {
        self.frets == other.frets
    }
}

impl Eq for Voicing {}

/// Find the barre, if any: the first fret value (ascending) held by two or
/// more strings whose index group is contiguous or has at most one internal
/// gap (`last - first <= count`).
///
/// Real barre shapes sometimes let one interior string ring at another fret,
/// so a single gap still reads as an index-finger barre.
fn detect_barre(fretted: &[(usize, u8)]) -> (bool, Option<u8>, Vec<usize>) {
    let mut by_fret: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
    for &(string, fret) in fretted {
        by_fret.entry(fret).or_default().push(string);
    }
    for (&fret, strings) in &by_fret {
        if strings.len() < 2 {
            continue;
        }
        // Insertion order is ascending string index already.
        let first = strings[0];
        let last = strings[strings.len() - 1];
        if last - first <= strings.len() {
            return (true, Some(fret), strings.clone());
        }
    }
    (false, None, Vec::new())
}

/// Assign fingers per string: -1 unused, 0 open, 1-4 fretting fingers.
///
/// With a barre, finger 1 covers the barred strings and fingers 2-4 take the
/// remaining fretted strings in (fret, string) order. Without one, fingers
/// 1-4 run over all fretted strings in the same order. Strings left over
/// after finger 4 stay unassigned.
fn assign_fingers(frets: &[i8], barre_fret: Option<u8>, barred_strings: &[usize]) -> Vec<i8> {
    let mut fingers: Vec<i8> = frets
        .iter()
        .map(|&f| match f {
            -1 => -1,
            0 => 0,
            _ => -1, // assigned below
        })
        .collect();

    let mut remaining: Vec<(u8, usize)> = frets
        .iter()
        .enumerate()
        .filter(|(s, &f)| f > 0 && !(barre_fret.is_some() && barred_strings.contains(s)))
        .map(|(s, &f)| (f as u8, s))
        .collect();
    remaining.sort();

    let mut next_finger: i8 = if barre_fret.is_some() {
        for &string in barred_strings {
            fingers[string] = 1;
        }
        2
    } else {
        1
    };

    for &(_, string) in &remaining {
        if next_finger > 4 {
            break;
        }
        fingers[string] = next_finger;
        next_finger += 1;
    }

    fingers
}

/// How many distinct fingers the shape needs.
///
/// Barre: 1 for the barre plus one per distinct fret among the other fretted
/// strings. Otherwise one per fretted string, clamped to 4.
fn count_fingers_required(
    fretted: &[(usize, u8)],
    barre_fret: Option<u8>,
    barred_strings: &[usize],
) -> u8 {
    match barre_fret {
        Some(_) => {
            let mut other_frets: Vec<u8> = fretted
                .iter()
                .filter(|(s, _)| !barred_strings.contains(s))
                .map(|&(_, f)| f)
                .collect();
            other_frets.sort_unstable();
            other_frets.dedup();
            1 + other_frets.len() as u8
        }
        None => (fretted.len() as u8).min(4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::Tuning;

    fn board() -> Fretboard {
        Fretboard::new(Tuning::standard(), 15)
    }

    #[test]
    fn test_rejects_wrong_length() {
        let result = Voicing::new(&[0, 0, 0], &board());
        assert!(matches!(result, Err(FretworkError::InvalidVoicing { .. })));
    }

    #[test]
    fn test_rejects_bad_fret_values() {
        assert!(matches!(
            Voicing::new(&[-2, 0, 0, 0, 0, 0], &board()),
            Err(FretworkError::InvalidVoicing { .. })
        ));
        assert!(matches!(
            Voicing::new(&[16, 0, 0, 0, 0, 0], &board()),
            Err(FretworkError::FretOutOfRange { fret: 16, .. })
        ));
    }

    #[test]
    fn test_open_c_metrics() {
        // x32010
        let v = Voicing::new(&[-1, 3, 2, 0, 1, 0], &board()).unwrap();
        assert_eq!(v.lowest_fret(), 1);
        assert_eq!(v.highest_fret(), 3);
        assert_eq!(v.fret_span(), 2);
        assert_eq!(v.base_fret(), 1);
        assert!(!v.is_barre());
        assert_eq!(v.muted_strings(), 1);
        assert_eq!(v.open_strings(), 2);
        assert_eq!(v.strings_played(), 5);
        assert_eq!(v.position_label(), "Open");
        assert_eq!(v.pattern(), "x32010");
        // Sounding notes: C E G C E
        let pcs: Vec<u8> = v.notes().iter().flatten().map(|n| n.pitch_class()).collect();
        assert_eq!(pcs, vec![0, 4, 7, 0, 4]);
    }

    #[test]
    fn test_open_c_fingering() {
        let v = Voicing::new(&[-1, 3, 2, 0, 1, 0], &board()).unwrap();
        // (fret, string) ascending: (1,4) -> 1, (2,2) -> 2, (3,1) -> 3
        assert_eq!(v.fingers(), &[-1, 3, 2, 0, 1, 0]);
        assert_eq!(v.fingers_required(), 3);
    }

    #[test]
    fn test_all_open_has_no_span() {
        let v = Voicing::new(&[0, 0, 0, 0, 0, 0], &board()).unwrap();
        assert_eq!(v.fret_span(), 0);
        assert_eq!(v.base_fret(), 0);
        assert_eq!(v.fingers_required(), 0);
        assert_eq!(v.position_label(), "Open");
    }

    #[test]
    fn test_all_muted() {
        let v = Voicing::new(&[-1; 6], &board()).unwrap();
        assert_eq!(v.strings_played(), 0);
        assert_eq!(v.fret_span(), 0);
        assert_eq!(v.max_string_gap(), 0);
        assert_eq!(v.position_label(), "Open");
    }

    #[test]
    fn test_two_string_group_counts_as_barre() {
        // E major 022100: strings 1 and 2 share fret 2
        let v = Voicing::new(&[0, 2, 2, 1, 0, 0], &board()).unwrap();
        assert!(v.is_barre());
        assert_eq!(v.barre_fret(), Some(2));
        assert_eq!(v.barred_strings(), &[1, 2]);
        // Open strings keep the label out of barre territory
        assert_eq!(v.position_label(), "Open");
    }

    #[test]
    fn test_barre_scan_takes_lowest_qualifying_fret() {
        // F major 133211: fret 1 holds strings {0,4,5} (too gappy), fret 3
        // holds the contiguous {1,2}. The ascending scan lands on fret 3.
        let v = Voicing::new(&[1, 3, 3, 2, 1, 1], &board()).unwrap();
        assert!(v.is_barre());
        assert_eq!(v.barre_fret(), Some(3));
        assert_eq!(v.barred_strings(), &[1, 2]);
        assert_eq!(v.position_label(), "Barre 3");
    }

    #[test]
    fn test_barre_accepts_one_internal_gap() {
        // Strings 0 and 2 at fret 5 with string 1 muted: last - first = 2,
        // count = 2, so the single gap still reads as a barre.
        let v = Voicing::new(&[5, -1, 5, -1, -1, -1], &board()).unwrap();
        assert!(v.is_barre());
        assert_eq!(v.barred_strings(), &[0, 2]);
    }

    #[test]
    fn test_barre_rejects_two_internal_gaps() {
        // Strings 0 and 3 at fret 5: last - first = 3 > count = 2.
        let v = Voicing::new(&[5, -1, -1, 5, -1, -1], &board()).unwrap();
        assert!(!v.is_barre());
        assert_eq!(v.barre_fret(), None);
    }

    #[test]
    fn test_barre_fingering() {
        // A-shape C barre x35553
        let v = Voicing::new(&[-1, 3, 5, 5, 5, 3], &board()).unwrap();
        assert!(v.is_barre());
        // Fret 3 group {1,5} spans 4 > 2 strings, fret 5 group {2,3,4} is
        // contiguous; ascending scan rejects fret 3 and takes fret 5.
        assert_eq!(v.barre_fret(), Some(5));
        assert_eq!(v.barred_strings(), &[2, 3, 4]);
        assert_eq!(v.fingers(), &[-1, 2, 1, 1, 1, 3]);
        // 1 (barre) + 1 distinct non-barred fret
        assert_eq!(v.fingers_required(), 2);
    }

    #[test]
    fn test_finger_exhaustion_is_silent() {
        // Five distinct fretted positions: the fifth gets no finger.
        let v = Voicing::new(&[1, 2, 3, 4, 5, -1], &board()).unwrap();
        assert!(!v.is_barre());
        assert_eq!(v.fingers(), &[1, 2, 3, 4, -1, -1]);
        assert_eq!(v.fingers_required(), 4);
    }

    #[test]
    fn test_position_label_up_the_neck() {
        // Fret 7 group {2,5} is too gappy; the contiguous fret 9 pair wins.
        let v = Voicing::new(&[-1, -1, 7, 9, 9, 7], &board()).unwrap();
        assert_eq!(v.position_label(), "Barre 9");
        let v = Voicing::new(&[-1, -1, 5, 7, 8, -1], &board()).unwrap();
        assert_eq!(v.position_label(), "Position 5");
    }

    #[test]
    fn test_max_string_gap() {
        // Fretted at strings 1, 2, 4: gaps 1 and 2
        let v = Voicing::new(&[-1, 3, 2, 0, 1, 0], &board()).unwrap();
        assert_eq!(v.max_string_gap(), 2);
        // Single fretted string
        let v = Voicing::new(&[-1, -1, 2, 0, 0, 0], &board()).unwrap();
        assert_eq!(v.max_string_gap(), 0);
    }

    #[test]
    fn test_equality_is_by_fret_array() {
        let a = Voicing::new(&[-1, 3, 2, 0, 1, 0], &board()).unwrap();
        let b = Voicing::new(&[-1, 3, 2, 0, 1, 0], &Fretboard::new(Tuning::standard(), 20)).unwrap();
        assert_eq!(a, b);
    }
}
