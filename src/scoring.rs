//! # Playability Scoring
//!
//! Rates how hard a voicing is for a human hand.
//!
//! [`score_voicing`] is a pure function over a [`Voicing`]'s derived metrics.
//! Six independent step-function components, each capped at a fixed weight:
//!
//! | Component       | Weight | Input                         |
//! |-----------------|--------|-------------------------------|
//! | Fret stretch    | 25     | fret span                     |
//! | Barre complexity| 20     | barre + barred string count   |
//! | Finger count    | 20     | fingers required              |
//! | Position        | 15     | base fret                     |
//! | Open strings    | 10     | open string count             |
//! | String spacing  | 10     | max fretted-string index gap  |
//!
//! Percentage cuts use integer arithmetic (`weight * pct / 100`, truncating
//! toward zero), and callers treat the exact component values as the oracle,
//! so the rounding must not be reworked. The total clamps to 0-100 and maps
//! onto [`DifficultyLevel`] bands at 70/50/30. Whenever a component scores
//! below its cap for a notable reason, a human-readable challenge string is
//! appended.

use crate::voicing::Voicing;
use serde::{Deserialize, Serialize};

/// Difficulty band, derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl DifficultyLevel {
    /// Band for a total score: >=70 Beginner, >=50 Intermediate,
    /// >=30 Advanced, else Expert.
    pub fn from_score(total: u8) -> Self {
        if total >= 70 {
            DifficultyLevel::Beginner
        } else if total >= 50 {
            DifficultyLevel::Intermediate
        } else if total >= 30 {
            DifficultyLevel::Advanced
        } else {
            DifficultyLevel::Expert
        }
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DifficultyLevel::Beginner => "Beginner",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Advanced => "Advanced",
            DifficultyLevel::Expert => "Expert",
        };
        write!(f, "{}", label)
    }
}

/// Playability breakdown for one voicing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayabilityScore {
    pub total: u8,
    pub difficulty: DifficultyLevel,
    pub fret_stretch: u8,
    pub barre_complexity: u8,
    pub finger_count: u8,
    pub position: u8,
    pub open_strings: u8,
    pub string_spacing: u8,
    /// Human-readable notes on what makes the shape hard, in component order.
    pub challenges: Vec<String>,
}

const WEIGHT_STRETCH: u32 = 25;
const WEIGHT_BARRE: u32 = 20;
const WEIGHT_FINGERS: u32 = 20;
const WEIGHT_POSITION: u32 = 15;
const WEIGHT_OPEN: u32 = 10;
const WEIGHT_SPACING: u32 = 10;

fn cut(weight: u32, percent: u32) -> u8 {
    (weight * percent / 100) as u8
}

fn stretch_component(span: u8) -> (u8, Option<String>) {
    match span {
        0..=2 => (WEIGHT_STRETCH as u8, None),
        3 => (cut(WEIGHT_STRETCH, 70), None),
        4 => (cut(WEIGHT_STRETCH, 40), Some("4-fret stretch".to_string())),
        _ => (0, Some(format!("difficult {}-fret stretch", span))),
    }
}

fn barre_component(is_barre: bool, barred_strings: usize) -> (u8, Option<String>) {
    if !is_barre {
        return (WEIGHT_BARRE as u8, None);
    }
    match barred_strings {
        0..=2 => (cut(WEIGHT_BARRE, 80), None),
        3..=4 => (cut(WEIGHT_BARRE, 50), Some("Barre chord".to_string())),
        _ => (cut(WEIGHT_BARRE, 30), Some("Full barre chord".to_string())),
    }
}

fn finger_component(fingers_required: u8) -> (u8, Option<String>) {
    match fingers_required {
        1 => (WEIGHT_FINGERS as u8, None),
        2 => (cut(WEIGHT_FINGERS, 90), None),
        3 => (cut(WEIGHT_FINGERS, 70), None),
        4 => (
            cut(WEIGHT_FINGERS, 40),
            Some("Uses all 4 fingers".to_string()),
        ),
        _ => (0, None),
    }
}

fn position_component(base_fret: u8) -> (u8, Option<String>) {
    match base_fret {
        0 => (WEIGHT_POSITION as u8, None),
        1..=3 => (cut(WEIGHT_POSITION, 90), None),
        4..=5 => (cut(WEIGHT_POSITION, 70), None),
        6..=7 => (cut(WEIGHT_POSITION, 50), None),
        8..=10 => (
            cut(WEIGHT_POSITION, 30),
            Some(format!("High position (fret {})", base_fret)),
        ),
        _ => (0, Some(format!("Very high position (fret {})", base_fret))),
    }
}

fn open_component(open_strings: u8) -> u8 {
    match open_strings {
        0 => 0,
        1 => cut(WEIGHT_OPEN, 50),
        2 => cut(WEIGHT_OPEN, 80),
        _ => WEIGHT_OPEN as u8,
    }
}

fn spacing_component(max_gap: usize) -> (u8, Option<String>) {
    match max_gap {
        0 => (WEIGHT_SPACING as u8, None),
        1 => (cut(WEIGHT_SPACING, 80), None),
        2 => (
            cut(WEIGHT_SPACING, 50),
            Some("String skip required".to_string()),
        ),
        _ => (0, Some("Large string skip required".to_string())),
    }
}

/// Score a voicing's playability. Pure; never fails; recomputed on demand.
pub fn score_voicing(voicing: &Voicing) -> PlayabilityScore {
    let mut challenges = Vec::new();
    let mut take = |(points, challenge): (u8, Option<String>)| {
        if let Some(c) = challenge {
            challenges.push(c);
        }
        points
    };

    let fret_stretch = take(stretch_component(voicing.fret_span()));
    let barre_complexity = take(barre_component(
        voicing.is_barre(),
        voicing.barred_strings().len(),
    ));
    let finger_count = take(finger_component(voicing.fingers_required()));
    let position = take(position_component(voicing.base_fret()));
    let open_strings = open_component(voicing.open_strings());
    let string_spacing = take(spacing_component(voicing.max_string_gap()));

    let total = (fret_stretch as u32
        + barre_complexity as u32
        + finger_count as u32
        + position as u32
        + open_strings as u32
        + string_spacing as u32)
        .min(100) as u8;

    PlayabilityScore {
        total,
        difficulty: DifficultyLevel::from_score(total),
        fret_stretch,
        barre_complexity,
        finger_count,
        position,
        open_strings,
        string_spacing,
        challenges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fretboard::Fretboard;
    use crate::theory::Tuning;
    use crate::voicing::Voicing;

    fn voicing(frets: &[i8]) -> Voicing {
        Voicing::new(frets, &Fretboard::new(Tuning::standard(), 24)).unwrap()
    }

    #[test]
    fn test_difficulty_bands() {
        assert_eq!(DifficultyLevel::from_score(100), DifficultyLevel::Beginner);
        assert_eq!(DifficultyLevel::from_score(70), DifficultyLevel::Beginner);
        assert_eq!(DifficultyLevel::from_score(69), DifficultyLevel::Intermediate);
        assert_eq!(DifficultyLevel::from_score(50), DifficultyLevel::Intermediate);
        assert_eq!(DifficultyLevel::from_score(49), DifficultyLevel::Advanced);
        assert_eq!(DifficultyLevel::from_score(30), DifficultyLevel::Advanced);
        assert_eq!(DifficultyLevel::from_score(29), DifficultyLevel::Expert);
        assert_eq!(DifficultyLevel::from_score(0), DifficultyLevel::Expert);
    }

    #[test]
    fn test_difficulty_ordering() {
        assert!(DifficultyLevel::Beginner < DifficultyLevel::Intermediate);
        assert!(DifficultyLevel::Intermediate < DifficultyLevel::Advanced);
        assert!(DifficultyLevel::Advanced < DifficultyLevel::Expert);
    }

    #[test]
    fn test_open_c_component_values() {
        // x32010: span 2, no barre, 3 fingers, base 1, 2 opens, max gap 2
        let score = score_voicing(&voicing(&[-1, 3, 2, 0, 1, 0]));
        assert_eq!(score.fret_stretch, 25);
        assert_eq!(score.barre_complexity, 20);
        assert_eq!(score.finger_count, 14); // 70% of 20
        assert_eq!(score.position, 13); // 90% of 15, truncated
        assert_eq!(score.open_strings, 8);
        assert_eq!(score.string_spacing, 5);
        assert_eq!(score.total, 85);
        assert_eq!(score.difficulty, DifficultyLevel::Beginner);
        assert_eq!(score.challenges, vec!["String skip required".to_string()]);
    }

    #[test]
    fn test_worked_expert_combination() {
        // Span 6, full 5-string barre, 4 fingers, base 12, no opens, gap 3:
        // 0 + 20*30% + 20*40% + 0 + 0 + 0 = 14, an Expert shape.
        let total = stretch_component(6).0
            + barre_component(true, 5).0
            + finger_component(4).0
            + position_component(12).0
            + open_component(0)
            + spacing_component(3).0;
        assert_eq!(total, 14);
        assert_eq!(DifficultyLevel::from_score(total), DifficultyLevel::Expert);
    }

    #[test]
    fn test_barre_monotonicity() {
        // Wide barres never beat narrow ones on the barre component.
        let narrow = score_voicing(&voicing(&[-1, -1, -1, -1, 5, 5]));
        let full = score_voicing(&voicing(&[5, 5, 5, 5, 5, 5]));
        assert!(full.barre_complexity < narrow.barre_complexity);
        assert_eq!(narrow.barre_complexity, 16);
        assert_eq!(full.barre_complexity, 6);
    }

    #[test]
    fn test_score_bounded_for_pathological_inputs() {
        let all_muted = score_voicing(&voicing(&[-1; 6]));
        assert!(all_muted.total <= 100);
        let all_high = score_voicing(&voicing(&[24, 24, 24, 24, 24, 24]));
        assert!(all_high.total <= 100);
        let all_open = score_voicing(&voicing(&[0; 6]));
        assert!(all_open.total <= 100);
    }

    #[test]
    fn test_stretch_steps() {
        // Span 3 -> 70% of 25 = 17
        let s = score_voicing(&voicing(&[-1, -1, 2, 3, 5, -1]));
        assert_eq!(s.fret_stretch, 17);
        // Span 4 -> 40% of 25 = 10, with a challenge
        let s = score_voicing(&voicing(&[-1, -1, 2, 3, 6, -1]));
        assert_eq!(s.fret_stretch, 10);
        assert!(s.challenges.iter().any(|c| c == "4-fret stretch"));
        // Span past 4 bottoms out and names the distance
        let s = score_voicing(&voicing(&[-1, -1, 2, 3, 8, -1]));
        assert_eq!(s.fret_stretch, 0);
        assert!(s.challenges.iter().any(|c| c == "difficult 6-fret stretch"));
    }

    #[test]
    fn test_full_barre_challenge() {
        let s = score_voicing(&voicing(&[5, 5, 5, 5, 5, 5]));
        assert!(s.challenges.iter().any(|c| c == "Full barre chord"));
        let s = score_voicing(&voicing(&[-1, 5, 5, 5, 5, -1]));
        assert!(s.challenges.iter().any(|c| c == "Barre chord"));
    }

    #[test]
    fn test_very_high_position_challenge() {
        let s = score_voicing(&voicing(&[-1, -1, 12, 12, -1, -1]));
        assert_eq!(s.position, 0);
        assert!(s.challenges.iter().any(|c| c == "Very high position (fret 12)"));
        let s = score_voicing(&voicing(&[-1, -1, 9, 9, -1, -1]));
        assert_eq!(s.position, 4);
        assert!(s.challenges.iter().any(|c| c == "High position (fret 9)"));
    }

    #[test]
    fn test_open_string_steps() {
        assert_eq!(open_component(0), 0);
        assert_eq!(open_component(1), 5);
        assert_eq!(open_component(2), 8);
        assert_eq!(open_component(3), 10);
        assert_eq!(open_component(6), 10);
    }

    #[test]
    fn test_all_open_misses_finger_points() {
        // No fretted strings means zero fingers required, which the finger
        // component scores as 0, not full marks.
        let s = score_voicing(&voicing(&[0; 6]));
        assert_eq!(s.finger_count, 0);
        assert_eq!(s.fret_stretch, 25);
        assert_eq!(s.open_strings, 10);
    }
}
