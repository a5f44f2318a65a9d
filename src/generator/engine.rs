//! Voicing generation engine.
//!
//! Three candidate strategies run unconditionally and their survivors are
//! merged:
//!
//! 1. **Open position**: chord-tone positions within the first three frets,
//!    one pass of the per-string assignment.
//! 2. **Barre shapes**: movable E-shape / A-shape templates planted on root
//!    positions found on the two lowest strings, validated against the
//!    chord's pitch classes.
//! 3. **Fret windows**: a window of `max_fret_span` frets slides up the neck
//!    in steps of two, running the per-string assignment in each window.
//!
//! The search is deliberately heuristic, not exhaustive: it never enumerates
//! all fret combinations, which keeps a generation call cheap and its output
//! stable. The orchestrator deduplicates by fret array, scores, filters
//! against the options, sorts by score (stable, so generation order breaks
//! ties), and truncates.

use crate::error::FretworkError;
use crate::fretboard::{Fretboard, FretboardPosition};
use crate::generator::options::SearchOptions;
use crate::scoring::score_voicing;
use crate::theory::{Chord, ChordQuality};
use crate::voicing::Voicing;
use std::collections::HashSet;

/// Raw output of the per-string assignment, before validation.
struct Candidate {
    frets: Vec<i8>,
    /// Root pitch class landed on one of the three lowest strings.
    has_root: bool,
    /// Distinct chord-tone pitch classes the assignment covered.
    covered: HashSet<u8>,
}

/// Generate playable voicings for a chord, best first.
///
/// Returns at most `options.max_results` voicings; an empty list means no
/// candidate satisfied the constraints, which is a normal outcome, not an
/// error.
pub fn generate_voicings(
    chord: &Chord,
    options: &SearchOptions,
) -> Result<Vec<Voicing>, FretworkError> {
    let (floor, ceiling) = options.window();
    if floor > ceiling {
        return Err(FretworkError::OptionsError(format!(
            "fret range ({}, {}) is inverted",
            floor, ceiling
        )));
    }

    let tuning = options.tuning.clone().unwrap_or_default();
    let board = Fretboard::new(tuning, ceiling);
    let tones = chord.pitch_classes();
    let root = chord.root().pitch_class();

    let mut raw: Vec<Vec<i8>> = Vec::new();

    // (a) Open position. A range query starting above the open frets skips
    // this strategy so results stay inside the requested window.
    if floor <= 3 {
        let candidate = assign_strings(&board, &tones, root, (0, 3.min(ceiling)));
        if validate_candidate(&candidate, options, tones.len()) {
            raw.push(candidate.frets);
        }
    }

    // (b) Barre shapes, validated on their own terms.
    if options.allow_barre {
        raw.extend(barre_candidates(&board, chord, &tones, root, floor, ceiling));
    }

    // (c) Sliding fret windows.
    let mut start = floor;
    while start.saturating_add(3) <= ceiling {
        let end = start.saturating_add(options.max_fret_span).min(ceiling);
        let candidate = assign_strings(&board, &tones, root, (start, end));
        if validate_candidate(&candidate, options, tones.len()) {
            raw.push(candidate.frets);
        }
        start += 2;
    }

    // Merge: dedup by fret array, first occurrence wins.
    let mut voicings: Vec<Voicing> = Vec::new();
    for frets in raw {
        let voicing = Voicing::new(&frets, &board)?;
        if !voicings.contains(&voicing) {
            voicings.push(voicing);
        }
    }

    // Score, filter, stable-sort best first, truncate. The hard constraints
    // are re-checked here because barre candidates validate only their pitch
    // content, yet every returned voicing must honor them.
    let mut scored: Vec<(Voicing, u8)> = voicings
        .into_iter()
        .filter_map(|voicing| {
            let root_in_bass = voicing
                .notes()
                .iter()
                .take(3)
                .flatten()
                .any(|n| n.pitch_class() == root);
            let score = score_voicing(&voicing);
            let keep = score.total >= options.min_playability_score
                && score.difficulty <= options.max_difficulty
                && voicing.strings_played() >= options.min_strings
                && voicing.muted_strings() <= options.max_muted_strings
                && voicing.fret_span() <= options.max_fret_span
                && (!options.require_root_in_bass || root_in_bass);
            keep.then_some((voicing, score.total))
        })
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(options.max_results);

    Ok(scored.into_iter().map(|(voicing, _)| voicing).collect())
}

/// Greedy per-string assignment shared by the open-position and fret-window
/// strategies.
///
/// Strings are visited low to high. A string with no chord-tone position in
/// the window falls back to its open string if that sounds a chord tone,
/// otherwise it is muted. The root is preferred onto one of the three lowest
/// strings; after that each string takes its lowest-fret position sounding a
/// not-yet-covered pitch class, falling back to its lowest-fret chord tone.
fn assign_strings(
    board: &Fretboard,
    tones: &[u8],
    root: u8,
    window: (u8, u8),
) -> Candidate {
    let (low, high) = window;
    let string_count = board.string_count();

    // Chord-tone positions in the window, per string, ascending by fret.
    let mut by_string: Vec<Vec<FretboardPosition>> = vec![Vec::new(); string_count];
    for position in board.positions_in_range(low, high) {
        if tones.contains(&position.pitch_class) {
            by_string[position.string].push(position);
        }
    }

    let mut frets = vec![-1i8; string_count];
    let mut covered: HashSet<u8> = HashSet::new();
    let mut has_root = false;

    for string in 0..string_count {
        let candidates = &by_string[string];

        if candidates.is_empty() {
            let open_pc = board.tuning().open_notes()[string].pitch_class();
            if tones.contains(&open_pc) {
                frets[string] = 0;
                covered.insert(open_pc);
                if open_pc == root && string <= 2 {
                    has_root = true;
                }
            }
            continue;
        }

        if string <= 2 && !has_root {
            if let Some(position) = candidates.iter().find(|p| p.pitch_class == root) {
                frets[string] = position.fret as i8;
                covered.insert(root);
                has_root = true;
                continue;
            }
        }

        let position = candidates
            .iter()
            .find(|p| !covered.contains(&p.pitch_class))
            .or_else(|| candidates.first());
        if let Some(position) = position {
            frets[string] = position.fret as i8;
            covered.insert(position.pitch_class);
        }
    }

    Candidate {
        frets,
        has_root,
        covered,
    }
}

/// Constraint check for assignment-built candidates. Barre candidates carry
/// their own validation and skip this one.
fn validate_candidate(candidate: &Candidate, options: &SearchOptions, total_tones: usize) -> bool {
    let muted = candidate.frets.iter().filter(|&&f| f == -1).count();
    if muted > options.max_muted_strings as usize {
        return false;
    }
    if options.require_root_in_bass && !candidate.has_root {
        return false;
    }
    // Partial coverage is acceptable for large chords: three distinct tones
    // already identify the harmony.
    if candidate.covered.len() < total_tones.min(3) {
        return false;
    }
    let fretted: Vec<i8> = candidate.frets.iter().filter(|&&f| f > 0).copied().collect();
    if let (Some(&low), Some(&high)) = (fretted.iter().min(), fretted.iter().max()) {
        if (high - low) as u8 > options.max_fret_span {
            return false;
        }
    }
    true
}

/// Fret offsets for a movable shape, relative to the root position's fret.
/// -1 marks a string the shape always mutes. Qualities without a template
/// row simply skip that shape.
fn shape_offsets(quality: ChordQuality, root_string: usize) -> Option<[i8; 6]> {
    match (root_string, quality) {
        // E-shape: root on the lowest string.
        (0, ChordQuality::Major) => Some([0, 0, 2, 2, 2, 0]),
        (0, ChordQuality::Minor) => Some([0, 0, 2, 2, 1, 0]),
        (0, ChordQuality::Dominant7) => Some([0, 0, 2, 0, 2, 0]),
        (0, ChordQuality::Minor7) => Some([0, 0, 2, 0, 1, 0]),
        (0, ChordQuality::Major7) => Some([0, 0, 2, 1, 2, 0]),
        // A-shape: root on the second string.
        (1, ChordQuality::Major) => Some([-1, 0, 2, 2, 2, 0]),
        (1, ChordQuality::Minor) => Some([-1, 0, 2, 2, 1, 0]),
        (1, ChordQuality::Dominant7) => Some([-1, 0, 2, 0, 2, 0]),
        (1, ChordQuality::Minor7) => Some([-1, 0, 2, 0, 1, 0]),
        _ => None,
    }
}

/// Plant barre templates on root positions found on the two lowest strings.
///
/// Root positions are taken in (fret, string) order, capped at five to bound
/// the search. Every expansion is validated: all sounded pitch classes must
/// be chord tones and the shape must sound the root plus at least one other
/// tone, otherwise it is discarded.
fn barre_candidates(
    board: &Fretboard,
    chord: &Chord,
    tones: &[u8],
    root: u8,
    floor: u8,
    ceiling: u8,
) -> Vec<Vec<i8>> {
    // Templates describe a 6-string shape.
    if board.string_count() != 6 {
        return Vec::new();
    }

    let min_root_fret = floor.max(1);
    let roots: Vec<FretboardPosition> = board
        .positions_for_pitch_class(root, ceiling)
        .into_iter()
        .filter(|p| p.string <= 1 && p.fret >= min_root_fret)
        .take(5)
        .collect();

    let open_pcs: Vec<u8> = board
        .tuning()
        .open_notes()
        .iter()
        .map(|n| n.pitch_class())
        .collect();

    let mut candidates = Vec::new();
    for position in roots {
        let Some(offsets) = shape_offsets(chord.quality(), position.string) else {
            continue;
        };
        let base = position.fret as i8;
        let frets: Vec<i8> = offsets
            .iter()
            .map(|&offset| if offset < 0 { -1 } else { base + offset })
            .collect();

        // The whole shape has to fit on the searched neck.
        if frets.iter().any(|&f| f > ceiling as i8) {
            continue;
        }

        let mut sounded: HashSet<u8> = HashSet::new();
        for (string, &fret) in frets.iter().enumerate() {
            if fret >= 0 {
                sounded.insert((open_pcs[string] as u16 + fret as u16).rem_euclid(12) as u8);
            }
        }
        let all_tones = sounded.iter().all(|pc| tones.contains(pc));
        if all_tones && sounded.contains(&root) && sounded.len() >= 2 {
            candidates.push(frets);
        }
    }
    candidates
}
