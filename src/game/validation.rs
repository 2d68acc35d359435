//! Placement validation
//!
//! Judges the tiles placed during the current turn. Checks run in a fixed
//! order and stop at the first failure:
//! 1. Connectivity (opening move covers the center, later moves touch an
//!    existing tile)
//! 2. Linearity (one row or column, no gaps)
//! 3. Every word formed is in the lexicon
//! 4. At least one word is formed
//!
//! Each call produces a fresh [`ValidationResult`]; nothing is remembered
//! between calls.

use super::words::{words_formed, Word};
use super::{Board, Coord, GameError, Lexicon};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Outcome of validating the current turn's placements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Placement is legal and every word is known
    Valid,
    /// Nothing has been placed this turn
    NothingPlaced,
    /// Opening move does not cover the center square
    MissesCenter { center: Coord },
    /// No placed tile touches a tile from an earlier turn
    Disconnected,
    /// Placed tiles do not share a row or a column
    NotInLine,
    /// A square between the placed tiles is empty
    Gap { at: Coord },
    /// Placement forms no word of two or more letters
    NoWord,
    /// Some formed words are not in the lexicon
    UnknownWords { words: Vec<String> },
}

impl Verdict {
    /// Returns true if the placement may be committed
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// Returns a user-friendly message
    pub fn message(&self) -> String {
        match self {
            Verdict::Valid => "Valid placement".to_string(),
            Verdict::NothingPlaced => "Place tiles to form a word".to_string(),
            Verdict::MissesCenter { center } => {
                format!("First word must cover the center {}", center)
            }
            Verdict::Disconnected => "Must touch a tile already on the board".to_string(),
            Verdict::NotInLine => "Tiles must be in a single row or column".to_string(),
            Verdict::Gap { at } => format!("Gap at {}", at),
            Verdict::NoWord => "No word formed".to_string(),
            Verdict::UnknownWords { words } => {
                format!("Not in dictionary: {}", words.join(", ").to_uppercase())
            }
        }
    }
}

/// Fresh result of one validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    verdict: Verdict,
    cells: BTreeMap<Coord, bool>,
    words: Vec<(Word, bool)>,
}

impl ValidationResult {
    fn empty() -> Self {
        Self {
            verdict: Verdict::NothingPlaced,
            cells: BTreeMap::new(),
            words: Vec::new(),
        }
    }

    /// Every placed square marked invalid
    fn rejected(verdict: Verdict, placements: &BTreeSet<Coord>) -> Self {
        Self {
            verdict,
            cells: placements.iter().map(|&c| (c, false)).collect(),
            words: Vec::new(),
        }
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    /// Square → whether every word formed through it this turn is valid
    pub fn cells(&self) -> &BTreeMap<Coord, bool> {
        &self.cells
    }

    pub fn cell(&self, coord: Coord) -> Option<bool> {
        self.cells.get(&coord).copied()
    }

    /// Distinct words formed this turn with their lexicon verdicts
    pub fn words(&self) -> &[(Word, bool)] {
        &self.words
    }

    /// The words that passed the lexicon
    pub fn valid_words(&self) -> impl Iterator<Item = &Word> {
        self.words.iter().filter(|(_, ok)| *ok).map(|(w, _)| w)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// True iff the result marks at least one square and every marked square
/// is valid.
pub fn is_commit_allowed(result: &ValidationResult) -> bool {
    !result.cells.is_empty() && result.cells.values().all(|&ok| ok)
}

/// Validate this turn's placements against the board and lexicon.
///
/// `placements` must all be occupied on `board`. Fails only when a
/// placement lies off the board.
pub fn validate_placement<L: Lexicon + ?Sized>(
    board: &Board,
    placements: &BTreeSet<Coord>,
    lexicon: &L,
) -> Result<ValidationResult, GameError> {
    if placements.is_empty() {
        return Ok(ValidationResult::empty());
    }
    if let Some(&coord) = placements.iter().find(|&&c| !board.contains(c)) {
        return Err(GameError::OutOfBounds { coord });
    }

    if let Some(verdict) = check_connectivity(board, placements) {
        debug!(?verdict, "placement rejected");
        return Ok(ValidationResult::rejected(verdict, placements));
    }
    if let Some(verdict) = check_linearity(board, placements) {
        debug!(?verdict, "placement rejected");
        return Ok(ValidationResult::rejected(verdict, placements));
    }

    let formed = words_formed(board, placements)?;
    if formed.is_empty() {
        return Ok(ValidationResult::rejected(Verdict::NoWord, placements));
    }

    let mut cells = BTreeMap::new();
    let mut words = Vec::with_capacity(formed.len());
    let mut unknown = Vec::new();
    for word in formed {
        let ok = lexicon.is_valid_word(&word.text);
        for &coord in &word.coords {
            // A square shared by a valid and an invalid word stays invalid.
            let entry = cells.entry(coord).or_insert(true);
            *entry &= ok;
        }
        if !ok {
            unknown.push(word.text.clone());
        }
        words.push((word, ok));
    }

    let verdict = if unknown.is_empty() {
        Verdict::Valid
    } else {
        Verdict::UnknownWords { words: unknown }
    };
    debug!(?verdict, words = words.len(), "placement validated");

    Ok(ValidationResult {
        verdict,
        cells,
        words,
    })
}

fn check_connectivity(board: &Board, placements: &BTreeSet<Coord>) -> Option<Verdict> {
    let first_move = board.occupied().all(|c| placements.contains(&c));
    if first_move {
        let center = board.center();
        return (!placements.contains(&center)).then_some(Verdict::MissesCenter { center });
    }

    let touches_existing = placements.iter().any(|&placed| {
        board
            .neighbors(placed)
            .any(|n| board.is_occupied(n) && !placements.contains(&n))
    });
    (!touches_existing).then_some(Verdict::Disconnected)
}

fn check_linearity(board: &Board, placements: &BTreeSet<Coord>) -> Option<Verdict> {
    let (Some(&first), Some(&last)) = (placements.first(), placements.last()) else {
        return None;
    };
    if placements.len() == 1 {
        return None;
    }

    // BTreeSet orders row-major, so first/last bound the span on either axis.
    let line: Vec<Coord> = if placements.iter().all(|c| c.row == first.row) {
        (first.col..=last.col)
            .map(|col| Coord::new(first.row, col))
            .collect()
    } else if placements.iter().all(|c| c.col == first.col) {
        (first.row..=last.row)
            .map(|row| Coord::new(row, first.col))
            .collect()
    } else {
        return Some(Verdict::NotInLine);
    };

    line.into_iter()
        .find(|&c| !board.is_occupied(c))
        .map(|at| Verdict::Gap { at })
}
