//! Game logic: board, tile supply, word extraction, validation, scoring, turns

pub mod board;
pub mod dictionary;
pub mod error;
pub mod scoring;
pub mod tiles;
pub mod turn;
pub mod validation;
pub mod words;

pub use board::{Board, Cell, Premium, PremiumMap};
pub use dictionary::{DictionaryError, Lexicon, WordList};
pub use error::GameError;
pub use scoring::{score_turn, score_word, TurnScore, WordScore};
pub use tiles::{LetterDistribution, LetterInfo, TileSupply};
pub use turn::{Game, GameView, TurnPhase, TurnSummary};
pub use validation::{is_commit_allowed, validate_placement, ValidationResult, Verdict};
pub use words::{words_formed, words_through, Axis, Word};

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A board coordinate, row first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[display("({row}, {col})")]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The four orthogonal neighbours, skipping any that would underflow.
    /// Upper bounds are the caller's concern.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        let Coord { row, col } = self;
        [
            row.checked_sub(1).map(|r| Coord::new(r, col)),
            Some(Coord::new(row + 1, col)),
            col.checked_sub(1).map(|c| Coord::new(row, c)),
            Some(Coord::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Coord> for (usize, usize) {
    fn from(coord: Coord) -> Self {
        (coord.row, coord.col)
    }
}

/// A lettered tile with its base point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{letter}")]
pub struct Tile {
    pub letter: char,
    pub points: u32,
}

impl Tile {
    pub fn new(letter: char, points: u32) -> Self {
        Self { letter, points }
    }
}

/// A participant: name, running score and rack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    score: u32,
    rack: Vec<Tile>,
}

impl Player {
    /// Create a player with an empty rack and zero score
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            rack: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Tiles currently held, in rack order
    pub fn rack(&self) -> &[Tile] {
        &self.rack
    }

    /// Letters on the rack, in rack order
    pub fn rack_letters(&self) -> Vec<char> {
        self.rack.iter().map(|t| t.letter).collect()
    }

    /// Position of the first rack tile carrying `letter` (case-insensitive)
    pub fn find_letter(&self, letter: char) -> Option<usize> {
        let wanted = letter.to_lowercase().next().unwrap_or(letter);
        self.rack.iter().position(|t| t.letter == wanted)
    }

    pub(crate) fn add_points(&mut self, points: u32) {
        self.score += points;
    }

    pub(crate) fn add_tiles(&mut self, tiles: Vec<Tile>) {
        self.rack.extend(tiles);
    }

    pub(crate) fn take_tile(&mut self, index: usize) -> Result<Tile, GameError> {
        if index >= self.rack.len() {
            return Err(GameError::RackIndexOutOfBounds {
                index,
                len: self.rack.len(),
            });
        }
        Ok(self.rack.remove(index))
    }

    /// Put a tile back at `index`, or at the end if the rack has since shrunk
    pub(crate) fn return_tile(&mut self, index: usize, tile: Tile) {
        let index = index.min(self.rack.len());
        self.rack.insert(index, tile);
    }
}
