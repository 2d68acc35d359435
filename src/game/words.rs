//! Word extraction: the contiguous runs of tiles crossing a square.

use super::{Board, Coord, GameError};
use std::collections::HashSet;

/// Minimum number of letters in a word
pub const MIN_WORD_LENGTH: usize = 2;

/// Direction a word runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right along a row
    Row,
    /// Top to bottom along a column
    Column,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Row, Axis::Column];

    fn step_back(self, coord: Coord) -> Option<Coord> {
        match self {
            Axis::Row => coord.col.checked_sub(1).map(|col| Coord::new(coord.row, col)),
            Axis::Column => coord.row.checked_sub(1).map(|row| Coord::new(row, coord.col)),
        }
    }

    fn step_forward(self, coord: Coord) -> Coord {
        match self {
            Axis::Row => Coord::new(coord.row, coord.col + 1),
            Axis::Column => Coord::new(coord.row + 1, coord.col),
        }
    }
}

/// A run of two or more tiles and the squares it covers, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    pub text: String,
    pub axis: Axis,
    pub coords: Vec<Coord>,
}

impl Word {
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// The words running through `coord`, at most one per axis.
///
/// An empty square yields no words. A run shorter than two letters is not a
/// word and is left out.
pub fn words_through(board: &Board, coord: Coord) -> Result<Vec<Word>, GameError> {
    if board.get(coord)?.is_empty() {
        return Ok(Vec::new());
    }

    Ok(Axis::BOTH
        .into_iter()
        .filter_map(|axis| word_along(board, coord, axis))
        .collect())
}

/// Every distinct word crossing any of `coords`, in first-seen order.
///
/// A word covering several of the given squares is reported once.
pub fn words_formed<'a>(
    board: &Board,
    coords: impl IntoIterator<Item = &'a Coord>,
) -> Result<Vec<Word>, GameError> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for &coord in coords {
        for word in words_through(board, coord)? {
            if seen.insert((word.text.clone(), word.coords.clone())) {
                words.push(word);
            }
        }
    }
    Ok(words)
}

fn word_along(board: &Board, coord: Coord, axis: Axis) -> Option<Word> {
    let mut start = coord;
    while let Some(prev) = axis.step_back(start).filter(|&c| board.is_occupied(c)) {
        start = prev;
    }

    let mut text = String::new();
    let mut coords = Vec::new();
    let mut cursor = start;
    while let Some(tile) = board.tile_at(cursor) {
        text.push(tile.letter);
        coords.push(cursor);
        cursor = axis.step_forward(cursor);
    }

    (coords.len() >= MIN_WORD_LENGTH).then_some(Word { text, axis, coords })
}
