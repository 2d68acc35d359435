//! Turn scoring.
//!
//! Premium squares count only for tiles placed this turn. Once a tile is
//! committed its square's premium is spent.

use super::words::Word;
use super::{Board, Coord};
use std::collections::BTreeSet;

/// Points earned by one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordScore {
    pub word: String,
    pub points: u32,
}

/// Points earned by one turn, word by word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnScore {
    pub words: Vec<WordScore>,
    pub total: u32,
}

/// Score a single word.
///
/// Letter premiums multiply the letter, word premiums multiply the word
/// and compound with each other, but only on squares in `placed`.
pub fn score_word(board: &Board, word: &Word, placed: &BTreeSet<Coord>) -> u32 {
    let mut letters = 0;
    let mut multiplier = 1;
    for &coord in &word.coords {
        let Some(tile) = board.tile_at(coord) else {
            continue;
        };
        let premium = if placed.contains(&coord) {
            board.premium_at(coord).unwrap_or_default()
        } else {
            Default::default()
        };
        letters += tile.points * premium.letter_multiplier();
        multiplier *= premium.word_multiplier();
    }
    letters * multiplier
}

/// Score every distinct word formed this turn, each exactly once.
pub fn score_turn<'a>(
    board: &Board,
    words: impl IntoIterator<Item = &'a Word>,
    placed: &BTreeSet<Coord>,
) -> TurnScore {
    let mut seen = BTreeSet::new();
    let mut score = TurnScore::default();
    for word in words {
        if !seen.insert(&word.coords) {
            continue;
        }
        let points = score_word(board, word, placed);
        score.total += points;
        score.words.push(WordScore {
            word: word.text.clone(),
            points,
        });
    }
    score
}
