//! Letter distribution and the shuffled tile supply.

use super::Tile;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Estonian letter distribution: (letter, count, points).
const ESTONIAN_LETTERS: [(char, u32, u32); 27] = [
    // High-frequency vowels
    ('a', 10, 1),
    ('e', 9, 1),
    ('i', 9, 1),
    ('u', 5, 2),
    ('o', 5, 2),
    // High-frequency consonants
    ('s', 8, 1),
    ('t', 7, 1),
    ('l', 6, 1),
    ('n', 6, 1),
    ('k', 6, 2),
    ('r', 6, 2),
    ('d', 4, 2),
    ('m', 4, 2),
    ('v', 4, 2),
    // Vowels with diacritics
    ('ä', 4, 2),
    ('õ', 2, 3),
    ('ö', 2, 3),
    ('ü', 2, 3),
    // Low-frequency consonants
    ('h', 3, 3),
    ('p', 3, 3),
    ('j', 2, 4),
    ('b', 2, 4),
    ('g', 2, 4),
    ('f', 1, 8),
    ('š', 1, 8),
    ('z', 1, 10),
    ('ž', 1, 10),
];

/// How many copies of a letter the supply starts with, and what it scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterInfo {
    pub count: u32,
    pub points: u32,
}

/// Letter → {count, points} table the supply is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<char, LetterInfo>",
    into = "BTreeMap<char, LetterInfo>"
)]
pub struct LetterDistribution(BTreeMap<char, LetterInfo>);

impl LetterDistribution {
    /// The standard Estonian table (115 tiles).
    pub fn estonian() -> Self {
        ESTONIAN_LETTERS
            .iter()
            .map(|&(letter, count, points)| (letter, LetterInfo { count, points }))
            .collect()
    }

    /// Base points for `letter`, if the table knows it.
    pub fn points(&self, letter: char) -> Option<u32> {
        self.0.get(&letter).map(|info| info.points)
    }

    /// Total number of tiles the table describes.
    pub fn total_tiles(&self) -> usize {
        self.0.values().map(|info| info.count as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_tiles() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, LetterInfo)> + '_ {
        self.0.iter().map(|(&letter, &info)| (letter, info))
    }

    /// Expand the table into one tile per count.
    fn tiles(&self) -> Vec<Tile> {
        self.iter()
            .flat_map(|(letter, info)| {
                std::iter::repeat_n(Tile::new(letter, info.points), info.count as usize)
            })
            .collect()
    }
}

impl Default for LetterDistribution {
    fn default() -> Self {
        Self::estonian()
    }
}

impl FromIterator<(char, LetterInfo)> for LetterDistribution {
    fn from_iter<I: IntoIterator<Item = (char, LetterInfo)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(letter, info)| (lowercase(letter), info))
                .collect(),
        )
    }
}

impl From<BTreeMap<char, LetterInfo>> for LetterDistribution {
    fn from(table: BTreeMap<char, LetterInfo>) -> Self {
        table.into_iter().collect()
    }
}

impl From<LetterDistribution> for BTreeMap<char, LetterInfo> {
    fn from(distribution: LetterDistribution) -> Self {
        distribution.0
    }
}

fn lowercase(letter: char) -> char {
    letter.to_lowercase().next().unwrap_or(letter)
}

/// The undealt pool of tiles. Shrinks with every draw and is never refilled.
#[derive(Debug, Clone)]
pub struct TileSupply {
    tiles: Vec<Tile>,
    rng: StdRng,
}

impl TileSupply {
    /// Build a supply from the distribution using an OS-seeded generator.
    pub fn new(distribution: &LetterDistribution) -> Self {
        Self::with_rng(distribution, StdRng::from_rng(&mut rand::rng()))
    }

    /// Build a supply whose draws are reproducible for a given seed.
    pub fn seeded(distribution: &LetterDistribution, seed: u64) -> Self {
        Self::with_rng(distribution, StdRng::seed_from_u64(seed))
    }

    /// Build a supply that draws with the given generator.
    pub fn with_rng(distribution: &LetterDistribution, rng: StdRng) -> Self {
        Self {
            tiles: distribution.tiles(),
            rng,
        }
    }

    /// Remove up to `n` tiles uniformly at random, without replacement.
    ///
    /// Returns fewer than `n` tiles (possibly none) when the supply runs low.
    pub fn draw(&mut self, n: usize) -> Vec<Tile> {
        let n = n.min(self.tiles.len());
        (0..n)
            .map(|_| {
                let index = self.rng.random_range(0..self.tiles.len());
                self.tiles.swap_remove(index)
            })
            .collect()
    }

    /// Tiles left in the supply
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estonian_table_size() {
        let dist = LetterDistribution::estonian();
        assert_eq!(dist.total_tiles(), 115);
        assert_eq!(dist.points('z'), Some(10));
        assert_eq!(dist.points('ä'), Some(2));
        assert_eq!(dist.points('q'), None);
    }

    #[test]
    fn test_draw_shrinks_supply() {
        let dist = LetterDistribution::estonian();
        let mut supply = TileSupply::seeded(&dist, 7);
        let before = supply.len();

        let drawn = supply.draw(7);
        assert_eq!(drawn.len(), 7);
        assert_eq!(supply.len(), before - 7);
    }

    #[test]
    fn test_partial_draw_near_end() {
        let dist: LetterDistribution = [('a', LetterInfo { count: 3, points: 1 })]
            .into_iter()
            .collect();
        let mut supply = TileSupply::seeded(&dist, 1);

        assert_eq!(supply.draw(2).len(), 2);
        assert_eq!(supply.draw(5).len(), 1);
        assert!(supply.is_empty());
        assert!(supply.draw(5).is_empty());
    }

    #[test]
    fn test_draws_respect_counts() {
        let dist = LetterDistribution::estonian();
        let mut supply = TileSupply::seeded(&dist, 99);
        let all = supply.draw(1000);

        assert_eq!(all.len(), 115);
        let zeds = all.iter().filter(|t| t.letter == 'z').count();
        let a_count = all.iter().filter(|t| t.letter == 'a').count();
        assert_eq!(zeds, 1);
        assert_eq!(a_count, 10);
        assert!(all.iter().all(|t| dist.points(t.letter) == Some(t.points)));
    }

    #[test]
    fn test_seeded_supply_is_deterministic() {
        let dist = LetterDistribution::estonian();
        let mut s1 = TileSupply::seeded(&dist, 42);
        let mut s2 = TileSupply::seeded(&dist, 42);

        assert_eq!(s1.draw(20), s2.draw(20));
    }

    #[test]
    fn test_letters_are_lowercased() {
        let dist: LetterDistribution = [('Ö', LetterInfo { count: 1, points: 3 })]
            .into_iter()
            .collect();
        assert_eq!(dist.points('ö'), Some(3));
    }
}
