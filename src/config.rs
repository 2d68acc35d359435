//! Game configuration: board size, rack capacity, players, letters, premiums.
//!
//! Every field has a default, so a TOML file only needs the keys it changes.

use crate::game::{Coord, GameError, LetterDistribution, Premium, PremiumMap};
use derive_more::{Display, Error};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default board edge length
pub const DEFAULT_BOARD_SIZE: usize = 15;
/// Default number of tiles on a full rack
pub const DEFAULT_RACK_CAPACITY: usize = 7;
/// Smallest board edge accepted
pub const MIN_BOARD_SIZE: usize = 5;

/// Standard 15×15 premium layout
static STANDARD_PREMIUMS: Lazy<PremiumLayout> = Lazy::new(|| PremiumLayout {
    triple_word: coords(&[
        (0, 0),
        (0, 7),
        (0, 14),
        (7, 0),
        (7, 14),
        (14, 0),
        (14, 7),
        (14, 14),
    ]),
    double_word: coords(&[
        (1, 1),
        (1, 13),
        (2, 2),
        (2, 12),
        (3, 3),
        (3, 11),
        (4, 4),
        (4, 10),
        (10, 4),
        (10, 10),
        (11, 3),
        (11, 11),
        (12, 2),
        (12, 12),
        (13, 1),
        (13, 13),
    ]),
    triple_letter: coords(&[
        (1, 5),
        (1, 9),
        (5, 1),
        (5, 5),
        (5, 9),
        (5, 13),
        (9, 1),
        (9, 5),
        (9, 9),
        (9, 13),
        (13, 5),
        (13, 9),
    ]),
    double_letter: coords(&[
        (0, 3),
        (0, 11),
        (2, 6),
        (2, 8),
        (3, 0),
        (3, 7),
        (3, 14),
        (6, 2),
        (6, 6),
        (6, 8),
        (6, 12),
        (7, 3),
        (7, 11),
        (8, 2),
        (8, 6),
        (8, 8),
        (8, 12),
        (11, 0),
        (11, 7),
        (11, 14),
        (12, 6),
        (12, 8),
        (14, 3),
        (14, 11),
    ]),
});

fn coords(pairs: &[(usize, usize)]) -> Vec<Coord> {
    pairs.iter().copied().map(Coord::from).collect()
}

/// Errors that can occur while loading or checking a configuration.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[display("board size must be odd and at least {}, got {size}", MIN_BOARD_SIZE)]
    BoardSize { size: usize },
    #[display("rack capacity must be at least 1")]
    RackCapacity,
    #[display("at least one player is required")]
    NoPlayers,
    #[display("letter distribution contains no tiles")]
    EmptyDistribution,
    #[display("premium square {coord} is outside a {size}x{size} board")]
    PremiumOutOfBounds { coord: Coord, size: usize },
    #[display("premium square {coord} is listed as both {first:?} and {second:?}")]
    ConflictingPremium {
        coord: Coord,
        first: Premium,
        second: Premium,
    },
}

/// Coordinates of each premium kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PremiumLayout {
    pub double_letter: Vec<Coord>,
    pub triple_letter: Vec<Coord>,
    pub double_word: Vec<Coord>,
    pub triple_word: Vec<Coord>,
}

impl PremiumLayout {
    /// The classic 15×15 layout
    pub fn standard() -> Self {
        STANDARD_PREMIUMS.clone()
    }

    /// Every `(coordinate, kind)` pair in the layout
    pub fn squares(&self) -> impl Iterator<Item = (Coord, Premium)> + '_ {
        tagged(&self.double_letter, Premium::DoubleLetter)
            .chain(tagged(&self.triple_letter, Premium::TripleLetter))
            .chain(tagged(&self.double_word, Premium::DoubleWord))
            .chain(tagged(&self.triple_word, Premium::TripleWord))
    }
}

fn tagged(list: &[Coord], kind: Premium) -> impl Iterator<Item = (Coord, Premium)> + '_ {
    list.iter().map(move |&coord| (coord, kind))
}

/// Everything needed to set up a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    pub rack_capacity: usize,
    pub players: Vec<String>,
    pub letters: LetterDistribution,
    pub premiums: PremiumLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            rack_capacity: DEFAULT_RACK_CAPACITY,
            players: vec!["Player 1".to_string(), "Player 2".to_string()],
            letters: LetterDistribution::estonian(),
            premiums: PremiumLayout::standard(),
        }
    }
}

impl GameConfig {
    /// Read and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration describes a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < MIN_BOARD_SIZE || self.board_size % 2 == 0 {
            return Err(ConfigError::BoardSize {
                size: self.board_size,
            });
        }
        if self.rack_capacity == 0 {
            return Err(ConfigError::RackCapacity);
        }
        if self.players.is_empty() {
            return Err(ConfigError::NoPlayers);
        }
        if self.letters.is_empty() {
            return Err(ConfigError::EmptyDistribution);
        }

        let mut kinds: HashMap<Coord, Premium> = HashMap::new();
        for (coord, kind) in self.premiums.squares() {
            if coord.row >= self.board_size || coord.col >= self.board_size {
                return Err(ConfigError::PremiumOutOfBounds {
                    coord,
                    size: self.board_size,
                });
            }
            match kinds.insert(coord, kind) {
                Some(first) if first != kind => {
                    return Err(ConfigError::ConflictingPremium {
                        coord,
                        first,
                        second: kind,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Build the premium map for this configuration
    pub fn premium_map(&self) -> Result<PremiumMap, ConfigError> {
        self.validate()?;
        PremiumMap::from_squares(self.board_size, self.premiums.squares()).map_err(|err| match err {
            GameError::OutOfBounds { coord } => ConfigError::PremiumOutOfBounds {
                coord,
                size: self.board_size,
            },
            _ => ConfigError::BoardSize {
                size: self.board_size,
            },
        })
    }
}
