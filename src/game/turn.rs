//! Turn controller
//!
//! Owns the board, the supply, the players and the tiles placed during the
//! current turn. Every move goes through here:
//!
//! ```text
//! AwaitingPlacement --place/remove--> Ready (all words valid)
//!        ^                              |
//!        +------- commit / pass --------+
//! ```
//!
//! `GameOver` is entered after a commit or pass once the supply is empty and
//! some rack is empty.

use super::scoring::{score_turn, WordScore};
use super::validation::{is_commit_allowed, validate_placement, ValidationResult};
use super::{Board, Coord, GameError, Lexicon, Player, Tile, TileSupply};
use crate::config::{ConfigError, GameConfig};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// Where the current turn stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting for a legal placement
    AwaitingPlacement,
    /// Current placement may be committed
    Ready,
    /// No further moves are accepted
    GameOver,
}

/// Record of a committed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSummary {
    /// Index of the player who made the move
    pub player: usize,
    /// Each distinct word formed, with its points
    pub words: Vec<WordScore>,
    /// Points added to the player's score
    pub total: u32,
    /// Replacement tiles drawn from the supply
    pub tiles_drawn: usize,
}

/// Read-only snapshot for a presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub board: &'a Board,
    pub players: &'a [Player],
    pub current_player: usize,
    pub placements: &'a BTreeSet<Coord>,
    pub validation: &'a ValidationResult,
    pub supply_remaining: usize,
    pub phase: TurnPhase,
    pub turn: u32,
}

impl GameView<'_> {
    pub fn current(&self) -> &Player {
        &self.players[self.current_player]
    }
}

/// A tile placed this turn and the rack slot it came from
#[derive(Debug, Clone, Copy)]
struct Placement {
    coord: Coord,
    rack_index: usize,
}

/// A game in progress.
pub struct Game<L> {
    board: Board,
    supply: TileSupply,
    players: Vec<Player>,
    current: usize,
    rack_capacity: usize,
    /// This turn's tiles in the order they were placed
    placements: Vec<Placement>,
    placed: BTreeSet<Coord>,
    validation: ValidationResult,
    game_over: bool,
    turn: u32,
    history: Vec<TurnSummary>,
    lexicon: L,
}

impl<L: Lexicon> Game<L> {
    /// Start a game with an OS-seeded supply
    pub fn new(config: &GameConfig, lexicon: L) -> Result<Self, ConfigError> {
        Self::with_supply(config, lexicon, TileSupply::new(&config.letters))
    }

    /// Start a game whose tile draws are reproducible
    pub fn with_seed(config: &GameConfig, lexicon: L, seed: u64) -> Result<Self, ConfigError> {
        Self::with_supply(config, lexicon, TileSupply::seeded(&config.letters, seed))
    }

    /// Start a game drawing from `supply`. Each player is dealt a full rack.
    pub fn with_supply(
        config: &GameConfig,
        lexicon: L,
        mut supply: TileSupply,
    ) -> Result<Self, ConfigError> {
        let board = Board::new(config.premium_map()?);
        let players = config
            .players
            .iter()
            .map(|name| {
                let mut player = Player::new(name.clone());
                player.add_tiles(supply.draw(config.rack_capacity));
                player
            })
            .collect();

        info!(
            players = config.players.len(),
            board_size = config.board_size,
            supply = supply.len(),
            "game started"
        );

        let mut game = Self {
            board,
            supply,
            players,
            current: 0,
            rack_capacity: config.rack_capacity,
            placements: Vec::new(),
            placed: BTreeSet::new(),
            validation: ValidationResult::default(),
            game_over: false,
            turn: 1,
            history: Vec::new(),
            lexicon,
        };
        game.game_over = game.check_game_over();
        Ok(game)
    }

    /// Move the tile at `rack_index` of the current player's rack onto `coord`.
    #[instrument(skip(self))]
    pub fn place(&mut self, coord: Coord, rack_index: usize) -> Result<(), GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if !self.board.get(coord)?.is_empty() {
            return Err(GameError::OccupiedCell { coord });
        }

        let player = &mut self.players[self.current];
        let tile = player.take_tile(rack_index)?;
        if let Err(err) = self.board.place(coord, tile) {
            player.return_tile(rack_index, tile);
            return Err(err);
        }
        self.placements.push(Placement { coord, rack_index });
        self.placed.insert(coord);
        debug!(letter = %tile.letter, "tile placed");

        self.revalidate()
    }

    /// Take back a tile placed this turn and return it to the rack.
    #[instrument(skip(self))]
    pub fn remove(&mut self, coord: Coord) -> Result<Tile, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        self.board.get(coord)?;
        let Some(pos) = self.placements.iter().position(|p| p.coord == coord) else {
            return Err(GameError::NotThisTurn { coord });
        };
        let tile = self
            .board
            .clear(coord)?
            .ok_or(GameError::NotThisTurn { coord })?;

        let placement = self.placements.remove(pos);
        self.placed.remove(&coord);
        self.players[self.current].return_tile(placement.rack_index, tile);
        debug!(letter = %tile.letter, "tile returned to rack");

        self.revalidate()?;
        Ok(tile)
    }

    /// Validate the current placement from scratch
    pub fn validate(&self) -> Result<ValidationResult, GameError> {
        validate_placement(&self.board, &self.placed, &self.lexicon)
    }

    /// Score the current placement, refill the rack and pass play on.
    ///
    /// Returns `None`, changing nothing, when the placement is not
    /// committable.
    #[instrument(skip(self))]
    pub fn commit(&mut self) -> Option<TurnSummary> {
        if self.game_over {
            return None;
        }
        let validation = match self.validate() {
            Ok(validation) => validation,
            Err(err) => {
                warn!(error = %err, "validation failed during commit");
                return None;
            }
        };
        if !is_commit_allowed(&validation) {
            debug!(verdict = ?validation.verdict(), "commit refused");
            self.validation = validation;
            return None;
        }

        let score = score_turn(&self.board, validation.valid_words(), &self.placed);
        let placed_count = self.placements.len();
        let player = &mut self.players[self.current];
        player.add_points(score.total);

        let room = self.rack_capacity.saturating_sub(player.rack().len());
        let drawn = self.supply.draw(placed_count.min(room));
        let tiles_drawn = drawn.len();
        player.add_tiles(drawn);

        let summary = TurnSummary {
            player: self.current,
            words: score.words,
            total: score.total,
            tiles_drawn,
        };
        info!(
            player = %player.name(),
            points = summary.total,
            words = summary.words.len(),
            tiles_drawn,
            "turn committed"
        );

        self.history.push(summary.clone());
        self.end_turn();
        Some(summary)
    }

    /// Return this turn's tiles to the rack and pass play on without scoring.
    #[instrument(skip(self))]
    pub fn pass_turn(&mut self) {
        if self.game_over {
            return;
        }
        let player = &mut self.players[self.current];
        for placement in self.placements.drain(..).rev() {
            if let Ok(Some(tile)) = self.board.clear(placement.coord) {
                player.return_tile(placement.rack_index, tile);
            }
        }
        info!(player = %player.name(), "turn passed");
        self.end_turn();
    }

    fn revalidate(&mut self) -> Result<(), GameError> {
        self.validation = self.validate()?;
        Ok(())
    }

    fn end_turn(&mut self) {
        self.placements.clear();
        self.placed.clear();
        self.validation = ValidationResult::default();
        self.current = (self.current + 1) % self.players.len();
        self.turn += 1;
        self.game_over = self.check_game_over();
        if self.game_over {
            info!(turn = self.turn, "game over");
        }
    }

    fn check_game_over(&self) -> bool {
        self.supply.is_empty() && self.players.iter().any(|p| p.rack().is_empty())
    }
}

impl<L> Game<L> {
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Squares filled during the current turn
    pub fn placements(&self) -> &BTreeSet<Coord> {
        &self.placed
    }

    /// Validation of the placement as it stands after the last move
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn supply_remaining(&self) -> usize {
        self.supply.len()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> TurnPhase {
        if self.game_over {
            TurnPhase::GameOver
        } else if is_commit_allowed(&self.validation) {
            TurnPhase::Ready
        } else {
            TurnPhase::AwaitingPlacement
        }
    }

    /// Number of the turn in progress, starting at 1
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Committed turns, oldest first
    pub fn history(&self) -> &[TurnSummary] {
        &self.history
    }

    pub fn lexicon(&self) -> &L {
        &self.lexicon
    }

    /// Indices of the players with the highest score
    pub fn leaders(&self) -> Vec<usize> {
        let best = self.players.iter().map(Player::score).max().unwrap_or(0);
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.score() == best)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn view(&self) -> GameView<'_> {
        GameView {
            board: &self.board,
            players: &self.players,
            current_player: self.current,
            placements: &self.placed,
            validation: &self.validation,
            supply_remaining: self.supply.len(),
            phase: self.phase(),
            turn: self.turn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PremiumLayout;
    use crate::game::{Cell, Verdict, WordList};

    fn lexicon() -> WordList {
        WordList::from_words(["ema", "emas", "maa", "kes", "sees", "ses", "ems", "ms"])
    }

    fn new_game(config: &GameConfig) -> Game<WordList> {
        Game::with_seed(config, lexicon(), 11).unwrap()
    }

    /// Replace a player's rack with the given letters
    fn rig_rack(game: &mut Game<WordList>, player: usize, letters: &str) {
        let dist = crate::game::LetterDistribution::estonian();
        game.players[player].rack = letters
            .chars()
            .map(|c| Tile::new(c, dist.points(c).unwrap_or(1)))
            .collect();
    }

    fn place_word(game: &mut Game<WordList>, start: (usize, usize), word: &str) {
        for (i, c) in word.chars().enumerate() {
            let index = game.current_player().find_letter(c).unwrap();
            game.place(Coord::new(start.0, start.1 + i), index).unwrap();
        }
    }

    #[test]
    fn test_players_dealt_full_racks() {
        let game = new_game(&GameConfig::default());
        assert_eq!(game.players().len(), 2);
        for player in game.players() {
            assert_eq!(player.rack().len(), 7);
        }
        assert_eq!(game.supply_remaining(), 115 - 14);
        assert_eq!(game.phase(), TurnPhase::AwaitingPlacement);
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn test_seeded_games_deal_identically() {
        let config = GameConfig::default();
        let a = new_game(&config);
        let b = new_game(&config);
        assert_eq!(a.players(), b.players());
    }

    #[test]
    fn test_first_turn_end_to_end() {
        let mut game = new_game(&GameConfig::default());
        rig_rack(&mut game, 0, "emaskti");

        place_word(&mut game, (7, 7), "ema");
        let validation = game.validation();
        assert_eq!(validation.verdict(), &Verdict::Valid);
        for col in 7..=9 {
            assert_eq!(validation.cell(Coord::new(7, col)), Some(true));
        }
        assert_eq!(game.phase(), TurnPhase::Ready);

        let summary = game.commit().unwrap();
        // e=1, m=2, a=1; no premiums on these squares
        assert_eq!(summary.total, 4);
        assert_eq!(summary.player, 0);
        assert_eq!(summary.tiles_drawn, 3);
        assert_eq!(game.players()[0].score(), 4);
        assert_eq!(game.players()[0].rack().len(), 7);
        assert_eq!(game.current_player_index(), 1);
        assert!(game.placements().is_empty());
        assert_eq!(game.phase(), TurnPhase::AwaitingPlacement);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.turn(), 2);
    }

    #[test]
    fn test_place_then_remove_round_trips() {
        let mut game = new_game(&GameConfig::default());
        let rack_before = game.current_player().rack().to_vec();
        let coord = Coord::new(7, 7);

        game.place(coord, 3).unwrap();
        assert_eq!(game.current_player().rack().len(), 6);
        assert!(game.placements().contains(&coord));

        let tile = game.remove(coord).unwrap();
        assert_eq!(tile, rack_before[3]);
        assert_eq!(game.board().get(coord).unwrap(), Cell::Empty);
        assert_eq!(game.current_player().rack(), rack_before.as_slice());
        assert!(game.placements().is_empty());
        assert_eq!(game.validation().verdict(), &Verdict::NothingPlaced);
    }

    #[test]
    fn test_place_errors_leave_state_unchanged() {
        let mut game = new_game(&GameConfig::default());
        game.place(Coord::new(7, 7), 0).unwrap();
        let rack = game.current_player().rack().to_vec();

        assert_eq!(
            game.place(Coord::new(7, 7), 0),
            Err(GameError::OccupiedCell {
                coord: Coord::new(7, 7)
            })
        );
        assert_eq!(
            game.place(Coord::new(7, 8), 6),
            Err(GameError::RackIndexOutOfBounds { index: 6, len: 6 })
        );
        assert_eq!(
            game.place(Coord::new(20, 0), 0),
            Err(GameError::OutOfBounds {
                coord: Coord::new(20, 0)
            })
        );
        assert_eq!(game.current_player().rack(), rack.as_slice());
        assert_eq!(game.placements().len(), 1);
    }

    #[test]
    fn test_committed_tiles_cannot_be_removed() {
        let mut game = new_game(&GameConfig::default());
        rig_rack(&mut game, 0, "emaskti");
        place_word(&mut game, (7, 7), "ema");
        game.commit().unwrap();

        assert_eq!(
            game.remove(Coord::new(7, 8)),
            Err(GameError::NotThisTurn {
                coord: Coord::new(7, 8)
            })
        );
        assert_eq!(
            game.remove(Coord::new(0, 0)),
            Err(GameError::NotThisTurn {
                coord: Coord::new(0, 0)
            })
        );
    }

    #[test]
    fn test_commit_refused_for_invalid_placement() {
        let mut game = new_game(&GameConfig::default());
        rig_rack(&mut game, 0, "emaskti");
        let index = game.current_player().find_letter('e').unwrap();
        game.place(Coord::new(7, 7), index).unwrap();
        let index = game.current_player().find_letter('a').unwrap();
        game.place(Coord::new(7, 9), index).unwrap();

        assert!(matches!(game.validation().verdict(), Verdict::Gap { .. }));
        assert_eq!(game.commit(), None);
        assert_eq!(game.current_player_index(), 0);
        assert_eq!(game.players()[0].score(), 0);
        assert_eq!(game.placements().len(), 2);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_commit_refused_with_nothing_placed() {
        let mut game = new_game(&GameConfig::default());
        assert_eq!(game.commit(), None);
        assert_eq!(game.current_player_index(), 0);
    }

    #[test]
    fn test_pass_returns_tiles_and_advances() {
        let mut game = new_game(&GameConfig::default());
        let rack_before = game.current_player().rack().to_vec();
        game.place(Coord::new(7, 7), 0).unwrap();
        game.place(Coord::new(7, 8), 2).unwrap();

        game.pass_turn();

        assert!(game.board().is_empty());
        assert_eq!(game.players()[0].rack(), rack_before.as_slice());
        assert_eq!(game.players()[0].score(), 0);
        assert_eq!(game.current_player_index(), 1);
        assert!(game.placements().is_empty());
        assert_eq!(game.turn(), 2);
    }

    #[test]
    fn test_premium_applies_once_across_turns() {
        let config = GameConfig {
            premiums: PremiumLayout {
                double_word: vec![Coord::new(7, 7)],
                ..PremiumLayout::default()
            },
            ..GameConfig::default()
        };
        let mut game = new_game(&config);
        rig_rack(&mut game, 0, "emaskti");
        place_word(&mut game, (7, 7), "ema");
        assert_eq!(game.commit().unwrap().total, (1 + 2 + 1) * 2);

        rig_rack(&mut game, 1, "sluttiv");
        place_word(&mut game, (7, 10), "s");
        let summary = game.commit().unwrap();
        assert_eq!(summary.words.len(), 1);
        assert_eq!(summary.words[0].word, "emas");
        assert_eq!(summary.total, 1 + 2 + 1 + 1);
    }

    #[test]
    fn test_single_tile_scores_cross_word() {
        let mut game = new_game(&GameConfig {
            premiums: PremiumLayout::default(),
            ..GameConfig::default()
        });
        rig_rack(&mut game, 0, "emaskti");
        place_word(&mut game, (7, 7), "ema");
        game.commit().unwrap();

        // s under the m forms "ms" only
        rig_rack(&mut game, 1, "sklttiv");
        let index = game.current_player().find_letter('s').unwrap();
        game.place(Coord::new(8, 8), index).unwrap();
        let summary = game.commit().unwrap();
        assert_eq!(summary.words.len(), 1);
        assert_eq!(summary.total, 2 + 1);
    }

    #[test]
    fn test_game_over_when_supply_and_a_rack_are_empty() {
        let mut game = new_game(&GameConfig::default());
        game.supply.draw(usize::MAX);
        rig_rack(&mut game, 0, "ema");

        place_word(&mut game, (7, 7), "ema");
        // Rack empty mid-turn is not game over yet
        assert!(!game.is_game_over());

        let summary = game.commit().unwrap();
        assert_eq!(summary.tiles_drawn, 0);
        assert!(game.is_game_over());
        assert_eq!(game.phase(), TurnPhase::GameOver);

        assert_eq!(game.place(Coord::new(0, 0), 0), Err(GameError::GameOver));
        assert_eq!(game.commit(), None);
        let turn = game.turn();
        game.pass_turn();
        assert_eq!(game.turn(), turn);
        assert_eq!(game.leaders(), vec![0]);
    }

    #[test]
    fn test_not_game_over_while_racks_hold_tiles() {
        let mut game = new_game(&GameConfig::default());
        game.supply.draw(usize::MAX);
        game.pass_turn();
        assert!(!game.is_game_over());

        let mut game = new_game(&GameConfig::default());
        rig_rack(&mut game, 0, "");
        game.pass_turn();
        // Supply still has tiles
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_view_reflects_state() {
        let mut game = new_game(&GameConfig::default());
        game.place(Coord::new(7, 7), 0).unwrap();
        let view = game.view();
        assert_eq!(view.current_player, 0);
        assert_eq!(view.current().rack().len(), 6);
        assert!(view.placements.contains(&Coord::new(7, 7)));
        assert_eq!(view.validation.cell(Coord::new(7, 7)), Some(false));
        assert_eq!(view.supply_remaining, 115 - 14);
        assert_eq!(view.phase, TurnPhase::AwaitingPlacement);
    }
}
