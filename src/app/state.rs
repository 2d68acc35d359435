//! Application state management

use crate::game::{Coord, Game, GameError, WordList};
use tracing::debug;

/// Number of hint words shown at once
pub const MAX_HINTS: usize = 5;

/// Cursor movement on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Main application state
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    /// The game being played
    pub game: Game<WordList>,
    /// Board square the next tile goes to
    pub cursor: Coord,
    /// Feedback message from the last action
    pub feedback: String,
    /// Words spellable from the current rack, shown on request
    pub hints: Vec<String>,
}

impl App {
    /// Create a new application around a started game
    pub fn new(game: Game<WordList>) -> Self {
        let cursor = game.board().center();
        let feedback = format!("{} to play", game.current_player().name());
        Self {
            should_quit: false,
            game,
            cursor,
            feedback,
            hints: Vec::new(),
        }
    }

    /// Signal the application to quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Move the cursor one square, stopping at the board edge
    pub fn move_cursor(&mut self, direction: Direction) {
        let last = self.game.board().size() - 1;
        let Coord { row, col } = self.cursor;
        self.cursor = match direction {
            Direction::Up => Coord::new(row.saturating_sub(1), col),
            Direction::Down => Coord::new((row + 1).min(last), col),
            Direction::Left => Coord::new(row, col.saturating_sub(1)),
            Direction::Right => Coord::new(row, (col + 1).min(last)),
        };
    }

    /// Handle character input.
    ///
    /// A letter places the first matching rack tile at the cursor, a digit
    /// places the rack tile at that position, `?` lists hint words.
    pub fn on_char(&mut self, c: char) {
        if self.game.is_game_over() {
            return;
        }
        match c {
            '?' => self.show_hints(),
            '1'..='9' => {
                let index = c as usize - '1' as usize;
                self.place_at_cursor(index);
            }
            c if c.is_alphabetic() => match self.game.current_player().find_letter(c) {
                Some(index) => self.place_at_cursor(index),
                None => {
                    self.feedback = format!("No {} on the rack", c.to_uppercase());
                }
            },
            _ => {}
        }
    }

    /// Take back the tile under the cursor, or the one just left of it
    pub fn on_backspace(&mut self) {
        if self.game.is_game_over() {
            return;
        }
        if !self.game.placements().contains(&self.cursor) {
            let left = Coord::new(self.cursor.row, self.cursor.col.saturating_sub(1));
            if self.game.placements().contains(&left) {
                self.cursor = left;
            }
        }
        match self.game.remove(self.cursor) {
            Ok(tile) => {
                debug!(letter = %tile.letter, "tile taken back");
                self.feedback = self.validation_message();
            }
            Err(err) => self.report(err),
        }
    }

    /// Commit the current placement (Enter key)
    pub fn on_submit(&mut self) {
        if self.game.is_game_over() {
            return;
        }
        let player = self.game.current_player().name().to_string();
        match self.game.commit() {
            Some(summary) => {
                let words: Vec<String> = summary
                    .words
                    .iter()
                    .map(|w| format!("{} {}", w.word.to_uppercase(), w.points))
                    .collect();
                self.feedback = format!("OK {} +{} ({})", player, summary.total, words.join(", "));
                self.hints.clear();
                self.cursor = self.game.board().center();
                self.announce_next();
            }
            None => self.feedback = self.validation_message(),
        }
    }

    /// Give up the turn without scoring (Tab key)
    pub fn on_pass(&mut self) {
        if self.game.is_game_over() {
            return;
        }
        let player = self.game.current_player().name().to_string();
        self.game.pass_turn();
        self.feedback = format!("{} passed", player);
        self.hints.clear();
        self.announce_next();
    }

    /// Fill `hints` with the longest words the rack can spell
    pub fn show_hints(&mut self) {
        let letters = self.game.current_player().rack_letters();
        self.hints = self
            .game
            .lexicon()
            .words_from_letters(&letters)
            .into_iter()
            .take(MAX_HINTS)
            .map(str::to_uppercase)
            .collect();
        if self.hints.is_empty() {
            self.feedback = "No words found for this rack".to_string();
        }
    }

    fn place_at_cursor(&mut self, index: usize) {
        match self.game.place(self.cursor, index) {
            Ok(()) => {
                self.feedback = self.validation_message();
                self.move_cursor(Direction::Right);
            }
            Err(err) => self.report(err),
        }
    }

    fn announce_next(&mut self) {
        if self.game.is_game_over() {
            self.feedback.push_str(" | Game over");
        } else {
            let next = self.game.current_player().name();
            self.feedback.push_str(&format!(" | {} to play", next));
        }
    }

    fn validation_message(&self) -> String {
        let verdict = self.game.validation().verdict();
        if verdict.is_valid() {
            "OK Enter to commit".to_string()
        } else {
            verdict.message()
        }
    }

    fn report(&mut self, err: GameError) {
        debug!(error = %err, "move rejected");
        self.feedback = err.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, PremiumLayout};
    use crate::game::{LetterDistribution, LetterInfo};

    /// One player, a 9-tile supply of e/m/a, so the rack holds every letter
    fn app() -> App {
        let letters: LetterDistribution = [
            ('e', LetterInfo { count: 3, points: 1 }),
            ('m', LetterInfo { count: 3, points: 2 }),
            ('a', LetterInfo { count: 3, points: 1 }),
        ]
        .into_iter()
        .collect();
        let config = GameConfig {
            players: vec!["Mari".to_string()],
            letters,
            premiums: PremiumLayout::default(),
            ..GameConfig::default()
        };
        let lexicon = WordList::from_words(["ema", "maa", "ame"]);
        App::new(Game::with_seed(&config, lexicon, 3).unwrap())
    }

    fn type_word(app: &mut App, word: &str) {
        for c in word.chars() {
            app.on_char(c);
        }
    }

    #[test]
    fn test_cursor_starts_at_center_and_clamps() {
        let mut app = app();
        assert_eq!(app.cursor, Coord::new(7, 7));

        for _ in 0..20 {
            app.move_cursor(Direction::Up);
            app.move_cursor(Direction::Left);
        }
        assert_eq!(app.cursor, Coord::new(0, 0));

        for _ in 0..20 {
            app.move_cursor(Direction::Down);
            app.move_cursor(Direction::Right);
        }
        assert_eq!(app.cursor, Coord::new(14, 14));
    }

    #[test]
    fn test_typing_places_tiles_left_to_right() {
        let mut app = app();
        type_word(&mut app, "ema");

        let placed: Vec<Coord> = app.game.placements().iter().copied().collect();
        assert_eq!(
            placed,
            vec![Coord::new(7, 7), Coord::new(7, 8), Coord::new(7, 9)]
        );
        assert_eq!(app.cursor, Coord::new(7, 10));
        assert!(app.feedback.starts_with("OK"));
    }

    #[test]
    fn test_missing_letter_reports_feedback() {
        let mut app = app();
        app.on_char('k');
        assert!(app.game.placements().is_empty());
        assert_eq!(app.feedback, "No K on the rack");
    }

    #[test]
    fn test_digit_places_by_rack_index() {
        let mut app = app();
        let first = app.game.current_player().rack()[0];
        app.on_char('1');
        assert_eq!(app.game.board().tile_at(Coord::new(7, 7)), Some(first));
        assert_eq!(app.game.current_player().rack().len(), 6);
    }

    #[test]
    fn test_backspace_takes_back_last_tile() {
        let mut app = app();
        type_word(&mut app, "em");
        app.on_backspace();

        assert_eq!(app.cursor, Coord::new(7, 8));
        assert_eq!(app.game.placements().len(), 1);
        assert_eq!(app.game.current_player().rack().len(), 6);
    }

    #[test]
    fn test_submit_scores_and_resets_cursor() {
        let mut app = app();
        type_word(&mut app, "ema");
        app.on_submit();

        assert_eq!(app.game.players()[0].score(), 4);
        assert_eq!(app.cursor, Coord::new(7, 7));
        assert!(app.feedback.starts_with("OK Mari +4 (EMA 4)"));
        assert!(app.game.placements().is_empty());
    }

    #[test]
    fn test_refused_submit_explains_why() {
        let mut app = app();
        app.move_cursor(Direction::Up);
        type_word(&mut app, "ema");
        app.on_submit();

        assert_eq!(app.game.players()[0].score(), 0);
        assert_eq!(app.game.placements().len(), 3);
        assert!(app.feedback.starts_with("First word must cover the center"));
    }

    #[test]
    fn test_pass_returns_tiles() {
        let mut app = app();
        type_word(&mut app, "em");
        app.on_pass();

        assert!(app.game.placements().is_empty());
        assert!(app.game.board().is_empty());
        assert_eq!(app.game.current_player().rack().len(), 7);
        assert!(app.feedback.starts_with("Mari passed"));
    }

    #[test]
    fn test_hints_list_rack_words() {
        let mut app = app();
        app.on_char('?');
        assert!(app.hints.contains(&"EMA".to_string()));
        assert!(app.hints.len() <= MAX_HINTS);
        assert!(app.game.placements().is_empty());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(!app.should_quit);
        app.quit();
        assert!(app.should_quit);
    }
}
