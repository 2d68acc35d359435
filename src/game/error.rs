//! Error types for board and turn operations.

use super::Coord;
use derive_more::{Display, Error};

/// Recoverable failure of a board or turn operation.
///
/// None of these leave the game in a changed state: the operation that
/// reported the error did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Tried to place onto a cell that already holds a tile.
    #[display("cell {coord} is already occupied")]
    OccupiedCell { coord: Coord },
    /// Coordinate lies outside the board.
    #[display("cell {coord} is outside the board")]
    OutOfBounds { coord: Coord },
    /// Rack index does not name a tile on the rack.
    #[display("rack position {index} is out of range (rack holds {len})")]
    RackIndexOutOfBounds { index: usize, len: usize },
    /// Only tiles placed during the current turn can be taken back.
    #[display("cell {coord} was not placed this turn")]
    NotThisTurn { coord: Coord },
    /// The game has ended; no further moves are accepted.
    #[display("the game is over")]
    GameOver,
}
