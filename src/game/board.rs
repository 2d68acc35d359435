//! The square grid and its static premium layout.

use super::{Coord, GameError, Tile};
use derive_more::Display;

/// Score multiplier kind attached to a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum Premium {
    #[default]
    #[display("")]
    None,
    #[display("DL")]
    DoubleLetter,
    #[display("TL")]
    TripleLetter,
    #[display("DW")]
    DoubleWord,
    #[display("TW")]
    TripleWord,
}

impl Premium {
    /// Multiplier applied to the tile's own points
    pub fn letter_multiplier(self) -> u32 {
        match self {
            Premium::DoubleLetter => 2,
            Premium::TripleLetter => 3,
            _ => 1,
        }
    }

    /// Multiplier applied to the whole word
    pub fn word_multiplier(self) -> u32 {
        match self {
            Premium::DoubleWord => 2,
            Premium::TripleWord => 3,
            _ => 1,
        }
    }
}

/// Precomputed premium kind for every square, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiumMap {
    size: usize,
    squares: Vec<Premium>,
}

impl PremiumMap {
    /// A map with no premium squares
    pub fn plain(size: usize) -> Self {
        Self {
            size,
            squares: vec![Premium::None; size * size],
        }
    }

    /// Build a map from `(coordinate, kind)` pairs. Later pairs win on conflict;
    /// conflicts are rejected earlier, when the configuration is validated.
    pub fn from_squares(
        size: usize,
        squares: impl IntoIterator<Item = (Coord, Premium)>,
    ) -> Result<Self, GameError> {
        let mut map = Self::plain(size);
        for (coord, premium) in squares {
            let index = map.index(coord)?;
            map.squares[index] = premium;
        }
        Ok(map)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Premium kind at `coord`
    pub fn get(&self, coord: Coord) -> Result<Premium, GameError> {
        Ok(self.squares[self.index(coord)?])
    }

    fn index(&self, coord: Coord) -> Result<usize, GameError> {
        if coord.row < self.size && coord.col < self.size {
            Ok(coord.row * self.size + coord.col)
        } else {
            Err(GameError::OutOfBounds { coord })
        }
    }
}

/// Contents of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Tile),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn tile(&self) -> Option<Tile> {
        match self {
            Cell::Occupied(tile) => Some(*tile),
            Cell::Empty => None,
        }
    }
}

/// N×N grid of cells plus its premium layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    premiums: PremiumMap,
}

impl Board {
    /// Create an empty board. The board takes its size from the premium map.
    pub fn new(premiums: PremiumMap) -> Self {
        let size = premiums.size();
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
            premiums,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The middle square, which the opening move must cover
    pub fn center(&self) -> Coord {
        Coord::new(self.size / 2, self.size / 2)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Cell at `coord`
    pub fn get(&self, coord: Coord) -> Result<Cell, GameError> {
        Ok(self.cells[self.index(coord)?])
    }

    /// Tile at `coord`, or `None` for an empty or off-board square
    pub fn tile_at(&self, coord: Coord) -> Option<Tile> {
        self.index(coord).ok().and_then(|i| self.cells[i].tile())
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.tile_at(coord).is_some()
    }

    /// Put a tile on an empty square
    pub fn place(&mut self, coord: Coord, tile: Tile) -> Result<(), GameError> {
        let index = self.index(coord)?;
        if !self.cells[index].is_empty() {
            return Err(GameError::OccupiedCell { coord });
        }
        self.cells[index] = Cell::Occupied(tile);
        Ok(())
    }

    /// Empty a square, returning whatever was on it
    pub fn clear(&mut self, coord: Coord) -> Result<Option<Tile>, GameError> {
        let index = self.index(coord)?;
        let previous = self.cells[index].tile();
        self.cells[index] = Cell::Empty;
        Ok(previous)
    }

    pub fn premium_at(&self, coord: Coord) -> Result<Premium, GameError> {
        self.premiums.get(coord)
    }

    /// In-bounds orthogonal neighbours of `coord`
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        coord.neighbors().filter(|&c| self.contains(c))
    }

    /// All occupied coordinates, row-major
    pub fn occupied(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(i, _)| Coord::new(i / self.size, i % self.size))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    fn index(&self, coord: Coord) -> Result<usize, GameError> {
        if self.contains(coord) {
            Ok(coord.row * self.size + coord.col)
        } else {
            Err(GameError::OutOfBounds { coord })
        }
    }
}
