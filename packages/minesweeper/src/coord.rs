use crate::GameError;
use serde::{Deserialize, Serialize};

/// Width and height of the board
pub const BOARD_SIZE: u8 = 8;
pub const CELL_COUNT: u8 = BOARD_SIZE * BOARD_SIZE;
/// Every game hides exactly this many mines
pub const MINE_COUNT: u8 = 10;
pub const SAFE_CELL_COUNT: u8 = CELL_COUNT - MINE_COUNT;

/// A validated board coordinate. `x` and `y` are both in `0..BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    x: u8,
    y: u8,
}

impl Coord {
    pub fn new(x: u8, y: u8) -> Result<Self, GameError> {
        if x >= BOARD_SIZE || y >= BOARD_SIZE {
            return Err(GameError::InvalidCoordinates { x, y });
        }
        Ok(Self { x, y })
    }

    pub fn x(self) -> u8 {
        self.x
    }

    pub fn y(self) -> u8 {
        self.y
    }

    /// Row-major cell index in `0..CELL_COUNT`
    pub fn index(self) -> usize {
        self.y as usize * BOARD_SIZE as usize + self.x as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CELL_COUNT as usize {
            return None;
        }
        let size = BOARD_SIZE as usize;
        Some(Self {
            x: (index % size) as u8,
            y: (index / size) as u8,
        })
    }

    pub(crate) fn bit(self) -> u64 {
        1u64 << self.index()
    }

    /// All coordinates in index order (row by row)
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coord { x, y }))
    }
}
