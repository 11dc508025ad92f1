mod board;
mod coord;
mod error;
mod fhe;
mod game;
#[cfg(test)]
mod mock;

pub use board::EncryptedBoard;
pub use coord::{Coord, BOARD_SIZE, CELL_COUNT, MINE_COUNT, SAFE_CELL_COUNT};
pub use error::{CapabilityError, GameError};
pub use fhe::{EncryptionCapability, RequestHandle};
pub use game::{Game, GameStatus, Outcome, PendingReveal, RevealOutcome, RevealRequest};
