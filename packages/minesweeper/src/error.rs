use crate::RequestHandle;
use thiserror::Error;

/// Failure reported by the encryption capability (encryption, predicate evaluation or
/// decryption request submission).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Encryption capability error: {message}")]
pub struct CapabilityError {
    pub message: String,
}

impl CapabilityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Game in progress")]
    GameInProgress,
    #[error("No active game")]
    NoActiveGame,
    #[error("Invalid coordinates ({x}, {y})")]
    InvalidCoordinates { x: u8, y: u8 },
    #[error("Cell already revealed ({x}, {y})")]
    CellAlreadyRevealed { x: u8, y: u8 },
    #[error("Reveal request {request_id} is still pending")]
    RevealPending { request_id: RequestHandle },
    #[error("Unknown decryption request {0}")]
    UnknownRequest(RequestHandle),
    #[error("No pending reveal request")]
    NoPendingRequest,
    #[error("Timeout not reached. Elapsed: {elapsed}s, Required: {required}s")]
    TimeoutNotReached { elapsed: u64, required: u64 },
    #[error(transparent)]
    Capability(#[from] CapabilityError),
}
