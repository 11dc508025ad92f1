use crate::{
    Coord, EncryptedBoard, EncryptionCapability, GameError, RequestHandle, SAFE_CELL_COUNT,
};
use serde::{Deserialize, Serialize};


/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Won,
    /// The mine that ended the game
    Lost { x: u8, y: u8 },
    /// The pending decryption never came back and the player gave up on it
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Idle,
    Active,
    AwaitingDecryption,
    Finished { outcome: Outcome },
}

impl GameStatus {
    /// True between `start` and a terminal outcome
    pub fn is_active(&self) -> bool {
        matches!(self, GameStatus::Active | GameStatus::AwaitingDecryption)
    }
}

/// The single outstanding decryption request of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReveal {
    pub coord: Coord,
    pub request_id: RequestHandle,
    /// Host timestamp (seconds) at which the request was issued
    pub requested_at: u64,
}

/// What a reveal request hands to the outside world: the coordinate, the correlation id and
/// the encrypted predicate. Never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealRequest<C> {
    pub coord: Coord,
    pub request_id: RequestHandle,
    pub predicate: C,
}

/// Result of applying a decrypted value to a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealOutcome {
    pub coord: Coord,
    pub is_mine: bool,
    pub remaining_safe_cells: u8,
    /// Set when this reveal ended the game
    pub finished: Option<Outcome>,
}

/// Per-player game record.
///
/// Every operation validates first and mutates last, so an `Err` leaves the record untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game<C> {
    status: GameStatus,
    board: Option<EncryptedBoard<C>>,
    remaining_safe_cells: u8,
    /// Bit `coord.index()` is set once that cell has been resolved
    revealed: u64,
    pending: Option<PendingReveal>,
}

impl<C: Clone> Default for Game<C> {
    fn default() -> Self {
        Self::idle()
    }
}

impl<C: Clone> Game<C> {
    /// Record for a player who never played
    pub fn idle() -> Self {
        Self {
            status: GameStatus::Idle,
            board: None,
            remaining_safe_cells: 0,
            revealed: 0,
            pending: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn remaining_safe_cells(&self) -> u8 {
        self.remaining_safe_cells
    }

    pub fn pending(&self) -> Option<&PendingReveal> {
        self.pending.as_ref()
    }

    pub fn board(&self) -> Option<&EncryptedBoard<C>> {
        self.board.as_ref()
    }

    pub fn is_revealed(&self, coord: Coord) -> bool {
        self.revealed & coord.bit() != 0
    }

    pub fn revealed_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(|&coord| self.is_revealed(coord))
    }

    pub fn ensure_can_start(&self) -> Result<(), GameError> {
        if self.status.is_active() {
            return Err(GameError::GameInProgress);
        }
        Ok(())
    }

    /// Replaces an idle or finished record with a fresh game on `board`
    pub fn start(&mut self, board: EncryptedBoard<C>) -> Result<(), GameError> {
        self.ensure_can_start()?;

        *self = Self {
            status: GameStatus::Active,
            board: Some(board),
            remaining_safe_cells: SAFE_CELL_COUNT,
            revealed: 0,
            pending: None,
        };
        log::debug!("game started with {} safe cells", SAFE_CELL_COUNT);
        Ok(())
    }

    /// Checks the state first, then generates an encrypted board and starts on it
    pub fn start_with<F>(&mut self, fhe: &mut F) -> Result<(), GameError>
    where
        F: EncryptionCapability<Ciphertext = C> + ?Sized,
    {
        self.ensure_can_start()?;
        let board = EncryptedBoard::generate(fhe)?;
        self.start(board)
    }

    /// Issues the confidential "is (x, y) a mine" decryption request.
    ///
    /// Checks run in order: coordinates, live game, no outstanding request, cell not yet
    /// revealed. All of them happen before the capability is touched, so a rejected call
    /// never submits anything for decryption.
    pub fn request_reveal<F>(
        &mut self,
        x: u8,
        y: u8,
        fhe: &mut F,
        now: u64,
    ) -> Result<RevealRequest<C>, GameError>
    where
        F: EncryptionCapability<Ciphertext = C> + ?Sized,
    {
        let coord = Coord::new(x, y)?;

        match (&self.status, &self.pending) {
            (GameStatus::Active, None) => {}
            (GameStatus::AwaitingDecryption, Some(pending)) => {
                return Err(GameError::RevealPending {
                    request_id: pending.request_id,
                })
            }
            _ => return Err(GameError::NoActiveGame),
        }

        if self.is_revealed(coord) {
            return Err(GameError::CellAlreadyRevealed { x, y });
        }

        let cell = self
            .board
            .as_ref()
            .and_then(|board| board.cell(coord))
            .ok_or(GameError::NoActiveGame)?;

        // The stored cell handle is never submitted itself, only a predicate derived from it.
        let mine = fhe.encrypt(true)?;
        let predicate = fhe.encrypted_eq(cell, &mine)?;
        let request_id = fhe.request_decryption(&predicate)?;

        self.pending = Some(PendingReveal {
            coord,
            request_id,
            requested_at: now,
        });
        self.status = GameStatus::AwaitingDecryption;
        log::debug!("reveal of ({x}, {y}) submitted as request {request_id}");

        Ok(RevealRequest {
            coord,
            request_id,
            predicate,
        })
    }

    /// Applies the gateway's answer for `request_id`.
    pub fn resolve(
        &mut self,
        request_id: RequestHandle,
        is_mine: bool,
    ) -> Result<RevealOutcome, GameError> {
        let pending = match self.pending {
            Some(pending) if pending.request_id == request_id => pending,
            _ => return Err(GameError::UnknownRequest(request_id)),
        };
        let coord = pending.coord;
        if self.is_revealed(coord) {
            return Err(GameError::CellAlreadyRevealed {
                x: coord.x(),
                y: coord.y(),
            });
        }

        self.pending = None;
        self.revealed |= coord.bit();

        let finished = if is_mine {
            Some(Outcome::Lost {
                x: coord.x(),
                y: coord.y(),
            })
        } else {
            self.remaining_safe_cells = self.remaining_safe_cells.saturating_sub(1);
            (self.remaining_safe_cells == 0).then_some(Outcome::Won)
        };

        self.status = match finished {
            Some(outcome) => {
                log::debug!("game finished: {outcome:?}");
                GameStatus::Finished { outcome }
            }
            None => GameStatus::Active,
        };

        Ok(RevealOutcome {
            coord,
            is_mine,
            remaining_safe_cells: self.remaining_safe_cells,
            finished,
        })
    }

    /// Gives up on a decryption request that has been outstanding for at least `timeout`
    /// seconds. Returns the abandoned request id so the host can forget it.
    pub fn abandon(&mut self, now: u64, timeout: u64) -> Result<RequestHandle, GameError> {
        if !self.status.is_active() {
            return Err(GameError::NoActiveGame);
        }
        let pending = self.pending.ok_or(GameError::NoPendingRequest)?;

        let elapsed = now.saturating_sub(pending.requested_at);
        if elapsed < timeout {
            return Err(GameError::TimeoutNotReached {
                elapsed,
                required: timeout,
            });
        }

        self.pending = None;
        self.status = GameStatus::Finished {
            outcome: Outcome::Abandoned,
        };
        log::warn!(
            "request {} abandoned after {elapsed}s",
            pending.request_id
        );
        Ok(pending.request_id)
    }
}
