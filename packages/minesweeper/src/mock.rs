//! In-memory stand-in for the encryption capability and its gateway.

use crate::{CapabilityError, Coord, EncryptedBoard, EncryptionCapability, RequestHandle};
use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Ciphertexts are indices into a plaintext table only the test can read.
#[derive(Debug)]
pub(crate) struct MockFhe {
    plaintexts: Vec<u8>,
    rng: ChaCha8Rng,
    pub requests: Vec<(RequestHandle, u64)>,
    /// Bounds passed to `random_below`, in call order
    pub draws: Vec<u8>,
    /// Capability operations performed so far
    pub calls: usize,
    /// Fail every operation once this many have succeeded
    pub fail_after: Option<usize>,
}

impl MockFhe {
    pub fn new() -> Self {
        Self::seeded(0)
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            plaintexts: vec![],
            rng: ChaCha8Rng::seed_from_u64(seed),
            requests: vec![],
            draws: vec![],
            calls: 0,
            fail_after: None,
        }
    }

    pub fn failing_after(calls: usize) -> Self {
        Self {
            fail_after: Some(calls),
            ..Self::new()
        }
    }

    pub fn value(&self, ciphertext: u64) -> u8 {
        self.plaintexts[ciphertext as usize]
    }

    pub fn decrypt(&self, ciphertext: u64) -> bool {
        self.value(ciphertext) != 0
    }

    /// What the gateway would answer for `request_id`
    pub fn answer(&self, request_id: RequestHandle) -> bool {
        let (_, ciphertext) = self
            .requests
            .iter()
            .find(|(id, _)| *id == request_id)
            .expect("request was never submitted");
        self.decrypt(*ciphertext)
    }

    /// Reads a board with the mock's key
    pub fn layout(&self, board: &EncryptedBoard<u64>) -> Layout {
        let mines = board
            .iter()
            .filter(|(_, cell)| self.decrypt(**cell))
            .fold(0u64, |mask, (coord, _)| mask | coord.bit());
        Layout { mines }
    }

    fn tick(&mut self) -> Result<(), CapabilityError> {
        if let Some(limit) = self.fail_after {
            if self.calls >= limit {
                return Err(CapabilityError::new("coprocessor unavailable"));
            }
        }
        self.calls += 1;
        Ok(())
    }

    fn push(&mut self, value: u8) -> u64 {
        self.plaintexts.push(value);
        (self.plaintexts.len() - 1) as u64
    }
}

/// Plaintext mine positions of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    pub mines: u64,
}

impl Layout {
    pub fn is_mine(&self, coord: Coord) -> bool {
        self.mines & coord.bit() != 0
    }

    pub fn mines(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(|&coord| self.is_mine(coord))
    }

    pub fn safe_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(|&coord| !self.is_mine(coord))
    }
}

impl EncryptionCapability for MockFhe {
    type Ciphertext = u64;

    fn encrypt(&mut self, value: bool) -> Result<u64, CapabilityError> {
        self.tick()?;
        Ok(self.push(value as u8))
    }

    fn encrypt_u8(&mut self, value: u8) -> Result<u64, CapabilityError> {
        self.tick()?;
        Ok(self.push(value))
    }

    fn random_below(&mut self, bound: u8) -> Result<u64, CapabilityError> {
        self.tick()?;
        self.draws.push(bound);
        let value = self.rng.gen_range(0..bound);
        Ok(self.push(value))
    }

    fn encrypted_eq(&mut self, lhs: &u64, rhs: &u64) -> Result<u64, CapabilityError> {
        self.tick()?;
        let value = self.value(*lhs) == self.value(*rhs);
        Ok(self.push(value as u8))
    }

    fn select(&mut self, condition: &u64, if_true: &u64, if_false: &u64) -> Result<u64, CapabilityError> {
        self.tick()?;
        let value = if self.decrypt(*condition) {
            self.value(*if_true)
        } else {
            self.value(*if_false)
        };
        Ok(self.push(value))
    }

    fn request_decryption(&mut self, ciphertext: &u64) -> Result<RequestHandle, CapabilityError> {
        self.tick()?;
        let request_id = RequestHandle::new(self.requests.len() as u64 + 1);
        self.requests.push((request_id, *ciphertext));
        Ok(request_id)
    }
}
