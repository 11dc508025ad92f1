use crate::CapabilityError;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Correlation id binding a decryption request to its eventual callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestHandle(u64);

impl RequestHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The homomorphic encryption primitive and its decryption gateway, seen from the game.
///
/// Ciphertexts are opaque: the engine stores and forwards them but never inspects them.
/// Booleans and small integers share one handle type. Nothing here returns plaintext;
/// plaintext only comes back asynchronously, addressed by the [`RequestHandle`] returned
/// from [`request_decryption`](EncryptionCapability::request_decryption).
pub trait EncryptionCapability {
    type Ciphertext: Clone;

    fn encrypt(&mut self, value: bool) -> Result<Self::Ciphertext, CapabilityError>;

    fn encrypt_u8(&mut self, value: u8) -> Result<Self::Ciphertext, CapabilityError>;

    /// Encrypted integer drawn uniformly from `0..bound`
    fn random_below(&mut self, bound: u8) -> Result<Self::Ciphertext, CapabilityError>;

    /// Encrypted `lhs == rhs`
    fn encrypted_eq(
        &mut self,
        lhs: &Self::Ciphertext,
        rhs: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, CapabilityError>;

    /// Encrypted `if condition { if_true } else { if_false }`
    fn select(
        &mut self,
        condition: &Self::Ciphertext,
        if_true: &Self::Ciphertext,
        if_false: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, CapabilityError>;

    fn request_decryption(
        &mut self,
        ciphertext: &Self::Ciphertext,
    ) -> Result<RequestHandle, CapabilityError>;
}

impl<T: EncryptionCapability + ?Sized> EncryptionCapability for &mut T {
    type Ciphertext = T::Ciphertext;

    fn encrypt(&mut self, value: bool) -> Result<Self::Ciphertext, CapabilityError> {
        (**self).encrypt(value)
    }

    fn encrypt_u8(&mut self, value: u8) -> Result<Self::Ciphertext, CapabilityError> {
        (**self).encrypt_u8(value)
    }

    fn random_below(&mut self, bound: u8) -> Result<Self::Ciphertext, CapabilityError> {
        (**self).random_below(bound)
    }

    fn encrypted_eq(
        &mut self,
        lhs: &Self::Ciphertext,
        rhs: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, CapabilityError> {
        (**self).encrypted_eq(lhs, rhs)
    }

    fn select(
        &mut self,
        condition: &Self::Ciphertext,
        if_true: &Self::Ciphertext,
        if_false: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, CapabilityError> {
        (**self).select(condition, if_true, if_false)
    }

    fn request_decryption(
        &mut self,
        ciphertext: &Self::Ciphertext,
    ) -> Result<RequestHandle, CapabilityError> {
        (**self).request_decryption(ciphertext)
    }
}
