pub mod contract;
pub mod error;
pub mod fhe;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
