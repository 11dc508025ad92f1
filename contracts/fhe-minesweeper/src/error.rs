use cosmwasm_std::StdError;
use minesweeper::GameError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Game(#[from] GameError),

    #[error("Unauthorized")]
    Unauthorized {},
}
