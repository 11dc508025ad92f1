use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, StdResult, Storage};
use cw_storage_plus::{Item, Map};
use minesweeper::Game;

/// Seconds a reveal may stay unanswered before the player can abandon the game
pub const DEFAULT_REVEAL_TIMEOUT_SECONDS: u64 = 3600;

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// The only address allowed to deliver decryption results
    pub gateway: Addr,
    pub reveal_timeout_seconds: u64,
}

/// Game record with ciphertext handles as raw bytes
pub type StoredGame = Game<Binary>;

pub const CONFIG: Item<Config> = Item::new("config");
pub const GAMES: Map<&Addr, StoredGame> = Map::new("games");
/// Outstanding decryption requests, keyed by request id, pointing at the requesting player
pub const REQUESTS: Map<u64, Addr> = Map::new("requests");
pub const REQUEST_COUNTER: Item<u64> = Item::new("request_counter");
/// Games started across all players; numbers the randomness domain of each new board
pub const GAME_COUNTER: Item<u64> = Item::new("game_counter");

/// Loads a player's game; players without a record are explicitly idle.
pub fn load_game(storage: &dyn Storage, player: &Addr) -> StdResult<StoredGame> {
    Ok(GAMES.may_load(storage, player)?.unwrap_or_else(Game::idle))
}
