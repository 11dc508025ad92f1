use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

pub use crate::state::Config;

#[cw_serde]
pub struct InstantiateMsg {
    /// Decryption gateway contract that receives requests and calls back with results
    pub gateway: String,
    /// Seconds before an unanswered reveal can be abandoned. Defaults to 3600 (1 hour).
    pub reveal_timeout_seconds: Option<u64>,
}

#[cw_serde]
pub enum ExecuteMsg {
    // Player: start a new game (no game yet, or the previous one finished)
    StartGame {},
    // Player: ask for a confidential reveal of one cell
    RequestCellReveal { x: u8, y: u8 },
    // Player: give up on a reveal the gateway never answered
    AbandonGame {},
    // Gateway: plaintext result for an earlier decryption request
    DecryptionCallback { request_id: u64, value: bool },
    // Owner: rotate gateway or timeout
    UpdateConfig {
        gateway: Option<String>,
        reveal_timeout_seconds: Option<u64>,
    },
}

/// Messages this contract sends to the decryption gateway
#[cw_serde]
pub enum GatewayExecuteMsg {
    RequestDecryption {
        request_id: u64,
        ciphertext: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    GetConfig {},
    #[returns(GameResponse)]
    GetGame { player: String },
    #[returns(BoardResponse)]
    GetBoard { player: String },
    #[returns(Vec<GameListItem>)]
    ListGames {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(RequestResponse)]
    GetRequest { request_id: u64 },
}

#[cw_serde]
pub struct CellResponse {
    pub x: u8,
    pub y: u8,
}

#[cw_serde]
pub struct PendingRequestResponse {
    pub x: u8,
    pub y: u8,
    pub request_id: u64,
    pub requested_at: u64,
}

#[cw_serde]
pub struct GameResponse {
    pub player: String,
    pub status: String,
    pub game_active: bool,
    pub remaining_safe_cells: u8,
    pub revealed: Vec<CellResponse>,
    pub pending_request: Option<PendingRequestResponse>,
}

/// Ciphertext handles of a player's board, row-major. Empty for a player who never played.
#[cw_serde]
pub struct BoardResponse {
    pub player: String,
    pub cells: Vec<Binary>,
}

#[cw_serde]
pub struct GameListItem {
    pub player: String,
    pub status: String,
    pub game_active: bool,
    pub remaining_safe_cells: u8,
}

#[cw_serde]
pub struct RequestResponse {
    pub request_id: u64,
    /// Player waiting on this request, if it is still outstanding
    pub player: Option<String>,
}
