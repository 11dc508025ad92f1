#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Addr, Binary, Deps, Env, Order, StdResult};
use cw_storage_plus::Bound;
use crate::msg::{
    BoardResponse, CellResponse, GameListItem, GameResponse, PendingRequestResponse, QueryMsg,
    RequestResponse,
};
use crate::state::{load_game, Config, StoredGame, CONFIG, GAMES, REQUESTS};

const DEFAULT_LIMIT: u32 = 30;
const MAX_LIMIT: u32 = 100;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetConfig {} => to_json_binary(&query_config(deps)?),
        QueryMsg::GetGame { player } => to_json_binary(&query_game(deps, player)?),
        QueryMsg::GetBoard { player } => to_json_binary(&query_board(deps, player)?),
        QueryMsg::ListGames { start_after, limit } => {
            to_json_binary(&query_list_games(deps, start_after, limit)?)
        }
        QueryMsg::GetRequest { request_id } => to_json_binary(&query_request(deps, request_id)?),
    }
}

fn query_config(deps: Deps) -> StdResult<Config> {
    CONFIG.load(deps.storage)
}

fn query_game(deps: Deps, player: String) -> StdResult<GameResponse> {
    let player = deps.api.addr_validate(&player)?;
    let game = load_game(deps.storage, &player)?;
    Ok(game_response(&player, &game))
}

fn query_board(deps: Deps, player: String) -> StdResult<BoardResponse> {
    let player = deps.api.addr_validate(&player)?;
    let game = load_game(deps.storage, &player)?;
    let cells = game
        .board()
        .map(|board| board.iter().map(|(_, cell)| cell.clone()).collect())
        .unwrap_or_default();
    Ok(BoardResponse {
        player: player.to_string(),
        cells,
    })
}

fn game_response(player: &Addr, game: &StoredGame) -> GameResponse {
    let revealed = game
        .revealed_cells()
        .map(|c| CellResponse { x: c.x(), y: c.y() })
        .collect();

    let pending_request = game.pending().map(|p| PendingRequestResponse {
        x: p.coord.x(),
        y: p.coord.y(),
        request_id: p.request_id.id(),
        requested_at: p.requested_at,
    });

    GameResponse {
        player: player.to_string(),
        status: format!("{:?}", game.status()),
        game_active: game.is_active(),
        remaining_safe_cells: game.remaining_safe_cells(),
        revealed,
        pending_request,
    }
}

fn query_list_games(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<GameListItem>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_after = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_after.as_ref().map(|addr| Bound::exclusive(addr));

    GAMES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (player, game) = item?;
            Ok(GameListItem {
                player: player.to_string(),
                status: format!("{:?}", game.status()),
                game_active: game.is_active(),
                remaining_safe_cells: game.remaining_safe_cells(),
            })
        })
        .collect()
}

fn query_request(deps: Deps, request_id: u64) -> StdResult<RequestResponse> {
    let player = REQUESTS.may_load(deps.storage, request_id)?;
    Ok(RequestResponse {
        request_id,
        player: player.map(|p| p.to_string()),
    })
}
