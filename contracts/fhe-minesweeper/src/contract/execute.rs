#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Response};
use minesweeper::SAFE_CELL_COUNT;
use super::reveal::execute_decryption_callback;
use crate::error::ContractError;
use crate::fhe::FheBridge;
use crate::msg::ExecuteMsg;
use crate::state::{load_game, CONFIG, GAMES, GAME_COUNTER, REQUESTS};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::StartGame {} => execute_start_game(deps, env, info),
        ExecuteMsg::RequestCellReveal { x, y } => execute_request_cell_reveal(deps, env, info, x, y),
        ExecuteMsg::AbandonGame {} => execute_abandon_game(deps, env, info),
        ExecuteMsg::DecryptionCallback { request_id, value } => {
            execute_decryption_callback(deps, info, request_id, value)
        }
        ExecuteMsg::UpdateConfig {
            gateway,
            reveal_timeout_seconds,
        } => execute_update_config(deps, info, gateway, reveal_timeout_seconds),
    }
}

pub fn execute_start_game(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut game = load_game(deps.storage, &info.sender)?;

    // Check state before asking the coprocessor for anything
    game.ensure_can_start()?;

    let game_number = GAME_COUNTER.may_load(deps.storage)?.unwrap_or_default() + 1;
    GAME_COUNTER.save(deps.storage, &game_number)?;

    // Mine placement is drawn and shuffled inside the coprocessor; only handles come back
    let domain = format!("minesweeper/{}/{game_number}/{}", info.sender, env.block.height);
    let mut fhe = FheBridge::new(deps.querier, &mut *deps.storage, config.gateway)
        .with_random_domain(domain);
    game.start_with(&mut fhe)?;
    let messages = fhe.into_messages();

    GAMES.save(deps.storage, &info.sender, &game)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "start_game")
        .add_attribute("player", info.sender.as_str())
        .add_attribute("game_number", game_number.to_string())
        .add_attribute("remaining_safe_cells", SAFE_CELL_COUNT.to_string())
        .add_event(Event::new("game_started").add_attribute("player", info.sender)))
}

pub fn execute_request_cell_reveal(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    x: u8,
    y: u8,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut game = load_game(deps.storage, &info.sender)?;

    let mut fhe = FheBridge::new(deps.querier, &mut *deps.storage, config.gateway);
    let request = game.request_reveal(x, y, &mut fhe, env.block.time.seconds())?;
    let messages = fhe.into_messages();

    let request_id = request.request_id.id();
    REQUESTS.save(deps.storage, request_id, &info.sender)?;
    GAMES.save(deps.storage, &info.sender, &game)?;

    // Only the coordinate and opaque handles leave the contract here
    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "request_cell_reveal")
        .add_attribute("player", info.sender.as_str())
        .add_attribute("request_id", request_id.to_string())
        .add_event(
            Event::new("reveal_requested")
                .add_attribute("player", info.sender)
                .add_attribute("x", x.to_string())
                .add_attribute("y", y.to_string())
                .add_attribute("request_id", request_id.to_string())
                .add_attribute("ciphertext", hex::encode(request.predicate.as_slice())),
        ))
}

pub fn execute_abandon_game(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut game = load_game(deps.storage, &info.sender)?;

    let request_id = game.abandon(env.block.time.seconds(), config.reveal_timeout_seconds)?;
    REQUESTS.remove(deps.storage, request_id.id());
    GAMES.save(deps.storage, &info.sender, &game)?;

    Ok(Response::new()
        .add_attribute("action", "abandon_game")
        .add_attribute("player", info.sender.as_str())
        .add_event(
            Event::new("game_abandoned")
                .add_attribute("player", info.sender)
                .add_attribute("request_id", request_id.id().to_string()),
        ))
}

pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    gateway: Option<String>,
    reveal_timeout_seconds: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }

    if let Some(gateway) = gateway {
        config.gateway = deps.api.addr_validate(&gateway)?;
    }
    if let Some(timeout) = reveal_timeout_seconds {
        config.reveal_timeout_seconds = timeout;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("gateway", config.gateway)
        .add_attribute(
            "reveal_timeout_seconds",
            config.reveal_timeout_seconds.to_string(),
        ))
}
