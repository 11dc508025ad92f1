#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};
use cw2::set_contract_version;
use crate::error::ContractError;
use crate::msg::InstantiateMsg;
use crate::state::{
    Config, CONFIG, DEFAULT_REVEAL_TIMEOUT_SECONDS, GAME_COUNTER, REQUEST_COUNTER,
};

const CONTRACT_NAME: &str = "crates.io:fhe-minesweeper";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let config = Config {
        owner: info.sender,
        gateway: deps.api.addr_validate(&msg.gateway)?,
        reveal_timeout_seconds: msg
            .reveal_timeout_seconds
            .unwrap_or(DEFAULT_REVEAL_TIMEOUT_SECONDS),
    };
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;
    REQUEST_COUNTER.save(deps.storage, &0)?;
    GAME_COUNTER.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("gateway", config.gateway)
        .add_attribute(
            "reveal_timeout_seconds",
            config.reveal_timeout_seconds.to_string(),
        ))
}
