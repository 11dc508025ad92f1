use cosmwasm_std::{Addr, DepsMut, Event, MessageInfo, Response};
use minesweeper::{GameError, Outcome, RequestHandle, RevealOutcome};
use crate::error::ContractError;
use crate::state::{load_game, CONFIG, GAMES, REQUESTS};

/// Handle the gateway's plaintext answer for an earlier reveal request.
///
/// Unknown, stale or already consumed request ids are answered with an `ignored` response and
/// touch no state: the caller is the trusted gateway, so this signals replay or double
/// delivery rather than a user error.
pub fn execute_decryption_callback(
    deps: DepsMut,
    info: MessageInfo,
    request_id: u64,
    value: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.gateway {
        return Err(ContractError::Unauthorized {});
    }

    let Some(player) = REQUESTS.may_load(deps.storage, request_id)? else {
        deps.api
            .debug(&format!("decryption callback for unknown request {request_id}"));
        return Ok(ignored(request_id, "unknown_request"));
    };

    let mut game = load_game(deps.storage, &player)?;
    let outcome = match game.resolve(RequestHandle::new(request_id), value) {
        Ok(outcome) => outcome,
        Err(GameError::UnknownRequest(_)) => {
            deps.api.debug(&format!(
                "decryption callback {request_id} does not match the pending request of {player}"
            ));
            return Ok(ignored(request_id, "stale_request"));
        }
        Err(e) => return Err(e.into()),
    };

    REQUESTS.remove(deps.storage, request_id);
    GAMES.save(deps.storage, &player, &game)?;

    let response = Response::new()
        .add_attribute("action", "decryption_callback")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("player", player.as_str())
        .add_attribute(
            "remaining_safe_cells",
            outcome.remaining_safe_cells.to_string(),
        );

    Ok(add_reveal_events(response, &player, &outcome))
}

fn ignored(request_id: u64, reason: &str) -> Response {
    Response::new()
        .add_attribute("action", "decryption_callback")
        .add_attribute("request_id", request_id.to_string())
        .add_attribute("status", "ignored")
        .add_attribute("reason", reason)
}

/// `cell_revealed` is the only place a cell's plaintext becomes public; terminal
/// transitions add `game_lost` or `game_won`.
fn add_reveal_events(response: Response, player: &Addr, outcome: &RevealOutcome) -> Response {
    let (x, y) = (outcome.coord.x(), outcome.coord.y());
    let mut response = response.add_event(
        Event::new("cell_revealed")
            .add_attribute("player", player.as_str())
            .add_attribute("x", x.to_string())
            .add_attribute("y", y.to_string())
            .add_attribute("value", if outcome.is_mine { "1" } else { "0" }),
    );

    match outcome.finished {
        Some(Outcome::Lost { x, y }) => {
            response = response.add_event(
                Event::new("game_lost")
                    .add_attribute("player", player.as_str())
                    .add_attribute("x", x.to_string())
                    .add_attribute("y", y.to_string()),
            );
        }
        Some(Outcome::Won) => {
            response = response.add_event(Event::new("game_won").add_attribute("player", player.as_str()));
        }
        Some(Outcome::Abandoned) | None => {}
    }

    response
}
