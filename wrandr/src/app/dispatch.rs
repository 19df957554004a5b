use wrandr_ipc::{Command, Response};

use crate::core::State;
use crate::platform::OutputSystem;

use super::command::process_command;
use super::effects::execute_effects;

/// Unified command dispatcher for session and CLI commands.
/// Handles the common pattern: process command -> execute effects -> pick response.
pub fn dispatch_command<S: OutputSystem>(cmd: &Command, state: &mut State, system: &S) -> Response {
    tracing::debug!("Dispatching {:?}", cmd);

    let result = process_command(state, cmd);

    match execute_effects(result.effects, state, system) {
        Ok(Some(response)) => response,
        Ok(None) => result.response,
        Err(message) => Response::Error { message },
    }
}
