use wrandr_ipc::{Command, Response};

use crate::core::{Mode, State};
use crate::effect::{CommandResult, Effect};

/// Pure function: processes a command and returns a response with effects.
/// This function does not perform any side effects - it only mutates state and computes effects.
pub fn process_command(state: &mut State, cmd: &Command) -> CommandResult {
    match cmd {
        Command::ListOutputs => CommandResult::with_response(Response::Outputs {
            outputs: state.views(),
        }),
        Command::SetActive { output, active } => state.set_active(output, *active).into(),
        Command::SetMode {
            output,
            width,
            height,
            refresh,
        } => state
            .set_mode(output, Mode::new(*width, *height, *refresh))
            .into(),
        Command::SetScale { output, scale } => state.set_scale(output, *scale).into(),
        Command::SetPosition { output, x, y } => state.set_position(output, *x, *y).into(),
        Command::Drag { output, x, y } => match state.drag(output, *x, *y) {
            Ok((x, y)) => CommandResult::with_response(Response::Position { x, y }),
            Err(e) => CommandResult::error(e.to_string()),
        },
        Command::Drop { output, x, y } => match state.drop_output(output, *x, *y) {
            Ok((x, y)) => CommandResult::with_response(Response::Position { x, y }),
            Err(e) => CommandResult::error(e.to_string()),
        },
        Command::Export { format } => {
            let format = format.unwrap_or(state.config().export_format);
            let lines = state.commands(format).iter().map(|c| c.line()).collect();
            CommandResult::with_response(Response::Commands { lines })
        }
        Command::Apply { dry_run } => {
            let commands = state.commands(state.config().apply_format);
            if *dry_run {
                let lines = commands.iter().map(|c| c.line()).collect();
                CommandResult::with_response(Response::Commands { lines })
            } else {
                CommandResult::ok_with_effects(vec![Effect::ApplyOutputs(commands)])
            }
        }
        Command::Reload => CommandResult::ok_with_effects(vec![Effect::ReloadOutputs]),
        // The session loop stops on its own
        Command::Quit => CommandResult::ok(),
    }
}
