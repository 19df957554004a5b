use wrandr_ipc::{ApplyResult, Response};

use crate::core::{OutputCommand, State};
use crate::effect::Effect;
use crate::platform::{load_outputs, OutputSystem};

/// Execute side effects.
/// Returns a response replacing the command's own when an effect produces one.
pub fn execute_effects<S: OutputSystem>(
    effects: Vec<Effect>,
    state: &mut State,
    system: &S,
) -> Result<Option<Response>, String> {
    let mut response = None;
    for effect in effects {
        match effect {
            Effect::ApplyOutputs(commands) => {
                let results = apply_outputs(&commands, system);
                response = Some(Response::Applied { results });
            }
            Effect::ReloadOutputs => {
                let outputs =
                    load_outputs(system).map_err(|e| format!("Failed to reload outputs: {}", e))?;
                state.replace_outputs(outputs);
                response = Some(Response::Outputs {
                    outputs: state.views(),
                });
            }
        }
    }
    Ok(response)
}

/// Invoke the configuration tool once per output. Each output is independent:
/// a failure is recorded and the remaining outputs are still applied.
/// Nothing is rolled back.
pub fn apply_outputs<S: OutputSystem>(commands: &[OutputCommand], system: &S) -> Vec<ApplyResult> {
    commands
        .iter()
        .map(|command| {
            let line = command.line();
            let error = match system.apply(&command.args) {
                Ok(stdout) => {
                    tracing::debug!("Applied {}: {}", line, stdout.trim());
                    None
                }
                Err(e) => {
                    tracing::warn!("Failed to apply {}: {}", command.output, e);
                    Some(e.to_string())
                }
            };
            ApplyResult {
                output: command.output.clone(),
                command: line,
                error,
            }
        })
        .collect()
}
