use std::io::{BufRead, Write};

use anyhow::Result;
use wrandr_ipc::{Command, Response};

use crate::core::State;
use crate::platform::OutputSystem;

use super::dispatch::dispatch_command;

/// Serve line-delimited JSON commands until `quit` or end of input.
/// A bad request gets an error response; it does not end the session.
pub fn run_session<S, R, W>(state: &mut State, system: &S, input: R, mut output: W) -> Result<()>
where
    S: OutputSystem,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Command>(&line) {
            Ok(Command::Quit) => {
                write_response(&mut output, &Response::Ok)?;
                tracing::info!("Session ended by client");
                return Ok(());
            }
            Ok(cmd) => dispatch_command(&cmd, state, system),
            Err(e) => {
                tracing::warn!("Invalid request: {}", e);
                Response::Error {
                    message: format!("Invalid request: {}", e),
                }
            }
        };

        write_response(&mut output, &response)?;
    }

    tracing::info!("Session input closed");
    Ok(())
}

fn write_response<W: Write>(output: &mut W, response: &Response) -> Result<()> {
    serde_json::to_writer(&mut *output, response)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
