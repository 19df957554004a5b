mod command;
mod dispatch;
mod effects;
mod session;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use wrandr_ipc::{Command, Response};

use crate::core::{Config, State};
use crate::platform::{load_outputs, OutputSystem};

/// Single owner of the output model and the system it is applied to.
pub struct App<S: OutputSystem> {
    state: State,
    system: S,
}

impl<S: OutputSystem> App<S> {
    /// Query the compositor once. Failing to get a usable snapshot is fatal.
    pub fn start(config: Config, system: S) -> Result<Self> {
        let outputs = load_outputs(&system).context("Failed to query outputs")?;
        tracing::info!(
            "Loaded {} outputs (density {}, snap tolerance {})",
            outputs.len(),
            config.density,
            config.snap_tolerance
        );
        let state = State::with_outputs(outputs, config);
        Ok(Self { state, system })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn dispatch(&mut self, cmd: &Command) -> Response {
        dispatch::dispatch_command(cmd, &mut self.state, &self.system)
    }

    pub fn run_session<R: BufRead, W: Write>(&mut self, input: R, output: W) -> Result<()> {
        tracing::info!("Session started");
        session::run_session(&mut self.state, &self.system, input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{create_test_output, MockOutputSystem};

    #[test]
    fn test_start_loads_outputs() {
        let system = MockOutputSystem::new().with_outputs(vec![
            create_test_output("A", 0, 0, 1920, 1080),
            create_test_output("B", 1920, 0, 1920, 1080),
        ]);
        let app = App::start(Config::default(), system).unwrap();
        assert_eq!(app.state().outputs().len(), 2);
    }

    #[test]
    fn test_start_fails_on_malformed_snapshot() {
        let system = MockOutputSystem::new().with_json("{\"oops\"");
        let err = App::start(Config::default(), system).err().unwrap();
        assert!(err.to_string().contains("Failed to query outputs"));
    }

    #[test]
    fn test_start_fails_when_tool_missing() {
        let system = MockOutputSystem::new().unavailable();
        assert!(App::start(Config::default(), system).is_err());
    }

    #[test]
    fn test_dispatch() {
        let system = MockOutputSystem::new()
            .with_outputs(vec![create_test_output("A", 0, 0, 1920, 1080)]);
        let mut app = App::start(Config::default(), system).unwrap();
        let response = app.dispatch(&Command::SetActive {
            output: "A".to_string(),
            active: false,
        });
        assert_eq!(response, Response::Ok);
        assert!(!app.state().output("A").unwrap().active);
    }
}
