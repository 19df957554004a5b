use std::process::Command;

use serde::Deserialize;

use crate::core::InvocationError;

/// One entry of the JSON array swaymsg prints for a run command.
#[derive(Debug, Deserialize)]
struct CommandReply {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Blocking runner for the compositor's control tool.
pub struct Swaymsg {
    program: String,
}

impl Swaymsg {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }

    /// JSON description of every output, connected or not.
    pub fn get_outputs(&self) -> Result<String, InvocationError> {
        self.run(&["-t", "get_outputs", "-r"])
    }

    /// Run an `output ...` command. A zero exit whose reply reports
    /// `"success": false` is still an error.
    pub fn command(&self, args: &[String]) -> Result<String, InvocationError> {
        let stdout = self.run(args)?;
        if let Some(message) = rejection(&stdout) {
            return Err(InvocationError::Rejected {
                program: self.program.clone(),
                message,
            });
        }
        Ok(stdout)
    }

    /// Run with `args` and return stdout. A non-zero exit is an error
    /// carrying stderr (or stdout, where swaymsg reports command failures).
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<String, InvocationError> {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
        tracing::debug!("Running {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| InvocationError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(InvocationError::Failed {
                program: self.program.clone(),
                status: output.status,
                message,
            });
        }

        Ok(stdout)
    }
}

/// First failure message in a swaymsg command reply, if any.
/// Output that is not a reply (e.g. from a stand-in program) is accepted.
fn rejection(stdout: &str) -> Option<String> {
    let replies: Vec<CommandReply> = serde_json::from_str(stdout).ok()?;
    replies
        .into_iter()
        .find(|r| !r.success)
        .map(|r| r.error.unwrap_or_else(|| "unknown error".to_string()))
}
