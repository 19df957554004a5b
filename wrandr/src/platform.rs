use crate::core::{parse_outputs, InvocationError, Output, QueryError};
use crate::sway::Swaymsg;

/// Trait for querying and configuring outputs on the running compositor.
/// This abstraction allows mocking in tests.
pub trait OutputSystem {
    /// Raw JSON output list.
    fn query_outputs(&self) -> Result<String, InvocationError>;
    /// Apply one output's command tokens. Returns the tool's stdout.
    fn apply(&self, args: &[String]) -> Result<String, InvocationError>;
}

/// Query and parse the current outputs. Empty or malformed input is an error.
pub fn load_outputs<S: OutputSystem>(system: &S) -> Result<Vec<Output>, QueryError> {
    let json = system.query_outputs()?;
    Ok(parse_outputs(&json)?)
}

/// sway implementation of OutputSystem
pub struct SwayOutputSystem {
    swaymsg: Swaymsg,
}

impl SwayOutputSystem {
    pub fn new(program: &str) -> Self {
        Self {
            swaymsg: Swaymsg::new(program),
        }
    }
}

impl OutputSystem for SwayOutputSystem {
    fn query_outputs(&self) -> Result<String, InvocationError> {
        self.swaymsg.get_outputs()
    }

    fn apply(&self, args: &[String]) -> Result<String, InvocationError> {
        self.swaymsg.command(args)
    }
}
