use wrandr_ipc::{OutputFormat, Selector};

use super::Output;

/// Arguments for one invocation of the configuration tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputCommand {
    pub output: String,
    pub args: Vec<String>,
}

impl OutputCommand {
    pub fn new(output: &Output, format: OutputFormat) -> Self {
        Self {
            output: output.name.clone(),
            args: to_command(output, format),
        }
    }

    pub fn line(&self) -> String {
        self.args.join(" ")
    }
}

/// Serialize an output into tokens for `format`.
///
/// Inactive outputs always produce `output <selector> disable`.
pub fn to_command(output: &Output, format: OutputFormat) -> Vec<String> {
    let selector = match format.selector() {
        Selector::Name => output.name.clone(),
        Selector::Identity => output.identifier(),
    };

    if !output.active {
        return vec!["output".to_string(), selector, "disable".to_string()];
    }

    let mut args = vec![
        "output".to_string(),
        selector,
        "mode".to_string(),
        output.current_mode.token(),
        "position".to_string(),
        format!(
            "{}{}{}",
            output.rect.x,
            format.position_separator(),
            output.rect.y
        ),
    ];

    if format.includes_scale() {
        args.push("scale".to_string());
        args.push(format!("{:.2}", output.scale));
    }

    args
}
