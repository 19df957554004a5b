use serde::{Deserialize, Serialize};

/// How an output is addressed in a generated command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Connector name as reported by the compositor (e.g. `DP-1`).
    Name,
    /// Quoted `"make model serial"`, stable across connector changes.
    Identity,
}

/// Textual dialect used when serializing outputs into commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// `swaymsg output ...` arguments: identity selector, `X Y` position, scale token.
    #[default]
    Swaymsg,
    /// kanshi profile lines: identity selector, `X,Y` position, scale token.
    Kanshi,
    /// Older schema without hardware identity: name selector, `X Y` position, no scale.
    Legacy,
}

impl OutputFormat {
    pub fn selector(self) -> Selector {
        match self {
            OutputFormat::Swaymsg | OutputFormat::Kanshi => Selector::Identity,
            OutputFormat::Legacy => Selector::Name,
        }
    }

    pub fn position_separator(self) -> &'static str {
        match self {
            OutputFormat::Kanshi => ",",
            OutputFormat::Swaymsg | OutputFormat::Legacy => " ",
        }
    }

    pub fn includes_scale(self) -> bool {
        !matches!(self, OutputFormat::Legacy)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "swaymsg" | "sway" => Ok(OutputFormat::Swaymsg),
            "kanshi" => Ok(OutputFormat::Kanshi),
            "legacy" => Ok(OutputFormat::Legacy),
            _ => Err(format!(
                "Unknown output format: {} (use swaymsg, kanshi, legacy)",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Swaymsg => "swaymsg",
            OutputFormat::Kanshi => "kanshi",
            OutputFormat::Legacy => "legacy",
        };
        write!(f, "{}", name)
    }
}
