use serde::{Deserialize, Serialize};

use crate::{OutputFormat, OutputView};

/// Request from a presentation layer to wrandr, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // Queries
    ListOutputs,

    // Output mutations
    SetActive {
        output: String,
        active: bool,
    },
    SetMode {
        output: String,
        width: i32,
        height: i32,
        refresh: i32,
    },
    SetScale {
        output: String,
        scale: f64,
    },
    /// Position in world pixels
    SetPosition {
        output: String,
        x: i32,
        y: i32,
    },

    // Dragging, in map coordinates
    /// Snap a candidate position without moving the output
    Drag {
        output: String,
        x: i32,
        y: i32,
    },
    /// Snap a candidate position and commit it
    Drop {
        output: String,
        x: i32,
        y: i32,
    },

    // Serialization
    Export {
        #[serde(default)]
        format: Option<OutputFormat>,
    },
    Apply {
        #[serde(default)]
        dry_run: bool,
    },

    // Control
    Reload,
    Quit,
}

/// Reply from wrandr, one JSON object per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ok,
    Error { message: String },
    Outputs { outputs: Vec<OutputView> },
    /// Snapped position in map coordinates
    Position { x: i32, y: i32 },
    Commands { lines: Vec<String> },
    Applied { results: Vec<ApplyResult> },
}

/// Outcome of applying one output. Outputs are applied independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    pub output: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApplyResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
