use serde::{Deserialize, Serialize};

/// A resolution/refresh combination as shown to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeInfo {
    pub width: i32,
    pub height: i32,
    /// Refresh rate in millihertz
    pub refresh: i32,
    pub label: String,
}

/// Everything a presentation layer needs to draw one output.
/// Position and size are in map coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputView {
    pub name: String,
    pub label: String,
    pub active: bool,
    pub style_class: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub scale: f64,
    pub current_mode: ModeInfo,
    pub modes: Vec<ModeInfo>,
}
