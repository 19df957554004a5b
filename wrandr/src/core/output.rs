use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use wrandr_ipc::ModeInfo;

use super::{ModelError, ParseError};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 4.0;
/// Scale substituted when the compositor reports none (or a nonsensical one).
pub const DEFAULT_SCALE: f64 = 1.0;

/// One supported resolution/refresh combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    pub width: i32,
    pub height: i32,
    /// Refresh rate in millihertz
    pub refresh: i32,
}

impl Mode {
    pub fn new(width: i32, height: i32, refresh: i32) -> Self {
        Self {
            width,
            height,
            refresh,
        }
    }

    /// Whole hertz, truncated
    pub fn refresh_hz(&self) -> i32 {
        self.refresh / 1000
    }

    /// `WIDTHxHEIGHT@RHz`, as understood by sway and kanshi
    pub fn token(&self) -> String {
        format!("{}x{}@{}Hz", self.width, self.height, self.refresh_hz())
    }

    pub fn info(&self) -> ModeInfo {
        ModeInfo {
            width: self.width,
            height: self.height,
            refresh: self.refresh,
            label: self.to_string(),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} ({:.2} Hz)",
            self.width,
            self.height,
            self.refresh as f64 / 1000.0
        )
    }
}

/// A mode as typed by a user: `1920x1080`, `1920x1080@60` or `1920x1080@60Hz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSpec {
    pub width: i32,
    pub height: i32,
    pub refresh_hz: Option<i32>,
}

impl ModeSpec {
    pub fn matches(&self, mode: &Mode) -> bool {
        mode.width == self.width
            && mode.height == self.height
            && self.refresh_hz.map_or(true, |hz| mode.refresh_hz() == hz)
    }
}

impl std::str::FromStr for ModeSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid mode: {} (use WIDTHxHEIGHT[@RATE])", s);

        let (size, rate) = match s.split_once('@') {
            Some((size, rate)) => (size, Some(rate)),
            None => (s, None),
        };
        let (width, height) = size.split_once('x').ok_or_else(invalid)?;
        let width: i32 = width.trim().parse().map_err(|_| invalid())?;
        let height: i32 = height.trim().parse().map_err(|_| invalid())?;

        let refresh_hz = match rate {
            Some(rate) => {
                let rate = rate.trim();
                let rate = rate
                    .strip_suffix("Hz")
                    .or_else(|| rate.strip_suffix("hz"))
                    .unwrap_or(rate);
                let hz: f64 = rate.parse().map_err(|_| invalid())?;
                Some(hz.trunc() as i32)
            }
            None => None,
        };

        if width <= 0 || height <= 0 {
            return Err(invalid());
        }

        Ok(Self {
            width,
            height,
            refresh_hz,
        })
    }
}

/// Axis-aligned box in world coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// One physical display as reported by `swaymsg -t get_outputs`.
///
/// Documents from older compositor versions lack `scale`, `primary` and the
/// hardware identity fields; those default to empty values on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub modes: Vec<Mode>,
    #[serde(default)]
    pub current_mode: Mode,
    #[serde(default)]
    pub rect: Rect,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub scale: f64,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub serial: String,
}

impl Output {
    /// Replace the scale with the default when it is missing or below the minimum.
    pub fn normalize(&mut self) {
        if !self.scale.is_finite() || self.scale < MIN_SCALE {
            self.scale = DEFAULT_SCALE;
        }
    }

    /// Quoted `"make model serial"`, stable across connector renames. Falls
    /// back to the connector name when none of the three are known.
    pub fn identifier(&self) -> String {
        if self.make.is_empty() && self.model.is_empty() && self.serial.is_empty() {
            return self.name.clone();
        }
        format!("\"{} {} {}\"", self.make, self.model, self.serial)
    }

    pub fn label(&self) -> String {
        format!("{}\n{}\n{}", self.name, self.make, self.model)
    }

    pub fn style_class(&self) -> &'static str {
        if self.active {
            "active"
        } else {
            "inactive"
        }
    }

    /// Rendered size: mode pixels multiplied by scale.
    pub fn apparent_size(&self) -> (f64, f64) {
        (
            self.current_mode.width as f64 * self.scale,
            self.current_mode.height as f64 * self.scale,
        )
    }

    pub fn supports_mode(&self, mode: &Mode) -> bool {
        self.modes.contains(mode)
    }

    /// First supported mode matching `spec`, in reported order.
    pub fn find_mode(&self, spec: &ModeSpec) -> Option<Mode> {
        self.modes.iter().copied().find(|m| spec.matches(m))
    }

    /// Switch to `mode` and resize the rect to match. Membership in `modes`
    /// is not checked here.
    pub fn change_mode(&mut self, mode: Mode) {
        self.current_mode = mode;
        self.rect.width = mode.width;
        self.rect.height = mode.height;
    }

    /// Mode, position and scale survive deactivation. An output activated
    /// without a usable current mode falls back to its first mode.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if active && !self.supports_mode(&self.current_mode) {
            if let Some(first) = self.modes.first().copied() {
                self.change_mode(first);
            }
        }
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<(), ModelError> {
        if !scale.is_finite() || !(MIN_SCALE..=MAX_SCALE).contains(&scale) {
            return Err(ModelError::InvalidScale(scale));
        }
        self.scale = scale;
        Ok(())
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.rect.x = x;
        self.rect.y = y;
    }
}

/// Parse the JSON document printed by `swaymsg -t get_outputs -r`.
pub fn parse_outputs(json: &str) -> Result<Vec<Output>, ParseError> {
    if json.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut outputs: Vec<Output> = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    for output in &mut outputs {
        if !seen.insert(output.name.clone()) {
            return Err(ParseError::DuplicateName(output.name.clone()));
        }
        output.normalize();
    }

    tracing::debug!("Parsed {} outputs", outputs.len());
    Ok(outputs)
}
