use wrandr_ipc::{OutputFormat, OutputView};

use super::{Axis, Config, Mode, ModelError, Output, OutputCommand};

/// Owns the output snapshot for the lifetime of the process.
/// Every mutation goes through one of the named operations below.
pub struct State {
    outputs: Vec<Output>,
    config: Config,
}

impl State {
    pub fn with_outputs(outputs: Vec<Output>, config: Config) -> Self {
        Self { outputs, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn output(&self, name: &str) -> Option<&Output> {
        self.outputs.iter().find(|o| o.name == name)
    }

    fn output_mut(&mut self, name: &str) -> Result<&mut Output, ModelError> {
        self.outputs
            .iter_mut()
            .find(|o| o.name == name)
            .ok_or_else(|| ModelError::UnknownOutput(name.to_string()))
    }

    fn require(&self, name: &str) -> Result<&Output, ModelError> {
        self.output(name)
            .ok_or_else(|| ModelError::UnknownOutput(name.to_string()))
    }

    /// Swap in a freshly queried snapshot.
    pub fn replace_outputs(&mut self, outputs: Vec<Output>) {
        tracing::info!("Loaded {} outputs", outputs.len());
        self.outputs = outputs;
    }

    pub fn set_active(&mut self, name: &str, active: bool) -> Result<(), ModelError> {
        let output = self.output_mut(name)?;
        output.set_active(active);
        tracing::info!(
            "{} {}",
            if active { "Enabled" } else { "Disabled" },
            name
        );
        Ok(())
    }

    /// Unlike `Output::change_mode`, rejects modes the output does not list.
    pub fn set_mode(&mut self, name: &str, mode: Mode) -> Result<(), ModelError> {
        let output = self.output_mut(name)?;
        if !output.supports_mode(&mode) {
            return Err(ModelError::UnsupportedMode {
                output: name.to_string(),
                mode: mode.to_string(),
            });
        }
        output.change_mode(mode);
        tracing::info!("Set mode of {}: {}", name, mode);
        Ok(())
    }

    pub fn set_scale(&mut self, name: &str, scale: f64) -> Result<(), ModelError> {
        self.output_mut(name)?.set_scale(scale)?;
        tracing::info!("Set scale of {}: {:.2}", name, scale);
        Ok(())
    }

    /// Position in world pixels.
    pub fn set_position(&mut self, name: &str, x: i32, y: i32) -> Result<(), ModelError> {
        self.output_mut(name)?.set_position(x, y);
        tracing::info!("Moved {} to {},{}", name, x, y);
        Ok(())
    }

    /// Snapped map position for a candidate map position, without moving anything.
    pub fn drag(&self, name: &str, x: i32, y: i32) -> Result<(i32, i32), ModelError> {
        let moving = self.require(name)?;
        let engine = self.config.snap_engine();
        let snapped_x = engine.snap(x, &self.outputs, moving, |o| Axis::X.extent(o));
        let snapped_y = engine.snap(y, &self.outputs, moving, |o| Axis::Y.extent(o));
        Ok((snapped_x, snapped_y))
    }

    /// Snap a candidate map position and commit it. A snapped axis takes the
    /// exact world edge of its anchor; a free axis is scaled back from map
    /// units. Returns the snapped map position.
    pub fn drop_output(&mut self, name: &str, x: i32, y: i32) -> Result<(i32, i32), ModelError> {
        let moving = self.require(name)?;
        let engine = self.config.snap_engine();
        let mapper = engine.mapper();

        let anchor_x = engine.snap_anchor(x, &self.outputs, moving, |o| Axis::X.extent(o));
        let anchor_y = engine.snap_anchor(y, &self.outputs, moving, |o| Axis::Y.extent(o));

        let (map_x, world_x) = match anchor_x {
            Some(anchor) => (anchor.map, anchor.world),
            None => (x, mapper.map_to_world(x as f64)),
        };
        let (map_y, world_y) = match anchor_y {
            Some(anchor) => (anchor.map, anchor.world),
            None => (y, mapper.map_to_world(y as f64)),
        };

        self.set_position(name, world_x, world_y)?;
        Ok((map_x, map_y))
    }

    pub fn view(&self, output: &Output) -> OutputView {
        let mapper = self.config.mapper();
        let (width, height) = output.apparent_size();
        OutputView {
            name: output.name.clone(),
            label: output.label(),
            active: output.active,
            style_class: output.style_class().to_string(),
            x: mapper.world_to_map(output.rect.x),
            y: mapper.world_to_map(output.rect.y),
            width: mapper.world_to_map(width as i32),
            height: mapper.world_to_map(height as i32),
            scale: output.scale,
            current_mode: output.current_mode.info(),
            modes: output.modes.iter().map(|m| m.info()).collect(),
        }
    }

    pub fn views(&self) -> Vec<OutputView> {
        self.outputs.iter().map(|o| self.view(o)).collect()
    }

    /// One command per output, in snapshot order.
    pub fn commands(&self, format: OutputFormat) -> Vec<OutputCommand> {
        self.outputs
            .iter()
            .map(|o| OutputCommand::new(o, format))
            .collect()
    }
}
