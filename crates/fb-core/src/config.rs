//! Benchmark configuration.
//!
//! Defaults reproduce the reference page: 400×400 canvases, a 350×350
//! container, 30px shapes with a 5px gap, 100 steps per motion leg.
//! Any field may be overridden from a JSON file; colors are CSS strings.

use crate::model::{Color, Shadow, Stroke};
use crate::scene::GRID_SIDE;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            background: Color::rgba(248.0 / 255.0, 249.0 / 255.0, 250.0 / 255.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerConfig {
    pub width: f64,
    pub height: f64,
    pub stroke: Stroke,
    pub shadow: Option<Shadow>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        let ddd = 221.0 / 255.0;
        Self {
            width: 350.0,
            height: 350.0,
            stroke: Stroke {
                color: Color::rgba(ddd, ddd, ddd, 1.0),
                width: 1.0,
            },
            shadow: Some(Shadow {
                color: Color::rgba(0.0, 0.0, 0.0, 0.1),
                blur: 10.0,
                offset_x: 0.0,
                offset_y: 0.0,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeConfig {
    pub size: f64,
    pub gap: f64,
}

impl ShapeConfig {
    /// Edge length of the laid-out grid: ten cells plus nine gaps.
    pub fn grid_side(&self) -> f64 {
        self.size * GRID_SIDE as f64 + self.gap * (GRID_SIDE - 1) as f64
    }
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            size: 30.0,
            gap: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    pub steps_per_leg: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self { steps_per_leg: 100 }
    }
}

/// Complete benchmark configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    pub canvas: CanvasConfig,
    pub container: ContainerConfig,
    pub shape: ShapeConfig,
    pub motion: MotionConfig,
}

impl BenchConfig {
    /// Parse a JSON config; missing fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, String> {
        let config: BenchConfig =
            serde_json::from_str(text).map_err(|e| format!("Config parse error: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config {}: {e}", path.display()))?;
        let config = Self::from_json_str(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would produce an empty or inverted layout, a
    /// grid that spills out of its container, or a run with no steps.
    pub fn validate(&self) -> Result<(), String> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err("canvas width and height must be positive".into());
        }
        if self.shape.size <= 0.0 || self.shape.gap < 0.0 {
            return Err("shape size must be positive and gap non-negative".into());
        }
        if self.container.width <= 0.0 || self.container.height <= 0.0 {
            return Err("container width and height must be positive".into());
        }
        let grid_side = self.shape.grid_side();
        if grid_side > self.container.width || grid_side > self.container.height {
            return Err(format!(
                "a {grid_side}px grid does not fit in the {}x{} container",
                self.container.width, self.container.height
            ));
        }
        if self.motion.steps_per_leg == 0 {
            return Err("motion steps_per_leg must be at least 1".into());
        }
        Ok(())
    }
}
