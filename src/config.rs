use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Logical pixels per cell
pub const CELL_SIZE: u32 = 24;
/// Grid stroke width in logical pixels
pub const GRID_LINE_WIDTH: f32 = 1.0;
/// Simulation tick rate
pub const SIM_INTERVAL_MS: f64 = 100.0;

/// Straight-alpha RGBA color, composited source-over like a 2D canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Builds a color from a CSS-style alpha in `0.0..=1.0`.
    pub fn with_alpha(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self([r, g, b, a])
    }

    pub fn alpha(&self) -> u8 {
        self.0[3]
    }

    /// Composites `self` over the RGBA pixel `dst` in place.
    pub fn blend_over(&self, dst: &mut [u8]) {
        let [r, g, b, a] = self.0;
        match a {
            0 => {}
            255 => dst.copy_from_slice(&self.0),
            _ => {
                let sa = a as u32;
                let da = dst[3] as u32;
                // out_a = sa + da * (1 - sa), everything scaled by 255
                let out_a = sa * 255 + da * (255 - sa);
                if out_a == 0 {
                    dst.copy_from_slice(&[0, 0, 0, 0]);
                    return;
                }
                for (channel, src) in [r, g, b].into_iter().enumerate() {
                    let s = src as u32 * sa * 255;
                    let d = dst[channel] as u32 * da * (255 - sa);
                    dst[channel] = ((s + d + out_a / 2) / out_a) as u8;
                }
                dst[3] = ((out_a + 127) / 255) as u8;
            }
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Cell size must be at least 1 pixel")]
    ZeroCellSize,
    #[error("Grid line width must be positive, got {0}")]
    InvalidLineWidth(f32),
    #[error("Simulation interval must be positive, got {0}ms")]
    InvalidInterval(f64),
}

/// Visual and timing constants, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logical pixels per cell
    pub cell_size: u32,
    pub grid_color: Rgba,
    /// Stroke width in logical pixels, scaled by the device pixel ratio
    pub grid_line_width: f32,
    pub live_color: Rgba,
    pub background: Rgba,
    pub sim_interval_ms: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            grid_color: Rgba::with_alpha(0, 0, 0, 0.08),
            grid_line_width: GRID_LINE_WIDTH,
            live_color: Rgba::with_alpha(0, 102, 255, 0.35),
            background: Rgba::new(255, 255, 255, 255),
            sim_interval_ms: SIM_INTERVAL_MS,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if !(self.grid_line_width > 0.0) {
            return Err(ConfigError::InvalidLineWidth(self.grid_line_width));
        }
        if !(self.sim_interval_ms > 0.0) {
            return Err(ConfigError::InvalidInterval(self.sim_interval_ms));
        }
        Ok(())
    }
}
