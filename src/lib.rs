//! Animated grid background running Conway's Game of Life on a torus,
//! seeded with a single glider.

pub mod board;
pub mod canvas;
pub mod config;
pub mod driver;
pub mod graphics;
pub mod host;
pub mod render;
pub mod seed;

pub use board::Board;
pub use config::{Config, Rgba};
pub use driver::{Driver, FrameHandle, FrameScheduler, Surface, Viewport, ViewportMetrics};
pub use graphics::{GraphicsError, GraphicsRenderer};
pub use seed::seed_glider_top_center;
