use pixels::{wgpu, Pixels, PixelsBuilder, SurfaceTexture};
use thiserror::Error;
use winit::window::Window;

use crate::board::Board;
use crate::canvas::{stretch_nearest, Canvas};
use crate::config::Config;
use crate::driver::{Surface, ViewportMetrics};
use crate::render;

#[derive(Error, Debug)]
pub enum GraphicsError {
    #[error("Failed to present frame: {0}")]
    Pixels(#[from] pixels::Error),
    #[error("Failed to resize: {0}")]
    Texture(#[from] pixels::TextureError),
}

/// `pixels`-backed surface.
///
/// The board is painted into a back buffer sized in device pixels, then
/// stretched onto a `pixels` frame matching the physical window, since
/// `pixels` only scales by whole factors.
pub struct GraphicsRenderer {
    pixels: Pixels,
    config: Config,
    back_buffer: Vec<u8>,
    buffer_width: u32,
    buffer_height: u32,
    frame_width: u32,
    frame_height: u32,
    device_pixel_ratio: u32,
}

impl GraphicsRenderer {
    pub fn new(window: &Window, config: Config) -> Result<Self, GraphicsError> {
        let window_size = window.inner_size();
        let width = window_size.width.max(1);
        let height = window_size.height.max(1);
        let surface_texture = SurfaceTexture::new(width, height, window);
        let pixels = PixelsBuilder::new(width, height, surface_texture)
            .clear_color(clear_color(&config))
            .build()?;

        Ok(Self {
            pixels,
            config,
            back_buffer: vec![0; width as usize * height as usize * 4],
            buffer_width: width,
            buffer_height: height,
            frame_width: width,
            frame_height: height,
            device_pixel_ratio: 1,
        })
    }
}

/// Letterbox color around the buffer, matching the background.
fn clear_color(config: &Config) -> wgpu::Color {
    let [r, g, b, a] = config.background.0;
    wgpu::Color {
        r: r as f64 / 255.0,
        g: g as f64 / 255.0,
        b: b as f64 / 255.0,
        a: a as f64 / 255.0,
    }
}

impl Surface for GraphicsRenderer {
    fn resize(&mut self, metrics: &ViewportMetrics) -> Result<(), GraphicsError> {
        let (buffer_width, buffer_height) = metrics.buffer_size();
        self.back_buffer.resize(buffer_width as usize * buffer_height as usize * 4, 0);
        self.buffer_width = buffer_width;
        self.buffer_height = buffer_height;
        self.device_pixel_ratio = metrics.device_pixel_ratio;

        let (frame_width, frame_height) = metrics.frame_size();
        self.pixels.resize_surface(frame_width, frame_height)?;
        self.pixels.resize_buffer(frame_width, frame_height)?;
        self.frame_width = frame_width;
        self.frame_height = frame_height;
        Ok(())
    }

    fn draw(&mut self, board: &Board) -> Result<(), GraphicsError> {
        let mut canvas = Canvas::new(&mut self.back_buffer, self.buffer_width, self.buffer_height);
        render::draw(&mut canvas, board, &self.config, self.device_pixel_ratio);

        stretch_nearest(
            &self.back_buffer,
            self.buffer_width,
            self.buffer_height,
            self.pixels.frame_mut(),
            self.frame_width,
            self.frame_height,
        );
        self.present()
    }

    fn present(&mut self) -> Result<(), GraphicsError> {
        self.pixels.render()?;
        Ok(())
    }
}
