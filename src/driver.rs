use crate::board::Board;
use crate::config::Config;
use crate::graphics::GraphicsError;
use crate::seed::seed_glider_top_center;

/// Smallest board edge, however small the viewport gets.
pub const MIN_CELLS: usize = 5;

/// Host viewport as reported on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width
    pub width: f64,
    /// Logical height
    pub height: f64,
    pub scale_factor: f64,
    /// Physical size of the window surface
    pub surface_width: u32,
    pub surface_height: u32,
}

impl Viewport {
    /// Viewport whose surface is exactly the logical size times the scale factor.
    pub fn logical(width: f64, height: f64, scale_factor: f64) -> Self {
        Self {
            width,
            height,
            scale_factor,
            surface_width: (width * scale_factor).round().max(1.0) as u32,
            surface_height: (height * scale_factor).round().max(1.0) as u32,
        }
    }
}

/// Integer metrics derived from a [`Viewport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportMetrics {
    /// Logical width, at least 1
    pub width: u32,
    /// Logical height, at least 1
    pub height: u32,
    /// Floored scale factor, at least 1
    pub device_pixel_ratio: u32,
    pub surface_width: u32,
    pub surface_height: u32,
}

impl ViewportMetrics {
    pub fn from_viewport(viewport: &Viewport) -> Self {
        Self {
            width: viewport.width.floor().max(1.0) as u32,
            height: viewport.height.floor().max(1.0) as u32,
            device_pixel_ratio: viewport.scale_factor.floor().max(1.0) as u32,
            surface_width: viewport.surface_width.max(1),
            surface_height: viewport.surface_height.max(1),
        }
    }

    /// Frame buffer size in device pixels.
    pub fn buffer_size(&self) -> (u32, u32) {
        (
            self.width * self.device_pixel_ratio,
            self.height * self.device_pixel_ratio,
        )
    }

    /// Presented frame size: the whole physical window surface.
    pub fn frame_size(&self) -> (u32, u32) {
        (self.surface_width, self.surface_height)
    }

    /// Board columns and rows for the given cell size in logical pixels.
    pub fn grid_size(&self, cell_size: u32) -> (usize, usize) {
        let cell_size = cell_size.max(1);
        (
            ((self.width / cell_size) as usize).max(MIN_CELLS),
            ((self.height / cell_size) as usize).max(MIN_CELLS),
        )
    }
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            device_pixel_ratio: 1,
            surface_width: 1,
            surface_height: 1,
        }
    }
}

/// Drawing surface the driver paints the board onto.
pub trait Surface {
    fn resize(&mut self, metrics: &ViewportMetrics) -> Result<(), GraphicsError>;
    /// Repaints the whole surface from `board` and presents it.
    fn draw(&mut self, board: &Board) -> Result<(), GraphicsError>;
    /// Presents the last painted frame again. On a vsync'd surface this
    /// paces the frame loop to the display refresh.
    fn present(&mut self) -> Result<(), GraphicsError>;
}

/// Handle to a requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// One-shot frame callbacks. Every callback has to be requested again.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Owns the board and runs the resize, frame and restart logic.
///
/// Simulation advances at most once per frame callback, and only when at
/// least `sim_interval_ms` have passed since the last step.
pub struct Driver<S, F> {
    config: Config,
    surface: S,
    scheduler: F,
    metrics: ViewportMetrics,
    board: Board,
    last_tick: Option<f64>,
    frame: Option<FrameHandle>,
}

impl<S: Surface, F: FrameScheduler> Driver<S, F> {
    pub fn new(config: Config, surface: S, scheduler: F) -> Self {
        let mut board = Board::new(MIN_CELLS, MIN_CELLS);
        seed_glider_top_center(&mut board);

        Self {
            config,
            surface,
            scheduler,
            metrics: ViewportMetrics::default(),
            board,
            last_tick: None,
            frame: None,
        }
    }

    /// Host is ready: size everything to `viewport` and start the loop.
    pub fn on_ready(&mut self, viewport: Viewport) -> Result<(), GraphicsError> {
        let result = self.on_resize(viewport);
        self.start();
        result
    }

    /// Rebuilds the board for a new viewport and redraws immediately.
    ///
    /// The frame loop's timing is left untouched.
    pub fn on_resize(&mut self, viewport: Viewport) -> Result<(), GraphicsError> {
        let metrics = ViewportMetrics::from_viewport(&viewport);
        if let Err(err) = self.surface.resize(&metrics) {
            log::error!("Failed to resize surface: {}", err);
        }

        let (columns, rows) = metrics.grid_size(self.config.cell_size);
        let mut board = Board::new(columns, rows);
        seed_glider_top_center(&mut board);
        self.board = board;
        self.metrics = metrics;

        log::info!(
            "Viewport {}x{} @{}x: {} x {} cells",
            metrics.width,
            metrics.height,
            metrics.device_pixel_ratio,
            columns,
            rows
        );

        self.surface.draw(&self.board)
    }

    /// Cancels the pending frame, if any, and schedules a fresh one that
    /// counts as the first frame.
    pub fn start(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.last_tick = None;
        self.frame = Some(self.scheduler.request_frame());
    }

    /// Frame callback with a monotonic timestamp in milliseconds.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> Result<(), GraphicsError> {
        self.frame = None;
        let result = self.tick(timestamp_ms);
        self.frame = Some(self.scheduler.request_frame());
        result
    }

    fn tick(&mut self, timestamp_ms: f64) -> Result<(), GraphicsError> {
        let Some(last_tick) = self.last_tick else {
            self.last_tick = Some(timestamp_ms);
            return self.surface.present();
        };

        if timestamp_ms - last_tick >= self.config.sim_interval_ms {
            self.board.step();
            self.last_tick = Some(timestamp_ms);
            log::debug!(
                "Generation {}: {} live, center row {:?}",
                self.board.generation(),
                self.board.population(),
                self.board.live_center_row()
            );
            self.surface.draw(&self.board)
        } else {
            // Re-presenting uploads the frame again, but it is what blocks on
            // vsync; without it redraw requests would spin the CPU.
            self.surface.present()
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn metrics(&self) -> &ViewportMetrics {
        &self.metrics
    }

    pub fn last_tick(&self) -> Option<f64> {
        self.last_tick
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}
