use std::rc::Rc;
use std::time::Instant;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::driver::{FrameHandle, FrameScheduler, Viewport};

/// Frame callbacks on top of winit redraw requests.
///
/// A redraw request cannot be withdrawn, so cancelling only forgets the
/// handle: a `RedrawRequested` that arrives with no pending handle is not a
/// frame callback.
pub struct RedrawScheduler {
    window: Rc<Window>,
    started: Instant,
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl RedrawScheduler {
    pub fn new(window: Rc<Window>) -> Self {
        Self {
            window,
            started: Instant::now(),
            next_id: 0,
            pending: None,
        }
    }

    /// Claims the pending frame, if any. Called on `RedrawRequested`.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Milliseconds since the scheduler was created.
    pub fn timestamp_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.window.request_redraw();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

pub fn viewport_of(window: &Window) -> Viewport {
    viewport_from(window.inner_size(), window.scale_factor())
}

/// Viewport for a physical window size at the given scale factor.
pub fn viewport_from(size: PhysicalSize<u32>, scale_factor: f64) -> Viewport {
    let logical = size.to_logical::<f64>(scale_factor);
    Viewport {
        width: logical.width,
        height: logical.height,
        scale_factor,
        surface_width: size.width,
        surface_height: size.height,
    }
}
