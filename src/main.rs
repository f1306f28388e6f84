use std::rc::Rc;

use winit::{
    event::{Event, StartCause, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use lifegrid::host::{viewport_from, viewport_of, RedrawScheduler};
use lifegrid::{Config, Driver, GraphicsRenderer};

const WIDTH: u32 = 960;
const HEIGHT: u32 = 640;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::default();
    config.validate()?;
    log::info!("Config: {}", serde_json::to_string(&config)?);

    let event_loop = EventLoop::new();
    let window = Rc::new(
        WindowBuilder::new()
            .with_title("Life Grid")
            .with_inner_size(winit::dpi::LogicalSize::new(WIDTH, HEIGHT))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    let graphics = GraphicsRenderer::new(&window, config.clone())?;
    let scheduler = RedrawScheduler::new(Rc::clone(&window));
    let mut driver = Driver::new(config, graphics, scheduler);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        let result = match event {
            Event::NewEvents(StartCause::Init) => driver.on_ready(viewport_of(&window)),
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                    Ok(())
                }
                WindowEvent::Resized(size) => {
                    driver.on_resize(viewport_from(size, window.scale_factor()))
                }
                WindowEvent::ScaleFactorChanged { scale_factor, new_inner_size } => {
                    driver.on_resize(viewport_from(*new_inner_size, scale_factor))
                }
                _ => Ok(()),
            },
            Event::RedrawRequested(_) => match driver.scheduler_mut().take_pending() {
                Some(_) => {
                    let timestamp_ms = driver.scheduler().timestamp_ms();
                    driver.on_frame(timestamp_ms)
                }
                // redraw before the frame loop has started
                None => Ok(()),
            },
            _ => Ok(()),
        };

        if let Err(err) = result {
            log::error!("Render error: {}", err);
            *control_flow = ControlFlow::Exit;
        }
    });
}
