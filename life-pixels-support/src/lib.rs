#![deny(clippy::all)]
#![forbid(unsafe_code)]

use error_iter::ErrorIter as _;
use life_grid::{CellMatrix, Loc, RunState, Simulation};
use log::{debug, error};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, KeyEvent, MouseButton, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Cursor, CursorIcon, Window, WindowId};

const BACKGROUND_COLOR: Color = Color::BLACK;
const ALIVE_RGBA: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
const DEAD_RGBA: [u8; 4] = [0x00, 0x00, 0x00, 0xff];
const MIN_TICK: Duration = Duration::from_millis(1);

#[derive(Debug, Error)]
pub enum AnimateError {
    #[error("event loop failed")]
    EventLoop(#[from] EventLoopError),
    #[error("could not create the window")]
    Window(#[from] OsError),
    #[error("pixels surface failed")]
    Pixels(#[from] pixels::Error),
    #[error("could not resize the pixels surface")]
    Resize(#[from] pixels::TextureError),
    #[error("simulation step failed")]
    Tick(#[from] life_grid::GridError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct WindowSettings {
    /// Logical window size.
    pub width: f64,
    pub height: f64,
    pub tick: Duration,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            tick: Duration::from_millis(500),
        }
    }
}

/// Opens a window showing `simulation` and runs it until the window closes.
///
/// Left click toggles a cell, Space or Enter starts and stops the simulation,
/// N advances a single generation, and Escape, Q or X quits.
pub fn animate(simulation: Simulation, settings: WindowSettings) -> Result<(), AnimateError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut handler = AppEventHandler::new(simulation, settings);
    event_loop.run_app(&mut handler)?;
    handler.error.map_or(Ok(()), Err)
}

pub fn log_error<E: std::error::Error + 'static>(method_name: &str, err: &E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}

pub fn window_title(run_state: RunState) -> String {
    format!("Conway's Game of Life [{run_state}]")
}

pub fn cell_color_rgba(alive: bool) -> [u8; 4] {
    if alive { ALIVE_RGBA } else { DEAD_RGBA }
}

/// Maps a `window_pos_to_pixel` result, which is `(x, y)`, to the clicked cell.
pub fn clicked_loc(pixel: Result<(usize, usize), (isize, isize)>) -> Option<Loc> {
    let (col, row) = pixel.ok()?;
    Some(Loc::new(u32::try_from(row).ok()?, u32::try_from(col).ok()?))
}

/// Writes one RGBA pixel per cell into `frame`.
pub fn draw_cells(cells: &CellMatrix, frame: &mut [u8]) {
    debug_assert_eq!(frame.len(), 4 * cells.num_cells());
    for (&alive, pixel) in cells.cells_iter().zip(frame.chunks_exact_mut(4)) {
        pixel.copy_from_slice(&cell_color_rgba(alive));
    }
}

struct App {
    simulation: Simulation,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    tick: Duration,
    next_update: Instant,
    cursor_position: Option<PhysicalPosition<f64>>,
}

impl App {
    fn new(
        event_loop: &ActiveEventLoop,
        simulation: Simulation,
        settings: &WindowSettings,
    ) -> Result<Self, AnimateError> {
        let window = Arc::new(Self::build_window(event_loop, &simulation, settings)?);
        let cells = simulation.grid().read();
        let pixels = Self::build_pixels(&window, cells.cols(), cells.rows())?;
        let tick = settings.tick.max(MIN_TICK);
        Ok(Self {
            simulation,
            window,
            pixels,
            tick,
            next_update: Instant::now() + tick,
            cursor_position: None,
        })
    }

    fn build_window(
        event_loop: &ActiveEventLoop,
        simulation: &Simulation,
        settings: &WindowSettings,
    ) -> Result<Window, OsError> {
        let cells = simulation.grid().read();
        let window_attributes = Window::default_attributes()
            .with_title(window_title(simulation.run_state()))
            .with_inner_size(LogicalSize::new(settings.width, settings.height))
            .with_min_inner_size(LogicalSize::new(cells.cols(), cells.rows()))
            .with_cursor(Cursor::Icon(CursorIcon::Crosshair))
            .with_visible(false);
        event_loop.create_window(window_attributes)
    }

    fn build_pixels(
        window: &Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(width, height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_time_step(&mut self) -> Result<(), AnimateError> {
        if self.simulation.tick()? {
            self.window.request_redraw();
        }

        while self.next_update < Instant::now() {
            self.next_update += self.tick;
        }
        Ok(())
    }

    fn on_toggle_running(&mut self) {
        let run_state = self.simulation.toggle_running();
        self.window.set_title(&window_title(run_state));
        if run_state == RunState::Running {
            self.next_update = Instant::now() + self.tick;
        }
    }

    fn on_single_step(&mut self) -> Result<(), AnimateError> {
        self.simulation.step()?;
        self.window.request_redraw();
        Ok(())
    }

    fn on_click(&mut self) {
        let Some(position) = self.cursor_position else {
            return;
        };
        let pixel = self
            .pixels
            .window_pos_to_pixel((position.x as f32, position.y as f32));
        match clicked_loc(pixel) {
            Some(loc) => {
                if self.simulation.toggle_cell(loc) {
                    self.window.request_redraw();
                }
            }
            None => debug!("Ignoring click outside the grid at {pixel:?}"),
        }
    }

    fn on_resize(&mut self, width: u32, height: u32) -> Result<(), AnimateError> {
        if width > 0 && height > 0 {
            self.pixels.resize_surface(width, height)?;
            self.window.request_redraw();
        }
        Ok(())
    }

    fn on_redraw(&mut self) -> Result<(), AnimateError> {
        draw_cells(self.simulation.grid().read(), self.pixels.frame_mut());
        self.pixels.render()?;
        Ok(())
    }
}

struct AppEventHandler {
    pending: Option<(Simulation, WindowSettings)>,
    app: Option<App>,
    error: Option<AnimateError>,
}

impl AppEventHandler {
    fn new(simulation: Simulation, settings: WindowSettings) -> Self {
        Self {
            pending: Some((simulation, settings)),
            app: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AnimateError) {
        self.error = Some(err);
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        let result = match code {
            KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX => {
                event_loop.exit();
                Ok(())
            }
            KeyCode::Space | KeyCode::Enter => {
                app.on_toggle_running();
                Ok(())
            }
            KeyCode::KeyN => app.on_single_step(),
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }
}

impl ApplicationHandler for AppEventHandler {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(app) = self.app.as_mut()
            && let Err(err) = app.on_time_step()
        {
            self.fail(event_loop, err);
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some((simulation, settings)) = self.pending.take() else {
            return;
        };
        match App::new(event_loop, simulation, &settings) {
            Ok(mut app) => {
                app.on_create();
                self.app = Some(app);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let result = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                Ok(())
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.handle_key(event_loop, code);
                Ok(())
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(app) = self.app.as_mut() {
                    app.cursor_position = Some(position);
                }
                Ok(())
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(app) = self.app.as_mut() {
                    app.cursor_position = None;
                }
                Ok(())
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(app) = self.app.as_mut() {
                    app.on_click();
                }
                Ok(())
            }
            WindowEvent::Resized(size) => match self.app.as_mut() {
                Some(app) => app.on_resize(size.width, size.height),
                None => Ok(()),
            },
            WindowEvent::RedrawRequested => match self.app.as_mut() {
                Some(app) => app.on_redraw(),
                None => Ok(()),
            },
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.as_ref() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_update));
        }
    }
}
