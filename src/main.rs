//! Spiralscope - live audio spectrum drawn as a pitch spiral
//!
//! Every octave is one loop of the spiral, so a note and its octaves line up.
//! Click once to start listening, click again to toggle fullscreen.

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window, WindowId},
};

use spiralscope::audio::SpectrumSource;
use spiralscope::cli::Args;
use spiralscope::error::RenderError;
use spiralscope::params::{RenderConfig, SpiralParams};
use spiralscope::rendering::RenderSystem;
use spiralscope::spiral::{build_frame, SpiralState};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Audio and spiral
    source: SpectrumSource,
    spiral: Option<SpiralState>,

    // Configuration
    spiral_params: SpiralParams,
    render_config: RenderConfig,

    /// Set once the user (or `--autostart`) asked for audio; later clicks toggle fullscreen
    audio_requested: bool,
    screenshot_count: usize,
}

impl App {
    fn new(args: &Args) -> anyhow::Result<Self> {
        let spiral_params = args.spiral_params();
        spiral_params
            .validate()
            .context("invalid spiral parameters")?;

        let source = SpectrumSource::new(args.analyzer_config())
            .context("invalid analyzer config")?;

        Ok(Self {
            window: None,
            render_system: None,
            source,
            spiral: None,
            spiral_params,
            render_config: args.render_config(),
            audio_requested: args.autostart,
            screenshot_count: 0,
        })
    }

    /// Start capture and rebuild the spiral for the input's real sample rate
    fn start_audio(&mut self) {
        let sample_rate_hz = match self.source.start() {
            Ok(rate) => rate,
            Err(e) => {
                log::error!("Audio failed to start: {}", e);
                return;
            }
        };

        let (width, height) = self
            .render_system
            .as_ref()
            .map(RenderSystem::size)
            .unwrap_or((self.render_config.window_width, self.render_config.window_height));

        match SpiralState::new(
            self.spiral_params.clone(),
            self.source.config(),
            sample_rate_hz,
            width,
            height,
        ) {
            Ok(state) => self.spiral = Some(state),
            Err(e) => log::error!("Cannot map spectrum onto spiral: {}", e),
        }
    }

    fn handle_click(&mut self) {
        if !self.audio_requested {
            self.audio_requested = true;
            self.start_audio();
        } else if let Some(window) = &self.window {
            toggle_fullscreen(window);
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(render_system) = &mut self.render_system {
            render_system.resize(width, height);
        }
        if let Some(spiral) = &mut self.spiral {
            spiral.resize(width, height);
        }
    }

    fn save_screenshot(&mut self) -> Result<(), RenderError> {
        let Some(render_system) = &self.render_system else {
            return Ok(());
        };
        std::fs::create_dir_all(&self.render_config.screenshot_dir)?;
        let path = self.render_config.screenshot_path(self.screenshot_count);
        render_system.save_screenshot(&path)?;
        self.screenshot_count += 1;
        Ok(())
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_system) = &mut self.render_system else {
            return;
        };

        // No spectrum until capture has started: the canvas just keeps fading
        let segments = match (self.source.analyze(), &self.spiral) {
            (Some(spectrum), Some(spiral)) => build_frame(spiral, spectrum),
            _ => Vec::new(),
        };

        match render_system.render(
            &segments,
            self.spiral_params.stroke_weight,
            self.render_config.fade_alpha(),
        ) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

fn toggle_fullscreen(window: &Window) {
    let fullscreen = match window.fullscreen() {
        Some(_) => None,
        None => Some(Fullscreen::Borderless(None)),
    };
    log::debug!("Fullscreen: {}", fullscreen.is_some());
    window.set_fullscreen(fullscreen);
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Spiralscope")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(RenderSystem::new(Arc::clone(&window))) {
            Ok(render_system) => self.render_system = Some(render_system),
            Err(e) => {
                log::error!("Failed to initialize rendering: {}", e);
                event_loop.exit();
                return;
            }
        }
        self.window = Some(window);

        if self.audio_requested {
            self.start_audio();
        } else {
            log::info!("Click the window to start listening");
        }
        log::info!("Click again or press F for fullscreen, S for a screenshot, ESC to quit");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::KeyF => {
                    if let Some(window) = &self.window {
                        toggle_fullscreen(window);
                    }
                }
                KeyCode::KeyS => {
                    if let Err(e) = self.save_screenshot() {
                        log::error!("Screenshot failed: {}", e);
                    }
                }
                _ => {}
            },
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.handle_click(),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Spiralscope - live spectrum spiral");

    let mut app = App::new(&args)?;
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;
    Ok(())
}
