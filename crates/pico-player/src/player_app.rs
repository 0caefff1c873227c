//! Player application implementing winit ApplicationHandler
//!
//! Each redraw runs one engine tick into the software canvas and presents
//! it. Keyboard, focus and gamepad events are forwarded to the engine as
//! host events between ticks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use instant::Instant;
use pico_render::{Canvas, Presenter, RenderContext};
use pico_runtime::{Engine, EngineConfig, EngineEvent, Game, HostEvent};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

use crate::gamepad::GamepadInput;
use crate::keymap::code_name;

/// Upscale factor for saved screenshots
const SCREENSHOT_SCALE: u32 = 4;
/// Initial window size in logical pixels
const INITIAL_WINDOW_SIZE: f64 = 768.0;

pub struct PlayerApp<G: Game> {
    engine: Engine,
    game: G,
    canvas: Canvas,
    config: EngineConfig,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    presenter: Option<Presenter>,

    gamepad: GamepadInput,
    started: Instant,
    /// First fatal error, reported once the event loop has exited
    error: Option<anyhow::Error>,
}

impl<G: Game> PlayerApp<G> {
    pub fn new(engine: Engine, game: G, canvas: Canvas, config: EngineConfig) -> Self {
        Self {
            engine,
            game,
            canvas,
            config,
            window: None,
            render_context: None,
            presenter: None,
            gamepad: GamepadInput::new(),
            started: Instant::now(),
            error: None,
        }
    }

    /// Error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        if self.error.is_none() {
            self.error = Some(error);
        }
        event_loop.exit();
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(INITIAL_WINDOW_SIZE, INITIAL_WINDOW_SIZE));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        if self.config.window.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let render_context = pollster::block_on(RenderContext::new(window.clone()))
            .context("Failed to initialise rendering")?;
        let presenter = Presenter::new(
            &render_context,
            self.config.window.fill_fraction,
            self.config.window.max_scale,
        );

        self.window = Some(window);
        self.render_context = Some(render_context);
        self.presenter = Some(presenter);
        self.started = Instant::now();
        log::info!("Running {}", self.game.name());
        Ok(())
    }

    fn toggle_fullscreen(&self) {
        if let Some(window) = &self.window {
            if window.fullscreen().is_some() {
                window.set_fullscreen(None);
            } else {
                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
        }
    }

    fn save_screenshot(&self) {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let path = PathBuf::from(format!("pico-{}.png", stamp));
        if let Err(e) = self.canvas.save_png(&path, SCREENSHOT_SCALE) {
            log::warn!("Screenshot failed: {}", e);
        }
    }

    /// Player shortcuts run before input forwarding and never reach the game
    fn handle_shortcut(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) -> bool {
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::F11 => self.toggle_fullscreen(),
            KeyCode::F12 => self.save_screenshot(),
            _ => return false,
        }
        true
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        let PhysicalKey::Code(key) = event.physical_key else {
            return;
        };
        match event.state {
            ElementState::Pressed => {
                if !event.repeat && self.handle_shortcut(event_loop, key) {
                    return;
                }
                if let Some(code) = code_name(key) {
                    self.engine.handle_event(&HostEvent::KeyDown {
                        code: code.to_string(),
                        repeat: event.repeat,
                    });
                }
            }
            ElementState::Released => {
                if let Some(code) = code_name(key) {
                    self.engine.handle_event(&HostEvent::key_up(code));
                }
            }
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let engine = &mut self.engine;
        self.gamepad.poll(|event| engine.handle_event(&event));

        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        if let Err(e) = self.engine.tick(now_ms, &mut self.game, &mut self.canvas) {
            self.fail(event_loop, anyhow::Error::new(e).context("Game error"));
            return;
        }

        for event in self.engine.drain_events() {
            match event {
                EngineEvent::Paused | EngineEvent::Resumed | EngineEvent::ResetRequested => {
                    log::info!("{:?}", event)
                }
                EngineEvent::SoundToggled(on) => log::info!("Sound {}", if on { "on" } else { "off" }),
                EngineEvent::VolumeChanged(level) => log::info!("Volume {}", level),
            }
        }

        let (Some(context), Some(presenter)) = (&mut self.render_context, &mut self.presenter)
        else {
            return;
        };
        if let Err(e) = presenter.present(context, &self.canvas) {
            log::warn!("Render error: {}", e);
        }
    }
}

impl<G: Game> ApplicationHandler for PlayerApp<G> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                }
            }

            WindowEvent::Focused(focused) => {
                let event = if focused {
                    HostEvent::FocusGained
                } else {
                    HostEvent::FocusLost
                };
                self.engine.handle_event(&event);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event_loop, event);
            }

            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
