//! The engine context: one fixed-timestep loop driving a [`Game`]
//!
//! The host owns the schedule. It forwards window events through
//! [`Engine::handle_event`] and calls [`Engine::tick`] once per display
//! frame with a monotonic millisecond timestamp. Each tick runs every due
//! logical step, then draws exactly once.

use pico_core::{Renderer, Result, DEFAULT_COLOR};

use crate::bindings::KeyAction;
use crate::clock::LoopClock;
use crate::config::EngineConfig;
use crate::event::{EngineEvent, HostEvent};
use crate::event_bus::EventBus;
use crate::game::Game;
use crate::input::{GameInput, InputTracker};
use crate::menu::MenuController;

/// Summary of one [`Engine::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Clamped wall-clock delta since the previous tick
    pub delta_ms: f64,
    /// Logical steps run (game updates, or the single menu step while paused)
    pub steps: u32,
    pub paused: bool,
}

pub struct Engine {
    clock: LoopClock,
    input: InputTracker,
    menu: MenuController,
    events: EventBus,
    show_fps: bool,
    /// Set by the menu, honoured at the start of the next tick
    reset_pending: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with default timing and bindings
    pub fn new() -> Self {
        Self {
            clock: LoopClock::new(),
            input: InputTracker::new(),
            menu: MenuController::new(),
            events: EventBus::new(),
            show_fps: true,
            reset_pending: false,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            clock: LoopClock::from_config(&config.game_loop),
            input: InputTracker::with_bindings(config.key_bindings()?),
            menu: MenuController::new(),
            events: EventBus::new(),
            show_fps: config.game_loop.show_fps,
            reset_pending: false,
        })
    }

    /// Feed one host notification. Events are applied immediately, between
    /// ticks, and are never re-polled inside a tick.
    pub fn handle_event(&mut self, event: &HostEvent) {
        match event {
            HostEvent::KeyDown { code, repeat } => {
                if let Some(KeyAction::Confirm) = self.input.on_key_down(code, *repeat) {
                    self.confirm();
                }
            }
            HostEvent::KeyUp { code } => {
                self.input.on_key_up(code);
            }
            HostEvent::FocusLost => self.input.set_focused(false),
            HostEvent::FocusGained => self.input.set_focused(true),
        }
    }

    /// Drive the pause menu as if the confirm key was pressed
    pub fn confirm(&mut self) {
        let was_paused = self.menu.is_paused();
        let outcome = self.menu.handle_confirm();

        match (was_paused, self.menu.is_paused()) {
            (false, true) => self.events.push(EngineEvent::Paused),
            (true, false) => self.events.push(EngineEvent::Resumed),
            _ => {}
        }

        if let Some(event) = outcome {
            if event == EngineEvent::ResetRequested {
                self.reset_pending = true;
            }
            self.events.push(event);
        }
    }

    /// Run one host frame at `timestamp_ms`.
    ///
    /// Errors from the game are returned as soon as they happen; the frame
    /// is left partially processed.
    pub fn tick(
        &mut self,
        timestamp_ms: f64,
        game: &mut dyn Game,
        renderer: &mut dyn Renderer,
    ) -> Result<FrameStats> {
        let paused = self.menu.is_paused();
        let delta_ms = self.clock.advance(timestamp_ms, paused);

        if std::mem::take(&mut self.reset_pending) {
            log::info!("Resetting {}", game.name());
            game.reset()?;
        }

        let mut steps = 0;
        if paused {
            // Menu reads raw input, bypassing the pause gate
            self.input.begin_step();
            if let Some(event) = self.menu.update(&self.input) {
                self.events.push(event);
            }
            self.input.end_step();
            steps = 1;
        } else {
            self.clock.begin_steps();
            while self.clock.should_step() {
                self.input.begin_step();
                game.update(&GameInput::new(&self.input, false))?;
                self.input.end_step();
                self.clock.consume_step();
                steps += 1;
            }
            self.clock.end_steps();
        }

        game.draw(renderer)?;
        if self.show_fps {
            let fps = format!("FPS: {}", self.clock.average_fps().floor() as i64);
            renderer.text(&fps, 0, 0, DEFAULT_COLOR);
        }
        if self.menu.is_paused() {
            self.menu.draw(renderer);
        }

        Ok(FrameStats {
            delta_ms,
            steps,
            paused,
        })
    }

    /// Game-facing input view, gated by the pause state
    pub fn game_input(&self) -> GameInput<'_> {
        GameInput::new(&self.input, self.menu.is_paused())
    }

    /// Take every engine event published since the last drain
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain()
    }

    pub fn is_paused(&self) -> bool {
        self.menu.is_paused()
    }

    pub fn clock(&self) -> &LoopClock {
        &self.clock
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn menu(&self) -> &MenuController {
        &self.menu
    }

    pub fn show_fps(&self) -> bool {
        self.show_fps
    }

    pub fn set_show_fps(&mut self, show: bool) {
        self.show_fps = show;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{MenuState, DEFAULT_VOLUME};
    use crate::testing::{DrawCall, RecordingGame, RecordingRenderer, StepSample};

    const STEP: f64 = 1000.0 / 60.0;

    fn setup() -> (Engine, RecordingGame, RecordingRenderer) {
        (Engine::new(), RecordingGame::default(), RecordingRenderer::default())
    }

    fn tick(engine: &mut Engine, t: f64, game: &mut RecordingGame) -> FrameStats {
        let mut r = RecordingRenderer::default();
        engine.tick(t, game, &mut r).unwrap()
    }

    #[test]
    fn test_first_tick_runs_one_step() {
        let (mut engine, mut game, mut r) = setup();
        let stats = engine.tick(1_000.0, &mut game, &mut r).unwrap();

        assert_eq!(stats.steps, 1);
        assert_eq!(stats.delta_ms, 0.0);
        assert_eq!(game.updates, 1);
        assert_eq!(game.draws, 1);
    }

    #[test]
    fn test_exact_spacing_is_one_step_per_tick() {
        let (mut engine, mut game, _) = setup();
        let mut t = 0.0;
        tick(&mut engine, t, &mut game);

        for _ in 0..300 {
            t += STEP;
            let stats = tick(&mut engine, t, &mut game);
            assert_eq!(stats.steps, 1);
        }
        assert_eq!(game.updates, 301);
        assert_eq!(game.draws, 301);
    }

    #[test]
    fn test_stall_catches_up() {
        let (mut engine, mut game, _) = setup();
        let mut t = 0.0;
        tick(&mut engine, t, &mut game);
        t += STEP;
        tick(&mut engine, t, &mut game);

        t += 3.0 * STEP;
        let stats = tick(&mut engine, t, &mut game);
        assert_eq!(stats.steps, 3);
        assert_eq!(game.draws, 3);
    }

    #[test]
    fn test_fast_host_skips_steps() {
        let (mut engine, mut game, _) = setup();
        let mut t = 0.0;
        tick(&mut engine, t, &mut game);

        // 120Hz host: after the first step the buffer sits at -STEP, so
        // half-step deltas alternate between no step and one step
        let mut total = 0;
        for _ in 0..120 {
            t += STEP / 2.0;
            total += tick(&mut engine, t, &mut game).steps;
        }
        assert!((59..=61).contains(&total), "ran {} steps", total);
    }

    #[test]
    fn test_press_edge_only_in_first_catch_up_step() {
        let (mut engine, mut game, _) = setup();
        let mut t = 0.0;
        tick(&mut engine, t, &mut game);
        game.samples.clear();

        engine.handle_event(&HostEvent::key_down("KeyZ"));
        t += 3.0 * STEP;
        tick(&mut engine, t, &mut game);

        assert_eq!(
            game.samples,
            vec![
                StepSample { primary_down: true, primary_pressed: true },
                StepSample { primary_down: true, primary_pressed: false },
                StepSample { primary_down: true, primary_pressed: false },
            ]
        );
    }

    #[test]
    fn test_paused_ticks_do_not_accumulate_or_update() {
        let (mut engine, mut game, _) = setup();
        let mut t = 0.0;
        tick(&mut engine, t, &mut game);
        engine.handle_event(&HostEvent::key_down("Enter"));
        assert!(engine.is_paused());

        let buffered = engine.clock().buffered_ms();
        let updates = game.updates;
        for _ in 0..20 {
            t += 3.0 * STEP;
            let mut r = RecordingRenderer::default();
            let stats = engine.tick(t, &mut game, &mut r).unwrap();
            assert!(stats.paused);
            assert_eq!(stats.steps, 1);
            assert!(r.texts().contains(&"continue"));
        }
        assert_eq!(engine.clock().buffered_ms(), buffered);
        assert_eq!(game.updates, updates);
        assert_eq!(game.draws, 21);
    }

    #[test]
    fn test_unpause_does_not_burst() {
        let (mut engine, mut game, _) = setup();
        let mut t = 0.0;
        tick(&mut engine, t, &mut game);
        engine.handle_event(&HostEvent::key_down("Enter"));
        for _ in 0..10 {
            t += 200.0;
            tick(&mut engine, t, &mut game);
        }
        engine.handle_event(&HostEvent::key_down("Enter"));
        assert!(!engine.is_paused());

        t += STEP;
        assert_eq!(tick(&mut engine, t, &mut game).steps, 1);
    }

    #[test]
    fn test_menu_navigation_through_engine() {
        let (mut engine, mut game, _) = setup();
        let mut t = 0.0;
        tick(&mut engine, t, &mut game);

        engine.handle_event(&HostEvent::key_down("Enter"));
        engine.handle_event(&HostEvent::key_down("ArrowDown"));
        t += STEP;
        tick(&mut engine, t, &mut game);
        assert_eq!(engine.menu().selected(), 1);

        engine.handle_event(&HostEvent::key_up("ArrowDown"));
        engine.handle_event(&HostEvent::key_down("Enter"));
        assert_eq!(engine.menu().state(), MenuState::Options);
    }

    #[test]
    fn test_game_input_gated_while_paused() {
        let (mut engine, mut game, _) = setup();
        tick(&mut engine, 0.0, &mut game);

        engine.handle_event(&HostEvent::key_down("KeyZ"));
        engine.handle_event(&HostEvent::key_down("Enter"));
        assert!(!engine.game_input().btn(4));
        assert!(engine.input().slot(crate::input::Button::Primary) != 0);
    }

    #[test]
    fn test_reset_game() {
        let (mut engine, mut game, _) = setup();
        let mut t = 0.0;
        tick(&mut engine, t, &mut game);

        engine.handle_event(&HostEvent::key_down("Enter"));
        engine.handle_event(&HostEvent::key_down("ArrowUp"));
        t += STEP;
        tick(&mut engine, t, &mut game);
        assert_eq!(engine.menu().selected(), 2);

        engine.handle_event(&HostEvent::key_down("Enter"));
        assert!(!engine.is_paused());
        assert_eq!(game.resets, 0);

        t += STEP;
        tick(&mut engine, t, &mut game);
        assert_eq!(game.resets, 1);

        assert_eq!(
            engine.drain_events(),
            vec![
                EngineEvent::Paused,
                EngineEvent::Resumed,
                EngineEvent::ResetRequested
            ]
        );
    }

    #[test]
    fn test_sound_and_volume_events_reach_the_bus() {
        let (mut engine, mut game, _) = setup();
        let mut t = 0.0;
        tick(&mut engine, t, &mut game);

        // Main -> options
        engine.handle_event(&HostEvent::key_down("Enter"));
        engine.handle_event(&HostEvent::key_down("ArrowDown"));
        t += STEP;
        tick(&mut engine, t, &mut game);
        engine.handle_event(&HostEvent::key_up("ArrowDown"));
        engine.handle_event(&HostEvent::key_down("Enter"));
        assert_eq!(engine.menu().state(), MenuState::Options);

        engine.handle_event(&HostEvent::key_down("Enter"));
        assert!(!engine.menu().sound_enabled());

        engine.handle_event(&HostEvent::key_down("ArrowDown"));
        t += STEP;
        tick(&mut engine, t, &mut game);
        engine.handle_event(&HostEvent::key_up("ArrowDown"));

        engine.handle_event(&HostEvent::key_down("ArrowRight"));
        t += STEP;
        tick(&mut engine, t, &mut game);
        assert_eq!(engine.menu().volume(), DEFAULT_VOLUME + 1);

        assert_eq!(
            engine.drain_events(),
            vec![
                EngineEvent::Paused,
                EngineEvent::SoundToggled(false),
                EngineEvent::VolumeChanged(DEFAULT_VOLUME + 1),
            ]
        );
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_draw_order() {
        let (mut engine, mut game, mut r) = setup();
        engine.handle_event(&HostEvent::key_down("Enter"));
        engine.tick(0.0, &mut game, &mut r).unwrap();

        assert_eq!(r.calls[0], DrawCall::Clear(1));
        assert_eq!(r.calls[1], DrawCall::Text("FPS: 0".into(), 0, 0, DEFAULT_COLOR));
        assert_eq!(r.calls[2], DrawCall::RectFill(23, 43, 80, 36, 0));
    }

    #[test]
    fn test_fps_overlay_can_be_hidden() {
        let (mut engine, mut game, mut r) = setup();
        engine.set_show_fps(false);
        engine.tick(0.0, &mut game, &mut r).unwrap();
        assert_eq!(r.calls, vec![DrawCall::Clear(1)]);
    }

    #[test]
    fn test_focus_loss_releases_buttons() {
        let (mut engine, mut game, _) = setup();
        tick(&mut engine, 0.0, &mut game);
        engine.handle_event(&HostEvent::key_down("KeyZ"));
        engine.handle_event(&HostEvent::FocusLost);
        game.samples.clear();

        tick(&mut engine, STEP, &mut game);
        assert_eq!(
            game.samples,
            vec![StepSample { primary_down: false, primary_pressed: false }]
        );
    }

    #[test]
    fn test_from_config_custom_binding_and_rate() {
        let mut config = EngineConfig::default();
        config.game_loop.logical_rate_hz = 30.0;
        config.input.bindings.insert("Space".into(), "confirm".into());

        let mut engine = Engine::from_config(&config).unwrap();
        assert!((engine.clock().step_ms() - 1000.0 / 30.0).abs() < 1e-9);

        engine.handle_event(&HostEvent::key_down("Space"));
        assert!(engine.is_paused());
        engine.handle_event(&HostEvent::key_repeat("Space"));
        assert_eq!(engine.menu().state(), MenuState::Main);
    }

    #[test]
    fn test_independent_instances() {
        let mut a = Engine::new();
        let b = Engine::new();
        a.handle_event(&HostEvent::key_down("Enter"));
        assert!(a.is_paused());
        assert!(!b.is_paused());
    }
}
