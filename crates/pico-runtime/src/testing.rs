//! Test doubles shared by the runtime tests

use pico_core::{ColorIndex, Renderer, Result};

use crate::game::Game;
use crate::input::{Button, GameInput, InputReader};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(ColorIndex),
    Rect(i32, i32, i32, i32, ColorIndex),
    RectFill(i32, i32, i32, i32, ColorIndex),
    Circle(i32, i32, i32, ColorIndex, bool),
    Line(i32, i32, i32, i32, ColorIndex),
    Text(String, i32, i32, ColorIndex),
    Sprite(usize, i32, i32, u32, u32),
}

/// Renderer that remembers every call in order
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(s, ..) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn clear_screen(&mut self, color: ColorIndex) {
        self.calls.push(DrawCall::Clear(color));
    }
    fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: ColorIndex) {
        self.calls.push(DrawCall::Rect(x, y, w, h, color));
    }
    fn rect_fill(&mut self, x: i32, y: i32, w: i32, h: i32, color: ColorIndex) {
        self.calls.push(DrawCall::RectFill(x, y, w, h, color));
    }
    fn circle(&mut self, cx: i32, cy: i32, r: i32, color: ColorIndex, filled: bool) {
        self.calls.push(DrawCall::Circle(cx, cy, r, color, filled));
    }
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: ColorIndex) {
        self.calls.push(DrawCall::Line(x0, y0, x1, y1, color));
    }
    fn text(&mut self, s: &str, x: i32, y: i32, color: ColorIndex) {
        self.calls.push(DrawCall::Text(s.to_string(), x, y, color));
    }
    fn sprite(&mut self, index: usize, x: i32, y: i32, w_tiles: u32, h_tiles: u32) {
        self.calls.push(DrawCall::Sprite(index, x, y, w_tiles, h_tiles));
    }
}

/// What the game saw during one `update`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSample {
    pub primary_down: bool,
    pub primary_pressed: bool,
}

/// Game that counts its callbacks and samples the primary button per step
#[derive(Default)]
pub struct RecordingGame {
    pub updates: u32,
    pub draws: u32,
    pub resets: u32,
    pub samples: Vec<StepSample>,
}

impl Game for RecordingGame {
    fn update(&mut self, input: &GameInput<'_>) -> Result<()> {
        self.updates += 1;
        self.samples.push(StepSample {
            primary_down: input.is_down(Button::Primary),
            primary_pressed: input.was_pressed(Button::Primary),
        });
        Ok(())
    }

    fn draw(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        self.draws += 1;
        renderer.clear_screen(1);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.resets += 1;
        self.samples.clear();
        Ok(())
    }
}
