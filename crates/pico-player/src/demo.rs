//! Bundled sample game: a bouncing ball, a walking sprite and a greeting

use pico_core::{Renderer, Result};
use pico_render::{parse_rows, SpriteSheet};
use pico_runtime::{Game, GameInput};

/// Logical steps each animation frame is held for
const FRAME_STEPS: u32 = 28;
const WALK_FRAMES: [usize; 2] = [0, 1];
const BALL_MAX_X: i32 = 120;

pub struct DemoGame {
    ball_x: i32,
    direction: i32,
    steps: u32,
}

impl Default for DemoGame {
    fn default() -> Self {
        Self {
            ball_x: 0,
            direction: 1,
            steps: 0,
        }
    }
}

impl DemoGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ball_x(&self) -> i32 {
        self.ball_x
    }

    fn walk_frame(&self) -> usize {
        WALK_FRAMES[(self.steps / FRAME_STEPS) as usize % WALK_FRAMES.len()]
    }
}

impl Game for DemoGame {
    fn update(&mut self, _input: &GameInput<'_>) -> Result<()> {
        self.steps += 1;
        self.ball_x += self.direction;
        if self.ball_x >= BALL_MAX_X {
            self.direction = -1;
        }
        if self.ball_x <= 0 {
            self.direction = 1;
        }
        Ok(())
    }

    fn draw(&mut self, r: &mut dyn Renderer) -> Result<()> {
        r.clear_screen(0);
        r.circle(self.ball_x, 28, 8, 13, true);
        r.sprite(self.walk_frame(), 40, 80, 1, 1);
        r.text("<hello\\world>", 40, 60, 13);
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        *self = Self::default();
        Ok(())
    }

    fn name(&self) -> &str {
        "demo"
    }
}

/// The two walk-cycle frames used by [`DemoGame`]
pub fn demo_sprites() -> Result<SpriteSheet> {
    SpriteSheet::bake([
        (
            0,
            parse_rows(
                0,
                &[
                    ".333334", "..35f5.4", "..3fff.f", ".3333334", ".f4444.4", "..3333.4",
                    "..3..34", "",
                ],
            )?,
        ),
        (
            1,
            parse_rows(
                1,
                &[
                    "......4", ".33333.4", "..35f5.f", "..3fff34", ".34444.4", ".f3333.4",
                    "..3..34", "",
                ],
            )?,
        ),
    ])
}
