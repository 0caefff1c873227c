//! Loop clock with fixed-timestep accumulator and frame-time smoothing

use crate::config::LoopConfig;

/// Default logical update rate
pub const DEFAULT_RATE_HZ: f64 = 60.0;

/// Buffered time in `(-window, 0)` is treated as "due now" rather than "early"
const DEFAULT_SMOOTHING_WINDOW_MS: f64 = 9.0;

/// Weight of the newest sample in the FPS moving average
const DEFAULT_FPS_SMOOTHING: f64 = 0.05;

/// Longest wall-clock gap a single invocation may feed into the accumulator
const DEFAULT_MAX_FRAME_DELTA_MS: f64 = 250.0;

/// Smallest frame delta used when converting to an instantaneous FPS sample
const MIN_FPS_DELTA_MS: f64 = 1.0;

/// Rounding slack so whole multiples of the step are not lost to float error
const STEP_EPSILON_MS: f64 = 1e-6;

fn lerp(percent: f64, a: f64, b: f64) -> f64 {
    a + percent.clamp(0.0, 1.0) * (b - a)
}

/// Tracks host frame timing and converts it into fixed logical steps.
///
/// Call order per host invocation:
/// [`advance`](Self::advance), then (when not paused)
/// [`begin_steps`](Self::begin_steps), `while should_step() { ...; consume_step() }`,
/// [`end_steps`](Self::end_steps).
pub struct LoopClock {
    /// Length of one logical step in milliseconds
    step_ms: f64,
    /// Timestamp of the previous invocation
    last_frame_ms: f64,
    /// Wall-clock time not yet consumed by logical steps
    buffered_ms: f64,
    /// Exponentially smoothed frame rate
    average_fps: f64,
    /// Slightly-negative remainder set aside while steps are consumed
    smoothing_stash: f64,
    smoothing_window_ms: f64,
    fps_smoothing: f64,
    max_frame_delta_ms: f64,
    /// Whether the next invocation is the first one
    first_tick: bool,
}

impl Default for LoopClock {
    fn default() -> Self {
        Self {
            step_ms: 1000.0 / DEFAULT_RATE_HZ,
            last_frame_ms: 0.0,
            buffered_ms: 0.0,
            average_fps: 0.0,
            smoothing_stash: 0.0,
            smoothing_window_ms: DEFAULT_SMOOTHING_WINDOW_MS,
            fps_smoothing: DEFAULT_FPS_SMOOTHING,
            max_frame_delta_ms: DEFAULT_MAX_FRAME_DELTA_MS,
            first_tick: true,
        }
    }
}

impl LoopClock {
    /// Create a clock stepping at 60Hz
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom logical rate
    pub fn with_rate(hz: f64) -> Self {
        Self {
            step_ms: 1000.0 / hz,
            ..Self::default()
        }
    }

    pub fn from_config(config: &LoopConfig) -> Self {
        Self {
            step_ms: 1000.0 / config.logical_rate_hz,
            smoothing_window_ms: config.smoothing_window_ms,
            fps_smoothing: config.fps_smoothing,
            max_frame_delta_ms: config.max_frame_delta_ms,
            ..Self::default()
        }
    }

    /// Record a host invocation at `timestamp_ms`. Returns the frame delta.
    ///
    /// The first invocation only seeds the timestamp. Deltas are clamped to
    /// `[0, max_frame_delta_ms]`. While `paused` nothing is accumulated, so
    /// unpausing does not release a burst of catch-up steps.
    pub fn advance(&mut self, timestamp_ms: f64, paused: bool) -> f64 {
        if self.first_tick {
            self.first_tick = false;
            self.last_frame_ms = timestamp_ms;
            return 0.0;
        }

        let delta = (timestamp_ms - self.last_frame_ms).clamp(0.0, self.max_frame_delta_ms);
        self.last_frame_ms = timestamp_ms;

        let sample = 1000.0 / delta.max(MIN_FPS_DELTA_MS);
        self.average_fps = lerp(self.fps_smoothing, self.average_fps, sample);

        if !paused {
            self.buffered_ms += delta;
        }
        delta
    }

    /// Absorb scheduler jitter before consuming steps.
    ///
    /// A buffer just below zero means the host called back marginally early;
    /// the remainder is set aside so at least one step runs this frame, and is
    /// restored by [`end_steps`](Self::end_steps).
    pub fn begin_steps(&mut self) {
        self.smoothing_stash = 0.0;
        if self.buffered_ms < 0.0 && self.buffered_ms > -self.smoothing_window_ms {
            self.smoothing_stash = self.buffered_ms;
            self.buffered_ms = 0.0;
        }
    }

    /// Returns true while there is buffered time for another logical step
    pub fn should_step(&self) -> bool {
        self.buffered_ms >= -STEP_EPSILON_MS
    }

    /// Consume one logical step from the buffer
    pub fn consume_step(&mut self) {
        self.buffered_ms -= self.step_ms;
    }

    /// Restore the remainder set aside by [`begin_steps`](Self::begin_steps)
    pub fn end_steps(&mut self) {
        self.buffered_ms += self.smoothing_stash;
        self.smoothing_stash = 0.0;
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    pub fn buffered_ms(&self) -> f64 {
        self.buffered_ms
    }

    pub fn last_frame_ms(&self) -> f64 {
        self.last_frame_ms
    }

    pub fn average_fps(&self) -> f64 {
        self.average_fps
    }
}
