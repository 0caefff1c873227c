//! Letterboxed placement of the native canvas inside a window

/// Pixel rectangle inside the window surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Fit a `native` sized canvas into `window`, keeping its aspect ratio.
///
/// The limiting window dimension is scaled by `fill_fraction`, and the
/// result never exceeds `max_scale` times the native size. The viewport is
/// centred; the border around it is left for the background colour.
pub fn fit_viewport(
    window: (u32, u32),
    native: (u32, u32),
    fill_fraction: f64,
    max_scale: u32,
) -> Viewport {
    let (win_w, win_h) = window;
    let (native_w, native_h) = native;
    if win_w == 0 || win_h == 0 || native_w == 0 || native_h == 0 {
        return Viewport { x: 0, y: 0, width: 0, height: 0 };
    }

    let native_ratio = native_w as f64 / native_h as f64;
    let window_ratio = win_w as f64 / win_h as f64;

    let (width, height) = if window_ratio > native_ratio {
        // Too wide: height limits
        let h = ((win_h as f64 * fill_fraction).floor() as u32)
            .min(native_h.saturating_mul(max_scale));
        ((h as f64 * native_ratio).floor() as u32, h)
    } else {
        let w = ((win_w as f64 * fill_fraction).floor() as u32)
            .min(native_w.saturating_mul(max_scale));
        (w, (w as f64 / native_ratio).floor() as u32)
    };

    Viewport {
        x: (win_w - width) / 2,
        y: (win_h - height) / 2,
        width,
        height,
    }
}
