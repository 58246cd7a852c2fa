//! Drawing-surface capability.
//!
//! Hosts implement `DrawSurface` over whatever immediate-mode 2D API they
//! have. Coordinates are integer pixels in the current transform.

use vk_core::Argb;

pub trait DrawSurface {
    /// Fill the half-open rectangle `[x0, x1) × [y0, y1)`.
    fn fill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Argb);
    fn hline(&mut self, x0: i32, x1: i32, y: i32, color: Argb);
    fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Argb);

    fn text_width(&self, text: &str) -> i32;
    fn font_height(&self) -> i32;
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Argb);

    fn push_clip(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);
    fn pop_clip(&mut self);

    fn push_transform(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn pop_transform(&mut self);
}

/// One-pixel outline drawn inside `(x, y, w, h)`.
pub fn draw_border<S: DrawSurface + ?Sized>(s: &mut S, x: i32, y: i32, w: i32, h: i32, color: Argb) {
    if w <= 0 || h <= 0 {
        return;
    }
    s.hline(x, x + w - 1, y, color);
    s.hline(x, x + w - 1, y + h - 1, color);
    s.vline(x, y, y + h - 1, color);
    s.vline(x + w - 1, y, y + h - 1, color);
}

pub const DASH_LENGTH: i32 = 6;
pub const DASH_GAP: i32 = 4;

/// Dashed horizontal line from `x0` to `x1` inclusive.
pub fn dotted_hline<S: DrawSurface + ?Sized>(s: &mut S, x0: i32, x1: i32, y: i32, color: Argb) {
    let (start, end) = (x0.min(x1), x0.max(x1));
    let mut x = start;
    while x <= end {
        s.hline(x, (x + DASH_LENGTH - 1).min(end), y, color);
        x += DASH_LENGTH + DASH_GAP;
    }
}

/// Dashed vertical line from `y0` to `y1` inclusive.
pub fn dotted_vline<S: DrawSurface + ?Sized>(s: &mut S, x: i32, y0: i32, y1: i32, color: Argb) {
    let (start, end) = (y0.min(y1), y0.max(y1));
    let mut y = start;
    while y <= end {
        s.vline(x, y, (y + DASH_LENGTH - 1).min(end), color);
        y += DASH_LENGTH + DASH_GAP;
    }
}

/// Text centered horizontally on `cx` with its top at `y`.
pub fn draw_centered_text<S: DrawSurface + ?Sized>(s: &mut S, text: &str, cx: i32, y: i32, color: Argb) {
    let w = s.text_width(text);
    s.draw_text(text, cx - w / 2, y, color);
}
