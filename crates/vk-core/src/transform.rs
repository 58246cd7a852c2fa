//! Screen ↔ overlay coordinate mapping.
//!
//! The overlay renders at `screen = offset + overlay * scale`. The renderer
//! may quantize the scale, so the editor must invert with the same snapped
//! values it draws with.

/// The canvas (screen) dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 854,
            height: 480,
        }
    }
}

/// How the renderer quantizes the configured scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleGranularity {
    /// Scale is used as configured.
    Continuous,
    /// Scale is rounded to the nearest 0.5, never below 0.5.
    #[default]
    HalfStep,
}

impl ScaleGranularity {
    /// Snap a configured scale. Non-positive or non-finite input yields 1.0.
    pub fn snap(self, scale: f64) -> f64 {
        if !scale.is_finite() || scale <= 0.0 {
            return 1.0;
        }
        match self {
            ScaleGranularity::Continuous => scale,
            ScaleGranularity::HalfStep => ((scale * 2.0).round() / 2.0).max(0.5),
        }
    }
}

/// Snap an offset so that `offset * scale` lands on a whole pixel.
pub fn snap_offset(offset: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return offset;
    }
    (offset * scale).round() / scale
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    offset_x: f64,
    offset_y: f64,
    scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    pub fn new(offset_x: i32, offset_y: i32, scale: f32, granularity: ScaleGranularity) -> Self {
        let scale = granularity.snap(scale as f64);
        Self {
            offset_x: snap_offset(offset_x as f64, scale),
            offset_y: snap_offset(offset_y as f64, scale),
            scale,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    pub fn to_overlay(&self, sx: f64, sy: f64) -> (f64, f64) {
        (
            (sx - self.offset_x) / self.scale,
            (sy - self.offset_y) / self.scale,
        )
    }

    pub fn to_screen(&self, ox: f64, oy: f64) -> (f64, f64) {
        (
            self.offset_x + ox * self.scale,
            self.offset_y + oy * self.scale,
        )
    }

    pub fn x_to_screen(&self, ox: f64) -> f64 {
        self.offset_x + ox * self.scale
    }

    pub fn y_to_screen(&self, oy: f64) -> f64 {
        self.offset_y + oy * self.scale
    }
}
