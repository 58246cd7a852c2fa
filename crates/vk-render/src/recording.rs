//! A `DrawSurface` that records commands instead of drawing.
//!
//! Used by tests and by hosts that batch draw calls.

use crate::surface::DrawSurface;
use vk_core::Argb;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill { x0: i32, y0: i32, x1: i32, y1: i32, color: Argb },
    HLine { x0: i32, x1: i32, y: i32, color: Argb },
    VLine { x: i32, y0: i32, y1: i32, color: Argb },
    Text { text: String, x: i32, y: i32, color: Argb },
    PushClip { x0: i32, y0: i32, x1: i32, y1: i32 },
    PopClip,
    PushTransform,
    Translate { dx: f64, dy: f64 },
    Scale { sx: f64, sy: f64 },
    PopTransform,
}

/// Monospace metrics: every glyph is `CHAR_WIDTH` wide.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub const CHAR_WIDTH: i32 = 6;
    pub const FONT_HEIGHT: i32 = 9;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn fills_with(&self, color: Argb) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Fill { color: fill, .. } if *fill == color))
            .count()
    }

    /// True if pushes and pops of clips and transforms are balanced.
    pub fn is_balanced(&self) -> bool {
        let mut clips = 0i32;
        let mut transforms = 0i32;
        for c in &self.commands {
            match c {
                DrawCmd::PushClip { .. } => clips += 1,
                DrawCmd::PopClip => clips -= 1,
                DrawCmd::PushTransform => transforms += 1,
                DrawCmd::PopTransform => transforms -= 1,
                _ => {}
            }
            if clips < 0 || transforms < 0 {
                return false;
            }
        }
        clips == 0 && transforms == 0
    }
}

impl DrawSurface for RecordingSurface {
    fn fill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Argb) {
        self.commands.push(DrawCmd::Fill { x0, y0, x1, y1, color });
    }

    fn hline(&mut self, x0: i32, x1: i32, y: i32, color: Argb) {
        self.commands.push(DrawCmd::HLine { x0, x1, y, color });
    }

    fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Argb) {
        self.commands.push(DrawCmd::VLine { x, y0, y1, color });
    }

    fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * Self::CHAR_WIDTH
    }

    fn font_height(&self) -> i32 {
        Self::FONT_HEIGHT
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Argb) {
        self.commands.push(DrawCmd::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn push_clip(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.commands.push(DrawCmd::PushClip { x0, y0, x1, y1 });
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCmd::PopClip);
    }

    fn push_transform(&mut self) {
        self.commands.push(DrawCmd::PushTransform);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCmd::Translate { dx, dy });
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.commands.push(DrawCmd::Scale { sx, sy });
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCmd::PopTransform);
    }
}
