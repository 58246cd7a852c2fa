//! HSV color picker: hue/saturation disc, value slider and hex field.
//!
//! The picker only produces colors. Applying them to the selection is the
//! editor's job.

use vk_core::{Argb, Bounds, ColorTarget, Hsv};

pub const PICKER_RADIUS: i32 = 32;
pub const PICKER_PADDING: i32 = 10;
pub const SLIDER_WIDTH: i32 = 8;
pub const SLIDER_GAP: i32 = 8;
pub const HEX_FIELD_HEIGHT: i32 = 18;
/// `#` plus six digits.
pub const HEX_MAX_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PickerDrag {
    #[default]
    None,
    Disc,
    Value,
}

/// Result of routing a pointer event to the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerResponse {
    /// The event was outside the picker.
    Ignored,
    /// Inside the picker, nothing changed.
    Consumed,
    /// The user picked a new color.
    Changed(Argb),
}

#[derive(Debug, Clone, Default)]
pub struct ColorPicker {
    target: Option<ColorTarget>,
    hsv: Hsv,
    hex: String,
    hex_focused: bool,
    drag: PickerDrag,
    origin: (i32, i32),
}

impl ColorPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open for `target`, loading `color` and placing the panel's top-left
    /// corner at `origin` (screen px).
    pub fn open(&mut self, target: ColorTarget, color: Argb, origin: (i32, i32)) {
        self.target = Some(target);
        self.origin = origin;
        self.drag = PickerDrag::None;
        self.hex_focused = false;
        self.load(color);
        log::debug!("color picker open: {target:?} {}", self.hex);
    }

    pub fn close(&mut self) {
        self.target = None;
        self.drag = PickerDrag::None;
        self.hex_focused = false;
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<ColorTarget> {
        self.target
    }

    pub fn hsv(&self) -> Hsv {
        self.hsv
    }

    pub fn hex_text(&self) -> &str {
        &self.hex
    }

    pub fn hex_focused(&self) -> bool {
        self.is_open() && self.hex_focused
    }

    pub fn blur(&mut self) {
        self.hex_focused = false;
    }

    pub fn color(&self) -> Argb {
        self.hsv.to_argb()
    }

    /// Replace the HSV state from `color` and rewrite the hex text.
    pub fn load(&mut self, color: Argb) {
        self.hsv = Hsv::from_argb(color);
        self.hex = color.to_hex();
    }

    // ─── Layout (screen space) ───────────────────────────────────────────

    /// Panel width and height.
    pub const fn size() -> (i32, i32) {
        (
            PICKER_PADDING * 2 + PICKER_RADIUS * 2 + SLIDER_GAP + SLIDER_WIDTH,
            PICKER_PADDING * 3 + PICKER_RADIUS * 2 + HEX_FIELD_HEIGHT,
        )
    }

    pub fn bounds(&self) -> Bounds {
        let (x, y) = self.origin;
        let (width, height) = Self::size();
        Bounds::new(x, y, width, height)
    }

    pub fn disc_center(&self) -> (i32, i32) {
        let (x, y) = self.origin;
        (x + PICKER_PADDING + PICKER_RADIUS, y + PICKER_PADDING + PICKER_RADIUS)
    }

    pub fn slider_bounds(&self) -> Bounds {
        let (cx, cy) = self.disc_center();
        Bounds::new(cx + PICKER_RADIUS + SLIDER_GAP, cy - PICKER_RADIUS, SLIDER_WIDTH, PICKER_RADIUS * 2)
    }

    pub fn hex_field_bounds(&self) -> Bounds {
        let b = self.bounds();
        let (_, cy) = self.disc_center();
        Bounds::new(
            b.x + PICKER_PADDING,
            cy + PICKER_RADIUS + PICKER_PADDING,
            b.width - PICKER_PADDING * 2,
            HEX_FIELD_HEIGHT,
        )
    }

    fn in_disc(&self, x: f64, y: f64) -> bool {
        let (cx, cy) = self.disc_center();
        let (dx, dy) = (x - cx as f64, y - cy as f64);
        (dx * dx + dy * dy).sqrt() <= PICKER_RADIUS as f64
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f64, y: f64) -> PickerResponse {
        if !self.is_open() || !self.bounds().contains(x, y) {
            return PickerResponse::Ignored;
        }
        self.hex_focused = self.hex_field_bounds().contains(x, y);
        if self.in_disc(x, y) {
            self.drag = PickerDrag::Disc;
            return PickerResponse::Changed(self.pick_disc(x, y));
        }
        if self.slider_bounds().contains(x, y) {
            self.drag = PickerDrag::Value;
            return PickerResponse::Changed(self.pick_value(y));
        }
        PickerResponse::Consumed
    }

    pub fn pointer_drag(&mut self, x: f64, y: f64) -> PickerResponse {
        match self.drag {
            PickerDrag::None => PickerResponse::Ignored,
            PickerDrag::Disc => PickerResponse::Changed(self.pick_disc(x, y)),
            PickerDrag::Value => PickerResponse::Changed(self.pick_value(y)),
        }
    }

    /// Ends a disc or slider drag. Returns true if one was active.
    pub fn pointer_up(&mut self) -> bool {
        std::mem::take(&mut self.drag) != PickerDrag::None
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != PickerDrag::None
    }

    /// Hue from the angle around the disc center, saturation from the
    /// distance, capped at the rim.
    fn pick_disc(&mut self, x: f64, y: f64) -> Argb {
        let (cx, cy) = self.disc_center();
        let dx = x - cx as f64;
        let dy = y - cy as f64;
        let r = PICKER_RADIUS as f64;
        let hue = (dy.atan2(dx) / std::f64::consts::TAU + 1.0) % 1.0;
        let sat = (dx * dx + dy * dy).sqrt().min(r) / r;
        self.hsv.h = hue as f32;
        self.hsv.s = sat as f32;
        self.sync_hex()
    }

    fn pick_value(&mut self, y: f64) -> Argb {
        let s = self.slider_bounds();
        let t = ((y - s.y as f64) / s.height as f64).clamp(0.0, 1.0);
        self.hsv.v = (1.0 - t) as f32;
        self.sync_hex()
    }

    fn sync_hex(&mut self) -> Argb {
        let c = self.color();
        self.hex = c.to_hex();
        c
    }

    // ─── Hex field ───────────────────────────────────────────────────────

    /// Type into the hex field. Any printable character is kept; returns the
    /// parsed color when the text is now a valid 6-digit hex value.
    pub fn type_char(&mut self, ch: char) -> Option<Argb> {
        if !self.hex_focused() || ch.is_control() || self.hex.chars().count() >= HEX_MAX_LEN {
            return None;
        }
        self.hex.push(ch);
        self.apply_hex()
    }

    pub fn backspace(&mut self) -> Option<Argb> {
        if !self.hex_focused() {
            return None;
        }
        self.hex.pop();
        self.apply_hex()
    }

    /// Parse the hex text. Valid input re-syncs HSV and normalizes the text;
    /// anything else is left exactly as typed.
    fn apply_hex(&mut self) -> Option<Argb> {
        let color = Argb::from_hex(&self.hex)?;
        self.load(color);
        Some(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn open_picker() -> ColorPicker {
        let mut p = ColorPicker::new();
        p.open(ColorTarget::Fill, Argb(0xFFFF_0000), (0, 0));
        p
    }

    #[test]
    fn open_loads_color_and_hex() {
        let p = open_picker();
        assert!(p.is_open());
        assert_eq!(p.hex_text(), "#FF0000");
        assert_eq!(p.color(), Argb(0xFFFF_0000));
    }

    #[test]
    fn disc_center_is_white_and_rim_saturated() {
        let mut p = open_picker();
        let (cx, cy) = p.disc_center();
        assert_eq!(p.pointer_down(cx as f64, cy as f64), PickerResponse::Changed(Argb::WHITE));
        // dragging past the rim clamps saturation to 1, hue 0 is red
        assert_eq!(
            p.pointer_drag(cx as f64 + 100.0, cy as f64),
            PickerResponse::Changed(Argb(0xFFFF_0000))
        );
        assert_eq!(p.hex_text(), "#FF0000");
        assert!(p.pointer_up());
        assert!(!p.pointer_up());
    }

    #[test]
    fn slider_sets_value() {
        let mut p = open_picker();
        let s = p.slider_bounds();
        let bottom = (s.y + s.height) as f64;
        assert_eq!(
            p.pointer_down(s.x as f64 + 1.0, bottom),
            PickerResponse::Changed(Argb::BLACK)
        );
        // hue and saturation survive a zero value
        assert_eq!(p.hsv().s, 1.0);
        assert_eq!(p.pointer_drag(0.0, -500.0), PickerResponse::Changed(Argb(0xFFFF_0000)));
    }

    #[test]
    fn outside_is_ignored() {
        let mut p = open_picker();
        assert_eq!(p.pointer_down(500.0, 500.0), PickerResponse::Ignored);
        let mut closed = ColorPicker::new();
        assert_eq!(closed.pointer_down(1.0, 1.0), PickerResponse::Ignored);
    }

    #[test]
    fn hex_typing_applies_only_valid_values() {
        let mut p = open_picker();
        let f = p.hex_field_bounds();
        assert_eq!(p.pointer_down(f.x as f64 + 2.0, f.y as f64 + 2.0), PickerResponse::Consumed);
        assert!(p.hex_focused());

        for _ in 0..7 {
            p.backspace();
        }
        assert_eq!(p.hex_text(), "");
        let mut last = None;
        for ch in "#3399fF".chars() {
            last = p.type_char(ch);
        }
        assert_eq!(last, Some(Argb(0xFF33_99FF)));
        assert_eq!(p.hex_text(), "#3399FF");

        // full field rejects more input
        assert_eq!(p.type_char('0'), None);
        // invalid text stays as typed
        p.backspace();
        assert_eq!(p.hex_text(), "#3399F");
        assert_eq!(p.color(), Argb(0xFF33_99FF));
        assert_eq!(p.type_char('z'), None);
        assert_eq!(p.hex_text(), "#3399Fz");
    }

    #[test]
    fn non_hex_characters_stay_in_field() {
        let mut p = open_picker();
        let f = p.hex_field_bounds();
        p.pointer_down(f.x as f64 + 2.0, f.y as f64 + 2.0);
        for _ in 0..7 {
            p.backspace();
        }
        for ch in "#12z".chars() {
            assert_eq!(p.type_char(ch), None);
        }
        assert_eq!(p.hex_text(), "#12z");
        assert_eq!(p.color(), Argb(0xFFFF_0000));
        // control characters never reach the field
        assert_eq!(p.type_char('\n'), None);
        assert_eq!(p.hex_text(), "#12z");
    }
}
