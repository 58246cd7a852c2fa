//! Overlay → drawing-surface commands.
//!
//! Unit painters work in overlay space and expect the caller (or
//! `paint_overlay`) to have pushed the view transform. Guides, distance
//! chips and the color picker paint in screen space.

use crate::hit::{HANDLE_SIZE, ICON_SIZE, ResizeHandle, edit_icon_bounds, trash_icon_bounds};
use crate::surface::{DrawSurface, dotted_hline, dotted_vline, draw_border};
use vk_core::{Argb, Bounds, ColorTarget, Hsv, InputQuery, InputSource, OverlayConfig, Unit, ViewTransform};

pub const GUIDE_COLOR: Argb = Argb(0xFF00_B7FF);
pub const PANEL_COLOR: Argb = Argb(0xCC11_1111);
pub const CONTROL_COLOR: Argb = Argb(0xFF1E_1E1E);
pub const CONTROL_HOVER_COLOR: Argb = Argb(0xFF2B_2B2B);
pub const OUTLINE_COLOR: Argb = Argb::WHITE;
pub const LASSO_FILL: Argb = Argb(0x22FF_FFFF);
const TRASH_FILL: Argb = Argb(0xFF1A_1A1A);

/// Apply the view transform around `f`.
pub fn with_view<S, F>(s: &mut S, transform: &ViewTransform, f: F)
where
    S: DrawSurface + ?Sized,
    F: FnOnce(&mut S),
{
    let (ox, oy) = transform.offset();
    s.push_transform();
    s.translate(ox, oy);
    s.scale(transform.scale(), transform.scale());
    f(s);
    s.pop_transform();
}

/// Paint every visible unit as the live overlay, using pressed colors and
/// stat values from `input`.
pub fn paint_overlay<S: DrawSurface + ?Sized>(
    s: &mut S,
    config: &OverlayConfig,
    transform: &ViewTransform,
    input: &dyn InputQuery,
) {
    with_view(s, transform, |s| {
        for unit in config.units.iter().filter(|u| u.visible) {
            paint_unit(s, config, unit, input);
        }
    });
}

/// Paint one unit in overlay space.
pub fn paint_unit<S: DrawSurface + ?Sized>(s: &mut S, config: &OverlayConfig, unit: &Unit, input: &dyn InputQuery) {
    let pressed = input.is_pressed(unit.source);
    let fill = if pressed {
        config.resolve_color(unit, ColorTarget::Pressed)
    } else {
        config.resolve_color(unit, ColorTarget::Fill)
    };
    let border = config.resolve_color(unit, ColorTarget::Border);
    let text = config.resolve_color(unit, ColorTarget::Text);
    let b = unit.bounds();

    log::trace!(
        "UNIT {:?} {:?} at ({}, {}) {}x{} pressed={pressed}",
        unit.group,
        unit.label,
        b.x,
        b.y,
        b.width,
        b.height
    );

    s.fill(b.left(), b.top(), b.right(), b.bottom(), fill);
    draw_border(s, b.x, b.y, b.width, b.height, border);

    let fh = s.font_height();
    match unit.source {
        InputSource::Stat(stat) => {
            let value = input.stat_value(stat);
            let lw = s.text_width(&unit.label);
            let vw = s.text_width(&value);
            s.draw_text(&unit.label, b.x + (b.width - lw) / 2, b.y + 3, text);
            s.draw_text(&value, b.x + (b.width - vw) / 2, b.bottom() - fh - 3, text);
        }
        InputSource::Key(_) | InputSource::Mouse(_) => {
            let tw = s.text_width(&unit.label);
            s.draw_text(&unit.label, b.x + (b.width - tw) / 2, b.y + (b.height - fh) / 2, text);
        }
    }
}

// ─── Selection chrome (overlay space) ────────────────────────────────────

/// Selection outline; the combined selection also gets corner handles.
pub fn paint_selection<S: DrawSurface + ?Sized>(s: &mut S, b: &Bounds, with_handles: bool) {
    draw_border(s, b.x - 1, b.y - 1, b.width + 2, b.height + 2, OUTLINE_COLOR);
    if with_handles {
        for handle in ResizeHandle::ALL {
            let r = handle.rect(b);
            s.fill(r.left(), r.top(), r.left() + HANDLE_SIZE, r.top() + HANDLE_SIZE, OUTLINE_COLOR);
        }
    }
}

pub fn paint_trash_icon<S: DrawSurface + ?Sized>(s: &mut S, selection: &Bounds) {
    let t = trash_icon_bounds(selection);
    let right = t.x + ICON_SIZE - 1;
    let bottom = t.y + ICON_SIZE - 1;
    let body_top = t.y + 2;

    s.fill(t.x + 1, body_top + 1, right, bottom, TRASH_FILL);
    // lid
    s.hline(t.x, right, t.y, OUTLINE_COLOR);
    s.hline(t.x + 1, right - 1, t.y + 1, OUTLINE_COLOR);
    s.hline(t.x + 2, right - 2, t.y - 1, OUTLINE_COLOR);
    // body
    s.hline(t.x, right, body_top, OUTLINE_COLOR);
    s.hline(t.x, right, bottom, OUTLINE_COLOR);
    s.vline(t.x, body_top, bottom, OUTLINE_COLOR);
    s.vline(right, body_top, bottom, OUTLINE_COLOR);
    // slats
    for x in [t.x + 2, t.x + ICON_SIZE / 2, right - 2] {
        s.vline(x, body_top + 2, bottom - 2, OUTLINE_COLOR);
    }
}

pub fn paint_edit_icon<S: DrawSurface + ?Sized>(s: &mut S, selection: &Bounds) {
    let e = edit_icon_bounds(selection);
    for i in 1..=4 {
        s.hline(e.x + i, e.x + i + 3, e.y + i, OUTLINE_COLOR);
    }
    s.hline(e.x + 5, e.x + 6, e.y + 5, OUTLINE_COLOR);
}

pub fn paint_lasso<S: DrawSurface + ?Sized>(s: &mut S, r: &Bounds) {
    s.fill(r.left(), r.top(), r.right(), r.bottom(), LASSO_FILL);
    draw_border(s, r.x, r.y, r.width + 1, r.height + 1, OUTLINE_COLOR);
}

// ─── Snap overlays (screen space) ────────────────────────────────────────

pub fn paint_vertical_guide<S: DrawSurface + ?Sized>(s: &mut S, x: i32, height: i32) {
    dotted_vline(s, x, 0, height, GUIDE_COLOR);
}

pub fn paint_horizontal_guide<S: DrawSurface + ?Sized>(s: &mut S, y: i32, width: i32) {
    dotted_hline(s, 0, width, y, GUIDE_COLOR);
}

/// Pixel-distance chip centered on `(x, y)`.
pub fn paint_distance_label<S: DrawSurface + ?Sized>(s: &mut S, x: i32, y: i32, value: i32) {
    let text = value.to_string();
    let tw = s.text_width(&text);
    let fh = s.font_height();
    let tx = x - tw / 2;
    let ty = y - fh / 2;
    s.fill(tx - 2, ty - 2, tx + tw + 2, ty + fh + 2, PANEL_COLOR);
    s.draw_text(&text, tx, ty, Argb::WHITE);
}

// ─── Panels and controls (screen space) ──────────────────────────────────

pub fn paint_panel<S: DrawSurface + ?Sized>(s: &mut S, b: &Bounds) {
    s.fill(b.left(), b.top(), b.right(), b.bottom(), PANEL_COLOR);
    draw_border(s, b.x, b.y, b.width, b.height, Argb::BLACK);
}

/// Flat button with a centered label.
pub fn paint_button<S: DrawSurface + ?Sized>(s: &mut S, b: &Bounds, label: &str, hovered: bool) {
    let bg = if hovered { CONTROL_HOVER_COLOR } else { CONTROL_COLOR };
    s.fill(b.left(), b.top(), b.right(), b.bottom(), bg);
    draw_border(s, b.x, b.y, b.width, b.height, Argb::BLACK);
    let tw = s.text_width(label);
    let fh = s.font_height();
    s.draw_text(label, b.x + (b.width - tw) / 2, b.y + (b.height - fh) / 2, Argb::WHITE);
}

/// Small color box with a black outline.
pub fn paint_swatch<S: DrawSurface + ?Sized>(s: &mut S, b: &Bounds, color: Argb) {
    s.fill(b.left(), b.top(), b.right(), b.bottom(), color);
    draw_border(s, b.x, b.y, b.width, b.height, Argb::BLACK);
}

// ─── Color picker ────────────────────────────────────────────────────────

/// Hue/saturation disc at the current value, one pixel at a time, with a
/// marker at the selected hue and saturation.
pub fn paint_color_disc<S: DrawSurface + ?Sized>(s: &mut S, cx: i32, cy: i32, radius: i32, hsv: Hsv) {
    let r = radius as f64;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let dist = ((dx * dx + dy * dy) as f64).sqrt();
            if dist > r {
                continue;
            }
            let hue = ((dy as f64).atan2(dx as f64) / std::f64::consts::TAU + 1.0) % 1.0;
            let color = Hsv::new(hue as f32, (dist / r) as f32, hsv.v).to_argb();
            s.fill(cx + dx, cy + dy, cx + dx + 1, cy + dy + 1, color);
        }
    }

    let angle = hsv.h as f64 * std::f64::consts::TAU;
    let mx = cx + (angle.cos() * hsv.s as f64 * r).round() as i32;
    let my = cy + (angle.sin() * hsv.s as f64 * r).round() as i32;
    draw_border(s, mx - 2, my - 2, 5, 5, Argb::BLACK);
}

/// Vertical value gradient, bright at the top, with a marker line.
pub fn paint_value_slider<S: DrawSurface + ?Sized>(s: &mut S, b: &Bounds, hsv: Hsv) {
    let h = b.height.max(1);
    for row in 0..h {
        let v = 1.0 - row as f32 / (h - 1).max(1) as f32;
        let color = Hsv::new(hsv.h, hsv.s, v).to_argb();
        s.fill(b.left(), b.top() + row, b.right(), b.top() + row + 1, color);
    }
    draw_border(s, b.x, b.y, b.width, b.height, Argb::BLACK);
    let marker = b.top() + ((1.0 - hsv.v.clamp(0.0, 1.0)) * (h - 1) as f32).round() as i32;
    s.hline(b.left() - 1, b.right(), marker, OUTLINE_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCmd, RecordingSurface};
    use pretty_assertions::assert_eq;
    use vk_core::{ClickRateTracker, GroupId, MouseButton, NoInput, ScaleGranularity, StatKind};

    struct Pressed;

    impl InputQuery for Pressed {
        fn is_key_pressed(&self, _code: u32) -> bool {
            true
        }
        fn is_mouse_pressed(&self, _button: MouseButton) -> bool {
            true
        }
        fn stat_value(&self, _stat: StatKind) -> String {
            "7".to_string()
        }
    }

    fn config_with(units: Vec<Unit>) -> OverlayConfig {
        OverlayConfig {
            units,
            ..OverlayConfig::default()
        }
    }

    #[test]
    fn pressed_units_use_pressed_color() {
        let unit = Unit::new("W", InputSource::Key(87), Bounds::new(0, 0, 24, 24), GroupId::intern("wasd"));
        let config = config_with(vec![unit.clone()]);

        let mut idle = RecordingSurface::new();
        paint_unit(&mut idle, &config, &unit, &NoInput);
        assert_eq!(idle.fills_with(config.palette.fill), 1);

        let mut down = RecordingSurface::new();
        paint_unit(&mut down, &config, &unit, &Pressed);
        assert_eq!(down.fills_with(config.palette.pressed), 1);
        assert_eq!(down.texts(), vec!["W"]);
    }

    #[test]
    fn stat_units_show_label_and_value() {
        let unit = Unit::new("CPS", InputSource::Stat(StatKind::Cps), Bounds::new(0, 0, 64, 28), GroupId::intern("cps"));
        let config = config_with(vec![unit.clone()]);
        let mut s = RecordingSurface::new();
        paint_unit(&mut s, &config, &unit, &Pressed);
        assert_eq!(s.texts(), vec!["CPS", "7"]);
        // stats never use the pressed color
        assert_eq!(s.fills_with(config.palette.fill), 1);
    }

    #[test]
    fn cps_unit_reads_click_tracker() {
        let unit = Unit::new("RMB", InputSource::Stat(StatKind::CpsRight), Bounds::new(0, 0, 64, 28), GroupId::intern("cps"));
        let config = config_with(vec![unit.clone()]);
        let mut clicks = ClickRateTracker::new();
        for at in [0, 120, 240] {
            clicks.record_press(MouseButton::Right, at);
        }
        let mut s = RecordingSurface::new();
        paint_unit(&mut s, &config, &unit, &clicks.over(&NoInput));
        assert_eq!(s.texts(), vec!["RMB", "3"]);
    }

    #[test]
    fn overlay_skips_hidden_units_and_balances_transform() {
        let mut hidden = Unit::new("H", InputSource::Key(72), Bounds::new(0, 0, 10, 10), GroupId::intern("h"));
        hidden.visible = false;
        let shown = Unit::new("S", InputSource::Key(83), Bounds::new(20, 0, 10, 10), GroupId::intern("s"));
        let config = config_with(vec![hidden, shown]);
        let transform = ViewTransform::new(10, 10, 2.0, ScaleGranularity::HalfStep);

        let mut s = RecordingSurface::new();
        paint_overlay(&mut s, &config, &transform, &NoInput);
        assert_eq!(s.texts(), vec!["S"]);
        assert!(s.is_balanced());
        assert_eq!(s.commands[1], DrawCmd::Translate { dx: 10.0, dy: 10.0 });
        assert_eq!(s.commands[2], DrawCmd::Scale { sx: 2.0, sy: 2.0 });
    }

    #[test]
    fn selection_with_handles_draws_four_squares() {
        let mut s = RecordingSurface::new();
        paint_selection(&mut s, &Bounds::new(0, 0, 20, 20), true);
        assert_eq!(s.fills_with(OUTLINE_COLOR), 4);
    }

    #[test]
    fn distance_label_chip() {
        let mut s = RecordingSurface::new();
        paint_distance_label(&mut s, 100, 50, 12);
        assert_eq!(s.texts(), vec!["12"]);
        assert_eq!(s.fills_with(PANEL_COLOR), 1);
    }

    #[test]
    fn disc_stays_inside_radius() {
        let mut s = RecordingSurface::new();
        paint_color_disc(&mut s, 0, 0, 4, Hsv::new(0.0, 1.0, 1.0));
        let outside = s.commands.iter().any(|c| match c {
            DrawCmd::Fill { x0, y0, .. } => x0 * x0 + y0 * y0 > 16,
            _ => false,
        });
        assert!(!outside);
    }
}
