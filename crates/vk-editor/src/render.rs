//! Drawing the editor: overlay units, selection chrome, snap overlays, and
//! the sidebar and popups on top.

use crate::editor::{DragMode, LayoutEditor};
use crate::panels::{EditPanel, SETTINGS_ROWS, SettingsPanel};
use crate::picker::PICKER_RADIUS;
use crate::sidebar::{HEADER_Y, SIDEBAR_PADDING};
use crate::snap::GuideAxis;
use vk_core::{Argb, Bounds, ColorTarget, ConfigStore, InputQuery};
use vk_render::paint::{
    PANEL_COLOR, paint_button, paint_color_disc, paint_distance_label, paint_edit_icon, paint_horizontal_guide,
    paint_lasso, paint_panel, paint_selection, paint_swatch, paint_trash_icon, paint_unit, paint_value_slider,
    paint_vertical_guide, with_view,
};
use vk_render::DrawSurface;
use vk_render::surface::{draw_border, draw_centered_text};

const TEXT_COLOR: Argb = Argb::WHITE;
const MUTED_TEXT_COLOR: Argb = Argb(0xFFA0_A0A0);
const SEARCH_FOCUS_COLOR: Argb = Argb(0xFF00_B7FF);

impl<S: ConfigStore> LayoutEditor<S> {
    /// Draw one frame. `input` drives pressed colors and stat values; hosts
    /// usually pass `NoInput` while editing.
    pub fn render<D: DrawSurface + ?Sized>(&self, s: &mut D, input: &dyn InputQuery) {
        self.render_canvas(s, input);
        self.render_snap_overlays(s);
        if self.sidebar.is_shown() {
            self.render_sidebar(s);
        }
        self.render_toggle(s);
        if self.settings.is_open() {
            self.render_settings(s);
        }
        if self.edit_panel.is_open() {
            self.render_edit_panel(s);
        }
        if self.picker.is_open() {
            self.render_picker(s);
        }
    }

    fn hovered(&self, b: &Bounds) -> bool {
        b.contains(self.pointer.0, self.pointer.1)
    }

    // ─── Overlay space ───────────────────────────────────────────────────

    fn render_canvas<D: DrawSurface + ?Sized>(&self, s: &mut D, input: &dyn InputQuery) {
        let transform = self.transform();
        let units = &self.config.units;
        let selected = self.selection.unit_handles(&self.groups);

        with_view(s, &transform, |s| {
            // Selected units draw last so they stay on top while dragged
            for (i, unit) in units.iter().enumerate() {
                if unit.visible && !selected.iter().any(|h| h.0 == i) {
                    paint_unit(s, &self.config, unit, input);
                }
            }
            for h in &selected {
                if let Some(unit) = units.get(h.0)
                    && unit.visible
                {
                    paint_unit(s, &self.config, unit, input);
                }
            }

            if self.selection.len() > 1 {
                for group in self.selection.groups(&self.groups) {
                    if group.is_visible(units) {
                        paint_selection(s, &group.bounds(units), false);
                    }
                }
            }
            if self.selection.any_visible(&self.groups, units)
                && let Some(b) = self.selection.bounds(&self.groups, units)
            {
                paint_selection(s, &b, true);
                paint_trash_icon(s, &b);
                paint_edit_icon(s, &b);
            }

            if let DragMode::Lassoing { start, end } = self.mode
                && let Some(r) = self.lasso_rect(start, end)
            {
                paint_lasso(s, &r);
            }
        });
    }

    // ─── Screen space ────────────────────────────────────────────────────

    fn render_snap_overlays<D: DrawSurface + ?Sized>(&self, s: &mut D) {
        let vp = self.viewport;
        for guide in &self.guides {
            match guide.axis {
                GuideAxis::Vertical => paint_vertical_guide(s, guide.position, vp.height),
                GuideAxis::Horizontal => paint_horizontal_guide(s, guide.position, vp.width),
            }
        }
        // label anchors are overlay coordinates
        let transform = self.transform();
        for label in &self.labels {
            let (x, y) = transform.to_screen(label.x as f64, label.y as f64);
            paint_distance_label(s, x.round() as i32, y.round() as i32, label.value);
        }
    }

    fn render_sidebar<D: DrawSurface + ?Sized>(&self, s: &mut D) {
        let vp = self.viewport;
        let panel = self.sidebar.bounds(vp);
        s.fill(panel.left(), panel.top(), panel.right(), panel.bottom(), PANEL_COLOR);
        s.push_clip(panel.left(), panel.top(), panel.right(), panel.bottom());

        s.draw_text("Add Elements", panel.x + SIDEBAR_PADDING, HEADER_Y, TEXT_COLOR);
        let reset = self.sidebar.reset_bounds(vp);
        paint_button(s, &reset, "Reset", self.hovered(&reset));

        let search = self.sidebar.search_bounds(vp);
        s.fill(search.left(), search.top(), search.right(), search.bottom(), Argb::BLACK);
        let border = if self.search_focused { SEARCH_FOCUS_COLOR } else { MUTED_TEXT_COLOR };
        draw_border(s, search.x, search.y, search.width, search.height, border);
        let text_y = search.y + (search.height - s.font_height()) / 2;
        if self.sidebar.search().is_empty() && !self.search_focused {
            s.draw_text("Search...", search.x + 4, text_y, MUTED_TEXT_COLOR);
        } else {
            s.draw_text(self.sidebar.search(), search.x + 4, text_y, TEXT_COLOR);
        }

        let list = self.sidebar.list_bounds(vp);
        s.push_clip(list.left(), list.top(), list.right(), list.bottom());
        for (i, template) in self.sidebar.entries(&self.catalog).iter().enumerate() {
            let b = self.sidebar.entry_bounds(vp, i);
            if b.bottom() < list.top() || b.top() > list.bottom() {
                continue;
            }
            paint_button(s, &b, &template.display_name, self.hovered(&b));
        }
        s.pop_clip();

        let gear = self.sidebar.settings_button_bounds(vp);
        paint_button(s, &gear, "⚙", self.hovered(&gear) || self.settings.is_open());

        s.pop_clip();
    }

    fn render_toggle<D: DrawSurface + ?Sized>(&self, s: &mut D) {
        let toggle = self.sidebar.toggle_bounds(self.viewport);
        let label = if self.sidebar.is_open() { "-" } else { "+" };
        paint_button(s, &toggle, label, self.hovered(&toggle));
    }

    fn render_settings<D: DrawSurface + ?Sized>(&self, s: &mut D) {
        let gear = self.sidebar.settings_button_bounds(self.viewport);
        let panel = SettingsPanel::bounds(&gear);
        paint_panel(s, &panel);

        let snap = &self.config.snap;
        let switches = [snap.snapping_enabled, snap.guides_enabled, snap.distance_labels_enabled];
        let fh = s.font_height();
        for (i, label) in SETTINGS_ROWS.iter().enumerate() {
            let row_y = SettingsPanel::row_y(&gear, i);
            s.draw_text(label, panel.x + 12, row_y + (18 - fh) / 2, TEXT_COLOR);
            if let Some(on) = switches.get(i) {
                let b = SettingsPanel::toggle_bounds(&gear, i);
                paint_button(s, &b, if *on { "On" } else { "Off" }, self.hovered(&b));
            }
        }

        let minus = SettingsPanel::minus_bounds(&gear);
        let plus = SettingsPanel::plus_bounds(&gear);
        paint_button(s, &minus, "-", self.hovered(&minus));
        paint_button(s, &plus, "+", self.hovered(&plus));
        let value = snap.threshold.to_string();
        let value_x = minus.x - 6 - s.text_width(&value);
        s.draw_text(&value, value_x, minus.y + (minus.height - fh) / 2, TEXT_COLOR);
    }

    fn render_edit_panel<D: DrawSurface + ?Sized>(&self, s: &mut D) {
        let vp = self.viewport;
        let panel = EditPanel::bounds(vp);
        paint_panel(s, &panel);

        let name = self
            .selection
            .primary()
            .and_then(|id| self.group(id))
            .map(|g| g.display_name.as_str())
            .unwrap_or_default();
        let title = EditPanel::title(self.selection.len(), name);
        draw_centered_text(s, &title, panel.x + panel.width / 2, panel.y + 10, TEXT_COLOR);
        let close = EditPanel::close_bounds(vp);
        paint_button(s, &close, "X", self.hovered(&close));

        let fh = s.font_height();
        for (i, target) in ColorTarget::ALL.into_iter().enumerate() {
            let row_y = EditPanel::row_y(vp, i);
            s.draw_text(target.label(), panel.x + 12, row_y + (18 - fh) / 2, TEXT_COLOR);
            let swatch = EditPanel::swatch_bounds(vp, i);
            let state = self.selection_color_state(target);
            paint_swatch(s, &swatch, state.color);
            if state.mixed {
                let w = s.text_width("Mixed");
                s.draw_text("Mixed", swatch.x - 6 - w, row_y + (18 - fh) / 2, MUTED_TEXT_COLOR);
            }
        }

        let visibility = EditPanel::visibility_bounds(vp);
        s.draw_text("Visibility", panel.x + 12, visibility.y + (visibility.height - fh) / 2, TEXT_COLOR);
        paint_button(s, &visibility, self.visibility_state().label(), self.hovered(&visibility));

        let reset = EditPanel::reset_colors_bounds(vp);
        s.draw_text("Overrides", panel.x + 12, reset.y + (reset.height - fh) / 2, TEXT_COLOR);
        paint_button(s, &reset, "Reset Colors", self.hovered(&reset));
    }

    fn render_picker<D: DrawSurface + ?Sized>(&self, s: &mut D) {
        let picker = &self.picker;
        paint_panel(s, &picker.bounds());
        let (cx, cy) = picker.disc_center();
        paint_color_disc(s, cx, cy, PICKER_RADIUS, picker.hsv());
        paint_value_slider(s, &picker.slider_bounds(), picker.hsv());

        let field = picker.hex_field_bounds();
        s.fill(field.left(), field.top(), field.right(), field.bottom(), Argb::BLACK);
        let border = if picker.hex_focused() { SEARCH_FOCUS_COLOR } else { MUTED_TEXT_COLOR };
        draw_border(s, field.x, field.y, field.width, field.height, border);
        let text_y = field.y + (field.height - s.font_height()) / 2;
        let label_w = s.text_width("Hex ");
        s.draw_text("Hex", field.x + 3, text_y, MUTED_TEXT_COLOR);
        s.draw_text(picker.hex_text(), field.x + 3 + label_w, text_y, TEXT_COLOR);
    }
}
