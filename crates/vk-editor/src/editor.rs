//! The layout editor: a pointer and keyboard state machine over an
//! `OverlayConfig`.
//!
//! Hosts feed normalized `InputEvent`s to `LayoutEditor::handle`, call
//! `tick` once per frame and `render` to draw. Every committing edit is
//! written through the `ConfigStore` straight away.

use crate::input::{InputEvent, Key};
use crate::panels::{EditPanel, EditPanelHit, SettingsHit, SettingsPanel, VisibilityState};
use crate::picker::{ColorPicker, PickerResponse};
use crate::resize::ResizeDrag;
use crate::selection::Selection;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::sidebar::Sidebar;
use crate::snap::{DistanceLabel, GuideLine, SnapContext};
use vk_core::{
    Argb, Bounds, ColorTarget, ConfigStore, Group, GroupId, OverlayConfig, ScaleGranularity, TemplateCatalog,
    UnitHandle, ViewTransform, Viewport, build_groups,
};
use vk_render::hit::{edit_icon_bounds, trash_icon_bounds};
use vk_render::{hit_test_group, hit_test_handle, hit_test_rect};

/// What the primary pointer is doing.
#[derive(Debug, Clone, PartialEq)]
pub enum DragMode {
    Idle,
    /// Dragging the selection. The offset is pointer minus the dragged
    /// bounds' top-left, in overlay units.
    Moving {
        offset_x: f64,
        offset_y: f64,
        from_sidebar: bool,
    },
    Resizing(ResizeDrag),
    /// Rubber-band selection, both corners in overlay coordinates.
    Lassoing { start: (f64, f64), end: (f64, f64) },
}

/// Resolved color of the selection for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorState {
    pub color: Argb,
    /// Some selected unit resolves to a different color.
    pub mixed: bool,
}

pub struct LayoutEditor<S: ConfigStore> {
    store: S,
    pub(crate) config: OverlayConfig,
    pub(crate) catalog: TemplateCatalog,
    pub(crate) groups: Vec<Group>,
    pub(crate) selection: Selection,
    pub(crate) mode: DragMode,
    pub(crate) viewport: Viewport,
    granularity: ScaleGranularity,
    pub(crate) guides: Vec<GuideLine>,
    pub(crate) labels: Vec<DistanceLabel>,
    pub(crate) picker: ColorPicker,
    pub(crate) sidebar: Sidebar,
    pub(crate) edit_panel: EditPanel,
    pub(crate) settings: SettingsPanel,
    pub(crate) search_focused: bool,
    /// Last pointer position seen, for hover highlighting.
    pub(crate) pointer: (f64, f64),
    closed: bool,
    store_error: Option<String>,
}

impl<S: ConfigStore> LayoutEditor<S> {
    /// Load the config from `store` and start editing it.
    pub fn open(mut store: S, viewport: Viewport) -> Result<Self, String> {
        let config = store.load()?;
        Ok(Self::with_config(store, config, viewport))
    }

    pub fn with_config(store: S, config: OverlayConfig, viewport: Viewport) -> Self {
        let groups = build_groups(&config.units);
        log::debug!("editor open: {} units in {} groups", config.units.len(), groups.len());
        Self {
            store,
            config,
            catalog: TemplateCatalog::builtin(),
            groups,
            selection: Selection::new(),
            mode: DragMode::Idle,
            viewport,
            granularity: ScaleGranularity::default(),
            guides: Vec::new(),
            labels: Vec::new(),
            picker: ColorPicker::new(),
            sidebar: Sidebar::new(),
            edit_panel: EditPanel::default(),
            settings: SettingsPanel::default(),
            search_focused: false,
            pointer: (0.0, 0.0),
            closed: false,
            store_error: None,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn mode(&self) -> &DragMode {
        &self.mode
    }

    pub fn guides(&self) -> &[GuideLine] {
        &self.guides
    }

    pub fn distance_labels(&self) -> &[DistanceLabel] {
        &self.labels
    }

    pub fn picker(&self) -> &ColorPicker {
        &self.picker
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn is_edit_panel_open(&self) -> bool {
        self.edit_panel.is_open()
    }

    pub fn is_settings_open(&self) -> bool {
        self.settings.is_open()
    }

    pub fn is_search_focused(&self) -> bool {
        self.search_focused
    }

    /// Set once `close` has run; the host should dismiss the editor.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// How the host renderer snaps the overlay scale.
    pub fn set_granularity(&mut self, granularity: ScaleGranularity) {
        self.granularity = granularity;
    }

    /// The most recent store failure, if any. Taking it clears it.
    pub fn take_store_error(&mut self) -> Option<String> {
        self.store_error.take()
    }

    /// Screen ↔ overlay mapping at the renderer's snapped scale.
    pub fn transform(&self) -> ViewTransform {
        ViewTransform::new(self.config.offset_x, self.config.offset_y, self.config.scale, self.granularity)
    }

    /// Advance animations by one frame.
    pub fn tick(&mut self) {
        self.sidebar.tick();
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    fn save(&mut self) {
        match self.store.save(&self.config) {
            Ok(()) => log::debug!("config saved"),
            Err(e) => {
                log::warn!("failed to save overlay config: {e}");
                self.store_error = Some(e);
            }
        }
    }

    fn rebuild_groups(&mut self) {
        self.groups = build_groups(&self.config.units);
    }

    fn selected_units(&self) -> Vec<UnitHandle> {
        self.selection.unit_handles(&self.groups)
    }

    /// Bounds of visible groups outside the selection.
    fn sibling_bounds(&self) -> Vec<Bounds> {
        let units = &self.config.units;
        self.groups
            .iter()
            .filter(|g| !self.selection.contains(g.id) && g.is_visible(units))
            .map(|g| g.bounds(units))
            .collect()
    }

    fn primary_visible(&self) -> bool {
        self.selection
            .primary()
            .and_then(|id| self.group(id))
            .is_some_and(|g| g.is_visible(&self.config.units))
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    /// Route one input event. Returns true if the editor consumed it.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        if let Some(pos) = event.position() {
            self.pointer = pos;
        }
        match *event {
            InputEvent::PointerDown { x, y, .. } => event.is_primary() && self.pointer_down(x, y),
            InputEvent::PointerMove { x, y, .. } => event.is_primary() && self.pointer_drag(x, y),
            InputEvent::PointerUp { x, y, .. } => event.is_primary() && self.pointer_up(x, y),
            InputEvent::Scroll { x, y, amount } => self.scroll(x, y, amount),
            InputEvent::KeyDown { key } => self.key_down(key),
            InputEvent::CharTyped { ch } => self.char_typed(ch),
        }
    }

    fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.search_focused = false;

        // Popups, topmost first. A click outside one closes it and falls
        // through to whatever is underneath.
        if self.picker.is_open() {
            match self.picker.pointer_down(x, y) {
                PickerResponse::Changed(color) => {
                    self.apply_picker_color(color);
                    return true;
                }
                PickerResponse::Consumed => return true,
                PickerResponse::Ignored => self.picker.close(),
            }
        }
        if let Some(hit) = self.edit_panel.hit(self.viewport, x, y) {
            self.edit_panel_click(hit);
            return true;
        }
        if self.edit_panel.is_open() {
            self.close_edit_panel();
        }

        let vp = self.viewport;
        let gear = self.sidebar.settings_button_bounds(vp);
        if self.sidebar.is_shown() && gear.contains(x, y) {
            self.settings.toggle();
            if self.settings.is_open() {
                self.close_edit_panel();
            }
            return true;
        }
        if let Some(hit) = self.settings.hit(&gear, x, y) {
            self.settings_click(hit);
            return true;
        }
        self.settings.close();

        if self.sidebar.toggle_bounds(vp).contains(x, y) {
            self.toggle_sidebar();
            return true;
        }
        if self.sidebar.is_shown() {
            if self.sidebar.reset_bounds(vp).contains(x, y) {
                self.reset_layout();
                return true;
            }
            if self.sidebar.search_bounds(vp).contains(x, y) {
                self.search_focused = true;
                return true;
            }
            let entry = {
                let entries = self.sidebar.entries(&self.catalog);
                self.sidebar
                    .entry_at(vp, entries.len(), x, y)
                    .map(|i| entries[i].id)
            };
            if let Some(id) = entry {
                self.begin_sidebar_drag(id, x, y);
                return true;
            }
            if self.sidebar.contains(vp, x, y) {
                return true;
            }
        }

        self.canvas_down(x, y)
    }

    fn canvas_down(&mut self, x: f64, y: f64) -> bool {
        let (ox, oy) = self.transform().to_overlay(x, y);

        // Selection chrome: icons, then handles
        if self.primary_visible()
            && let Some(sel) = self.selection.bounds(&self.groups, &self.config.units)
        {
            if edit_icon_bounds(&sel).contains(ox, oy) {
                self.open_edit_panel();
                return true;
            }
            if trash_icon_bounds(&sel).contains(ox, oy) {
                self.delete_selection();
                return true;
            }
            if let Some(handle) = hit_test_handle(&sel, ox, oy) {
                let members = self.selected_units();
                let drag = ResizeDrag::begin(handle, sel, (ox, oy), &self.config.units, &members);
                log::debug!("resize start: {handle:?} from {sel:?}");
                self.mode = DragMode::Resizing(drag);
                return true;
            }
        }

        if let Some(index) = hit_test_group(&self.groups, &self.config.units, ox, oy) {
            let id = self.groups[index].id;
            // Clicking outside the selection replaces it; inside keeps it for the drag
            if !self.selection.contains(id) {
                self.selection.select_only(id);
                self.picker.close();
            }
            let anchor = if self.selection.len() > 1 {
                self.selection.bounds(&self.groups, &self.config.units)
            } else {
                None
            }
            .unwrap_or_else(|| self.groups[index].bounds(&self.config.units));
            log::debug!("move start: {} group(s)", self.selection.len());
            self.mode = DragMode::Moving {
                offset_x: ox - anchor.x as f64,
                offset_y: oy - anchor.y as f64,
                from_sidebar: false,
            };
            return true;
        }

        // Empty canvas
        self.selection.clear();
        self.close_edit_panel();
        self.mode = DragMode::Lassoing {
            start: (ox, oy),
            end: (ox, oy),
        };
        true
    }

    fn pointer_drag(&mut self, x: f64, y: f64) -> bool {
        if self.picker.is_dragging() {
            if let PickerResponse::Changed(color) = self.picker.pointer_drag(x, y) {
                self.apply_picker_color(color);
            }
            return true;
        }
        let (ox, oy) = self.transform().to_overlay(x, y);
        match self.mode {
            DragMode::Idle => false,
            DragMode::Lassoing { start, .. } => {
                self.mode = DragMode::Lassoing { start, end: (ox, oy) };
                self.select_in_lasso(start, (ox, oy));
                true
            }
            DragMode::Moving {
                offset_x,
                offset_y,
                from_sidebar,
            } => self.drag_move(ox, oy, (offset_x, offset_y), from_sidebar),
            DragMode::Resizing(_) => self.drag_resize(ox, oy),
        }
    }

    fn drag_move(&mut self, ox: f64, oy: f64, offset: (f64, f64), from_sidebar: bool) -> bool {
        let Some(current) = self.selection.bounds(&self.groups, &self.config.units) else {
            return false;
        };
        let (tx, ty) = if from_sidebar {
            (ox - current.width as f64 / 2.0, oy - current.height as f64 / 2.0)
        } else {
            (ox - offset.0, oy - offset.1)
        };
        let proposed = Bounds::new(tx.round() as i32, ty.round() as i32, current.width, current.height);

        let transform = self.transform();
        let siblings = self.sibling_bounds();
        let ctx = SnapContext {
            viewport: self.viewport,
            transform: &transform,
            settings: &self.config.snap,
            siblings: &siblings,
        };
        let result = ctx.snap_move(proposed);
        self.guides = result.guides;
        self.labels = result.labels;

        let dx = result.bounds.x - current.x;
        let dy = result.bounds.y - current.y;
        if dx != 0 || dy != 0 {
            for group in self.selection.groups(&self.groups) {
                group.translate(&mut self.config.units, dx, dy);
            }
        }
        true
    }

    fn drag_resize(&mut self, ox: f64, oy: f64) -> bool {
        let DragMode::Resizing(drag) = &self.mode else {
            return false;
        };
        let Some((proposed, horizontal)) = drag.propose(ox, oy) else {
            return true;
        };
        let transform = self.transform();
        let siblings = self.sibling_bounds();
        let ctx = SnapContext {
            viewport: self.viewport,
            transform: &transform,
            settings: &self.config.snap,
            siblings: &siblings,
        };
        let result = ctx.snap_resize(proposed, drag.handle, horizontal, drag.aspect());
        drag.apply(&mut self.config.units, &result.bounds);
        self.guides = result.guides;
        self.labels = result.labels;
        true
    }

    /// Rounded overlay rectangle, or `None` while it is under two screen
    /// pixels on either axis.
    pub(crate) fn lasso_rect(&self, start: (f64, f64), end: (f64, f64)) -> Option<Bounds> {
        let scale = self.transform().scale();
        let left = start.0.min(end.0).round() as i32;
        let right = start.0.max(end.0).round() as i32;
        let top = start.1.min(end.1).round() as i32;
        let bottom = start.1.max(end.1).round() as i32;
        if ((right - left) as f64 * scale) < 2.0 || ((bottom - top) as f64 * scale) < 2.0 {
            return None;
        }
        Some(Bounds::from_edges(left, top, right, bottom))
    }

    fn select_in_lasso(&mut self, start: (f64, f64), end: (f64, f64)) {
        let ids: Vec<GroupId> = match self.lasso_rect(start, end) {
            Some(rect) => hit_test_rect(&self.groups, &self.config.units, &rect)
                .into_iter()
                .map(|i| self.groups[i].id)
                .collect(),
            None => Vec::new(),
        };
        self.selection.set(ids);
    }

    fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        if self.picker.pointer_up() {
            return true;
        }
        let mode = std::mem::replace(&mut self.mode, DragMode::Idle);
        self.guides.clear();
        self.labels.clear();
        match mode {
            DragMode::Idle => false,
            DragMode::Moving { .. } => {
                // Dropped back onto the sidebar: hide instead of place
                if !self.selection.is_empty() && self.sidebar.contains(self.viewport, x, y) {
                    for group in self.selection.groups(&self.groups) {
                        group.set_visible(&mut self.config.units, false);
                    }
                    log::debug!("dropped {} group(s) on the sidebar", self.selection.len());
                    self.selection.clear();
                    self.close_edit_panel();
                }
                self.save();
                true
            }
            DragMode::Resizing(_) => {
                self.save();
                true
            }
            DragMode::Lassoing { start, .. } => {
                let end = self.transform().to_overlay(x, y);
                self.select_in_lasso(start, end);
                true
            }
        }
    }

    fn scroll(&mut self, x: f64, y: f64, amount: f64) -> bool {
        let vp = self.viewport;
        if !self.sidebar.is_shown() || !self.sidebar.list_bounds(vp).contains(x, y) {
            return false;
        }
        let count = self.sidebar.entries(&self.catalog).len();
        self.sidebar.scroll_by(vp, count, amount);
        true
    }

    fn key_down(&mut self, key: Key) -> bool {
        let field_focused = self.search_focused || self.picker.hex_focused();
        let Some(action) = ShortcutMap::resolve(key, field_focused) else {
            return false;
        };
        match action {
            ShortcutAction::Close => self.close(),
            ShortcutAction::DeleteSelection => return self.delete_selection(),
            ShortcutAction::BlurField => {
                self.search_focused = false;
                self.picker.blur();
            }
            ShortcutAction::FieldBackspace => {
                if self.search_focused {
                    self.sidebar.pop_search_char();
                } else if let Some(color) = self.picker.backspace() {
                    self.apply_picker_color(color);
                }
            }
        }
        true
    }

    fn char_typed(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        if self.search_focused {
            self.sidebar.push_search_char(ch);
            return true;
        }
        if self.picker.hex_focused() {
            if let Some(color) = self.picker.type_char(ch) {
                self.apply_picker_color(color);
            }
            return true;
        }
        false
    }

    fn edit_panel_click(&mut self, hit: EditPanelHit) {
        match hit {
            EditPanelHit::Close => self.close_edit_panel(),
            EditPanelHit::Swatch(target) => {
                self.open_color_picker(target);
            }
            EditPanelHit::Visibility => {
                self.toggle_visibility();
            }
            EditPanelHit::ResetColors => {
                self.reset_overrides();
            }
            EditPanelHit::Background => {}
        }
    }

    fn settings_click(&mut self, hit: SettingsHit) {
        match hit {
            SettingsHit::ToggleSnapping => self.toggle_snapping(),
            SettingsHit::ToggleGuides => self.toggle_guides(),
            SettingsHit::ToggleDistanceLabels => self.toggle_distance_labels(),
            SettingsHit::ThresholdDown => self.adjust_threshold(-1),
            SettingsHit::ThresholdUp => self.adjust_threshold(1),
            SettingsHit::Background => {}
        }
    }

    // ─── Sidebar ─────────────────────────────────────────────────────────

    pub fn toggle_sidebar(&mut self) {
        self.sidebar.toggle();
        if !self.sidebar.is_open() {
            self.settings.close();
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.sidebar.set_search(text);
    }

    /// Insert `id` from the catalog (or re-show it), select it alone, center
    /// it under the pointer and start dragging it.
    fn begin_sidebar_drag(&mut self, id: GroupId, x: f64, y: f64) {
        if !self.config.has_group(id) {
            let Some(template) = self.catalog.get(id) else {
                return;
            };
            self.config.units.extend(template.instantiate());
            self.rebuild_groups();
            log::debug!("inserted template {id}");
        }
        let (ox, oy) = self.transform().to_overlay(x, y);
        let Some(group) = self.groups.iter().find(|g| g.id == id) else {
            return;
        };
        group.set_visible(&mut self.config.units, true);
        let b = group.bounds(&self.config.units);
        let dx = (ox - b.width as f64 / 2.0).round() as i32 - b.x;
        let dy = (oy - b.height as f64 / 2.0).round() as i32 - b.y;
        group.translate(&mut self.config.units, dx, dy);

        self.selection.select_only(id);
        self.close_edit_panel();
        self.mode = DragMode::Moving {
            offset_x: b.width as f64 / 2.0,
            offset_y: b.height as f64 / 2.0,
            from_sidebar: true,
        };
        self.save();
    }

    // ─── Selection operations ────────────────────────────────────────────

    /// Hide every selected unit and clear the selection.
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        for group in self.selection.groups(&self.groups) {
            group.set_visible(&mut self.config.units, false);
        }
        log::debug!("deleted {} group(s)", self.selection.len());
        self.selection.clear();
        self.close_edit_panel();
        self.save();
        true
    }

    /// Show everything if anything selected is hidden, otherwise hide all.
    pub fn toggle_visibility(&mut self) -> bool {
        if self.selected_units().is_empty() {
            return false;
        }
        let show = !self
            .selection
            .groups(&self.groups)
            .all(|g| g.all_visible(&self.config.units));
        for group in self.selection.groups(&self.groups) {
            group.set_visible(&mut self.config.units, show);
        }
        self.save();
        true
    }

    pub fn visibility_state(&self) -> VisibilityState {
        let handles = self.selected_units();
        let visible = handles
            .iter()
            .filter_map(|h| self.config.unit(*h))
            .filter(|u| u.visible)
            .count();
        VisibilityState::from_counts(visible, handles.len())
    }

    /// Override `target` on every selected unit.
    pub fn apply_color(&mut self, target: ColorTarget, color: Argb) -> bool {
        let handles = self.selected_units();
        if handles.is_empty() {
            return false;
        }
        for h in handles {
            if let Some(unit) = self.config.unit_mut(h) {
                unit.colors.set(target, Some(color));
            }
        }
        self.save();
        true
    }

    /// Clear all four overrides on every selected unit.
    pub fn reset_overrides(&mut self) -> bool {
        let handles = self.selected_units();
        if handles.is_empty() {
            return false;
        }
        for h in handles {
            if let Some(unit) = self.config.unit_mut(h) {
                unit.colors.clear();
            }
        }
        if self.picker.is_open() {
            let state = self.selection_color_state(self.picker.target().unwrap_or(ColorTarget::Fill));
            self.picker.load(state.color);
        }
        self.save();
        true
    }

    /// First selected unit's resolved color, flagged mixed when any other
    /// selected unit differs. The global palette without a selection.
    pub fn selection_color_state(&self, target: ColorTarget) -> ColorState {
        let handles = self.selected_units();
        let mut units = handles.iter().filter_map(|h| self.config.unit(*h));
        let Some(first) = units.next() else {
            return ColorState {
                color: self.config.palette.get(target),
                mixed: false,
            };
        };
        let color = self.config.resolve_color(first, target);
        let mixed = units.any(|u| self.config.resolve_color(u, target) != color);
        ColorState { color, mixed }
    }

    fn apply_picker_color(&mut self, color: Argb) {
        if let Some(target) = self.picker.target() {
            self.apply_color(target, color);
        }
    }

    // ─── Panels ──────────────────────────────────────────────────────────

    pub fn open_edit_panel(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.edit_panel.open();
        self.settings.close();
        true
    }

    /// Closing the edit panel also closes its color picker.
    pub fn close_edit_panel(&mut self) {
        self.edit_panel.close();
        self.picker.close();
    }

    /// Open the picker on `target`, loaded with the selection's color.
    pub fn open_color_picker(&mut self, target: ColorTarget) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let state = self.selection_color_state(target);
        let origin = EditPanel::picker_origin(self.viewport, ColorPicker::size());
        self.picker.open(target, state.color, origin);
        true
    }

    // ─── Settings ────────────────────────────────────────────────────────

    pub fn toggle_snapping(&mut self) {
        self.config.snap.snapping_enabled = !self.config.snap.snapping_enabled;
        self.save();
    }

    pub fn toggle_guides(&mut self) {
        self.config.snap.guides_enabled = !self.config.snap.guides_enabled;
        self.save();
    }

    pub fn toggle_distance_labels(&mut self) {
        self.config.snap.distance_labels_enabled = !self.config.snap.distance_labels_enabled;
        self.save();
    }

    /// Step the snap threshold, clamped to `1..=20`.
    pub fn adjust_threshold(&mut self, delta: i32) {
        self.config.snap.adjust_threshold(delta);
        self.save();
    }

    /// Move the whole overlay on screen.
    pub fn set_offset(&mut self, x: i32, y: i32) {
        self.config.offset_x = x;
        self.config.offset_y = y;
        self.save();
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.config.scale = scale;
        self.save();
    }

    /// Restore the default layout and drop every transient.
    pub fn reset_layout(&mut self) {
        self.config.reset_layout();
        self.rebuild_groups();
        self.selection.clear();
        self.close_edit_panel();
        self.mode = DragMode::Idle;
        self.guides.clear();
        self.labels.clear();
        self.sidebar.set_search("");
        log::debug!("layout reset");
        self.save();
    }

    /// Persist and finish editing.
    pub fn close(&mut self) {
        self.mode = DragMode::Idle;
        self.guides.clear();
        self.labels.clear();
        self.close_edit_panel();
        self.settings.close();
        self.save();
        self.closed = true;
        log::debug!("editor closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButton;
    use pretty_assertions::assert_eq;
    use vk_core::{InputSource, MemoryStore, Unit};

    const VIEW: Viewport = Viewport {
        width: 800,
        height: 600,
    };

    fn editor_with(units: Vec<Unit>) -> LayoutEditor<MemoryStore> {
        let config = OverlayConfig {
            offset_x: 0,
            offset_y: 0,
            units,
            ..OverlayConfig::default()
        };
        LayoutEditor::with_config(MemoryStore::new(), config, VIEW)
    }

    fn key(label: &str, group: &str, b: Bounds) -> Unit {
        Unit::new(label, InputSource::Key(65), b, GroupId::intern(group))
    }

    #[test]
    fn click_selects_and_release_persists() {
        let mut ed = editor_with(vec![key("A", "ed_a", Bounds::new(100, 100, 20, 20))]);
        assert!(ed.handle(&InputEvent::down(110.0, 110.0)));
        assert_eq!(ed.selection().primary(), Some(GroupId::intern("ed_a")));
        assert!(matches!(ed.mode(), DragMode::Moving { from_sidebar: false, .. }));
        assert!(ed.handle(&InputEvent::up(110.0, 110.0)));
        assert_eq!(ed.mode(), &DragMode::Idle);
        assert_eq!(ed.store().save_count(), 1);
    }

    #[test]
    fn secondary_button_is_ignored() {
        let mut ed = editor_with(vec![key("A", "ed_b", Bounds::new(100, 100, 20, 20))]);
        let event = InputEvent::PointerDown {
            x: 110.0,
            y: 110.0,
            button: PointerButton::Secondary,
        };
        assert!(!ed.handle(&event));
        assert!(ed.selection().is_empty());
    }

    #[test]
    fn empty_click_clears_selection_and_starts_lasso() {
        let mut ed = editor_with(vec![key("A", "ed_c", Bounds::new(100, 100, 20, 20))]);
        ed.handle(&InputEvent::down(110.0, 110.0));
        ed.handle(&InputEvent::up(110.0, 110.0));
        ed.open_edit_panel();

        ed.handle(&InputEvent::down(400.0, 400.0));
        assert!(ed.selection().is_empty());
        assert!(!ed.is_edit_panel_open());
        assert!(matches!(ed.mode(), DragMode::Lassoing { .. }));
    }

    #[test]
    fn lasso_rect_rounds_and_rejects_slivers() {
        let ed = editor_with(Vec::new());
        assert_eq!(ed.lasso_rect((10.4, 20.0), (4.6, 30.0)), Some(Bounds::new(5, 20, 5, 10)));
        assert_eq!(ed.lasso_rect((10.0, 20.0), (11.0, 60.0)), None);
    }

    #[test]
    fn color_state_reports_mixed() {
        let mut ed = editor_with(vec![
            key("A", "ed_mix_a", Bounds::new(0, 0, 10, 10)),
            key("B", "ed_mix_b", Bounds::new(50, 0, 10, 10)),
        ]);
        ed.selection.set([GroupId::intern("ed_mix_a")]);
        assert!(ed.apply_color(ColorTarget::Text, Argb(0xFF12_3456)));
        ed.selection.set([GroupId::intern("ed_mix_a"), GroupId::intern("ed_mix_b")]);
        assert_eq!(
            ed.selection_color_state(ColorTarget::Text),
            ColorState {
                color: Argb(0xFF12_3456),
                mixed: true
            }
        );
        ed.selection.clear();
        assert_eq!(
            ed.selection_color_state(ColorTarget::Text),
            ColorState {
                color: ed.config().palette.text,
                mixed: false
            }
        );
        assert!(!ed.apply_color(ColorTarget::Fill, Argb::BLACK));
    }

    #[test]
    fn visibility_toggle_shows_mixed_then_hides() {
        let mut ed = editor_with(vec![
            key("A", "ed_vis", Bounds::new(0, 0, 10, 10)),
            key("B", "ed_vis", Bounds::new(20, 0, 10, 10)),
        ]);
        ed.config.units[1].visible = false;
        ed.selection.set([GroupId::intern("ed_vis")]);
        assert_eq!(ed.visibility_state(), VisibilityState::Mixed);
        ed.toggle_visibility();
        assert_eq!(ed.visibility_state(), VisibilityState::Shown);
        ed.toggle_visibility();
        assert_eq!(ed.visibility_state(), VisibilityState::Hidden);
        assert_eq!(ed.store().save_count(), 2);
    }

    #[test]
    fn store_errors_are_kept_for_the_host() {
        let config = OverlayConfig {
            units: Vec::new(),
            ..OverlayConfig::default()
        };
        let mut ed = LayoutEditor::with_config(MemoryStore::new().failing("disk full"), config, VIEW);
        ed.toggle_snapping();
        assert_eq!(ed.take_store_error().as_deref(), Some("disk full"));
        assert_eq!(ed.take_store_error(), None);
        // the edit itself still happened
        assert!(!ed.config().snap.snapping_enabled);
    }

    #[test]
    fn escape_blurs_search_before_closing() {
        let mut ed = editor_with(Vec::new());
        ed.search_focused = true;
        assert!(ed.handle(&InputEvent::KeyDown { key: Key::Escape }));
        assert!(!ed.is_closed());
        assert!(!ed.is_search_focused());
        assert!(ed.handle(&InputEvent::KeyDown { key: Key::Escape }));
        assert!(ed.is_closed());
        assert_eq!(ed.store().save_count(), 1);
    }

    #[test]
    fn delete_without_selection_is_not_consumed() {
        let mut ed = editor_with(Vec::new());
        assert!(!ed.handle(&InputEvent::KeyDown { key: Key::Delete }));
        assert_eq!(ed.store().save_count(), 0);
    }
}
