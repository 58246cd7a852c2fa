//! Popup panels: the per-selection edit panel and the snapping settings.
//!
//! Both are pure layout plus hit testing in screen space. The editor owns
//! the state they operate on.

use vk_core::{Bounds, ColorTarget, Viewport};

pub const EDIT_PANEL_WIDTH: i32 = 280;
pub const EDIT_PANEL_HEIGHT: i32 = 230;
pub const SETTINGS_PANEL_WIDTH: i32 = 220;
pub const SETTINGS_PANEL_HEIGHT: i32 = 150;
pub const PANEL_INSET: i32 = 12;
pub const ROW_HEIGHT: i32 = 24;
pub const SWATCH_SIZE: i32 = 14;
pub const CLOSE_SIZE: i32 = 14;
pub const BUTTON_HEIGHT: i32 = 18;
pub const VISIBILITY_WIDTH: i32 = 80;
pub const RESET_COLORS_WIDTH: i32 = 110;
pub const TOGGLE_WIDTH: i32 = 44;
pub const STEP_SIZE: i32 = 18;
pub const SETTINGS_LINE: i32 = 22;

/// Combined visibility of the selected units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    Shown,
    Hidden,
    Mixed,
}

impl VisibilityState {
    /// An empty selection reads as shown.
    pub fn from_counts(visible: usize, total: usize) -> Self {
        if total == 0 || visible == total {
            Self::Shown
        } else if visible == 0 {
            Self::Hidden
        } else {
            Self::Mixed
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Shown => "Shown",
            Self::Hidden => "Hidden",
            Self::Mixed => "Mixed",
        }
    }
}

// ─── Edit panel ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPanelHit {
    Close,
    Swatch(ColorTarget),
    Visibility,
    ResetColors,
    /// Inside the panel but on no control.
    Background,
}

/// Modal panel editing the colors and visibility of the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditPanel {
    open: bool,
}

impl EditPanel {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Centered, shrinking on small screens, never above y = 20.
    pub fn bounds(viewport: Viewport) -> Bounds {
        let width = EDIT_PANEL_WIDTH.min(viewport.width - 60);
        let height = EDIT_PANEL_HEIGHT.min(viewport.height - 60);
        let x = (viewport.width - width) / 2;
        let y = ((viewport.height - height) / 2).max(20);
        Bounds::new(x, y, width, height)
    }

    pub fn title(selected: usize, primary_name: &str) -> String {
        if selected == 1 {
            format!("Edit {primary_name}")
        } else {
            format!("Edit {selected} Elements")
        }
    }

    pub fn close_bounds(viewport: Viewport) -> Bounds {
        let p = Self::bounds(viewport);
        Bounds::new(p.right() - CLOSE_SIZE - 8, p.y + 8, CLOSE_SIZE, CLOSE_SIZE)
    }

    /// Top of the `index`-th color row.
    pub fn row_y(viewport: Viewport, index: usize) -> i32 {
        Self::bounds(viewport).y + PANEL_INSET + 20 + index as i32 * ROW_HEIGHT
    }

    pub fn swatch_bounds(viewport: Viewport, index: usize) -> Bounds {
        let p = Self::bounds(viewport);
        Bounds::new(
            p.right() - PANEL_INSET - SWATCH_SIZE,
            Self::row_y(viewport, index) + 2,
            SWATCH_SIZE,
            SWATCH_SIZE,
        )
    }

    pub fn visibility_bounds(viewport: Viewport) -> Bounds {
        let p = Self::bounds(viewport);
        let y = Self::row_y(viewport, ColorTarget::ALL.len()) + 6;
        Bounds::new(p.right() - PANEL_INSET - VISIBILITY_WIDTH, y, VISIBILITY_WIDTH, BUTTON_HEIGHT)
    }

    pub fn reset_colors_bounds(viewport: Viewport) -> Bounds {
        let p = Self::bounds(viewport);
        let y = Self::visibility_bounds(viewport).y + ROW_HEIGHT;
        Bounds::new(p.right() - PANEL_INSET - RESET_COLORS_WIDTH, y, RESET_COLORS_WIDTH, BUTTON_HEIGHT)
    }

    /// `None` when the panel is closed or the point is outside it.
    pub fn hit(&self, viewport: Viewport, x: f64, y: f64) -> Option<EditPanelHit> {
        if !self.open || !Self::bounds(viewport).contains(x, y) {
            return None;
        }
        if Self::close_bounds(viewport).contains(x, y) {
            return Some(EditPanelHit::Close);
        }
        let swatch = ColorTarget::ALL
            .into_iter()
            .enumerate()
            .find(|(i, _)| Self::swatch_bounds(viewport, *i).contains(x, y));
        if let Some((_, target)) = swatch {
            return Some(EditPanelHit::Swatch(target));
        }
        if Self::visibility_bounds(viewport).contains(x, y) {
            return Some(EditPanelHit::Visibility);
        }
        if Self::reset_colors_bounds(viewport).contains(x, y) {
            return Some(EditPanelHit::ResetColors);
        }
        Some(EditPanelHit::Background)
    }

    /// Where the color picker goes: right of the panel, else left of it,
    /// else centered; always 10px inside the screen.
    pub fn picker_origin(viewport: Viewport, picker_size: (i32, i32)) -> (i32, i32) {
        let p = Self::bounds(viewport);
        let (w, h) = picker_size;
        let mut x = p.right() + 12;
        if x + w > viewport.width - 10 {
            x = p.x - w - 12;
        }
        if x < 10 {
            x = (viewport.width - w) / 2;
        }
        let x = x.min(viewport.width - w - 10).max(10);
        let mut y = p.y + 10;
        if y + h > viewport.height - 10 {
            y = viewport.height - h - 10;
        }
        (x, y.max(10))
    }
}

// ─── Settings panel ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsHit {
    ToggleSnapping,
    ToggleGuides,
    ToggleDistanceLabels,
    ThresholdDown,
    ThresholdUp,
    Background,
}

/// Row labels, top to bottom. The fourth row is the threshold stepper.
pub const SETTINGS_ROWS: [&str; 4] = ["Snapping", "Guides", "Distance Labels", "Snap Threshold"];

/// Popup above the sidebar's gear button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPanel {
    open: bool,
}

impl SettingsPanel {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Anchored so its right edge lines up with the gear button.
    pub fn bounds(gear: &Bounds) -> Bounds {
        Bounds::new(
            gear.right() - SETTINGS_PANEL_WIDTH,
            gear.y - SETTINGS_PANEL_HEIGHT - 8,
            SETTINGS_PANEL_WIDTH,
            SETTINGS_PANEL_HEIGHT,
        )
    }

    pub fn row_y(gear: &Bounds, index: usize) -> i32 {
        Self::bounds(gear).y + PANEL_INSET + index as i32 * SETTINGS_LINE
    }

    /// On/Off button of one of the first three rows.
    pub fn toggle_bounds(gear: &Bounds, index: usize) -> Bounds {
        let p = Self::bounds(gear);
        Bounds::new(
            p.right() - PANEL_INSET - TOGGLE_WIDTH,
            Self::row_y(gear, index),
            TOGGLE_WIDTH,
            BUTTON_HEIGHT,
        )
    }

    pub fn minus_bounds(gear: &Bounds) -> Bounds {
        let right = Self::bounds(gear).right() - PANEL_INSET;
        Bounds::new(right - STEP_SIZE * 2 - 4, Self::row_y(gear, 3), STEP_SIZE, STEP_SIZE)
    }

    pub fn plus_bounds(gear: &Bounds) -> Bounds {
        let right = Self::bounds(gear).right() - PANEL_INSET;
        Bounds::new(right - STEP_SIZE, Self::row_y(gear, 3), STEP_SIZE, STEP_SIZE)
    }

    pub fn hit(&self, gear: &Bounds, x: f64, y: f64) -> Option<SettingsHit> {
        if !self.open || !Self::bounds(gear).contains(x, y) {
            return None;
        }
        let toggles = [
            SettingsHit::ToggleSnapping,
            SettingsHit::ToggleGuides,
            SettingsHit::ToggleDistanceLabels,
        ];
        if let Some(hit) = toggles
            .into_iter()
            .enumerate()
            .find(|(i, _)| Self::toggle_bounds(gear, *i).contains(x, y))
            .map(|(_, h)| h)
        {
            return Some(hit);
        }
        if Self::minus_bounds(gear).contains(x, y) {
            return Some(SettingsHit::ThresholdDown);
        }
        if Self::plus_bounds(gear).contains(x, y) {
            return Some(SettingsHit::ThresholdUp);
        }
        Some(SettingsHit::Background)
    }
}
