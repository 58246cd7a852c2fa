//! Template sidebar: search, scrolling list, and the drop zone that hides
//! groups dragged back onto it.

use vk_core::{Bounds, Template, TemplateCatalog, Viewport};

pub const SIDEBAR_WIDTH: i32 = 160;
pub const SIDEBAR_PADDING: i32 = 10;
pub const ENTRY_HEIGHT: i32 = 22;
pub const ENTRY_GAP: i32 = 6;
pub const SCROLL_STEP: f64 = 12.0;
pub const HEADER_Y: i32 = 12;
pub const SEARCH_HEIGHT: i32 = 18;
pub const SEARCH_PADDING: i32 = 8;
pub const RESET_WIDTH: i32 = 46;
pub const RESET_HEIGHT: i32 = 17;
pub const TOGGLE_SIZE: i32 = 18;
pub const TOGGLE_PADDING: i32 = 6;
pub const SETTINGS_BUTTON_SIZE: i32 = 20;
/// Slide animation step per `tick`.
pub const SLIDE_STEP: f32 = 0.15;

#[derive(Debug, Clone)]
pub struct Sidebar {
    open: bool,
    progress: f32,
    scroll: f64,
    search: String,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new()
    }
}

impl Sidebar {
    /// Starts collapsed.
    pub fn new() -> Self {
        Self {
            open: false,
            progress: 0.0,
            scroll: 0.0,
            search: String::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Slide-in progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        log::debug!("sidebar {}", if self.open { "opening" } else { "closing" });
    }

    /// Advance the slide animation by one frame.
    pub fn tick(&mut self) {
        let target = if self.open { 1.0 } else { 0.0 };
        if self.progress < target {
            self.progress = (self.progress + SLIDE_STEP).min(target);
        } else {
            self.progress = (self.progress - SLIDE_STEP).max(target);
        }
    }

    /// True while any part of the panel is on screen.
    pub fn is_shown(&self) -> bool {
        self.progress > 0.01
    }

    // ─── Layout (screen space) ───────────────────────────────────────────

    pub fn width(&self) -> i32 {
        (SIDEBAR_WIDTH as f32 * self.progress) as i32
    }

    pub fn x(&self, viewport: Viewport) -> i32 {
        viewport.width - self.width()
    }

    pub fn bounds(&self, viewport: Viewport) -> Bounds {
        Bounds::new(self.x(viewport), 0, self.width(), viewport.height)
    }

    /// Whether a screen point lies over the visible panel.
    pub fn contains(&self, viewport: Viewport, x: f64, y: f64) -> bool {
        self.is_shown() && self.bounds(viewport).contains(x, y)
    }

    /// The open/close tab, riding just left of the panel edge.
    pub fn toggle_bounds(&self, viewport: Viewport) -> Bounds {
        Bounds::new(self.x(viewport) - TOGGLE_SIZE - TOGGLE_PADDING, 8, TOGGLE_SIZE, TOGGLE_SIZE)
    }

    /// "Reset" sits in the header, right-aligned.
    pub fn reset_bounds(&self, viewport: Viewport) -> Bounds {
        let width = RESET_WIDTH.min(self.width() - SIDEBAR_PADDING * 2);
        Bounds::new(viewport.width - SIDEBAR_PADDING - width, HEADER_Y - 4, width, RESET_HEIGHT)
    }

    pub fn search_bounds(&self, viewport: Viewport) -> Bounds {
        Bounds::new(
            self.x(viewport) + SIDEBAR_PADDING,
            HEADER_Y + 14,
            self.width() - SIDEBAR_PADDING * 2,
            SEARCH_HEIGHT,
        )
    }

    /// Gear button in the bottom-right corner.
    pub fn settings_button_bounds(&self, viewport: Viewport) -> Bounds {
        Bounds::new(
            viewport.width - SETTINGS_BUTTON_SIZE - SIDEBAR_PADDING,
            viewport.height - SETTINGS_BUTTON_SIZE - SIDEBAR_PADDING,
            SETTINGS_BUTTON_SIZE,
            SETTINGS_BUTTON_SIZE,
        )
    }

    /// Region the entry list scrolls within.
    pub fn list_bounds(&self, viewport: Viewport) -> Bounds {
        let search = self.search_bounds(viewport);
        let top = search.bottom() + SEARCH_PADDING;
        let bottom = viewport.height - SIDEBAR_PADDING - SETTINGS_BUTTON_SIZE - 6;
        Bounds::new(search.x, top, search.width, (bottom - top).max(0))
    }

    /// Screen bounds of the `index`-th filtered entry at the current scroll.
    pub fn entry_bounds(&self, viewport: Viewport, index: usize) -> Bounds {
        let list = self.list_bounds(viewport);
        let y = list.y + index as i32 * (ENTRY_HEIGHT + ENTRY_GAP) - self.scroll.round() as i32;
        Bounds::new(list.x, y, list.width, ENTRY_HEIGHT)
    }

    // ─── Search and scroll ───────────────────────────────────────────────

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replace the search text. A changed filter scrolls back to the top.
    pub fn set_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.search {
            self.search = text;
            self.scroll = 0.0;
        }
    }

    pub fn push_search_char(&mut self, ch: char) {
        let mut text = self.search.clone();
        text.push(ch);
        self.set_search(text);
    }

    pub fn pop_search_char(&mut self) {
        let mut text = self.search.clone();
        text.pop();
        self.set_search(text);
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn entries<'a>(&self, catalog: &'a TemplateCatalog) -> Vec<&'a Template> {
        catalog.filter(&self.search)
    }

    /// Largest scroll offset that still shows the last entry.
    pub fn max_scroll(&self, viewport: Viewport, entry_count: usize) -> f64 {
        if entry_count == 0 {
            return 0.0;
        }
        let content = entry_count as i32 * (ENTRY_HEIGHT + ENTRY_GAP) - ENTRY_GAP;
        (content - self.list_bounds(viewport).height).max(0) as f64
    }

    /// Scroll by wheel `amount` (positive = up), clamped to `[0, max]`.
    pub fn scroll_by(&mut self, viewport: Viewport, entry_count: usize, amount: f64) {
        let max = self.max_scroll(viewport, entry_count);
        self.scroll = (self.scroll - amount * SCROLL_STEP).clamp(0.0, max);
    }

    /// Index into the filtered entries under a screen point.
    pub fn entry_at(&self, viewport: Viewport, entry_count: usize, x: f64, y: f64) -> Option<usize> {
        if !self.is_shown() || !self.list_bounds(viewport).contains(x, y) {
            return None;
        }
        (0..entry_count).find(|i| self.entry_bounds(viewport, *i).contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VIEW: Viewport = Viewport {
        width: 800,
        height: 300,
    };

    fn opened() -> Sidebar {
        let mut sb = Sidebar::new();
        sb.toggle();
        for _ in 0..7 {
            sb.tick();
        }
        sb
    }

    #[test]
    fn slide_animation() {
        let mut sb = Sidebar::new();
        assert!(!sb.is_shown());
        sb.toggle();
        sb.tick();
        assert_eq!(sb.progress(), SLIDE_STEP);
        for _ in 0..6 {
            sb.tick();
        }
        assert_eq!(sb.progress(), 1.0);
        assert_eq!(sb.x(VIEW), 640);
        assert!(sb.contains(VIEW, 799.0, 10.0));

        sb.toggle();
        for _ in 0..7 {
            sb.tick();
        }
        assert_eq!(sb.progress(), 0.0);
        assert!(!sb.contains(VIEW, 799.0, 10.0));
    }

    #[test]
    fn scroll_is_clamped() {
        let catalog = TemplateCatalog::builtin();
        let mut sb = opened();
        let n = sb.entries(&catalog).len();
        // 16 entries: 16 * 28 - 6 = 442 tall in a 212px list
        assert_eq!(sb.list_bounds(VIEW).height, 212);
        let max = sb.max_scroll(VIEW, n);
        assert_eq!(max, 230.0);

        sb.scroll_by(VIEW, n, 5.0);
        assert_eq!(sb.scroll(), 0.0);
        sb.scroll_by(VIEW, n, -1.0);
        assert_eq!(sb.scroll(), 12.0);
        sb.scroll_by(VIEW, n, -1000.0);
        assert_eq!(sb.scroll(), max);
    }

    #[test]
    fn search_change_resets_scroll() {
        let catalog = TemplateCatalog::builtin();
        let mut sb = opened();
        let n = sb.entries(&catalog).len();
        sb.scroll_by(VIEW, n, -2.0);
        assert_eq!(sb.scroll(), 24.0);
        sb.push_search_char('c');
        assert_eq!(sb.scroll(), 0.0);
        assert_eq!(sb.search(), "c");
        // same text again keeps the scroll
        sb.scroll_by(VIEW, 16, -1.0);
        sb.set_search("c");
        assert_eq!(sb.scroll(), 12.0);
    }

    #[test]
    fn entry_hit_testing() {
        let catalog = TemplateCatalog::builtin();
        let sb = opened();
        let n = sb.entries(&catalog).len();
        let second = sb.entry_bounds(VIEW, 1);
        assert_eq!((second.x, second.y), (650, 80));
        assert_eq!(sb.entry_at(VIEW, n, 655.0, 85.0), Some(1));
        // the gap between entries hits nothing
        assert_eq!(sb.entry_at(VIEW, n, 655.0, 77.0), None);
        assert_eq!(sb.entry_at(VIEW, n, 10.0, 100.0), None);
        assert_eq!(Sidebar::new().entry_at(VIEW, n, 655.0, 85.0), None);
    }

    #[test]
    fn chrome_positions() {
        let sb = opened();
        assert_eq!(sb.toggle_bounds(VIEW), Bounds::new(616, 8, 18, 18));
        assert_eq!(sb.reset_bounds(VIEW), Bounds::new(744, 8, 46, 17));
        assert_eq!(sb.settings_button_bounds(VIEW), Bounds::new(770, 270, 20, 20));
        assert_eq!(Sidebar::new().toggle_bounds(VIEW).x, 776);
    }
}
