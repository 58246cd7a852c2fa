//! Built-in blueprints the sidebar offers for insertion.
//!
//! Prototype geometry is relative to the template origin. Instantiating a
//! template stamps every unit with the template id as its group id.

use crate::bounds::Bounds;
use crate::id::GroupId;
use crate::model::{InputSource, MouseButton, StatKind, Unit};

/// GLFW key codes used by the built-in templates.
pub mod keycode {
    pub const SPACE: u32 = 32;
    pub const APOSTROPHE: u32 = 39;
    pub const COMMA: u32 = 44;
    pub const MINUS: u32 = 45;
    pub const PERIOD: u32 = 46;
    pub const SLASH: u32 = 47;
    pub const DIGIT_0: u32 = 48;
    pub const SEMICOLON: u32 = 59;
    pub const EQUAL: u32 = 61;
    pub const A: u32 = 65;
    pub const LEFT_BRACKET: u32 = 91;
    pub const BACKSLASH: u32 = 92;
    pub const RIGHT_BRACKET: u32 = 93;
    pub const GRAVE_ACCENT: u32 = 96;
    pub const ESCAPE: u32 = 256;
    pub const ENTER: u32 = 257;
    pub const TAB: u32 = 258;
    pub const BACKSPACE: u32 = 259;
    pub const RIGHT: u32 = 262;
    pub const LEFT: u32 = 263;
    pub const DOWN: u32 = 264;
    pub const UP: u32 = 265;
    pub const CAPS_LOCK: u32 = 280;
    pub const F1: u32 = 290;
    pub const LEFT_SHIFT: u32 = 340;
    pub const LEFT_CONTROL: u32 = 341;
    pub const LEFT_ALT: u32 = 342;
    pub const LEFT_SUPER: u32 = 343;
    pub const RIGHT_SHIFT: u32 = 344;
    pub const RIGHT_CONTROL: u32 = 345;
    pub const RIGHT_ALT: u32 = 346;
    pub const RIGHT_SUPER: u32 = 347;
    pub const MENU: u32 = 348;

    /// Code for an ASCII letter key.
    pub const fn letter(c: char) -> u32 {
        A + (c.to_ascii_uppercase() as u32 - 'A' as u32)
    }
}

/// A unit blueprint, positioned relative to its template origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub label: String,
    pub source: InputSource,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: GroupId,
    pub display_name: String,
    pub prototypes: Vec<Prototype>,
}

impl Template {
    fn new(id: &str, display_name: &str, prototypes: Vec<Prototype>) -> Self {
        Self {
            id: GroupId::intern(id),
            display_name: display_name.to_string(),
            prototypes,
        }
    }

    /// Case-insensitive substring match on the display name.
    /// `filter` must already be trimmed and lower-cased.
    pub fn matches_filter(&self, filter: &str) -> bool {
        filter.is_empty() || self.display_name.to_lowercase().contains(filter)
    }

    /// Fresh visible units at the template's relative geometry.
    pub fn instantiate(&self) -> Vec<Unit> {
        self.prototypes
            .iter()
            .map(|p| Unit::new(p.label.clone(), p.source, p.bounds, self.id))
            .collect()
    }

    /// Same as `instantiate`, shifted by `(dx, dy)`.
    pub fn instantiate_at(&self, dx: i32, dy: i32) -> Vec<Unit> {
        let mut units = self.instantiate();
        for u in &mut units {
            u.translate(dx, dy);
        }
        units
    }
}

/// Ordered list of templates.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            Template::new(
                "wasd",
                "WASD",
                vec![
                    key("W", keycode::letter('W'), 28, 0, 24, 24),
                    key("A", keycode::letter('A'), 0, 28, 24, 24),
                    key("S", keycode::letter('S'), 28, 28, 24, 24),
                    key("D", keycode::letter('D'), 56, 28, 24, 24),
                ],
            ),
            Template::new("space", "SPACE", vec![key("SPACE", keycode::SPACE, 0, 0, 80, 24)]),
            Template::new("shift", "SHIFT", vec![key("SHIFT", keycode::LEFT_SHIFT, 0, 0, 52, 24)]),
            Template::new("ctrl", "CTRL", vec![key("CTRL", keycode::LEFT_CONTROL, 0, 0, 52, 24)]),
            Template::new("lmb", "LMB", vec![mouse("LMB", MouseButton::Left, 32, 32)]),
            Template::new("rmb", "RMB", vec![mouse("RMB", MouseButton::Right, 32, 32)]),
            Template::new("mmb", "MMB", vec![mouse("MMB", MouseButton::Middle, 32, 24)]),
            Template::new("keyboard", "Mini Keyboard", mini_keyboard()),
            Template::new("numbers", "Number Row", number_row()),
            Template::new("function", "Function Keys", function_row()),
            Template::new("arrows", "Arrow Keys", arrows()),
            Template::new("utility", "Utility Keys", utility()),
            Template::new("full_keyboard", "Full Keyboard", full_keyboard()),
            Template::new("cps", "CPS Counter", vec![stat("CPS", StatKind::Cps)]),
            Template::new("cps_rmb", "RMB CPS", vec![stat("RMB CPS", StatKind::CpsRight)]),
            Template::new("cps_mmb", "MMB CPS", vec![stat("MMB CPS", StatKind::CpsMiddle)]),
        ])
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: GroupId) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates whose display name contains `filter`, ignoring case and
    /// surrounding whitespace. Catalog order is preserved.
    pub fn filter(&self, filter: &str) -> Vec<&Template> {
        let needle = filter.trim().to_lowercase();
        self.templates
            .iter()
            .filter(|t| t.matches_filter(&needle))
            .collect()
    }

    /// Units for a fresh workspace: WASD, SPACE below it, both mouse buttons
    /// and the CPS counter.
    pub fn default_layout(&self) -> Vec<Unit> {
        const PLACEMENT: [(&str, i32, i32); 5] = [
            ("wasd", 0, 0),
            ("space", 0, 56),
            ("lmb", 0, 84),
            ("rmb", 48, 84),
            ("cps", 0, 120),
        ];
        PLACEMENT
            .iter()
            .filter_map(|(id, x, y)| self.get(GroupId::intern(id)).map(|t| t.instantiate_at(*x, *y)))
            .flatten()
            .collect()
    }
}

// ─── Prototype builders ──────────────────────────────────────────────────

fn key(label: &str, code: u32, x: i32, y: i32, w: i32, h: i32) -> Prototype {
    Prototype {
        label: label.to_string(),
        source: InputSource::Key(code),
        bounds: Bounds::new(x, y, w, h),
    }
}

fn mouse(label: &str, button: MouseButton, w: i32, h: i32) -> Prototype {
    Prototype {
        label: label.to_string(),
        source: InputSource::Mouse(button),
        bounds: Bounds::new(0, 0, w, h),
    }
}

fn stat(label: &str, kind: StatKind) -> Prototype {
    Prototype {
        label: label.to_string(),
        source: InputSource::Stat(kind),
        bounds: Bounds::new(0, 0, 64, 28),
    }
}

/// One row of equally sized letter keys.
fn letter_row(out: &mut Vec<Prototype>, letters: &str, x0: i32, y: i32, size: i32, pitch: i32) {
    for (i, c) in letters.chars().enumerate() {
        out.push(key(&c.to_string(), keycode::letter(c), x0 + i as i32 * pitch, y, size, size));
    }
}

fn digit_code(d: u32) -> u32 {
    keycode::DIGIT_0 + d
}

fn mini_keyboard() -> Vec<Prototype> {
    let mut keys = Vec::new();
    for d in 1..=5 {
        keys.push(key(&d.to_string(), digit_code(d), (d as i32 - 1) * 16, 0, 14, 14));
    }
    letter_row(&mut keys, "QWERT", 0, 16, 14, 16);
    letter_row(&mut keys, "ASDFG", 0, 32, 14, 16);
    letter_row(&mut keys, "ZXCV", 8, 48, 14, 16);
    keys
}

fn number_row() -> Vec<Prototype> {
    let mut keys: Vec<Prototype> = (1..=9)
        .map(|d| key(&d.to_string(), digit_code(d), (d as i32 - 1) * 16, 0, 14, 14))
        .collect();
    keys.push(key("0", keycode::DIGIT_0, 9 * 16, 0, 14, 14));
    keys
}

fn function_row() -> Vec<Prototype> {
    (0..12)
        .map(|i| key(&format!("F{}", i + 1), keycode::F1 + i, i as i32 * 20, 0, 18, 14))
        .collect()
}

fn arrows() -> Vec<Prototype> {
    vec![
        key("↑", keycode::UP, 18, 0, 18, 18),
        key("←", keycode::LEFT, 0, 20, 18, 18),
        key("↓", keycode::DOWN, 18, 20, 18, 18),
        key("→", keycode::RIGHT, 36, 20, 18, 18),
    ]
}

fn utility() -> Vec<Prototype> {
    vec![
        key("ESC", keycode::ESCAPE, 0, 0, 24, 18),
        key("TAB", keycode::TAB, 28, 0, 24, 18),
        key("E", keycode::letter('E'), 56, 0, 18, 18),
        key("Q", keycode::letter('Q'), 78, 0, 18, 18),
        key("R", keycode::letter('R'), 100, 0, 18, 18),
        key("F", keycode::letter('F'), 122, 0, 18, 18),
    ]
}

fn full_keyboard() -> Vec<Prototype> {
    const K: i32 = 18;
    const PITCH: i32 = K + 2;
    let row = |n: i32| n * PITCH;
    let mut keys = Vec::new();

    // Function row
    keys.push(key("ESC", keycode::ESCAPE, 0, row(0), 24, K));
    for i in 0..12 {
        keys.push(key(&format!("F{}", i + 1), keycode::F1 + i, 28 + i as i32 * PITCH, row(0), K, K));
    }

    // Keys in the lower rows advance by their own width plus the gap.
    fn push(keys: &mut Vec<Prototype>, label: &str, code: u32, x: &mut i32, y: i32, w: i32) {
        keys.push(key(label, code, *x, y, w, K));
        *x += w + 2;
    }

    let mut x = 0;
    push(&mut keys, "~", keycode::GRAVE_ACCENT, &mut x, row(1), K);
    for d in 1..=9 {
        push(&mut keys, &d.to_string(), digit_code(d), &mut x, row(1), K);
    }
    push(&mut keys, "0", keycode::DIGIT_0, &mut x, row(1), K);
    push(&mut keys, "-", keycode::MINUS, &mut x, row(1), K);
    push(&mut keys, "=", keycode::EQUAL, &mut x, row(1), K);
    push(&mut keys, "BACK", keycode::BACKSPACE, &mut x, row(1), 34);

    x = 0;
    push(&mut keys, "TAB", keycode::TAB, &mut x, row(2), 28);
    for c in "QWERTYUIOP".chars() {
        push(&mut keys, &c.to_string(), keycode::letter(c), &mut x, row(2), K);
    }
    push(&mut keys, "[", keycode::LEFT_BRACKET, &mut x, row(2), K);
    push(&mut keys, "]", keycode::RIGHT_BRACKET, &mut x, row(2), K);
    push(&mut keys, "\\", keycode::BACKSLASH, &mut x, row(2), 28);

    x = 0;
    push(&mut keys, "CAPS", keycode::CAPS_LOCK, &mut x, row(3), 32);
    for c in "ASDFGHJKL".chars() {
        push(&mut keys, &c.to_string(), keycode::letter(c), &mut x, row(3), K);
    }
    push(&mut keys, ";", keycode::SEMICOLON, &mut x, row(3), K);
    push(&mut keys, "'", keycode::APOSTROPHE, &mut x, row(3), K);
    push(&mut keys, "ENTER", keycode::ENTER, &mut x, row(3), 36);

    x = 0;
    push(&mut keys, "SHIFT", keycode::LEFT_SHIFT, &mut x, row(4), 40);
    for c in "ZXCVBNM".chars() {
        push(&mut keys, &c.to_string(), keycode::letter(c), &mut x, row(4), K);
    }
    push(&mut keys, ",", keycode::COMMA, &mut x, row(4), K);
    push(&mut keys, ".", keycode::PERIOD, &mut x, row(4), K);
    push(&mut keys, "/", keycode::SLASH, &mut x, row(4), K);
    push(&mut keys, "SHIFT", keycode::RIGHT_SHIFT, &mut x, row(4), 44);

    x = 0;
    push(&mut keys, "CTRL", keycode::LEFT_CONTROL, &mut x, row(5), 28);
    push(&mut keys, "WIN", keycode::LEFT_SUPER, &mut x, row(5), 24);
    push(&mut keys, "ALT", keycode::LEFT_ALT, &mut x, row(5), 24);
    push(&mut keys, "SPACE", keycode::SPACE, &mut x, row(5), 90);
    push(&mut keys, "ALT", keycode::RIGHT_ALT, &mut x, row(5), 24);
    push(&mut keys, "WIN", keycode::RIGHT_SUPER, &mut x, row(5), 24);
    push(&mut keys, "MENU", keycode::MENU, &mut x, row(5), 24);
    push(&mut keys, "CTRL", keycode::RIGHT_CONTROL, &mut x, row(5), 28);

    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn filter_is_case_insensitive_substring() {
        let catalog = TemplateCatalog::builtin();
        let names: Vec<&str> = catalog.filter("  cps ").iter().map(|t| t.display_name.as_str()).collect();
        assert_eq!(names, vec!["CPS Counter", "RMB CPS", "MMB CPS"]);
        assert_eq!(catalog.filter("").len(), catalog.templates().len());
        assert!(catalog.filter("nothing matches").is_empty());
    }

    #[test]
    fn instantiate_stamps_group_id() {
        let catalog = TemplateCatalog::builtin();
        let wasd = catalog.get(GroupId::intern("wasd")).unwrap();
        let units = wasd.instantiate();
        assert_eq!(units.len(), 4);
        assert!(units.iter().all(|u| u.group == wasd.id && u.visible));
        assert_eq!(units[0].bounds(), Bounds::new(28, 0, 24, 24));
        assert_eq!(units[0].source, InputSource::Key(87));
    }

    #[test]
    fn stat_templates_use_counter_size() {
        let catalog = TemplateCatalog::builtin();
        let cps = catalog.get(GroupId::intern("cps_mmb")).unwrap();
        assert_eq!(cps.prototypes[0].bounds, Bounds::new(0, 0, 64, 28));
        assert_eq!(cps.prototypes[0].source, InputSource::Stat(StatKind::CpsMiddle));
    }

    #[test]
    fn full_keyboard_rows_line_up() {
        let catalog = TemplateCatalog::builtin();
        let full = catalog.get(GroupId::intern("full_keyboard")).unwrap();
        let back = full.prototypes.iter().find(|p| p.label == "BACK").unwrap();
        assert_eq!(back.bounds, Bounds::new(260, 20, 34, 18));
        let right_ctrl = full.prototypes.last().unwrap();
        assert_eq!(right_ctrl.source, InputSource::Key(keycode::RIGHT_CONTROL));
        assert_eq!(right_ctrl.bounds.y, 100);
    }

    #[test]
    fn default_layout_has_five_groups() {
        let catalog = TemplateCatalog::builtin();
        let units = catalog.default_layout();
        let groups = crate::group::build_groups(&units);
        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["wasd", "space", "lmb", "rmb", "cps"]);
    }
}
