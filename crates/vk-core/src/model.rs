use crate::bounds::Bounds;
use crate::color::Argb;
use crate::id::GroupId;
use serde::{Deserialize, Serialize};

// ─── Input sources ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Live counters a unit can display instead of a key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    /// Left clicks per second.
    Cps,
    CpsRight,
    CpsMiddle,
}

impl StatKind {
    /// The mouse button whose presses this counter tracks.
    pub const fn button(self) -> MouseButton {
        match self {
            StatKind::Cps => MouseButton::Left,
            StatKind::CpsRight => MouseButton::Right,
            StatKind::CpsMiddle => MouseButton::Middle,
        }
    }
}

/// What a unit reflects: a keyboard key (GLFW key code), a mouse button,
/// or a stat counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    Key(u32),
    Mouse(MouseButton),
    Stat(StatKind),
}

impl InputSource {
    pub const fn is_stat(&self) -> bool {
        matches!(self, InputSource::Stat(_))
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// The four color slots every unit draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTarget {
    Fill,
    Pressed,
    Border,
    Text,
}

impl ColorTarget {
    pub const ALL: [ColorTarget; 4] = [
        ColorTarget::Fill,
        ColorTarget::Pressed,
        ColorTarget::Border,
        ColorTarget::Text,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ColorTarget::Fill => "Fill",
            ColorTarget::Pressed => "Pressed",
            ColorTarget::Border => "Outline",
            ColorTarget::Text => "Text",
        }
    }
}

/// Optional per-unit (or per-group) color overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorOverrides {
    pub fill: Option<Argb>,
    pub pressed: Option<Argb>,
    pub border: Option<Argb>,
    pub text: Option<Argb>,
}

impl ColorOverrides {
    pub const fn get(&self, target: ColorTarget) -> Option<Argb> {
        match target {
            ColorTarget::Fill => self.fill,
            ColorTarget::Pressed => self.pressed,
            ColorTarget::Border => self.border,
            ColorTarget::Text => self.text,
        }
    }

    pub fn set(&mut self, target: ColorTarget, color: Option<Argb>) {
        let slot = match target {
            ColorTarget::Fill => &mut self.fill,
            ColorTarget::Pressed => &mut self.pressed,
            ColorTarget::Border => &mut self.border,
            ColorTarget::Text => &mut self.text,
        };
        *slot = color;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        ColorTarget::ALL.iter().all(|t| self.get(*t).is_none())
    }
}

/// Global default colors, the last level of color resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub fill: Argb,
    pub pressed: Argb,
    pub border: Argb,
    pub text: Argb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            fill: Argb(0x8000_0000),
            pressed: Argb(0xB0FF_FFFF),
            border: Argb(0xFF00_0000),
            text: Argb::WHITE,
        }
    }
}

impl Palette {
    pub const fn get(&self, target: ColorTarget) -> Argb {
        match target {
            ColorTarget::Fill => self.fill,
            ColorTarget::Pressed => self.pressed,
            ColorTarget::Border => self.border,
            ColorTarget::Text => self.text,
        }
    }
}

// ─── Units ───────────────────────────────────────────────────────────────

/// Stable address of a unit inside `OverlayConfig::units`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitHandle(pub usize);

/// One rectangular indicator on the overlay, in overlay coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub label: String,
    pub source: InputSource,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default = "visible_default")]
    pub visible: bool,
    #[serde(default)]
    pub group: GroupId,
    #[serde(default, skip_serializing_if = "ColorOverrides::is_empty")]
    pub colors: ColorOverrides,
}

fn visible_default() -> bool {
    true
}

impl Unit {
    pub fn new(label: impl Into<String>, source: InputSource, bounds: Bounds, group: GroupId) -> Self {
        Self {
            label: label.into(),
            source,
            x: bounds.x,
            y: bounds.y,
            width: bounds.width,
            height: bounds.height,
            visible: true,
            group,
            colors: ColorOverrides::default(),
        }
    }

    pub const fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_bounds(&mut self, b: Bounds) {
        self.x = b.x;
        self.y = b.y;
        self.width = b.width;
        self.height = b.height;
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}
