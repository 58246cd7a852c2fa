//! Input abstraction layer.
//!
//! Hosts normalize their mouse and keyboard callbacks into `InputEvent`s.
//! Pointer coordinates are screen pixels.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Keys the editor reacts to. Everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Delete,
    Backspace,
    Other(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64, button: PointerButton },
    PointerMove { x: f64, y: f64, button: PointerButton },
    PointerUp { x: f64, y: f64, button: PointerButton },
    /// Wheel motion; positive `amount` scrolls up.
    Scroll { x: f64, y: f64, amount: f64 },
    KeyDown { key: Key },
    CharTyped { ch: char },
}

impl InputEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PointerButton::Primary,
        }
    }

    pub fn drag(x: f64, y: f64) -> Self {
        Self::PointerMove {
            x,
            y,
            button: PointerButton::Primary,
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::PointerUp {
            x,
            y,
            button: PointerButton::Primary,
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::Scroll { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { button: PointerButton::Primary, .. }
                | Self::PointerMove { button: PointerButton::Primary, .. }
                | Self::PointerUp { button: PointerButton::Primary, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions() {
        assert_eq!(InputEvent::down(1.0, 2.0).position(), Some((1.0, 2.0)));
        assert_eq!(InputEvent::KeyDown { key: Key::Escape }.position(), None);
    }

    #[test]
    fn primary_detection() {
        assert!(InputEvent::drag(0.0, 0.0).is_primary());
        let right = InputEvent::PointerDown {
            x: 0.0,
            y: 0.0,
            button: PointerButton::Secondary,
        };
        assert!(!right.is_primary());
        assert!(!InputEvent::CharTyped { ch: 'a' }.is_primary());
    }
}
