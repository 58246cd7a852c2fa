//! Live input state capability.
//!
//! The host resolves how to read key and mouse state once and hands the
//! overlay painter an `InputQuery`.

use crate::model::{InputSource, MouseButton, StatKind};
use std::collections::VecDeque;

pub trait InputQuery {
    fn is_key_pressed(&self, code: u32) -> bool;
    fn is_mouse_pressed(&self, button: MouseButton) -> bool;
    /// Display text for a stat counter.
    fn stat_value(&self, stat: StatKind) -> String;

    fn is_pressed(&self, source: InputSource) -> bool {
        match source {
            InputSource::Key(code) => self.is_key_pressed(code),
            InputSource::Mouse(button) => self.is_mouse_pressed(button),
            InputSource::Stat(_) => false,
        }
    }
}

/// Input state that reports nothing pressed, used while editing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputQuery for NoInput {
    fn is_key_pressed(&self, _code: u32) -> bool {
        false
    }

    fn is_mouse_pressed(&self, _button: MouseButton) -> bool {
        false
    }

    fn stat_value(&self, _stat: StatKind) -> String {
        "0".to_string()
    }
}

/// Click window for CPS counters.
pub const CLICK_WINDOW_MS: u64 = 1000;

const BUTTONS: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

/// Counts presses per mouse button within the last second.
/// Timestamps are host-supplied milliseconds.
#[derive(Debug, Default, Clone)]
pub struct ClickRateTracker {
    left: VecDeque<u64>,
    right: VecDeque<u64>,
    middle: VecDeque<u64>,
    held: [bool; 3],
    now_ms: u64,
}

impl ClickRateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(button: MouseButton) -> usize {
        match button {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }

    fn queue(&mut self, button: MouseButton) -> &mut VecDeque<u64> {
        match button {
            MouseButton::Left => &mut self.left,
            MouseButton::Right => &mut self.right,
            MouseButton::Middle => &mut self.middle,
        }
    }

    pub fn record_press(&mut self, button: MouseButton, at_ms: u64) {
        self.queue(button).push_back(at_ms);
        self.advance(at_ms);
    }

    /// Read the host's mouse state once per frame. A button counts as a
    /// click on the frame it goes from released to pressed.
    pub fn sample(&mut self, input: &dyn InputQuery, now_ms: u64) {
        for button in BUTTONS {
            let down = input.is_mouse_pressed(button);
            let slot = Self::slot(button);
            if down && !self.held[slot] {
                self.queue(button).push_back(now_ms);
            }
            self.held[slot] = down;
        }
        self.advance(now_ms);
    }

    /// Forget held buttons, e.g. while a menu or the editor is open.
    pub fn release_all(&mut self) {
        self.held = [false; 3];
    }

    /// Drop presses more than a window older than `now_ms`.
    pub fn advance(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;
        for q in [&mut self.left, &mut self.right, &mut self.middle] {
            while q.front().is_some_and(|t| t + CLICK_WINDOW_MS < now) {
                q.pop_front();
            }
        }
    }

    pub fn clicks_per_second(&self, button: MouseButton) -> usize {
        match button {
            MouseButton::Left => self.left.len(),
            MouseButton::Right => self.right.len(),
            MouseButton::Middle => self.middle.len(),
        }
    }

    /// Pair this tracker with the host's key and mouse state.
    pub fn over<'a, Q: InputQuery + ?Sized>(&'a self, input: &'a Q) -> TrackedInput<'a, Q> {
        TrackedInput { input, clicks: self }
    }
}

/// Stats only: keys read as released, mouse buttons as last sampled.
impl InputQuery for ClickRateTracker {
    fn is_key_pressed(&self, _code: u32) -> bool {
        false
    }

    fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.held[Self::slot(button)]
    }

    fn stat_value(&self, stat: StatKind) -> String {
        self.clicks_per_second(stat.button()).to_string()
    }
}

/// Host input with CPS stats answered by a `ClickRateTracker`.
pub struct TrackedInput<'a, Q: ?Sized> {
    input: &'a Q,
    clicks: &'a ClickRateTracker,
}

impl<Q: InputQuery + ?Sized> InputQuery for TrackedInput<'_, Q> {
    fn is_key_pressed(&self, code: u32) -> bool {
        self.input.is_key_pressed(code)
    }

    fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.input.is_mouse_pressed(button)
    }

    fn stat_value(&self, stat: StatKind) -> String {
        self.clicks.stat_value(stat)
    }
}
