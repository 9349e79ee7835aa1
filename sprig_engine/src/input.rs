// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input coalescing.
//!
//! The host feeds discrete [`InputEvent`]s between frames. They coalesce into
//! one [`InputState`] snapshot per frame:
//!
//! - Pointer position is last-write; the delta is taken against the position
//!   at the end of the previous frame.
//! - Button presses and releases are latched from events and also
//!   edge-detected against last frame's down state, so a press is never lost
//!   even if the host only reports levels.
//! - Scroll and text accumulate.
//!
//! Per-frame latches are drained by [`InputState::end_frame`].

use alloc::string::String;

use sprig_draw::Vec2;

bitflags::bitflags! {
    /// Pointer buttons.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MouseButtons: u8 {
        /// Primary button, or a touch contact.
        const LEFT = 1 << 0;
        /// Secondary button.
        const RIGHT = 1 << 1;
        /// Middle button.
        const MIDDLE = 1 << 2;
    }
}

bitflags::bitflags! {
    /// Keys the engine reacts to.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Keys: u8 {
        /// Shift modifier.
        const SHIFT = 1 << 0;
        /// Control modifier.
        const CTRL = 1 << 1;
        /// Alt modifier.
        const ALT = 1 << 2;
        /// Delete the character before the cursor.
        const BACKSPACE = 1 << 3;
        /// Submit / activate.
        const RETURN = 1 << 4;
        /// Cycle focus.
        const TAB = 1 << 5;
    }
}

/// One raw input event from the host.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", content = "data", rename_all = "snake_case")
)]
pub enum InputEvent {
    /// The pointer moved to a position.
    PointerMove(Vec2),
    /// A button went down at a position.
    PointerDown {
        /// Pointer position.
        pos: Vec2,
        /// Which button.
        button: MouseButtons,
    },
    /// A button went up at a position.
    PointerUp {
        /// Pointer position.
        pos: Vec2,
        /// Which button.
        button: MouseButtons,
    },
    /// Wheel or pan delta.
    Scroll(Vec2),
    /// Keys went down.
    KeyDown(Keys),
    /// Keys went up.
    KeyUp(Keys),
    /// Committed text input.
    Text(String),
}

/// Coalesced input for one frame.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    pos: Vec2,
    last_pos: Vec2,
    delta: Vec2,

    down: MouseButtons,
    last_down: MouseButtons,
    press_latch: MouseButtons,
    release_latch: MouseButtons,
    pressed: MouseButtons,
    released: MouseButtons,

    scroll: Vec2,
    keys_down: Keys,
    keys_pressed: Keys,
    text: String,
}

impl InputState {
    /// Create an idle input state with the pointer at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the pending snapshot.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove(pos) => self.pos = pos,
            InputEvent::PointerDown { pos, button } => {
                self.pos = pos;
                self.down |= button;
                self.press_latch |= button;
            }
            InputEvent::PointerUp { pos, button } => {
                self.pos = pos;
                self.down &= !button;
                self.release_latch |= button;
            }
            InputEvent::Scroll(d) => self.scroll += d,
            InputEvent::KeyDown(k) => {
                self.keys_down |= k;
                self.keys_pressed |= k;
            }
            InputEvent::KeyUp(k) => self.keys_down &= !k,
            InputEvent::Text(t) => self.text.push_str(&t),
        }
    }

    /// Capture this frame's edges and pointer delta.
    pub fn begin_frame(&mut self) {
        self.delta = self.pos - self.last_pos;
        self.pressed = self.press_latch | (self.down & !self.last_down);
        self.released = self.release_latch | (self.last_down & !self.down);
    }

    /// Drain the per-frame latches and remember this frame's levels.
    pub fn end_frame(&mut self) {
        self.press_latch = MouseButtons::empty();
        self.release_latch = MouseButtons::empty();
        self.pressed = MouseButtons::empty();
        self.released = MouseButtons::empty();
        self.keys_pressed = Keys::empty();
        self.scroll = Vec2::ZERO;
        self.text.clear();
        self.last_pos = self.pos;
        self.last_down = self.down;
    }

    /// Pointer position.
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Pointer movement since the end of the previous frame.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Whether any of `buttons` is held.
    pub fn is_down(&self, buttons: MouseButtons) -> bool {
        self.down.intersects(buttons)
    }

    /// Whether any of `buttons` went down this frame.
    pub fn pressed(&self, buttons: MouseButtons) -> bool {
        self.pressed.intersects(buttons)
    }

    /// Whether any of `buttons` went up this frame.
    pub fn released(&self, buttons: MouseButtons) -> bool {
        self.released.intersects(buttons)
    }

    /// Scroll accumulated since the previous frame.
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Whether any of `keys` is held.
    pub fn key_down(&self, keys: Keys) -> bool {
        self.keys_down.intersects(keys)
    }

    /// Whether any of `keys` went down since the previous frame.
    pub fn key_pressed(&self, keys: Keys) -> bool {
        self.keys_pressed.intersects(keys)
    }

    /// Text committed since the previous frame.
    pub fn text(&self) -> &str {
        &self.text
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pointer_down_decodes_from_json() {
        let ev: InputEvent = serde_json::from_str(
            r#"{"type":"pointer_down","data":{"pos":{"x":3,"y":4},"button":"LEFT"}}"#,
        )
        .unwrap();
        assert_eq!(
            ev,
            InputEvent::PointerDown {
                pos: Vec2::new(3, 4),
                button: MouseButtons::LEFT,
            }
        );
    }
}
