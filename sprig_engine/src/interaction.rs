// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover, focus, and active resolution.
//!
//! ## Model
//!
//! While a frame is declared, each interactive control offers a hit if the
//! pointer lies inside its visible rect. Root containers offer hits too, as
//! occluders. At the end of the frame [`Interaction::resolve`] ranks the hits
//! by z; equal z resolves to the one declared last, the same way a paint
//! order would. If the winner is a container, the pointer is over empty
//! window space and nothing is hovered.
//!
//! - **Hover** is recomputed from scratch every frame.
//! - **Active** is set on press to the hovered control and held while the
//!   button stays down, wherever the pointer goes. It clears on the frame the
//!   release is observed.
//! - **Focus** is set on press to the hovered control, moved by Tab and
//!   Shift+Tab, and cleared by a press that hits no control or when its
//!   control is not declared.
//!
//! While a control is active, no other control can become hovered.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::id::Id;
use crate::input::{InputState, Keys, MouseButtons};

/// What offered a hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitKind {
    /// A root container; occludes controls beneath it.
    Container,
    /// An interactive control.
    Widget,
}

#[derive(Copy, Clone, Debug)]
struct Hit {
    id: Id,
    z: i32,
    kind: HitKind,
}

/// Changes produced by one [`Interaction::resolve`] pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Transitions {
    /// The control that became active this frame.
    pub activated: Option<Id>,
    /// The control that stopped being active this frame.
    pub deactivated: Option<Id>,
    /// Whether hover moved.
    pub hover_changed: bool,
    /// Whether focus moved.
    pub focus_changed: bool,
}

/// The interaction record plus the current frame's scratch.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    hover: Option<Id>,
    focus: Option<Id>,
    active: Option<Id>,

    hits: Vec<Hit>,
    seen: BTreeSet<Id>,
    focusables: Vec<Id>,
    focusable_set: BTreeSet<Id>,
}

impl Interaction {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the per-frame scratch. Hover, focus, and active persist.
    pub fn begin_frame(&mut self) {
        self.hits.clear();
        self.seen.clear();
        self.focusables.clear();
        self.focusable_set.clear();
    }

    /// Mark `id` as declared this frame. Returns `false` if it already was.
    ///
    /// A repeated identity is a collision between two declarations; both stay
    /// in play and the later one wins wherever they compete.
    pub fn touch(&mut self, id: Id) -> bool {
        let first = self.seen.insert(id);
        if !first {
            tracing::debug!(?id, "identity declared twice in one frame");
        }
        first
    }

    /// Whether `id` has been declared this frame.
    pub fn was_declared(&self, id: Id) -> bool {
        self.seen.contains(&id)
    }

    /// Record that the pointer lies over `id` at depth `z`.
    ///
    /// Widget hits are ignored while a different control is active.
    pub fn offer_hit(&mut self, id: Id, z: i32, kind: HitKind) {
        if kind == HitKind::Widget && self.active.is_some_and(|a| a != id) {
            return;
        }
        self.hits.push(Hit { id, z, kind });
    }

    /// Register `id` as able to take focus, in Tab order.
    pub fn offer_focusable(&mut self, id: Id) {
        if self.focusable_set.insert(id) {
            self.focusables.push(id);
        }
    }

    /// Hovered control as of the last resolve.
    pub fn hovered(&self) -> Option<Id> {
        self.hover
    }

    /// Focused control.
    pub fn focused(&self) -> Option<Id> {
        self.focus
    }

    /// Active (pressed and held) control.
    pub fn active(&self) -> Option<Id> {
        self.active
    }

    /// Whether `id` is hovered.
    pub fn is_hovered(&self, id: Id) -> bool {
        self.hover == Some(id)
    }

    /// Whether `id` has focus.
    pub fn is_focused(&self, id: Id) -> bool {
        self.focus == Some(id)
    }

    /// Whether `id` is active.
    pub fn is_active(&self, id: Id) -> bool {
        self.active == Some(id)
    }

    /// Give focus to `id`.
    pub fn set_focus(&mut self, id: Id) {
        if self.focus != Some(id) {
            tracing::debug!(?id, "focus set");
        }
        self.focus = Some(id);
    }

    /// Drop focus.
    pub fn clear_focus(&mut self) {
        if let Some(id) = self.focus.take() {
            tracing::debug!(?id, "focus cleared");
        }
    }

    /// The winning hit: highest z, ties to the last offered.
    fn top_hit(&self) -> Option<Hit> {
        self.hits.iter().copied().max_by_key(|h| h.z)
    }

    /// Resolve the frame's hits and input into the next interaction record.
    pub fn resolve(&mut self, input: &InputState) -> Transitions {
        let prev_hover = self.hover;
        let prev_focus = self.focus;
        let prev_active = self.active;

        if self.active.is_some_and(|a| !self.focusable_set.contains(&a)) {
            self.active = None;
        }
        if self.focus.is_some_and(|f| !self.focusable_set.contains(&f)) {
            self.focus = None;
        }

        self.hover = self
            .top_hit()
            .filter(|h| h.kind == HitKind::Widget)
            .map(|h| h.id);

        // A release coalesced with a later press ends the old hold first.
        if input.released(MouseButtons::LEFT) {
            self.active = None;
        }
        if input.pressed(MouseButtons::LEFT) {
            match self.hover {
                Some(h) => {
                    self.active = Some(h);
                    if self.focusable_set.contains(&h) {
                        self.focus = Some(h);
                    }
                }
                None => self.focus = None,
            }
        }
        if !input.is_down(MouseButtons::LEFT) {
            self.active = None;
        }

        if input.key_pressed(Keys::TAB) && !self.focusables.is_empty() {
            let n = self.focusables.len();
            let back = input.key_down(Keys::SHIFT);
            let at = self
                .focus
                .and_then(|f| self.focusables.iter().position(|x| *x == f));
            let next = match (at, back) {
                (Some(i), false) => (i + 1) % n,
                (Some(i), true) => (i + n - 1) % n,
                (None, false) => 0,
                (None, true) => n - 1,
            };
            self.focus = Some(self.focusables[next]);
        }

        let t = Transitions {
            activated: self.active.filter(|_| self.active != prev_active),
            deactivated: prev_active.filter(|_| self.active != prev_active),
            hover_changed: self.hover != prev_hover,
            focus_changed: self.focus != prev_focus,
        };
        if t.focus_changed {
            tracing::debug!(from = ?prev_focus, to = ?self.focus, "focus changed");
        }
        if t.activated.is_some() || t.deactivated.is_some() {
            tracing::trace!(from = ?prev_active, to = ?self.active, "active changed");
        }
        t
    }
}
