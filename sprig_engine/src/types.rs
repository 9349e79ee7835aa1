// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control options and control results.

bitflags::bitflags! {
    /// Per-control and per-container options.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Options: u16 {
        /// Center text horizontally.
        const ALIGN_CENTER = 1 << 0;
        /// Right-align text.
        const ALIGN_RIGHT = 1 << 1;
        /// Take no part in hover, active, or focus resolution.
        const NO_INTERACT = 1 << 2;
        /// Skip the background frame.
        const NO_FRAME = 1 << 3;
        /// Windows: no resize handle.
        const NO_RESIZE = 1 << 4;
        /// Containers: no scrollbars.
        const NO_SCROLL = 1 << 5;
        /// Windows: no close button.
        const NO_CLOSE = 1 << 6;
        /// Windows: no title bar.
        const NO_TITLE = 1 << 7;
        /// Windows: size to content.
        const AUTO_SIZE = 1 << 8;
        /// Windows: close on a press outside, paint above normal containers.
        const POPUP = 1 << 9;
        /// Windows: do not create the container if it does not exist yet.
        const CLOSED = 1 << 10;
        /// Headers and tree nodes: start expanded.
        const EXPANDED = 1 << 11;
    }
}

/// Outcome of declaring a control for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Response<T = ()> {
    /// Nothing happened.
    #[default]
    Unchanged,
    /// The control was clicked (released while hovered, or Return while focused).
    Clicked,
    /// The control's value changed to the carried value.
    Changed(T),
    /// A text field was submitted with Return.
    Submitted,
}

impl<T> Response<T> {
    /// True for [`Response::Clicked`].
    pub fn clicked(&self) -> bool {
        matches!(self, Self::Clicked)
    }

    /// True for [`Response::Submitted`].
    pub fn submitted(&self) -> bool {
        matches!(self, Self::Submitted)
    }

    /// The new value, if it changed.
    pub fn changed(&self) -> Option<&T> {
        match self {
            Self::Changed(v) => Some(v),
            _ => None,
        }
    }
}

/// How a rectangle passed to `layout_set_next` is interpreted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Relative to the container body; advances the cursor like a normal cell.
    Relative,
    /// Absolute screen coordinates; the cursor is left untouched.
    Absolute,
}
