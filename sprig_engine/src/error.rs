// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! Only programmer errors in declaration code are reported. Identity
//! collisions and first references to unseen containers are normal operation
//! and never produce an error.

use sprig_draw::DrawError;

/// A misuse of the frame protocol.
///
/// Any of these is fatal to the frame in which it occurs: the identity and
/// layout stacks are at an indeterminate depth, so the frame should be
/// abandoned rather than patched. [`Context::end`](crate::Context::end)
/// discards the frame's commands when it detects an imbalance.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum UsageError {
    /// `begin` was called while a frame was already open.
    #[error("begin called while a frame is already open")]
    FrameAlreadyOpen,
    /// A frame-scoped call was made with no frame open.
    #[error("no frame is open")]
    FrameNotOpen,
    /// `pop_id` was called on an empty identity stack.
    #[error("pop_id called on an empty identity stack")]
    IdStackUnderflow,
    /// A layout call was made with no open container.
    #[error("layout call with no open container")]
    NoLayout,
    /// A container call was made with no open container.
    #[error("container call with no open container")]
    NoContainer,
    /// `pop_clip` was called on an empty clip stack.
    #[error("pop_clip called on an empty clip stack")]
    ClipStackUnderflow,
    /// A stack was not empty when the frame ended.
    #[error("{stack} stack left at depth {depth} at end of frame")]
    Unbalanced {
        /// Which stack: `"container"`, `"id"`, `"layout"`, or `"clip"`.
        stack: &'static str,
        /// Depth it was left at.
        depth: usize,
    },
    /// Command span bookkeeping failed.
    #[error(transparent)]
    Draw(#[from] DrawError),
}

/// Failure to load a style table.
#[cfg(feature = "toml")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input was not a valid style table.
    #[error("invalid style table: {0}")]
    Toml(#[from] toml::de::Error),
}
