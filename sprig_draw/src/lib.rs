// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sprig_draw --heading-base-level=0

//! Sprig Draw: the paint-side vocabulary of an immediate-mode UI.
//!
//! ## Overview
//!
//! This crate holds everything a host painter needs to consume a frame: integer geometry
//! ([`Rect`], [`Vec2`]), paint values ([`Color`], [`Icon`], [`FontId`]), the closed
//! [`Command`] set, and the [`CommandBuffer`] that orders a frame's commands by container depth.
//! It does no layout, hit testing, or input handling; see `sprig_engine` for that.
//!
//! ## Commands
//!
//! A frame is a flat list of [`Command`] values: `Clip`, `Rect`, `Text`, `Icon`.
//! Clip commands are always reset to [`Rect::UNCLIPPED`] after the primitive they guard,
//! so the host can paint the list front to back with a single clip register.
//!
//! ## Ordering
//!
//! Root containers bracket their output with spans. [`CommandBuffer::finish`] emits
//! unspanned commands first, then spans by ascending z, then deferred spans (popups) by
//! ascending z. Equal z keeps declaration order.
//!
//! ## Features
//!
//! - `std` (default): enables `std` for dependencies that support it.
//! - `serde`: `Serialize`/`Deserialize` for geometry and commands, for relaying frames
//!   to a remote painter.
//! - `kurbo`: conversions into Kurbo geometry (see [`adapters`]).
//!
//! This crate is `no_std` and uses `alloc`.
//!
//!

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod buffer;
pub mod command;
pub mod types;

pub use buffer::{CommandBuffer, DrawError, Span, SpanId};
pub use command::Command;
pub use types::{Color, FontId, Icon, Rect, Vec2};
