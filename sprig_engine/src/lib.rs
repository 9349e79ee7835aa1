// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sprig_engine --heading-base-level=0

//! Sprig Engine: a small immediate-mode UI core.
//!
//! ## Overview
//!
//! The host re-declares its whole interface every frame. The engine keeps only the
//! state that must outlive a frame (container geometry, scroll, z-order, hover,
//! focus, and the active control) and turns each declaration pass into a flat list of
//! [`Command`](sprig_draw::Command) values for the host to paint.
//! It does no rasterization and no font shaping: text is measured through a
//! host-supplied [`TextMetrics`] implementation.
//!
//! ## Frame lifecycle
//!
//! 1) Feed input between frames with [`Context::input`] or the shorthand helpers.
//! 2) [`Context::begin`] snapshots the input and opens a frame.
//! 3) Declare windows, panels, popups, and controls (see [`window`] and [`controls`]).
//! 4) [`Context::end`] checks that every stack is balanced, resolves hover, focus, and
//!    the active control from this frame's hits, orders root containers by z, and
//!    exposes the result through [`Context::commands`].
//!
//! ## Identity
//!
//! Controls are keyed by an [`Id`] hashed from a seed (usually the label) and the
//! current [`IdStack`] scope, so the same label inside two windows yields two ids.
//! Two controls declaring the same id in one frame is a host bug; the later one wins.
//!
//! ## Interaction
//!
//! Hit candidates are collected during declaration and resolved once at
//! [`Context::end`]. The topmost candidate wins; a container in front of a control
//! occludes it. Results are visible to the next frame's declarations.
//!
//! ## Minimal example
//!
//! ```
//! use sprig_engine::controls::button;
//! use sprig_engine::window::{begin_window, end_window};
//! use sprig_engine::{Context, MonospaceMetrics, Options, Rect, Style};
//!
//! let mut ctx = Context::new(Style::default(), MonospaceMetrics::default());
//! ctx.begin().unwrap();
//! if begin_window(&mut ctx, "Demo", Rect::new(10, 10, 200, 120), Options::empty()).unwrap() {
//!     if button(&mut ctx, "OK").unwrap().clicked() {
//!         // react to the click
//!     }
//!     end_window(&mut ctx).unwrap();
//! }
//! ctx.end().unwrap();
//! assert!(!ctx.commands().is_empty());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` for dependencies that support it.
//! - `serde`: serialization for [`Style`], input events, and draw commands.
//! - `toml`: [`Style::from_toml_str`] for loading a theme file.
//! - `kurbo`: forwards to `sprig_draw`'s Kurbo adapters.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod container;
pub mod context;
pub mod controls;
pub mod error;
pub mod id;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod metrics;
pub mod style;
pub mod types;
pub mod window;

pub use container::{Container, ContainerRegistry};
pub use context::Context;
#[cfg(feature = "toml")]
pub use error::ConfigError;
pub use error::UsageError;
pub use id::{Id, IdSeed, IdStack};
pub use input::{InputEvent, InputState, Keys, MouseButtons};
pub use interaction::{HitKind, Interaction, Transitions};
pub use layout::{AUTO, ClipStack, Clipping, LayoutStack};
pub use metrics::{MonospaceMetrics, TextMetrics};
pub use style::{ColorId, Palette, Style};
pub use types::{Options, Placement, Response};

pub use sprig_draw::{Color, Command, CommandBuffer, FontId, Icon, Rect, Vec2};
