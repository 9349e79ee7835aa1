// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed control set.
//!
//! Every control is a free function over `&mut Context` that lays itself out
//! in the next cell, takes part in interaction resolution, emits its draw
//! commands, and reports what happened as a [`Response`].

use alloc::format;
use alloc::string::String;

use sprig_draw::{Icon, Rect, Vec2};

use crate::container::Container;
use crate::context::Context;
use crate::error::UsageError;
use crate::id::Id;
use crate::input::{Keys, MouseButtons};
use crate::layout::AUTO;
use crate::metrics::TextMetrics;
use crate::style::ColorId;
use crate::types::{Options, Response};

/// Single-line text in the next cell.
pub fn label<M: TextMetrics>(ctx: &mut Context<M>, text: &str) -> Result<(), UsageError> {
    let r = ctx.layout_next()?;
    ctx.draw_control_text(text, r, ColorId::Text, Options::empty())
}

/// Word-wrapped text, one row per line, in a nested column.
pub fn text<M: TextMetrics>(ctx: &mut Context<M>, text: &str) -> Result<(), UsageError> {
    let font = ctx.style().font;
    let color = ctx.style().colors.text;
    let line_height = ctx.metrics().text_height(font);
    ctx.layout_begin_column()?;
    ctx.layout_row(&[AUTO], line_height)?;

    let width = ctx.layout_body()?.w;
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate_width = if line.is_empty() {
            ctx.metrics().text_width(font, word)
        } else {
            ctx.metrics().text_width(font, &format!("{line} {word}"))
        };
        if candidate_width > width && !line.is_empty() {
            let r = ctx.layout_next()?;
            ctx.draw_text(font, &line, r.origin(), color);
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        let r = ctx.layout_next()?;
        ctx.draw_text(font, &line, r.origin(), color);
    }
    ctx.layout_end_column()
}

/// A centered push button.
pub fn button<M: TextMetrics>(ctx: &mut Context<M>, label: &str) -> Result<Response, UsageError> {
    button_ex(ctx, label, None, Options::ALIGN_CENTER)
}

/// A push button with an optional icon.
///
/// The identity comes from `label`, or from the icon when the label is empty.
pub fn button_ex<M: TextMetrics>(
    ctx: &mut Context<M>,
    label: &str,
    icon: Option<Icon>,
    opts: Options,
) -> Result<Response, UsageError> {
    let id = match (label.is_empty(), icon) {
        (true, Some(icon)) => ctx.id(&("!icon", icon_code(icon))),
        _ => ctx.id(label),
    };
    let r = ctx.layout_next()?;
    let over = ctx.update_control(id, r, opts);
    let res = if ctx.clicked(id, over) {
        tracing::trace!(?id, label, "button clicked");
        Response::Clicked
    } else {
        Response::Unchanged
    };

    ctx.draw_control_frame(id, r, ColorId::Button, opts);
    if !label.is_empty() {
        ctx.draw_control_text(label, r, ColorId::Text, opts)?;
    }
    if let Some(icon) = icon {
        let color = ctx.style().colors.text;
        ctx.draw_icon(icon, r, color);
    }
    Ok(res)
}

fn icon_code(icon: Icon) -> u32 {
    match icon {
        Icon::Close => 1,
        Icon::Check => 2,
        Icon::Collapsed => 3,
        Icon::Expanded => 4,
        Icon::Custom(n) => 0x100 + n,
    }
}

/// A labeled checkbox. Toggles `state` when clicked.
pub fn checkbox<M: TextMetrics>(
    ctx: &mut Context<M>,
    label: &str,
    state: &mut bool,
) -> Result<Response<bool>, UsageError> {
    let id = ctx.id(label);
    let r = ctx.layout_next()?;
    let tick = Rect::new(r.x, r.y, r.h, r.h);
    let over = ctx.update_control(id, r, Options::empty());
    let res = if ctx.clicked(id, over) {
        *state = !*state;
        tracing::trace!(?id, state = *state, "checkbox toggled");
        Response::Changed(*state)
    } else {
        Response::Unchanged
    };

    ctx.draw_control_frame(id, tick, ColorId::Base, Options::empty());
    if *state {
        let color = ctx.style().colors.text;
        ctx.draw_icon(Icon::Check, tick, color);
    }
    let text_rect = Rect::new(r.x + tick.w, r.y, r.w - tick.w, r.h);
    ctx.draw_control_text(label, text_rect, ColorId::Text, Options::empty())?;
    Ok(res)
}

/// A centered slider showing two decimals.
pub fn slider<M: TextMetrics>(
    ctx: &mut Context<M>,
    value: &mut f32,
    low: f32,
    high: f32,
) -> Result<Response<f32>, UsageError> {
    slider_ex(ctx, value, low, high, 0.0, 2, Options::ALIGN_CENTER)
}

/// A slider over `[low, high]`.
///
/// While the slider is active the value follows the pointer, snapped to
/// multiples of `step` when `step > 0`. The identity comes from the address of
/// `value`, so the bound variable must not move between frames.
pub fn slider_ex<M: TextMetrics>(
    ctx: &mut Context<M>,
    value: &mut f32,
    low: f32,
    high: f32,
    step: f32,
    precision: usize,
    opts: Options,
) -> Result<Response<f32>, UsageError> {
    let id = ctx.id(&(core::ptr::from_ref::<f32>(value) as usize));
    let base = ctx.layout_next()?;
    ctx.update_control(id, base, opts);

    let last = *value;
    let mut v = last;
    let tracking = ctx.active() == Some(id)
        && (ctx.dragging(id) || ctx.input_state().released(MouseButtons::LEFT));
    if tracking && base.w > 0 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Pointer offsets are small screen coordinates."
        )]
        let t = (ctx.input_state().pos().x - base.x) as f32 / base.w as f32;
        v = low + t * (high - low);
        if step > 0.0 {
            v = snap(v, step);
        }
    }
    let (lo, hi) = if low <= high { (low, high) } else { (high, low) };
    v = v.max(lo).min(hi);
    *value = v;

    ctx.draw_control_frame(id, base, ColorId::Base, opts);
    let w = ctx.style().thumb_size;
    let thumb = Rect::new(base.x + thumb_offset(v, low, high, base.w - w), base.y, w, base.h);
    ctx.draw_control_frame(id, thumb, ColorId::Button, opts);
    let text = format!("{v:.precision$}");
    ctx.draw_control_text(&text, base, ColorId::Text, opts)?;

    if v == last {
        Ok(Response::Unchanged)
    } else {
        Ok(Response::Changed(v))
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "The offset is bounded by the slider width."
)]
fn thumb_offset(v: f32, low: f32, high: f32, travel: i32) -> i32 {
    if high == low {
        0
    } else {
        ((v - low) * travel as f32 / (high - low)) as i32
    }
}

/// Round `v` to the nearest multiple of `step`, halves away from zero.
fn snap(v: f32, step: f32) -> f32 {
    let q = v / step;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Slider ranges are far inside i64."
    )]
    let n = if q >= 0.0 {
        (q + 0.5) as i64
    } else {
        (q - 0.5) as i64
    };
    #[allow(clippy::cast_precision_loss, reason = "See above.")]
    let snapped = n as f32 * step;
    snapped
}

/// A single-line text field that keeps focus until Return or a press elsewhere.
pub fn textbox<M: TextMetrics>(
    ctx: &mut Context<M>,
    buf: &mut String,
) -> Result<Response, UsageError> {
    textbox_ex(ctx, buf, Options::empty())
}

/// A single-line text field.
///
/// While focused it appends committed text, deletes a character on Backspace,
/// and on Return reports [`Response::Submitted`] and releases focus. The
/// identity comes from the address of `buf`.
pub fn textbox_ex<M: TextMetrics>(
    ctx: &mut Context<M>,
    buf: &mut String,
    opts: Options,
) -> Result<Response, UsageError> {
    let id = ctx.id(&(core::ptr::from_ref::<String>(buf) as usize));
    let r = ctx.layout_next()?;
    ctx.update_control(id, r, opts);

    let mut res = Response::Unchanged;
    if ctx.focus() == Some(id) {
        let input = ctx.input_state();
        let typed = !input.text().is_empty();
        if typed {
            buf.push_str(input.text());
        }
        let erased = input.key_pressed(Keys::BACKSPACE) && buf.pop().is_some();
        if typed || erased {
            res = Response::Changed(());
        }
        if input.key_pressed(Keys::RETURN) {
            ctx.clear_focus();
            res = Response::Submitted;
        }
    }

    ctx.draw_control_frame(id, r, ColorId::Base, opts);
    if ctx.focus() == Some(id) {
        let font = ctx.style().font;
        let pad = ctx.style().padding;
        let color = ctx.style().colors.text;
        let tw = ctx.metrics().text_width(font, buf);
        let th = ctx.metrics().text_height(font);
        let ofx = r.w - pad - tw - 1;
        let tx = r.x + ofx.min(pad);
        let ty = r.y + (r.h - th) / 2;
        ctx.push_clip(r);
        ctx.draw_text(font, buf, Vec2::new(tx, ty), color);
        ctx.draw_rect(Rect::new(tx + tw, ty, 1, th), color);
        ctx.pop_clip()?;
    } else {
        ctx.draw_control_text(buf, r, ColorId::Text, opts)?;
    }
    Ok(res)
}

/// A collapsible section header. Returns whether it is expanded.
pub fn header<M: TextMetrics>(
    ctx: &mut Context<M>,
    label: &str,
    opts: Options,
) -> Result<bool, UsageError> {
    Ok(header_impl(ctx, label, false, opts)?.is_some())
}

/// A tree node. If expanded, indents and scopes the content that follows,
/// which must be closed with [`end_treenode`].
pub fn begin_treenode<M: TextMetrics>(
    ctx: &mut Context<M>,
    label: &str,
    opts: Options,
) -> Result<bool, UsageError> {
    let Some(id) = header_impl(ctx, label, true, opts)? else {
        return Ok(false);
    };
    let indent = ctx.style().indent;
    ctx.layout.indent(indent)?;
    ctx.ids.push_id(id);
    Ok(true)
}

/// Close an expanded tree node.
pub fn end_treenode<M: TextMetrics>(ctx: &mut Context<M>) -> Result<(), UsageError> {
    let indent = ctx.style().indent;
    ctx.layout.indent(-indent)?;
    ctx.pop_id()?;
    Ok(())
}

/// Shared header logic. Returns the identity if expanded.
fn header_impl<M: TextMetrics>(
    ctx: &mut Context<M>,
    label: &str,
    treenode: bool,
    opts: Options,
) -> Result<Option<Id>, UsageError> {
    let id = ctx.id(label);
    ctx.layout_row(&[AUTO], 0)?;
    let initially = opts.contains(Options::EXPANDED);
    let mut expanded = ctx
        .containers
        .get_or_insert_with(id, |id| Container {
            open: initially,
            ..Container::new(id, Rect::ZERO)
        })
        .open;

    let mut r = ctx.layout_next()?;
    let over = ctx.update_control(id, r, Options::empty());
    if ctx.clicked(id, over) {
        expanded = !expanded;
        if let Some(c) = ctx.containers.get_mut(id) {
            c.open = expanded;
        }
        tracing::trace!(?id, expanded, "header toggled");
    }

    if treenode {
        if ctx.hover() == Some(id) {
            ctx.draw_frame(r, ColorId::ButtonHover);
        }
    } else {
        ctx.draw_control_frame(id, r, ColorId::Button, Options::empty());
    }
    let icon = if expanded {
        Icon::Expanded
    } else {
        Icon::Collapsed
    };
    let color = ctx.style().colors.text;
    ctx.draw_icon(icon, Rect::new(r.x, r.y, r.h, r.h), color);
    let shift = r.h - ctx.style().padding;
    r.x += shift;
    r.w -= shift;
    ctx.draw_control_text(label, r, ColorId::Text, Options::empty())?;

    Ok(expanded.then_some(id))
}
