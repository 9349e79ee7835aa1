// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Windows, panels, popups, and scrollbars.
//!
//! Windows and popups are root containers: each brackets its commands in a
//! span that is ordered by the container's z at the end of the frame. Panels
//! nest inside the next layout cell of their parent and share its span.

use sprig_draw::{Icon, Rect, Vec2};

use crate::context::Context;
use crate::error::UsageError;
use crate::id::Id;
use crate::metrics::TextMetrics;
use crate::style::ColorId;
use crate::types::Options;

/// Smallest size the resize handle can shrink a window to.
pub const MIN_WINDOW_SIZE: Vec2 = Vec2::new(96, 64);

#[derive(Copy, Clone, Debug)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn of(self, v: Vec2) -> i32 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
        }
    }

    fn of_mut(self, v: &mut Vec2) -> &mut i32 {
        match self {
            Self::X => &mut v.x,
            Self::Y => &mut v.y,
        }
    }

    fn extent(self, r: Rect) -> i32 {
        match self {
            Self::X => r.w,
            Self::Y => r.h,
        }
    }
}

/// Open a window. Returns `false` (and declares nothing) if it is closed.
///
/// `rect` is only used the first time the window is seen. Every `true` must
/// be matched by [`end_window`].
pub fn begin_window<M: TextMetrics>(
    ctx: &mut Context<M>,
    title: &str,
    rect: Rect,
    opts: Options,
) -> Result<bool, UsageError> {
    ctx.ensure_open()?;
    let id = ctx.ids.id(title);
    if opts.contains(Options::CLOSED) && !ctx.containers.contains(id) {
        return Ok(false);
    }
    let cnt = ctx.containers.get(id, rect);
    if !cnt.open {
        return Ok(false);
    }
    let rect = cnt.rect;

    ctx.ids.push_id(id);
    ctx.begin_root_container(id, opts.contains(Options::POPUP));

    let mut body = rect;
    if !opts.contains(Options::NO_FRAME) {
        ctx.draw_frame(rect, ColorId::WindowBg);
    }

    if !opts.contains(Options::NO_TITLE) {
        let tr = Rect::new(rect.x, rect.y, rect.w, ctx.style().title_height);
        ctx.draw_frame(tr, ColorId::TitleBg);

        let title_id = ctx.ids.id("!title");
        ctx.update_control(title_id, tr, opts);
        ctx.draw_control_text(title, tr, ColorId::TitleText, opts)?;
        if ctx.dragging(title_id) {
            let d = ctx.input.delta();
            if let Some(c) = ctx.containers.get_mut(id) {
                c.rect = c.rect.translate(d);
            }
        }
        body.y += tr.h;
        body.h -= tr.h;

        if !opts.contains(Options::NO_CLOSE) {
            let close_id = ctx.ids.id("!close");
            let r = Rect::new(tr.right() - tr.h, tr.y, tr.h, tr.h);
            let color = ctx.style().colors.title_text;
            ctx.draw_icon(Icon::Close, r, color);
            let over = ctx.update_control(close_id, r, opts);
            if ctx.clicked(close_id, over) {
                if let Some(c) = ctx.containers.get_mut(id) {
                    c.open = false;
                }
                tracing::debug!(?id, "window closed");
            }
        }
    }

    push_container_body(ctx, id, body, opts)?;

    if !opts.contains(Options::NO_RESIZE) {
        let sz = ctx.style().title_height;
        let resize_id = ctx.ids.id("!resize");
        let r = Rect::new(rect.right() - sz, rect.bottom() - sz, sz, sz);
        ctx.update_control(resize_id, r, opts);
        if ctx.dragging(resize_id) {
            let d = ctx.input.delta();
            if let Some(c) = ctx.containers.get_mut(id) {
                c.rect.w = MIN_WINDOW_SIZE.x.max(c.rect.w + d.x);
                c.rect.h = MIN_WINDOW_SIZE.y.max(c.rect.h + d.y);
            }
        }
    }

    if opts.contains(Options::AUTO_SIZE) {
        let r = ctx.layout_body()?;
        if let Some(c) = ctx.containers.get_mut(id) {
            c.rect.w = c.content_size.x + (c.rect.w - r.w);
            c.rect.h = c.content_size.y + (c.rect.h - r.h);
        }
    }

    let body = ctx.containers.find(id).map_or(body, |c| c.body);
    ctx.push_clip(body);
    Ok(true)
}

/// Close the innermost window.
pub fn end_window<M: TextMetrics>(ctx: &mut Context<M>) -> Result<(), UsageError> {
    ctx.pop_clip()?;
    ctx.end_root_container()
}

/// Open a panel in the next layout cell. Must be matched by [`end_panel`].
pub fn begin_panel<M: TextMetrics>(
    ctx: &mut Context<M>,
    name: &str,
    opts: Options,
) -> Result<(), UsageError> {
    ctx.ensure_open()?;
    let id = ctx.ids.push(name);
    let rect = ctx.layout_next()?;
    ctx.containers.get(id, rect).rect = rect;
    if !opts.contains(Options::NO_FRAME) {
        ctx.draw_frame(rect, ColorId::PanelBg);
    }
    ctx.push_container(id);
    push_container_body(ctx, id, rect, opts)?;
    let body = ctx.containers.find(id).map_or(rect, |c| c.body);
    ctx.push_clip(body);
    Ok(())
}

/// Close the innermost panel.
pub fn end_panel<M: TextMetrics>(ctx: &mut Context<M>) -> Result<(), UsageError> {
    ctx.pop_clip()?;
    ctx.pop_container()
}

/// Open the popup `name` at the pointer and bring it to front.
///
/// The popup is declared with [`begin_popup`], in this frame or a later one.
pub fn open_popup<M: TextMetrics>(ctx: &mut Context<M>, name: &str) -> Id {
    let id = ctx.ids.id(name);
    let pos = ctx.input.pos();
    let cnt = ctx.containers.get(id, Rect::ZERO);
    cnt.rect = Rect::new(pos.x, pos.y, 1, 1);
    cnt.open = true;
    ctx.containers.bring_to_front(id);
    ctx.hover_root = Some(id);
    ctx.next_hover_root = Some(id);
    tracing::debug!(?id, "popup opened");
    id
}

/// Declare the popup `name`. Returns `false` unless it has been opened.
///
/// A popup sizes itself to its content, paints above every normal container,
/// and closes when a press lands outside it.
pub fn begin_popup<M: TextMetrics>(ctx: &mut Context<M>, name: &str) -> Result<bool, UsageError> {
    let opts = Options::POPUP
        | Options::AUTO_SIZE
        | Options::NO_RESIZE
        | Options::NO_SCROLL
        | Options::NO_TITLE
        | Options::CLOSED;
    begin_window(ctx, name, Rect::ZERO, opts)
}

/// Close the innermost popup.
pub fn end_popup<M: TextMetrics>(ctx: &mut Context<M>) -> Result<(), UsageError> {
    end_window(ctx)
}

fn push_container_body<M: TextMetrics>(
    ctx: &mut Context<M>,
    id: Id,
    mut body: Rect,
    opts: Options,
) -> Result<(), UsageError> {
    if !opts.contains(Options::NO_SCROLL) {
        scrollbars(ctx, id, &mut body)?;
    }
    let padding = ctx.style().padding;
    let scroll = ctx.containers.find(id).map_or(Vec2::ZERO, |c| c.scroll);
    let style = *ctx.style();
    ctx.layout.begin(body.expand(-padding), scroll, &style);
    if let Some(c) = ctx.containers.get_mut(id) {
        c.body = body;
    }
    Ok(())
}

fn scrollbars<M: TextMetrics>(
    ctx: &mut Context<M>,
    id: Id,
    body: &mut Rect,
) -> Result<(), UsageError> {
    let Some(cnt) = ctx.containers.find(id).copied() else {
        return Ok(());
    };
    let sz = ctx.style().scrollbar_size;
    let pad = ctx.style().padding;
    let cs = Vec2::new(cnt.content_size.x + pad * 2, cnt.content_size.y + pad * 2);

    ctx.push_clip(*body);
    if cs.y > cnt.body.h {
        body.w -= sz;
    }
    if cs.x > cnt.body.w {
        body.h -= sz;
    }
    scrollbar(ctx, id, *body, cs, Axis::Y);
    scrollbar(ctx, id, *body, cs, Axis::X);
    ctx.pop_clip()?;
    Ok(())
}

fn scrollbar<M: TextMetrics>(ctx: &mut Context<M>, id: Id, body: Rect, cs: Vec2, axis: Axis) {
    let span = axis.extent(body);
    let max_scroll = axis.of(cs) - span;
    if max_scroll <= 0 || span <= 0 {
        if let Some(c) = ctx.containers.get_mut(id) {
            *axis.of_mut(&mut c.scroll) = 0;
        }
        return;
    }

    let sz = ctx.style().scrollbar_size;
    let (bar_id, base) = match axis {
        Axis::Y => (
            ctx.ids.id("!scrollbary"),
            Rect::new(body.right(), body.y, sz, body.h),
        ),
        Axis::X => (
            ctx.ids.id("!scrollbarx"),
            Rect::new(body.x, body.bottom(), body.w, sz),
        ),
    };
    ctx.update_control(bar_id, base, Options::empty());

    let dragging = ctx.dragging(bar_id);
    let delta = axis.of(ctx.input.delta());
    let base_len = axis.extent(base);
    let scroll = {
        let Some(c) = ctx.containers.get_mut(id) else {
            return;
        };
        let s = axis.of_mut(&mut c.scroll);
        if dragging && base_len > 0 {
            *s += delta * axis.of(cs) / base_len;
        }
        *s = (*s).clamp(0, max_scroll);
        *s
    };

    ctx.draw_frame(base, ColorId::ScrollBase);
    let thumb_len = ctx
        .style()
        .thumb_size
        .max(base_len * span / axis.of(cs));
    let offset = scroll * (base_len - thumb_len) / max_scroll;
    let thumb = match axis {
        Axis::Y => Rect::new(base.x, base.y + offset, base.w, thumb_len),
        Axis::X => Rect::new(base.x + offset, base.y, thumb_len, base.h),
    };
    ctx.draw_frame(thumb, ColorId::ScrollThumb);

    if ctx.mouse_over(body) {
        ctx.scroll_target = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButtons;
    use crate::metrics::MonospaceMetrics;
    use crate::style::Style;
    use crate::types::Placement;
    use sprig_draw::Color;

    type Ctx = Context<MonospaceMetrics>;

    fn ctx() -> Ctx {
        Context::new(Style::default(), MonospaceMetrics::default())
    }

    fn run(c: &mut Ctx, mut ui: impl FnMut(&mut Ctx) -> Result<(), UsageError>) {
        c.begin().unwrap();
        ui(c).unwrap();
        c.end().unwrap();
    }

    #[test]
    fn closed_window_declares_nothing() {
        let mut c = ctx();
        run(&mut c, |c| {
            if begin_window(c, "w", Rect::new(0, 0, 100, 100), Options::empty())? {
                end_window(c)?;
            }
            Ok(())
        });
        let id = c.id("w");
        c.containers_mut().get_mut(id).unwrap().open = false;
        run(&mut c, |c| {
            assert!(!begin_window(c, "w", Rect::new(0, 0, 100, 100), Options::empty())?);
            Ok(())
        });
        assert!(c.commands().is_empty());
    }

    #[test]
    fn nested_clip_never_exceeds_window() {
        let mut c = ctx();
        run(&mut c, |c| {
            begin_window(c, "w", Rect::new(10, 10, 200, 150), Options::empty())?;
            let window_clip = c.clip();
            c.layout_row(&[300], 50)?;
            begin_panel(c, "p", Options::empty())?;
            assert!(window_clip.contains_rect(&c.clip()));
            end_panel(c)?;
            end_window(c)
        });
    }

    #[test]
    fn title_drag_moves_window() {
        let mut c = ctx();
        let win = Rect::new(0, 0, 200, 200);
        let ui = |c: &mut Ctx| {
            if begin_window(c, "w", win, Options::empty())? {
                end_window(c)?;
            }
            Ok(())
        };
        run(&mut c, ui);
        c.pointer_down(50, 10, MouseButtons::LEFT);
        run(&mut c, ui);
        c.pointer_move(80, 30);
        run(&mut c, ui);
        let id = c.id("w");
        assert_eq!(c.containers().find(id).unwrap().rect.origin(), Vec2::new(30, 20));
    }

    #[test]
    fn press_brings_lower_window_to_front() {
        let mut c = ctx();
        let ui = |c: &mut Ctx| {
            for (name, x) in [("a", 0), ("b", 50)] {
                if begin_window(c, name, Rect::new(x, 0, 100, 100), Options::empty())? {
                    end_window(c)?;
                }
            }
            Ok(())
        };
        run(&mut c, ui);
        let (a, b) = (c.id("a"), c.id("b"));
        assert!(c.containers().find(b).unwrap().z > c.containers().find(a).unwrap().z);

        c.pointer_down(10, 50, MouseButtons::LEFT);
        run(&mut c, ui);
        assert!(c.containers().find(a).unwrap().z > c.containers().find(b).unwrap().z);
    }

    #[test]
    fn popup_paints_after_base_window() {
        let mut c = ctx();
        let popup_mark = Rect::new(6, 6, 3, 3);
        let base_mark = Rect::new(50, 50, 3, 3);
        let ui = |c: &mut Ctx| {
            if begin_window(c, "base", Rect::new(0, 0, 200, 200), Options::empty())? {
                if c.frame() == 0 {
                    open_popup(c, "menu");
                }
                if begin_popup(c, "menu")? {
                    c.draw_rect(popup_mark, Color::rgb(255, 0, 0));
                    end_popup(c)?;
                }
                c.draw_rect(base_mark, Color::rgb(0, 0, 255));
                end_window(c)?;
            }
            Ok(())
        };
        c.pointer_move(5, 5);
        run(&mut c, ui);
        run(&mut c, ui);

        let cmds = c.commands();
        let base_at = cmds
            .iter()
            .position(|cmd| cmd.bounds() == Some(base_mark))
            .expect("base rect drawn");
        let popup_at = cmds
            .iter()
            .position(|cmd| cmd.bounds() == Some(popup_mark))
            .expect("popup rect drawn");
        assert!(popup_at > base_at, "popup declared mid-window still paints last");
        assert_eq!(popup_at, cmds.len() - 1);
    }

    #[test]
    fn popup_closes_on_outside_press() {
        let mut c = ctx();
        let ui = |c: &mut Ctx| {
            if begin_popup(c, "menu")? {
                c.layout_set_next(Rect::new(0, 0, 40, 20), Placement::Relative)?;
                c.layout_next()?;
                end_popup(c)?;
            }
            Ok(())
        };
        c.pointer_move(20, 20);
        run(&mut c, |c| {
            open_popup(c, "menu");
            ui(c)
        });
        run(&mut c, ui);
        let id = c.id("menu");
        assert!(c.containers().find(id).unwrap().open);

        c.pointer_down(300, 300, MouseButtons::LEFT);
        run(&mut c, ui);
        assert!(!c.containers().find(id).unwrap().open);
    }

    #[test]
    fn wheel_scrolls_hovered_overflowing_container() {
        let mut c = ctx();
        let ui = |c: &mut Ctx| {
            if begin_window(c, "w", Rect::new(0, 0, 200, 100), Options::NO_TITLE)? {
                c.layout_row(&[crate::layout::AUTO], 500)?;
                c.layout_next()?;
                end_window(c)?;
            }
            Ok(())
        };
        c.pointer_move(50, 50);
        run(&mut c, ui);
        run(&mut c, ui);
        c.scroll(0, 30);
        run(&mut c, ui);
        let id = c.id("w");
        assert_eq!(c.containers().find(id).unwrap().scroll.y, 30);

        // Clamped to content minus body on the next declaration.
        c.scroll(0, 10_000);
        run(&mut c, ui);
        run(&mut c, ui);
        let cnt = c.containers().find(id).unwrap();
        assert_eq!(cnt.scroll.y, cnt.content_size.y + 2 * 5 - cnt.body.h);
    }

    #[test]
    fn auto_size_follows_content() {
        let mut c = ctx();
        let ui = |c: &mut Ctx| {
            let opts = Options::AUTO_SIZE | Options::NO_TITLE | Options::NO_SCROLL;
            if begin_window(c, "w", Rect::new(0, 0, 10, 10), opts)? {
                c.layout_set_next(Rect::new(0, 0, 120, 40), Placement::Relative)?;
                c.layout_next()?;
                end_window(c)?;
            }
            Ok(())
        };
        run(&mut c, ui);
        run(&mut c, ui);
        let id = c.id("w");
        assert_eq!(c.containers().find(id).unwrap().rect.w, 120 + 2 * 5);
        assert_eq!(c.containers().find(id).unwrap().rect.h, 40 + 2 * 5);
    }
}
