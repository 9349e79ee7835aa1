// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame orchestrator.
//!
//! A [`Context`] is either idle or has one frame open. Between frames the
//! host feeds input; [`Context::begin`] snapshots it and opens a frame;
//! declaration code lays out and draws controls; [`Context::end`] checks
//! that every stack is balanced, resolves interaction, orders the command
//! spans, and drains the input latches.

use alloc::vec::Vec;

use sprig_draw::{Color, Command, CommandBuffer, FontId, Icon, Rect, SpanId, Vec2};

use crate::container::{Container, ContainerRegistry};
use crate::error::UsageError;
use crate::id::{Id, IdSeed, IdStack};
use crate::input::{InputEvent, InputState, Keys, MouseButtons};
use crate::interaction::{HitKind, Interaction};
use crate::layout::{ClipStack, Clipping, LayoutStack};
use crate::metrics::TextMetrics;
use crate::style::{ColorId, Style};
use crate::types::{Options, Placement};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FrameState {
    Idle,
    Open,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct OpenContainer {
    pub(crate) id: Id,
    pub(crate) root: bool,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct RootEntry {
    pub(crate) id: Id,
    pub(crate) span: SpanId,
    pub(crate) popup: bool,
}

/// Owns all engine state and exposes the declaration API.
#[derive(Debug)]
pub struct Context<M> {
    style: Style,
    metrics: M,
    state: FrameState,
    frame: u64,

    pub(crate) ids: IdStack,
    pub(crate) layout: LayoutStack,
    pub(crate) clips: ClipStack,
    pub(crate) containers: ContainerRegistry,
    pub(crate) container_stack: Vec<OpenContainer>,
    pub(crate) roots: Vec<RootEntry>,
    last_roots: Vec<Id>,
    pub(crate) hover_root: Option<Id>,
    pub(crate) next_hover_root: Option<Id>,
    pub(crate) scroll_target: Option<Id>,

    pub(crate) input: InputState,
    pub(crate) interaction: Interaction,
    pub(crate) commands: CommandBuffer,
}

impl<M: TextMetrics> Context<M> {
    /// Create an idle context.
    pub fn new(style: Style, metrics: M) -> Self {
        Self {
            style,
            metrics,
            state: FrameState::Idle,
            frame: 0,
            ids: IdStack::new(),
            layout: LayoutStack::new(),
            clips: ClipStack::new(),
            containers: ContainerRegistry::new(),
            container_stack: Vec::new(),
            roots: Vec::new(),
            last_roots: Vec::new(),
            hover_root: None,
            next_hover_root: None,
            scroll_target: None,
            input: InputState::new(),
            interaction: Interaction::new(),
            commands: CommandBuffer::new(),
        }
    }

    /// The style table.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// The host text metrics.
    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Number of frames completed successfully.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether a frame is open.
    pub fn is_open(&self) -> bool {
        self.state == FrameState::Open
    }

    // --- input feed ---

    /// Feed one raw event. Call between frames.
    pub fn input(&mut self, event: InputEvent) {
        self.input.apply(event);
    }

    /// The pointer moved.
    pub fn pointer_move(&mut self, x: i32, y: i32) {
        self.input(InputEvent::PointerMove(Vec2::new(x, y)));
    }

    /// A button went down.
    pub fn pointer_down(&mut self, x: i32, y: i32, button: MouseButtons) {
        self.input(InputEvent::PointerDown {
            pos: Vec2::new(x, y),
            button,
        });
    }

    /// A button went up.
    pub fn pointer_up(&mut self, x: i32, y: i32, button: MouseButtons) {
        self.input(InputEvent::PointerUp {
            pos: Vec2::new(x, y),
            button,
        });
    }

    /// Wheel or pan.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        self.input(InputEvent::Scroll(Vec2::new(dx, dy)));
    }

    /// Keys went down.
    pub fn key_down(&mut self, keys: Keys) {
        self.input(InputEvent::KeyDown(keys));
    }

    /// Keys went up.
    pub fn key_up(&mut self, keys: Keys) {
        self.input(InputEvent::KeyUp(keys));
    }

    /// Text was committed.
    pub fn text(&mut self, text: &str) {
        self.input(InputEvent::Text(text.into()));
    }

    /// This frame's coalesced input.
    pub fn input_state(&self) -> &InputState {
        &self.input
    }

    // --- frame protocol ---

    /// Open a frame.
    pub fn begin(&mut self) -> Result<(), UsageError> {
        if self.is_open() {
            return Err(UsageError::FrameAlreadyOpen);
        }
        self.input.begin_frame();
        self.commands.clear();
        self.interaction.begin_frame();
        self.roots.clear();
        self.scroll_target = None;
        self.next_hover_root = None;
        self.hover_root = self
            .containers
            .topmost_at(&self.last_roots, self.input.pos());
        self.state = FrameState::Open;
        tracing::debug!(frame = self.frame + 1, "begin frame");
        Ok(())
    }

    /// Close the frame and produce its command list.
    ///
    /// If any stack is unbalanced the frame is abandoned: its commands are
    /// discarded, every stack is reset, input is drained, and the error is
    /// returned. The frame counter only advances on success.
    pub fn end(&mut self) -> Result<(), UsageError> {
        if !self.is_open() {
            return Err(UsageError::FrameNotOpen);
        }
        if let Err(err) = self.check_balanced() {
            tracing::error!(%err, frame = self.frame + 1, "abandoning frame");
            self.abandon();
            return Err(err);
        }

        if let Some(target) = self.scroll_target {
            let delta = self.input.scroll();
            if let Some(c) = self.containers.get_mut(target) {
                c.scroll += delta;
            }
        }

        let t = self.interaction.resolve(&self.input);
        if t.hover_changed {
            tracing::trace!(hover = ?self.interaction.hovered(), "hover changed");
        }

        if self.input.pressed(MouseButtons::LEFT) {
            if let Some(id) = self.next_hover_root {
                let last_z = self.containers.last_z();
                if self.containers.find(id).is_some_and(|c| c.z < last_z) {
                    self.containers.bring_to_front(id);
                }
            }
            for root in &self.roots {
                if root.popup && self.hover_root != Some(root.id) {
                    if let Some(c) = self.containers.get_mut(root.id) {
                        c.open = false;
                        tracing::debug!(id = ?root.id, "popup closed by outside press");
                    }
                }
            }
        }

        for root in &self.roots {
            if let Some(c) = self.containers.find(root.id) {
                self.commands.set_span_z(root.span, c.z);
            }
        }
        if let Err(err) = self.commands.finish() {
            self.abandon();
            return Err(err.into());
        }

        self.last_roots = self.roots.iter().map(|r| r.id).collect();
        self.input.end_frame();
        self.frame += 1;
        self.state = FrameState::Idle;
        tracing::debug!(
            frame = self.frame,
            commands = self.commands.commands().len(),
            "end frame"
        );
        Ok(())
    }

    fn check_balanced(&self) -> Result<(), UsageError> {
        let depths = [
            ("container", self.container_stack.len()),
            ("id", self.ids.depth()),
            ("layout", self.layout.depth()),
            ("clip", self.clips.depth()),
        ];
        match depths.into_iter().find(|(_, depth)| *depth != 0) {
            Some((stack, depth)) => Err(UsageError::Unbalanced { stack, depth }),
            None => Ok(()),
        }
    }

    fn abandon(&mut self) {
        self.commands.clear();
        self.ids.clear();
        self.layout.clear();
        self.clips.clear();
        self.container_stack.clear();
        self.roots.clear();
        self.input.end_frame();
        self.state = FrameState::Idle;
    }

    /// The finished command list of the last successful frame.
    pub fn commands(&self) -> &[Command] {
        self.commands.commands()
    }

    pub(crate) fn ensure_open(&self) -> Result<(), UsageError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(UsageError::FrameNotOpen)
        }
    }

    // --- identity ---

    /// Hash `seed` under the current scope.
    pub fn id<S: IdSeed + ?Sized>(&mut self, seed: &S) -> Id {
        self.ids.id(seed)
    }

    /// Enter a scope.
    pub fn push_id<S: IdSeed + ?Sized>(&mut self, seed: &S) -> Id {
        self.ids.push(seed)
    }

    /// Leave the innermost scope.
    pub fn pop_id(&mut self) -> Result<Id, UsageError> {
        self.ids.pop()
    }

    // --- containers ---

    /// Container records.
    pub fn containers(&self) -> &ContainerRegistry {
        &self.containers
    }

    /// Container records, mutably; e.g. to open a window or set its scroll.
    pub fn containers_mut(&mut self) -> &mut ContainerRegistry {
        &mut self.containers
    }

    /// The innermost open container.
    pub fn current_container(&self) -> Result<&Container, UsageError> {
        self.container_stack
            .last()
            .and_then(|c| self.containers.find(c.id))
            .ok_or(UsageError::NoContainer)
    }

    /// The root container that owns the innermost open container.
    fn current_root(&self) -> Option<Id> {
        self.container_stack
            .iter()
            .rev()
            .find(|c| c.root)
            .map(|c| c.id)
    }

    /// Container the pointer is over as of the start of the frame.
    pub fn hover_root(&self) -> Option<Id> {
        self.hover_root
    }

    pub(crate) fn begin_root_container(&mut self, id: Id, popup: bool) {
        let pos = self.input.pos();
        let (rect, z) = self
            .containers
            .find(id)
            .map_or((Rect::ZERO, 0), |c| (c.rect, c.z));
        let span = self.commands.begin_span(z, popup);
        if let Some(c) = self.containers.get_mut(id) {
            c.span = Some(span);
        }
        self.container_stack.push(OpenContainer { id, root: true });
        self.roots.push(RootEntry { id, span, popup });

        if rect.contains(pos) {
            let beats = match self.next_hover_root.and_then(|h| self.containers.find(h)) {
                Some(current) => z > current.z,
                None => true,
            };
            if beats {
                self.next_hover_root = Some(id);
            }
            self.interaction.offer_hit(id, z, HitKind::Container);
        }
        self.clips.push_unclipped();
    }

    pub(crate) fn end_root_container(&mut self) -> Result<(), UsageError> {
        self.clips.pop()?;
        self.commands.end_span()?;
        self.pop_container()
    }

    pub(crate) fn push_container(&mut self, id: Id) {
        self.container_stack.push(OpenContainer { id, root: false });
    }

    pub(crate) fn pop_container(&mut self) -> Result<(), UsageError> {
        let open = self.container_stack.pop().ok_or(UsageError::NoContainer)?;
        let frame = self.layout.end()?;
        if let Some(c) = self.containers.get_mut(open.id) {
            c.content_size = frame.content_size();
        }
        self.ids.pop()?;
        Ok(())
    }

    // --- layout ---

    /// Start a row with a column template; see [`LayoutStack::row`].
    pub fn layout_row(&mut self, widths: &[i32], height: i32) -> Result<(), UsageError> {
        self.layout.row(widths, height, &self.style)
    }

    /// Cell width for rows with an empty template.
    pub fn layout_width(&mut self, width: i32) -> Result<(), UsageError> {
        self.layout.set_width(width)
    }

    /// Height of the current row template's cells.
    pub fn layout_height(&mut self, height: i32) -> Result<(), UsageError> {
        self.layout.set_height(height)
    }

    /// The next cell.
    pub fn layout_next(&mut self) -> Result<Rect, UsageError> {
        self.ensure_open()?;
        self.layout.next(&self.style)
    }

    /// Override the next cell.
    pub fn layout_set_next(&mut self, rect: Rect, placement: Placement) -> Result<(), UsageError> {
        self.layout.set_next(rect, placement)
    }

    /// Nest a column inside the next cell.
    pub fn layout_begin_column(&mut self) -> Result<(), UsageError> {
        self.layout.begin_column(&self.style)
    }

    /// Close a column.
    pub fn layout_end_column(&mut self) -> Result<(), UsageError> {
        self.layout.end_column()
    }

    /// Body of the innermost layout cursor.
    pub fn layout_body(&self) -> Result<Rect, UsageError> {
        Ok(self.layout.top()?.body())
    }

    // --- clipping ---

    /// Push a clip intersected with the current one.
    pub fn push_clip(&mut self, rect: Rect) {
        self.clips.push(rect);
    }

    /// Pop the innermost clip.
    pub fn pop_clip(&mut self) -> Result<Rect, UsageError> {
        self.clips.pop()
    }

    /// The current clip.
    pub fn clip(&self) -> Rect {
        self.clips.current()
    }

    /// Classify `rect` against the current clip.
    pub fn check_clip(&self, rect: Rect) -> Clipping {
        self.clips.check(rect)
    }

    // --- interaction ---

    /// Hovered control as of the end of the previous frame.
    pub fn hover(&self) -> Option<Id> {
        self.interaction.hovered()
    }

    /// Focused control.
    pub fn focus(&self) -> Option<Id> {
        self.interaction.focused()
    }

    /// Active control.
    pub fn active(&self) -> Option<Id> {
        self.interaction.active()
    }

    /// Give focus to `id`.
    pub fn set_focus(&mut self, id: Id) {
        self.interaction.set_focus(id);
    }

    /// Drop focus.
    pub fn clear_focus(&mut self) {
        self.interaction.clear_focus();
    }

    /// Whether the pointer is over `rect`, inside the current clip, and within
    /// the hover root.
    pub fn mouse_over(&self, rect: Rect) -> bool {
        let pos = self.input.pos();
        let in_root = match self.current_root() {
            Some(root) => self.hover_root == Some(root),
            None => true,
        };
        rect.contains(pos) && self.clips.current().contains(pos) && in_root
    }

    /// Declare an interactive control for this frame.
    ///
    /// Marks `id` declared, offers a hit if the pointer is over the visible
    /// part of `rect`, and registers it for focus. Returns
    /// [`mouse_over`](Self::mouse_over) for `rect`.
    pub fn update_control(&mut self, id: Id, rect: Rect, opts: Options) -> bool {
        self.interaction.touch(id);
        if opts.contains(Options::NO_INTERACT) {
            return false;
        }
        let pos = self.input.pos();
        if rect.intersect(&self.clips.current()).contains(pos) {
            let z = self
                .current_root()
                .and_then(|r| self.containers.find(r))
                .map_or(0, |c| c.z);
            self.interaction.offer_hit(id, z, HitKind::Widget);
        }
        self.interaction.offer_focusable(id);
        self.mouse_over(rect)
    }

    /// Whether `id` was clicked this frame.
    ///
    /// A click is the release of the active control while the pointer is still
    /// over it, or Return while it has focus.
    pub fn clicked(&self, id: Id, mouse_over: bool) -> bool {
        let released = self.interaction.is_active(id)
            && self.input.released(MouseButtons::LEFT)
            && mouse_over;
        let submitted = self.interaction.is_focused(id) && self.input.key_pressed(Keys::RETURN);
        released || submitted
    }

    /// Whether `id` is active with the primary button still held.
    pub fn dragging(&self, id: Id) -> bool {
        self.interaction.is_active(id) && self.input.is_down(MouseButtons::LEFT)
    }

    // --- drawing ---

    /// Fill `rect`, pre-intersected with the current clip.
    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        let r = rect.intersect(&self.clips.current());
        if !r.is_empty() {
            self.commands.push_rect(r, color);
        }
    }

    /// One-pixel outline of `rect`.
    pub fn draw_box(&mut self, rect: Rect, color: Color) {
        self.draw_rect(Rect::new(rect.x + 1, rect.y, rect.w - 2, 1), color);
        self.draw_rect(Rect::new(rect.x + 1, rect.bottom() - 1, rect.w - 2, 1), color);
        self.draw_rect(Rect::new(rect.x, rect.y, 1, rect.h), color);
        self.draw_rect(Rect::new(rect.right() - 1, rect.y, 1, rect.h), color);
    }

    /// Run `emit` guarded by a clip command if `bounds` is partially clipped.
    fn clipped(&mut self, bounds: Rect, emit: impl FnOnce(&mut CommandBuffer)) {
        let clipping = self.clips.check(bounds);
        if clipping == Clipping::All {
            return;
        }
        if clipping == Clipping::Part {
            self.commands.push_clip(self.clips.current());
        }
        emit(&mut self.commands);
        if clipping == Clipping::Part {
            self.commands.push_clip(Rect::UNCLIPPED);
        }
    }

    /// Text with its top-left corner at `pos`, one command per line.
    pub fn draw_text(&mut self, font: FontId, text: &str, pos: Vec2, color: Color) {
        let line_height = self.metrics.text_height(font);
        let mut at = pos;
        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let bounds = Rect::new(
                at.x,
                at.y,
                self.metrics.text_width(font, line),
                line_height,
            );
            self.clipped(bounds, |buf| buf.push_text(font, at, line, color));
            at.y += line_height;
        }
    }

    /// An icon centered in `rect`.
    pub fn draw_icon(&mut self, icon: Icon, rect: Rect, color: Color) {
        self.clipped(rect, |buf| buf.push_icon(icon, rect, color));
    }

    /// A filled frame in a palette color, bordered unless the role is borderless
    /// or the border color is transparent.
    pub fn draw_frame(&mut self, rect: Rect, color: ColorId) {
        self.draw_rect(rect, self.style.colors.get(color));
        let border = self.style.colors.border;
        if color.is_borderless() || border.a == 0 {
            return;
        }
        self.draw_box(rect.expand(1), border);
    }

    /// A control frame shaded by the control's focus and hover state.
    pub fn draw_control_frame(&mut self, id: Id, rect: Rect, color: ColorId, opts: Options) {
        if opts.contains(Options::NO_FRAME) {
            return;
        }
        let color = if self.interaction.is_focused(id) {
            color.focused()
        } else if self.interaction.is_hovered(id) {
            color.hovered()
        } else {
            color
        };
        self.draw_frame(rect, color);
    }

    /// Single-line text aligned inside `rect` and clipped to it.
    pub fn draw_control_text(
        &mut self,
        text: &str,
        rect: Rect,
        color: ColorId,
        opts: Options,
    ) -> Result<(), UsageError> {
        let font = self.style.font;
        let tw = self.metrics.text_width(font, text);
        let th = self.metrics.text_height(font);
        let x = if opts.contains(Options::ALIGN_CENTER) {
            rect.x + (rect.w - tw) / 2
        } else if opts.contains(Options::ALIGN_RIGHT) {
            rect.right() - tw - self.style.padding
        } else {
            rect.x + self.style.padding
        };
        let pos = Vec2::new(x, rect.y + (rect.h - th) / 2);
        self.push_clip(rect);
        self.draw_text(font, text, pos, self.style.colors.get(color));
        self.pop_clip()?;
        Ok(())
    }

    /// Swap in a new style between frames.
    pub fn set_style(&mut self, style: Style) -> Result<(), UsageError> {
        if self.is_open() {
            return Err(UsageError::FrameAlreadyOpen);
        }
        self.style = style;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MonospaceMetrics;

    fn ctx() -> Context<MonospaceMetrics> {
        Context::new(Style::default(), MonospaceMetrics::default())
    }

    #[test]
    fn begin_twice_is_rejected_without_side_effects() {
        let mut c = ctx();
        c.begin().unwrap();
        assert_eq!(c.begin(), Err(UsageError::FrameAlreadyOpen));
        assert!(c.is_open());
        c.end().unwrap();
        assert_eq!(c.frame(), 1);
    }

    #[test]
    fn end_without_begin() {
        let mut c = ctx();
        assert_eq!(c.end(), Err(UsageError::FrameNotOpen));
        assert_eq!(c.frame(), 0);
    }

    #[test]
    fn unbalanced_id_stack_abandons_frame() {
        let mut c = ctx();
        c.begin().unwrap();
        c.draw_rect(Rect::new(0, 0, 10, 10), Color::default());
        c.push_id("scope");
        assert_eq!(
            c.end(),
            Err(UsageError::Unbalanced {
                stack: "id",
                depth: 1
            })
        );
        assert!(!c.is_open());
        assert!(c.commands().is_empty(), "no commands from an abandoned frame");
        assert_eq!(c.frame(), 0, "counter only advances on success");

        // The next frame starts clean.
        c.begin().unwrap();
        c.end().unwrap();
        assert_eq!(c.frame(), 1);
    }

    #[test]
    fn layout_outside_container_is_usage_error() {
        let mut c = ctx();
        assert_eq!(c.layout_next(), Err(UsageError::FrameNotOpen));
        c.begin().unwrap();
        assert_eq!(c.layout_next(), Err(UsageError::NoLayout));
        c.end().unwrap();
    }

    #[test]
    fn partially_clipped_text_is_guarded_by_clip_commands() {
        let mut c = ctx();
        c.begin().unwrap();
        c.push_clip(Rect::new(0, 0, 20, 20));
        c.draw_text(FontId(0), "hello", Vec2::new(10, 5), Color::default());
        c.draw_text(FontId(0), "x", Vec2::new(2, 2), Color::default());
        c.draw_text(FontId(0), "gone", Vec2::new(100, 100), Color::default());
        c.pop_clip().unwrap();
        c.end().unwrap();

        let cmds = c.commands();
        assert_eq!(cmds.len(), 4, "{cmds:?}");
        assert_eq!(cmds[0], Command::Clip { rect: Rect::new(0, 0, 20, 20) });
        assert!(matches!(&cmds[1], Command::Text { text, .. } if text == "hello"));
        assert_eq!(cmds[2], Command::Clip { rect: Rect::UNCLIPPED });
        assert!(matches!(&cmds[3], Command::Text { text, .. } if text == "x"));
    }

    #[test]
    fn multi_line_text_becomes_one_command_per_line() {
        let mut c = ctx();
        c.begin().unwrap();
        c.draw_text(FontId(0), "one\r\ntwo\nthree", Vec2::new(4, 10), Color::default());
        c.end().unwrap();

        let lines: Vec<_> = c
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                Command::Text { pos, text, .. } => Some((pos.y, text.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(lines, [(10, "one"), (18, "two"), (26, "three")]);
    }

    #[test]
    fn draw_rect_is_pre_clipped() {
        let mut c = ctx();
        c.begin().unwrap();
        c.push_clip(Rect::new(0, 0, 10, 10));
        c.draw_rect(Rect::new(5, 5, 10, 10), Color::default());
        c.draw_rect(Rect::new(50, 50, 10, 10), Color::default());
        c.pop_clip().unwrap();
        c.end().unwrap();
        assert_eq!(c.commands().len(), 1);
        assert_eq!(c.commands()[0].bounds(), Some(Rect::new(5, 5, 5, 5)));
    }

    #[test]
    fn set_style_only_between_frames() {
        let mut c = ctx();
        c.begin().unwrap();
        assert!(c.set_style(Style::default()).is_err());
        c.end().unwrap();
        let style = Style {
            padding: 1,
            ..Style::default()
        };
        c.set_style(style).unwrap();
        assert_eq!(c.style().padding, 1);
    }
}
