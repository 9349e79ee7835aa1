// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row/column layout cursors and the clip stack.
//!
//! ## Cursors
//!
//! Each open container owns one [`LayoutFrame`] on the [`LayoutStack`]. The
//! frame's body is the container's content rect shifted by the negated scroll
//! offset, so every rectangle handed out is already in screen space.
//!
//! Rows are declared with a column template. A width `> 0` is fixed; a width
//! `<= 0` ([`AUTO`]) claims an equal share of what the fixed columns and the
//! gaps leave, with any remainder going to the last auto column. A row height
//! of `0` means the style's default row height, and a negative height fills to
//! the body bottom (`-1` reaches it exactly). When a row's cells are used up,
//! the next cell wraps onto a new row with the same template.
//!
//! ## Clipping
//!
//! [`ClipStack::push`] always intersects with the current clip, so a nested
//! clip can never exceed its ancestors. Root containers start from
//! [`Rect::UNCLIPPED`] via [`ClipStack::push_unclipped`].

use alloc::vec::Vec;

use sprig_draw::{Rect, Vec2};

use crate::error::UsageError;
use crate::style::Style;
use crate::types::Placement;

/// Column width sentinel: take an equal share of the free row width.
pub const AUTO: i32 = 0;

const UNSET_MAX: i32 = -0x0100_0000;

/// One container's layout cursor.
#[derive(Clone, Debug)]
pub struct LayoutFrame {
    body: Rect,
    max: Vec2,
    position: Vec2,
    size: Vec2,
    template: Vec<i32>,
    cells: Vec<i32>,
    item_index: usize,
    next_row: i32,
    indent: i32,
    next: Option<(Rect, Placement)>,
}

impl LayoutFrame {
    fn new(body: Rect) -> Self {
        Self {
            body,
            max: Vec2::new(UNSET_MAX, UNSET_MAX),
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            template: Vec::new(),
            cells: Vec::new(),
            item_index: 0,
            next_row: 0,
            indent: 0,
            next: None,
        }
    }

    /// Screen-space body, already offset by the container scroll.
    pub fn body(&self) -> Rect {
        self.body
    }

    /// Extent of everything laid out so far, relative to the body origin.
    ///
    /// Zero on an axis nothing has been placed along.
    pub fn content_size(&self) -> Vec2 {
        let extent = |max: i32, origin: i32| {
            if max == UNSET_MAX { 0 } else { (max - origin).max(0) }
        };
        Vec2::new(
            extent(self.max.x, self.body.x),
            extent(self.max.y, self.body.y),
        )
    }

    /// Current indent.
    pub fn indent(&self) -> i32 {
        self.indent
    }

    fn start_row(&mut self, spacing: i32) {
        self.position = Vec2::new(self.indent, self.next_row);
        self.item_index = 0;
        self.cells = resolve_widths(&self.template, self.body.w - self.indent, spacing);
    }
}

/// Resolve a column template against the available width.
fn resolve_widths(template: &[i32], available: i32, spacing: i32) -> Vec<i32> {
    let n = i32::try_from(template.len()).unwrap_or(i32::MAX);
    let fixed: i32 = template.iter().filter(|w| **w > 0).sum();
    let autos = i32::try_from(template.iter().filter(|w| **w <= 0).count()).unwrap_or(i32::MAX);
    if autos == 0 {
        return template.to_vec();
    }
    let free = (available - fixed - spacing * (n - 1).max(0)).max(0);
    let share = free / autos;
    let remainder = free - share * autos;
    let last_auto = template.iter().rposition(|w| *w <= 0);
    template
        .iter()
        .enumerate()
        .map(|(i, &w)| match w {
            w if w > 0 => w,
            _ if Some(i) == last_auto => share + remainder,
            _ => share,
        })
        .collect()
}

/// Stack of layout cursors, one per open container or column.
#[derive(Clone, Debug, Default)]
pub struct LayoutStack {
    frames: Vec<LayoutFrame>,
}

impl LayoutStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a cursor for `body` scrolled by `scroll`, starting one auto cell
    /// of default height.
    pub fn begin(&mut self, body: Rect, scroll: Vec2, style: &Style) {
        let body = body.translate(Vec2::ZERO - scroll);
        self.frames.push(LayoutFrame::new(body));
        if let Some(frame) = self.frames.last_mut() {
            frame.template.push(AUTO);
            frame.start_row(style.spacing);
        }
    }

    /// Pop the innermost cursor.
    pub fn end(&mut self) -> Result<LayoutFrame, UsageError> {
        self.frames.pop().ok_or(UsageError::NoLayout)
    }

    /// The innermost cursor.
    pub fn top(&self) -> Result<&LayoutFrame, UsageError> {
        self.frames.last().ok_or(UsageError::NoLayout)
    }

    fn top_mut(&mut self) -> Result<&mut LayoutFrame, UsageError> {
        self.frames.last_mut().ok_or(UsageError::NoLayout)
    }

    /// Number of open cursors.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Drop every cursor.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Start a new row with the given column template and height.
    ///
    /// An empty template places one cell per row, each
    /// [`set_width`](Self::set_width) wide.
    pub fn row(&mut self, widths: &[i32], height: i32, style: &Style) -> Result<(), UsageError> {
        let frame = self.top_mut()?;
        frame.template.clear();
        frame.template.extend_from_slice(widths);
        frame.size.y = height;
        frame.start_row(style.spacing);
        Ok(())
    }

    /// Cell width for rows declared with an empty template.
    pub fn set_width(&mut self, width: i32) -> Result<(), UsageError> {
        self.top_mut()?.size.x = width;
        Ok(())
    }

    /// Height for the cells of the current row template.
    pub fn set_height(&mut self, height: i32) -> Result<(), UsageError> {
        self.top_mut()?.size.y = height;
        Ok(())
    }

    /// Shift the row start of the current cursor.
    pub fn indent(&mut self, delta: i32) -> Result<(), UsageError> {
        self.top_mut()?.indent += delta;
        Ok(())
    }

    /// Override the next cell.
    pub fn set_next(&mut self, rect: Rect, placement: Placement) -> Result<(), UsageError> {
        self.top_mut()?.next = Some((rect, placement));
        Ok(())
    }

    /// The next cell's screen rectangle.
    pub fn next(&mut self, style: &Style) -> Result<Rect, UsageError> {
        let frame = self.top_mut()?;

        let mut res = match frame.next.take() {
            Some((rect, Placement::Absolute)) => return Ok(rect),
            Some((rect, Placement::Relative)) => rect,
            None => {
                if frame.item_index >= frame.cells.len() {
                    frame.start_row(style.spacing);
                }
                let w = match frame.cells.get(frame.item_index) {
                    Some(&w) => w,
                    None if frame.size.x > 0 => frame.size.x,
                    None => style.cell_width(),
                };
                let mut h = frame.size.y;
                if h == 0 {
                    h = style.row_height();
                } else if h < 0 {
                    h += frame.body.h - frame.position.y + 1;
                }
                frame.item_index += 1;
                Rect::new(frame.position.x, frame.position.y, w, h)
            }
        };

        frame.position.x += res.w + style.spacing;
        frame.next_row = frame.next_row.max(res.y + res.h + style.spacing);

        res = res.translate(frame.body.origin());
        frame.max.x = frame.max.x.max(res.right());
        frame.max.y = frame.max.y.max(res.bottom());
        Ok(res)
    }

    /// Nest a column cursor inside the next cell.
    pub fn begin_column(&mut self, style: &Style) -> Result<(), UsageError> {
        let cell = self.next(style)?;
        self.begin(cell, Vec2::ZERO, style);
        Ok(())
    }

    /// Close a column, extending the parent by what the column consumed.
    pub fn end_column(&mut self) -> Result<(), UsageError> {
        let b = self.end()?;
        let a = self.top_mut()?;
        a.position.x = a.position.x.max(b.position.x + b.body.x - a.body.x);
        a.next_row = a.next_row.max(b.next_row + b.body.y - a.body.y);
        a.max.x = a.max.x.max(b.max.x);
        a.max.y = a.max.y.max(b.max.y);
        Ok(())
    }
}

/// How much of a rectangle survives the current clip.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Clipping {
    /// Fully visible.
    None,
    /// Partially visible; the painter must clip.
    Part,
    /// Fully hidden; skip it.
    All,
}

/// Stack of nested clip rectangles.
#[derive(Clone, Debug, Default)]
pub struct ClipStack {
    stack: Vec<Rect>,
}

impl ClipStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `rect` intersected with the current clip.
    pub fn push(&mut self, rect: Rect) {
        let clipped = rect.intersect(&self.current());
        self.stack.push(clipped);
    }

    /// Push [`Rect::UNCLIPPED`], ignoring enclosing clips.
    pub fn push_unclipped(&mut self) {
        self.stack.push(Rect::UNCLIPPED);
    }

    /// Pop the innermost clip.
    pub fn pop(&mut self) -> Result<Rect, UsageError> {
        self.stack.pop().ok_or(UsageError::ClipStackUnderflow)
    }

    /// The current clip, or [`Rect::UNCLIPPED`] outside any container.
    pub fn current(&self) -> Rect {
        self.stack.last().copied().unwrap_or(Rect::UNCLIPPED)
    }

    /// Classify `rect` against the current clip.
    pub fn check(&self, rect: Rect) -> Clipping {
        let clip = self.current();
        if rect.intersect(&clip).is_empty() {
            Clipping::All
        } else if clip.contains_rect(&rect) {
            Clipping::None
        } else {
            Clipping::Part
        }
    }

    /// Number of pushed clips.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Drop every clip.
    pub fn clear(&mut self) {
        self.stack.clear();
    }
}
