// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Append-only command buffer with z-ordered spans.
//!
//! ## Overview
//!
//! Commands are appended in declaration order. Root containers bracket their
//! commands with [`CommandBuffer::begin_span`] / [`CommandBuffer::end_span`];
//! each command is tagged with the innermost open span at the time it is pushed,
//! so a span nested inside another (e.g. a popup declared from within a window)
//! is extracted from its parent rather than painted inline.
//!
//! ## Flush order
//!
//! [`CommandBuffer::finish`] re-emits the frame as one contiguous list:
//!
//! 1. Commands pushed outside any span, in declaration order.
//! 2. Normal spans by ascending z (equal z keeps declaration order).
//! 3. Deferred spans by ascending z, after every normal span regardless of z.
//!
//! ```
//! use sprig_draw::{Color, CommandBuffer, Rect};
//!
//! let mut buf = CommandBuffer::new();
//! let window = buf.begin_span(1, false);
//! buf.push_rect(Rect::new(0, 0, 100, 100), Color::rgb(50, 50, 50));
//! let popup = buf.begin_span(2, true);
//! buf.push_rect(Rect::new(10, 10, 20, 20), Color::rgb(200, 0, 0));
//! buf.end_span().unwrap();
//! buf.push_rect(Rect::new(0, 90, 100, 10), Color::rgb(0, 0, 200));
//! buf.end_span().unwrap();
//! buf.finish().unwrap();
//!
//! // The popup's rect comes last even though it was declared mid-window.
//! let last = buf.commands().last().unwrap();
//! assert_eq!(last.bounds(), Some(Rect::new(10, 10, 20, 20)));
//! # let _ = (window, popup);
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::command::Command;
use crate::types::{Color, FontId, Icon, Rect, Vec2};

/// Errors reported by span bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    /// [`CommandBuffer::end_span`] was called with no open span.
    #[error("end_span called with no open span")]
    SpanUnderflow,
    /// [`CommandBuffer::finish`] was called while spans were still open.
    #[error("{open} command span(s) still open at finish")]
    OpenSpans {
        /// Number of spans left open.
        open: usize,
    },
}

/// Handle to a span recorded in a [`CommandBuffer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpanId(usize);

/// A contiguous range of the raw command stream owned by one root container.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Span {
    /// Index of the first command pushed after the span opened.
    pub head: usize,
    /// Index one past the last command pushed before the span closed.
    pub tail: usize,
    /// Paint order key; higher paints later.
    pub z: i32,
    /// Deferred spans paint after all normal spans.
    pub deferred: bool,
}

/// Ordered list of draw commands for one frame.
#[derive(Clone, Debug, Default)]
pub struct CommandBuffer {
    raw: Vec<Command>,
    owner: Vec<Option<SpanId>>,
    spans: Vec<Span>,
    open: Vec<SpanId>,
    finished: Vec<Command>,
}

impl CommandBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every command and span, including the last finished list.
    pub fn clear(&mut self) {
        self.raw.clear();
        self.owner.clear();
        self.spans.clear();
        self.open.clear();
        self.finished.clear();
    }

    /// Number of commands pushed since the last [`clear`](Self::clear).
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// True if nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Number of spans currently open.
    pub fn open_spans(&self) -> usize {
        self.open.len()
    }

    /// Append a raw command, tagging it with the innermost open span.
    pub fn push(&mut self, cmd: Command) {
        self.raw.push(cmd);
        self.owner.push(self.open.last().copied());
    }

    /// Append a clip change.
    pub fn push_clip(&mut self, rect: Rect) {
        self.push(Command::Clip { rect });
    }

    /// Append a filled rectangle.
    pub fn push_rect(&mut self, rect: Rect, color: Color) {
        self.push(Command::Rect { rect, color });
    }

    /// Append a text run.
    pub fn push_text(&mut self, font: FontId, pos: Vec2, text: impl Into<String>, color: Color) {
        self.push(Command::Text {
            font,
            pos,
            text: text.into(),
            color,
        });
    }

    /// Append an icon.
    pub fn push_icon(&mut self, icon: Icon, rect: Rect, color: Color) {
        self.push(Command::Icon { icon, rect, color });
    }

    /// Open a span; commands pushed until the matching [`end_span`](Self::end_span)
    /// belong to it.
    pub fn begin_span(&mut self, z: i32, deferred: bool) -> SpanId {
        let id = SpanId(self.spans.len());
        let head = self.raw.len();
        self.spans.push(Span {
            head,
            tail: head,
            z,
            deferred,
        });
        self.open.push(id);
        id
    }

    /// Close the innermost open span.
    pub fn end_span(&mut self) -> Result<SpanId, DrawError> {
        let id = self.open.pop().ok_or(DrawError::SpanUnderflow)?;
        self.spans[id.0].tail = self.raw.len();
        Ok(id)
    }

    /// Change the paint order key of a span before [`finish`](Self::finish).
    pub fn set_span_z(&mut self, id: SpanId, z: i32) {
        if let Some(span) = self.spans.get_mut(id.0) {
            span.z = z;
        }
    }

    /// Head/tail markers and ordering data for a span.
    pub fn span(&self, id: SpanId) -> Option<&Span> {
        self.spans.get(id.0)
    }

    /// Reorder the frame into its final paint order.
    ///
    /// The raw stream is consumed; [`commands`](Self::commands) returns the
    /// flattened result until the next [`clear`](Self::clear).
    pub fn finish(&mut self) -> Result<(), DrawError> {
        if !self.open.is_empty() {
            return Err(DrawError::OpenSpans {
                open: self.open.len(),
            });
        }

        let mut order: Vec<usize> = (0..self.spans.len()).collect();
        // Stable: equal keys keep declaration order.
        order.sort_by_key(|&i| (self.spans[i].deferred, self.spans[i].z));

        let mut buckets: Vec<Vec<Command>> = (0..self.spans.len()).map(|_| Vec::new()).collect();
        let mut out = Vec::with_capacity(self.raw.len());
        for (cmd, owner) in self.raw.drain(..).zip(self.owner.drain(..)) {
            match owner {
                Some(SpanId(i)) => buckets[i].push(cmd),
                None => out.push(cmd),
            }
        }
        for i in order {
            out.append(&mut buckets[i]);
        }
        self.finished = out;
        Ok(())
    }

    /// The finished command list of the last [`finish`](Self::finish).
    pub fn commands(&self) -> &[Command] {
        &self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn rect_of(i: i32) -> Rect {
        Rect::new(i, 0, 1, 1)
    }

    fn xs(buf: &CommandBuffer) -> Vec<i32> {
        buf.commands()
            .iter()
            .filter_map(|c| c.bounds().map(|r| r.x))
            .collect()
    }

    #[test]
    fn unspanned_commands_keep_declaration_order() {
        let mut buf = CommandBuffer::new();
        for i in 0..4 {
            buf.push_rect(rect_of(i), Color::default());
        }
        buf.finish().unwrap();
        assert_eq!(xs(&buf), vec![0, 1, 2, 3]);
    }

    #[test]
    fn spans_sorted_by_z() {
        let mut buf = CommandBuffer::new();
        buf.begin_span(5, false);
        buf.push_rect(rect_of(1), Color::default());
        buf.end_span().unwrap();
        buf.begin_span(2, false);
        buf.push_rect(rect_of(2), Color::default());
        buf.end_span().unwrap();
        buf.finish().unwrap();
        assert_eq!(xs(&buf), vec![2, 1]);
    }

    #[test]
    fn equal_z_keeps_declaration_order() {
        let mut buf = CommandBuffer::new();
        for i in 0..3 {
            buf.begin_span(1, false);
            buf.push_rect(rect_of(i), Color::default());
            buf.end_span().unwrap();
        }
        buf.finish().unwrap();
        assert_eq!(xs(&buf), vec![0, 1, 2]);
    }

    #[test]
    fn deferred_spans_paint_after_normal_regardless_of_z() {
        let mut buf = CommandBuffer::new();
        buf.begin_span(1, true);
        buf.push_rect(rect_of(10), Color::default());
        buf.end_span().unwrap();
        buf.begin_span(99, false);
        buf.push_rect(rect_of(20), Color::default());
        buf.end_span().unwrap();
        buf.finish().unwrap();
        assert_eq!(xs(&buf), vec![20, 10]);
    }

    #[test]
    fn nested_span_is_extracted_from_parent() {
        let mut buf = CommandBuffer::new();
        let outer = buf.begin_span(1, false);
        buf.push_rect(rect_of(1), Color::default());
        let inner = buf.begin_span(2, true);
        buf.push_rect(rect_of(2), Color::default());
        assert_eq!(buf.end_span(), Ok(inner));
        buf.push_rect(rect_of(3), Color::default());
        assert_eq!(buf.end_span(), Ok(outer));
        buf.finish().unwrap();
        assert_eq!(xs(&buf), vec![1, 3, 2]);

        let s = buf.span(outer).unwrap();
        assert_eq!((s.head, s.tail), (0, 3));
        let s = buf.span(inner).unwrap();
        assert_eq!((s.head, s.tail), (1, 2));
    }

    #[test]
    fn set_span_z_reorders_at_finish() {
        let mut buf = CommandBuffer::new();
        let a = buf.begin_span(1, false);
        buf.push_rect(rect_of(1), Color::default());
        buf.end_span().unwrap();
        buf.begin_span(2, false);
        buf.push_rect(rect_of(2), Color::default());
        buf.end_span().unwrap();
        buf.set_span_z(a, 3);
        buf.finish().unwrap();
        assert_eq!(xs(&buf), vec![2, 1]);
    }

    #[test]
    fn finish_rejects_open_spans() {
        let mut buf = CommandBuffer::new();
        buf.begin_span(0, false);
        assert_eq!(buf.finish(), Err(DrawError::OpenSpans { open: 1 }));
    }

    #[test]
    fn end_span_underflow() {
        let mut buf = CommandBuffer::new();
        assert_eq!(buf.end_span(), Err(DrawError::SpanUnderflow));
    }

    #[test]
    fn clear_discards_finished_list() {
        let mut buf = CommandBuffer::new();
        buf.push_rect(rect_of(0), Color::default());
        buf.finish().unwrap();
        assert_eq!(buf.commands().len(), 1);
        buf.clear();
        assert!(buf.commands().is_empty());
        assert!(buf.is_empty());
    }
}
