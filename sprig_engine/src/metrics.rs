// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement supplied by the host.

use sprig_draw::FontId;

/// Text measurement callbacks.
///
/// The engine never rasterizes text; it only needs extents to size cells, wrap
/// long text, and decide whether a run is clipped.
pub trait TextMetrics {
    /// Width in pixels of `text` set in `font`.
    fn text_width(&self, font: FontId, text: &str) -> i32;
    /// Line height in pixels of `font`.
    fn text_height(&self, font: FontId) -> i32;
}

impl<M: TextMetrics + ?Sized> TextMetrics for &M {
    fn text_width(&self, font: FontId, text: &str) -> i32 {
        (**self).text_width(font, text)
    }

    fn text_height(&self, font: FontId) -> i32 {
        (**self).text_height(font)
    }
}

/// Fixed-advance metrics, e.g. for an 8×8 bitmap font on a small display.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MonospaceMetrics {
    /// Advance of every character.
    pub char_width: i32,
    /// Line height.
    pub line_height: i32,
}

impl MonospaceMetrics {
    /// Create metrics with the given advance and line height.
    pub const fn new(char_width: i32, line_height: i32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, _font: FontId, text: &str) -> i32 {
        let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        chars.saturating_mul(self.char_width)
    }

    fn text_height(&self, _font: FontId) -> i32 {
        self.line_height
    }
}
