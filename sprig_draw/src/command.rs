// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of draw primitives handed to a host painter.

use alloc::string::String;

use crate::types::{Color, FontId, Icon, Rect, Vec2};

/// A single draw primitive.
///
/// Commands are self-contained with respect to clipping: a [`Command::Clip`]
/// always precedes the primitives it constrains and is reset to
/// [`Rect::UNCLIPPED`] afterwards, so spans of commands can be reordered
/// without leaking clip state between them.
///
/// With the `serde` feature enabled, each command serializes as an internally
/// tagged record, e.g. `{"type":"rect","rect":{..},"color":{..}}`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Command {
    /// Restrict subsequent primitives to `rect`.
    Clip {
        /// New clip rectangle.
        rect: Rect,
    },
    /// Fill `rect` with `color`.
    Rect {
        /// Area to fill, already intersected with the active clip.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Draw a run of text with its top-left corner at `pos`.
    Text {
        /// Font handle forwarded from the style table.
        font: FontId,
        /// Top-left position.
        pos: Vec2,
        /// Text run; never contains a line break. The engine splits
        /// multi-line text into one command per line.
        text: String,
        /// Text color.
        color: Color,
    },
    /// Draw an icon centered in `rect`.
    Icon {
        /// Which glyph.
        icon: Icon,
        /// Cell the glyph is centered in.
        rect: Rect,
        /// Glyph color.
        color: Color,
    },
}

impl Command {
    /// The rectangle this command covers, if it paints anything.
    ///
    /// Text commands report `None` since their extent depends on host metrics.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect { rect, .. } | Self::Icon { rect, .. } => Some(*rect),
            Self::Clip { .. } | Self::Text { .. } => None,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn rect_serializes_as_tagged_record() {
        let cmd = Command::Rect {
            rect: Rect::new(1, 2, 3, 4),
            color: Color::rgb(10, 20, 30),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "rect");
        assert_eq!(json["rect"]["w"], 3);
        assert_eq!(json["color"]["a"], 255);
    }

    #[test]
    fn text_round_trips_through_json() {
        let cmd = Command::Text {
            font: FontId(2),
            pos: Vec2::new(5, 6),
            text: "OK".to_string(),
            color: Color::rgb(255, 255, 255),
        };
        let s = serde_json::to_string(&cmd).unwrap();
        assert!(s.contains("\"type\":\"text\""), "{s}");
        let back: Command = serde_json::from_str(&s).unwrap();
        assert_eq!(back, cmd);
    }
}
