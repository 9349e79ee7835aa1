// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions into Kurbo geometry.
//!
//! ## Feature
//!
//! Enable with `kurbo`.
//!
//! ## Notes
//!
//! Hosts that paint through a Kurbo-based renderer can convert command
//! geometry without going through their own integer math. Integer coordinates
//! are exactly representable as `f64`, so these conversions are lossless.

use kurbo::{Point, Size};

use crate::types::{Rect, Vec2};

impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        Self::new(
            f64::from(r.x),
            f64::from(r.y),
            f64::from(r.right()),
            f64::from(r.bottom()),
        )
    }
}

impl From<Vec2> for Point {
    fn from(p: Vec2) -> Self {
        Self::new(f64::from(p.x), f64::from(p.y))
    }
}

impl From<Vec2> for kurbo::Vec2 {
    fn from(v: Vec2) -> Self {
        Self::new(f64::from(v.x), f64::from(v.y))
    }
}

/// Size of an integer rectangle as a Kurbo [`Size`].
pub fn rect_size(r: Rect) -> Size {
    Size::new(f64::from(r.w), f64::from(r.h))
}
