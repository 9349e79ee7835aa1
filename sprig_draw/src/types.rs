// Copyright 2025 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry and paint types: integer points and rectangles, colors, icons, fonts.

/// A 2D integer vector, used for positions, deltas, and sizes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    /// Horizontal component.
    pub x: i32,
    /// Vertical component.
    pub y: i32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a vector from its components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl core::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl core::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl core::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// An integer rectangle: origin plus width and height.
///
/// Containment is half-open: a point on the right or bottom edge is outside.
/// Rectangles produced by [`Rect::intersect`] never have a negative size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// A rectangle large enough to never clip anything a UI would draw.
    pub const UNCLIPPED: Self = Self::new(0, 0, 0x0100_0000, 0x0100_0000);

    /// Create a rectangle from origin and size.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Top-left corner.
    pub const fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// True if the rectangle covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Grow (or shrink, for negative `n`) the rectangle by `n` on every side.
    pub const fn expand(&self, n: i32) -> Self {
        Self::new(self.x - n, self.y - n, self.w + n * 2, self.h + n * 2)
    }

    /// The overlapping region of two rectangles, clamped to a non-negative size.
    pub fn intersect(&self, other: &Self) -> Self {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right()).max(x1);
        let y2 = self.bottom().min(other.bottom()).max(y1);
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Whether `p` lies inside the rectangle.
    pub const fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.w <= self.x + self.w
            && other.y + other.h <= self.y + self.h
    }

    /// The rectangle moved by `d`.
    pub const fn translate(&self, d: Vec2) -> Self {
        Self::new(self.x + d.x, self.y + d.y, self.w, self.h)
    }
}

/// An 8-bit RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; `0` is fully transparent.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Create a color from all four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

/// Built-in icon glyphs, painted by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Icon {
    /// Window close cross.
    Close,
    /// Checkbox tick.
    Check,
    /// Collapsed tree/header arrow.
    Collapsed,
    /// Expanded tree/header arrow.
    Expanded,
    /// Host-defined glyph.
    Custom(u32),
}

/// Opaque font handle passed through to the host's text metrics and painter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_overlapping() {
        let r = Rect::new(0, 0, 100, 100).intersect(&Rect::new(50, 50, 100, 100));
        assert_eq!(r, Rect::new(50, 50, 50, 50));
    }

    #[test]
    fn intersect_disjoint_is_empty_not_negative() {
        let r = Rect::new(0, 0, 10, 10).intersect(&Rect::new(20, 30, 5, 5));
        assert!(r.is_empty());
        assert!(r.w >= 0 && r.h >= 0, "sizes are clamped: {r:?}");
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10, 10, 80, 30);
        assert!(r.contains(Vec2::new(10, 10)));
        assert!(r.contains(Vec2::new(89, 39)));
        assert!(!r.contains(Vec2::new(90, 20)));
        assert!(!r.contains(Vec2::new(20, 40)));
    }

    #[test]
    fn expand_shrinks_with_negative_amount() {
        assert_eq!(Rect::new(10, 10, 20, 20).expand(5), Rect::new(5, 5, 30, 30));
        assert_eq!(Rect::new(10, 10, 20, 20).expand(-5), Rect::new(15, 15, 10, 10));
    }

    #[test]
    fn intersection_is_contained_in_both() {
        let a = Rect::new(-5, 3, 40, 17);
        let b = Rect::new(10, -2, 12, 60);
        let i = a.intersect(&b);
        assert!(a.contains_rect(&i));
        assert!(b.contains_rect(&i));
    }
}
