// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

/// Axis-aligned rectangle in logical grid units, stored as origin and extent.
///
/// Extents are expected to be non-negative. Nothing here validates that; a rectangle
/// with a zero or negative extent simply never overlaps anything.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a rectangle from origin and size.
    #[inline(always)]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (`x + w`).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge (`y + h`).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Whether two rectangles overlap.
    ///
    /// Intervals are half-open: rectangles that only share an edge do not overlap.
    ///
    /// ```
    /// use gridscape_index::Rect;
    ///
    /// let a = Rect::new(0.0, 0.0, 2.0, 2.0);
    /// assert!(a.overlaps(&Rect::new(1.0, 1.0, 1.0, 1.0)));
    /// assert!(!a.overlaps(&Rect::new(2.0, 0.0, 1.0, 1.0)));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Whether the point lies inside the rectangle, edges included.
    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Return true if the rectangle has no area. Assumes no NaN.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// The smallest rectangle enclosing both.
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }
}

/// Whether two rectangles overlap. Free-function form of [`Rect::overlaps`].
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}
