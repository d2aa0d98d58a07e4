// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indexable objects: the [`Bounded`] trait, a plain [`BoundsObject`], and [`ObjectId`] handles.

use crate::types::Rect;

/// Handle for an object owned by a [`Quadtree`](crate::Quadtree).
///
/// Objects are identified by the slot they occupy in the tree's arena, never by value.
/// The index is append-only, so a handle stays valid for the lifetime of the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u32);

impl ObjectId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Object ids are intentionally 32-bit; higher bits are truncated by design."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Anything the quadtree can index: a value with an axis-aligned logical rectangle.
pub trait Bounded {
    /// The logical rectangle occupied by this value.
    fn bounds(&self) -> Rect;

    /// Whether this value overlaps `rect` (half-open, see [`Rect::overlaps`]).
    #[inline]
    fn overlaps(&self, rect: &Rect) -> bool {
        self.bounds().overlaps(rect)
    }

    /// Whether this value contains the point, edges included.
    #[inline]
    fn contains(&self, x: f64, y: f64) -> bool {
        self.bounds().contains_point(x, y)
    }
}

impl Bounded for Rect {
    #[inline]
    fn bounds(&self) -> Rect {
        *self
    }
}

/// A rectangle with a selection flag.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundsObject {
    /// Logical rectangle.
    pub rect: Rect,
    selected: bool,
}

impl BoundsObject {
    /// Create an unselected object covering `rect`.
    pub const fn new(rect: Rect) -> Self {
        Self {
            rect,
            selected: false,
        }
    }

    /// Whether the object is currently selected.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Mark the object selected.
    pub fn select(&mut self) {
        self.selected = true;
    }

    /// Clear the selection flag.
    pub fn unselect(&mut self) {
        self.selected = false;
    }

    /// Flip the selection flag and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.selected = !self.selected;
        self.selected
    }
}

impl Bounded for BoundsObject {
    #[inline]
    fn bounds(&self) -> Rect {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_selection() {
        let mut o = BoundsObject::new(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(!o.is_selected());
        assert!(o.toggle());
        assert!(o.is_selected());
        assert!(!o.toggle());
        o.select();
        o.select();
        assert!(o.is_selected());
        o.unselect();
        assert!(!o.is_selected());
    }

    #[test]
    fn bounded_defaults_use_rect_semantics() {
        let o = BoundsObject::new(Rect::new(1.0, 1.0, 2.0, 2.0));
        assert!(o.contains(3.0, 3.0));
        assert!(!o.contains(3.5, 3.0));
        assert!(o.overlaps(&Rect::new(2.0, 2.0, 5.0, 5.0)));
        assert!(!o.overlaps(&Rect::new(3.0, 1.0, 5.0, 5.0)));
    }
}
