// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard gestures for creating objects, and the rectangle they span.

use gridscape_index::Rect;
use kurbo::Point;

/// Edit-mode key commands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditKey {
    /// `i`: anchor a new draft at the cell under the cursor.
    StartDraft,
    /// `f`: size the most recent draft up to the grid corner under the cursor and commit it.
    FinishDraft,
    /// `p`: commit a 1×1 object at the cell under the cursor.
    PlaceCell,
}

impl EditKey {
    /// Map a key character to its command.
    pub fn from_char(key: char) -> Option<Self> {
        match key {
            'i' => Some(Self::StartDraft),
            'f' => Some(Self::FinishDraft),
            'p' => Some(Self::PlaceCell),
            _ => None,
        }
    }
}

/// Rectangle spanned by two diagonal corners.
///
/// `p1` is taken as the top-left corner only when it lies strictly left of and above `p2`;
/// otherwise `p2` is. Width and height are the distances bottom-left to bottom-right and
/// top-left to bottom-left, so they are never negative.
///
/// ```
/// use gridscape_canvas::diagonal_points_to_rect;
/// use gridscape_index::Rect;
/// use kurbo::Point;
///
/// let r = diagonal_points_to_rect(Point::new(2.0, 3.0), Point::new(5.0, 7.0));
/// assert_eq!(r, Rect::new(2.0, 3.0, 3.0, 4.0));
/// ```
pub fn diagonal_points_to_rect(p1: Point, p2: Point) -> Rect {
    let (top_left, bottom_right) = if p1.x < p2.x && p1.y < p2.y {
        (p1, p2)
    } else {
        (p2, p1)
    };
    let bottom_left = Point::new(top_left.x, bottom_right.y);
    Rect::new(
        top_left.x,
        top_left.y,
        bottom_left.distance(bottom_right),
        top_left.distance(bottom_left),
    )
}
