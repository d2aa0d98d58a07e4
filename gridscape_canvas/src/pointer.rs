// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press/drag/release tracking for a single pointer.
//!
//! ```text
//! Idle --down--> Pressed --move--> Dragging --up--> Idle
//!                   |                              ^
//!                   +-------------up (click)-------+
//! ```
//!
//! While pressed, every move reports the delta from the previous position so the caller can pan
//! by it. Releasing without having moved reports a click at the position captured on press.

use kurbo::{Point, Vec2};

/// Where the pointer is in the press cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerPhase {
    /// No button held.
    Idle,
    /// Button held, no movement yet.
    Pressed {
        /// Position captured on press.
        origin: Point,
    },
    /// Button held and the pointer has moved.
    Dragging,
}

/// Outcome of a release.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Release {
    /// Released without dragging: a click at the press position.
    Click(Point),
    /// A drag ended.
    DragEnd,
    /// Released while no press was tracked.
    Ignored,
}

/// Single-pointer state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerState {
    phase: PointerPhase,
    position: Option<Point>,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerState {
    /// Create an idle pointer with no known position.
    pub const fn new() -> Self {
        Self {
            phase: PointerPhase::Idle,
            position: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    /// Last known pointer position, if any event has been seen.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    /// Whether a button is held.
    pub fn is_down(&self) -> bool {
        !matches!(self.phase, PointerPhase::Idle)
    }

    /// Whether the held pointer has moved since the press.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, PointerPhase::Dragging)
    }

    /// Record a button press.
    pub fn on_down(&mut self, position: Point) {
        self.position = Some(position);
        self.phase = PointerPhase::Pressed { origin: position };
    }

    /// Record movement. Returns the pan delta while a button is held.
    pub fn on_move(&mut self, position: Point) -> Option<Vec2> {
        let previous = self.position.replace(position);
        match self.phase {
            PointerPhase::Idle => None,
            PointerPhase::Pressed { .. } | PointerPhase::Dragging => {
                self.phase = PointerPhase::Dragging;
                Some(previous.map_or(Vec2::ZERO, |p| position - p))
            }
        }
    }

    /// Record a button release.
    pub fn on_up(&mut self, position: Point) -> Release {
        self.position = Some(position);
        match core::mem::replace(&mut self.phase, PointerPhase::Idle) {
            PointerPhase::Idle => Release::Ignored,
            PointerPhase::Pressed { origin } => Release::Click(origin),
            PointerPhase::Dragging => Release::DragEnd,
        }
    }

    /// Update the position without affecting the press cycle, for events such as
    /// double-click or wheel that carry a position of their own.
    pub fn track(&mut self, position: Point) {
        self.position = Some(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_without_move_is_a_click_at_press_position() {
        let mut p = PointerState::new();
        p.on_down(Point::new(10.0, 20.0));
        assert!(p.is_down());
        assert_eq!(p.on_up(Point::new(11.0, 20.0)), Release::Click(Point::new(10.0, 20.0)));
        assert_eq!(p.phase(), PointerPhase::Idle);
        assert_eq!(p.position(), Some(Point::new(11.0, 20.0)));
    }

    #[test]
    fn drag_reports_incremental_deltas() {
        let mut p = PointerState::new();
        p.on_down(Point::new(0.0, 0.0));
        assert_eq!(p.on_move(Point::new(5.0, 2.0)), Some(Vec2::new(5.0, 2.0)));
        assert!(p.is_dragging());
        assert_eq!(p.on_move(Point::new(7.0, -1.0)), Some(Vec2::new(2.0, -3.0)));
        assert_eq!(p.on_up(Point::new(7.0, -1.0)), Release::DragEnd);
        assert!(!p.is_down());
    }

    #[test]
    fn hover_moves_do_not_pan() {
        let mut p = PointerState::new();
        assert_eq!(p.on_move(Point::new(3.0, 3.0)), None);
        assert_eq!(p.position(), Some(Point::new(3.0, 3.0)));
        assert_eq!(p.on_up(Point::new(3.0, 3.0)), Release::Ignored);
    }

    #[test]
    fn a_new_press_starts_a_fresh_cycle() {
        let mut p = PointerState::new();
        p.on_down(Point::ZERO);
        p.on_move(Point::new(1.0, 1.0));
        p.on_down(Point::new(4.0, 4.0));
        assert_eq!(p.phase(), PointerPhase::Pressed {
            origin: Point::new(4.0, 4.0)
        });
    }
}
