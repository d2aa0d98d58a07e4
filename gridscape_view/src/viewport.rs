// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Viewport`]: scale, pan and surface size, and the transforms they define.

use gridscape_index::Rect;
use kurbo::{Point, Size, Vec2};

use crate::config::{ConfigError, ViewportConfig};
use crate::state::ViewState;
use crate::util::round2;

/// Scale delta per unit of wheel delta.
pub const WHEEL_ZOOM_FACTOR: f64 = 0.01;

/// Snapshot handed to renderers after every view change.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewChanges {
    /// Zoom factor.
    pub scale: f64,
    /// Horizontal pan in pixels.
    pub pan_x: f64,
    /// Vertical pan in pixels.
    pub pan_y: f64,
    /// Pixels per logical unit at the current scale (`scale * base_size`).
    pub unity: f64,
}

impl ViewChanges {
    /// Pan as a vector.
    pub fn pan(&self) -> Vec2 {
        Vec2::new(self.pan_x, self.pan_y)
    }
}

/// Pan/zoom state of a drawing surface over a logical grid.
///
/// Screen coordinates are pixels from the surface's top-left corner. Logical coordinates are
/// grid units: one unit spans `scale * base_size` pixels and logical `(0, 0)` sits at the pan
/// offset.
///
/// ```
/// use gridscape_view::Viewport;
/// use kurbo::Point;
///
/// let mut view = Viewport::default();
/// assert_eq!(view.screen_to_logical(Point::new(250.0, 50.0)), Point::new(2.5, 0.5));
///
/// // Zooming keeps the logical point under the cursor in place.
/// assert!(view.scale_at(Point::new(50.0, 0.0), 0.5));
/// assert_eq!(view.scale(), 1.5);
/// assert_eq!(view.pan().x, -25.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    scale: f64,
    pan: Vec2,
    base_size: f64,
    min_zoom: f64,
    max_zoom: f64,
    surface: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_valid(&ViewportConfig::default())
    }
}

impl Viewport {
    /// Build a viewport from a validated configuration.
    pub fn new(config: &ViewportConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: &ViewportConfig) -> Self {
        Self {
            scale: config.scale,
            pan: Vec2::new(config.pan_x, config.pan_y),
            base_size: config.base_size,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            surface: Size::new(config.surface_width, config.surface_height),
        }
    }

    /// Current zoom factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current pan offset in pixels.
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Pixels per logical unit at scale 1.
    pub fn base_size(&self) -> f64 {
        self.base_size
    }

    /// Inclusive `(min, max)` scale bounds.
    pub fn zoom_range(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Surface size in pixels.
    pub fn surface_size(&self) -> Size {
        self.surface
    }

    /// Update the surface size, for example after the host resized its canvas.
    pub fn set_surface_size(&mut self, size: Size) {
        self.surface = size;
    }

    /// Pixels per logical unit at the current scale.
    pub fn unity(&self) -> f64 {
        self.scale * self.base_size
    }

    /// Map a screen position to logical coordinates.
    pub fn screen_to_logical(&self, p: Point) -> Point {
        ((p - self.pan).to_vec2() / self.unity()).to_point()
    }

    /// Map logical coordinates to a screen position at the current scale.
    pub fn logical_to_screen(&self, c: Point) -> Point {
        self.logical_to_screen_at(c, self.scale)
    }

    /// Map logical coordinates to a screen position as if the scale were `scale`.
    pub fn logical_to_screen_at(&self, c: Point, scale: f64) -> Point {
        (c.to_vec2() * (scale * self.base_size)).to_point() + self.pan
    }

    /// The logical cell whose top-left corner is at or before the screen position.
    pub fn floor_logical(&self, p: Point) -> Point {
        self.screen_to_logical(p).floor()
    }

    /// The logical grid corner at or after the screen position.
    pub fn ceil_logical(&self, p: Point) -> Point {
        self.screen_to_logical(p).ceil()
    }

    /// Logical rectangle covered by the surface.
    ///
    /// Width and height are distances between the mapped corners, so they stay correct for any
    /// transform that preserves distances.
    pub fn visible_region(&self) -> Rect {
        let top_left = self.screen_to_logical(Point::ZERO);
        let top_right = self.screen_to_logical(Point::new(self.surface.width, 0.0));
        let bottom_left = self.screen_to_logical(Point::new(0.0, self.surface.height));
        Rect::new(
            top_left.x,
            top_left.y,
            top_left.distance(top_right),
            top_left.distance(bottom_left),
        )
    }

    /// Pixel rectangle of a logical rectangle, relative to the pan origin.
    ///
    /// Renderers translate by [`Self::pan`] once per frame, so this omits the pan offset.
    pub fn logical_rect_to_screen(&self, rect: &Rect) -> kurbo::Rect {
        let unity = self.unity();
        kurbo::Rect::from_origin_size(
            (rect.x * unity, rect.y * unity),
            (rect.w * unity, rect.h * unity),
        )
    }

    /// Zoom by `delta` around a screen position.
    ///
    /// The new scale is `scale + delta` rounded to two decimals and clamped to the zoom range.
    /// When it differs from the previous scale the pan moves by
    /// `(screen - pan) / previous_scale * delta`, using the unrounded delta. Returns whether the
    /// scale changed.
    pub fn scale_at(&mut self, screen: Point, delta: f64) -> bool {
        if !delta.is_finite() {
            return false;
        }
        let prev = self.scale;
        let next = round2(prev + delta).clamp(self.min_zoom, self.max_zoom);
        if next == prev {
            return false;
        }
        self.scale = next;
        self.pan -= (screen.to_vec2() - self.pan) / prev * delta;
        #[cfg(feature = "tracing")]
        tracing::debug!(prev, scale = next, pan_x = self.pan.x, pan_y = self.pan.y, "scale changed");
        true
    }

    /// Zoom from a vertical wheel delta scaled by [`WHEEL_ZOOM_FACTOR`]. Positive deltas zoom out.
    pub fn wheel_zoom(&mut self, screen: Point, delta_y: f64) -> bool {
        self.scale_at(screen, -delta_y * WHEEL_ZOOM_FACTOR)
    }

    /// Move the view by a pixel delta. Pan is unbounded.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Restore scale and pan, clamping the scale to the zoom range.
    ///
    /// Non-finite values leave the corresponding field unchanged.
    pub fn apply(&mut self, state: &ViewState) {
        if state.scale.is_finite() {
            self.scale = state.scale.clamp(self.min_zoom, self.max_zoom);
        }
        if state.pan_x.is_finite() {
            self.pan.x = state.pan_x;
        }
        if state.pan_y.is_finite() {
            self.pan.y = state.pan_y;
        }
    }

    /// The persistable part of the view.
    pub fn state(&self) -> ViewState {
        ViewState {
            scale: self.scale,
            pan_x: self.pan.x,
            pan_y: self.pan.y,
        }
    }

    /// Snapshot for renderers and observers.
    pub fn changes(&self) -> ViewChanges {
        ViewChanges {
            scale: self.scale,
            pan_x: self.pan.x,
            pan_y: self.pan.y,
            unity: self.unity(),
        }
    }
}
