// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridscape View: pan/zoom transforms for a grid canvas.
//!
//! A [`Viewport`] holds a scale, a pan offset and the drawing surface size, and converts between
//! screen pixels and logical grid units:
//!
//! - `logical = (screen - pan) / (scale * base_size)` and back.
//! - [`Viewport::visible_region`] gives the logical rectangle covered by the surface, ready to be
//!   passed to [`gridscape_index::Quadtree::query`] for culling.
//! - [`Viewport::scale_at`] zooms around the cursor so the logical point under it stays put.
//!
//! The persistable part of the view ([`ViewState`]) maps to and from query-string pairs.
//!
//! ## Example
//!
//! ```
//! use gridscape_index::Rect;
//! use gridscape_view::{Viewport, ViewportConfig};
//! use kurbo::Vec2;
//!
//! let mut view = Viewport::new(&ViewportConfig {
//!     base_size: 40.0,
//!     ..ViewportConfig::default()
//! })
//! .unwrap();
//! assert_eq!(view.visible_region(), Rect::new(0.0, 0.0, 20.0, 20.0));
//!
//! view.pan_by(Vec2::new(-40.0, 0.0));
//! assert_eq!(view.visible_region().x, 1.0);
//! ```
//!
//! ## Features
//!
//! - `std` *(default)* / `libm`: float backend, forwarded to Kurbo and `gridscape_index`.
//! - `tracing`: log scale changes.
//! - `serde`: derive `Serialize`/`Deserialize` for [`ViewportConfig`], [`ViewState`] and
//!   [`ViewChanges`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod config;
mod state;
mod util;
mod viewport;

pub use config::{ConfigError, DEFAULT_BASE_SIZE, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, ViewportConfig};
pub use state::{PAN_X_KEY, PAN_Y_KEY, SCALE_KEY, ViewState};
pub use viewport::{ViewChanges, Viewport, WHEEL_ZOOM_FACTOR};
