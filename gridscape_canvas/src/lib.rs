// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridscape Canvas: interaction and frame planning for a pannable, zoomable grid.
//!
//! This crate ties a [`gridscape_index::Quadtree`] to a [`gridscape_view::Viewport`] and turns raw
//! input into edits and view changes:
//!
//! - Press, drag and release pan the view; a release without a drag is a click.
//! - The wheel zooms around the cursor.
//! - Double-click toggles the selection of the object under the cursor.
//! - In edit mode, `i` anchors a draft, `f` sizes it to the cursor and commits it, and `p` or a
//!   double-click commits a single cell.
//!
//! Frames are described, not rasterized: [`CanvasSession::draw`] issues calls on a [`Painter`]
//! implemented by the host. [`DisplayList`] records them.
//!
//! ## Drawn objects
//!
//! [`Renderable`] is a closed set of variants sharing a [`gridscape_index::BoundsObject`] payload:
//!
//! - [`Renderable::Plain`]: a padded rounded rectangle.
//! - [`Renderable::Image`]: a padded rectangle showing a host image.
//! - [`Renderable::Draft`]: an object being created, previewed up to the cursor.
//!
//! Drafts are owned by the session and only moved into the index when finished.
//!
//! ## Features
//!
//! - `std` *(default)* / `libm`: float backend, forwarded to Kurbo and the other Gridscape crates.
//! - `tracing`: log commits, refusals and selection changes.
//! - `serde`: derive `Serialize`/`Deserialize` for [`CanvasConfig`], [`Color`] and [`RenderLayers`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod config;
mod gesture;
mod paint;
mod pointer;
mod renderable;
mod session;

pub use config::{CanvasConfig, CanvasError, RenderLayers};
pub use gesture::{EditKey, diagonal_points_to_rect};
pub use paint::{Color, Command, DisplayList, ImageId, Painter};
pub use pointer::{PointerPhase, PointerState, Release};
pub use renderable::{
    ANCHOR_DOT_RADIUS, CORNER_RADIUS, Draft, LABEL_SIZE, LINE_WIDTH, PADDING, PREVIEW_ALPHA,
    RenderContext, Renderable, padded_body, padded_rect,
};
pub use session::{CanvasEvent, CanvasSession};
