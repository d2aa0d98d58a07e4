// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gridscape Index: an append-only region quadtree over a fixed logical extent.
//!
//! Gridscape Index stores axis-aligned rectangles and answers "what overlaps this range" and
//! "what sits under this point" for an interactive grid.
//!
//! - Insert objects implementing [`Bounded`]; the tree takes ownership and hands back an [`ObjectId`].
//! - Leaves hold at most `capacity` objects that do not overlap each other. A full leaf splits into
//!   four quadrants and redistributes its content.
//! - Query by intersecting rectangle ([`Quadtree::query`]) or by point ([`Quadtree::query_point`]).
//! - Opt into region-level change notifications with [`Quadtree::record_changes`] and drain them
//!   with [`Quadtree::take_changes`], for example to invalidate a minimap.
//!
//! Rectangles are origin + extent in `f64` logical units. Overlap is half-open (shared edges do not
//! overlap); point containment is inclusive.
//!
//! # Example
//!
//! ```rust
//! use gridscape_index::{BoundsObject, Quadtree, Rect};
//!
//! let mut tree = Quadtree::new(400.0, 400.0);
//! for y in 0..4 {
//!     for x in 0..4 {
//!         let cell = BoundsObject::new(Rect::new(x as f64, y as f64, 1.0, 1.0));
//!         assert!(tree.insert(cell).is_ok());
//!     }
//! }
//!
//! // Range query over a 2x2 window.
//! let hits: Vec<_> = tree.query(&Rect::new(1.0, 1.0, 2.0, 2.0)).collect();
//! assert_eq!(hits.len(), 4);
//!
//! // Point query, then toggle the hit object's selection.
//! let (id, _) = tree.query_point(2.5, 0.5).unwrap();
//! tree.get_mut(id).unwrap().toggle();
//! assert!(tree.get(id).unwrap().is_selected());
//! ```
//!
//! ## Insertion policy
//!
//! Insertion is deliberately strict and short-circuiting:
//!
//! - An object that does not overlap the extent is refused ([`InsertError::OutOfBounds`]).
//! - An object overlapping anything already stored in its target leaf is refused
//!   ([`InsertError::Collision`]).
//! - A full leaf at [`MAX_DEPTH`] does not split again ([`InsertError::DepthLimit`]).
//! - Internal nodes offer the object to their children in the order top-right, top-left,
//!   bottom-right, bottom-left and stop at the first child that accepts it. An object straddling
//!   quadrant boundaries is therefore stored once.
//!
//! Children are stored top-left, top-right, bottom-left, bottom-right ([`Quadrant::ALL`]), and range
//! queries and content flattening walk them in that order.
//!
//! Refused objects come back inside [`Rejected`] so nothing is lost silently.
//!
//! ## Known limitations
//!
//! - No removal or re-balancing.
//! - Point queries below a subdivision inspect a single quadrant. An object stored in a neighbouring
//!   quadrant that happens to cover the point is not found.
//! - Range queries are not deduplicated.
//!
//! ## Features
//!
//! - `std` *(default)*: use `std` float rounding. Disable and enable `libm` for `no_std` builds.
//! - `tracing`: log subdivisions and refused insertions.
//! - `serde`: derive `Serialize`/`Deserialize` for [`Rect`] and [`BoundsObject`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod changes;
mod node;
mod object;
mod tree;
mod types;
pub(crate) mod util;

pub use changes::{ChangeBatch, ChangeEvent, ChangeLog, NodeChange};
pub use node::{DEFAULT_CAPACITY, Leaves, MAX_DEPTH, QuadNode, Quadrant, quadrant_regions};
pub use object::{Bounded, BoundsObject, ObjectId};
pub use tree::{InsertError, Quadtree, ROOT_CAPACITY, Rejected};
pub use types::{Rect, overlaps};
