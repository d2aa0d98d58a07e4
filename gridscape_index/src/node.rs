// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree nodes: leaf storage, subdivision, and range/point queries.
//!
//! A node is either a leaf holding at most `capacity` mutually non-overlapping
//! objects, or an internal node with exactly four children and no objects of its own.
//! Objects are referenced by [`ObjectId`]; the tree owns the objects themselves and
//! passes them down as a slice.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::changes::{ChangeEvent, ChangeLog};
use crate::object::{Bounded, ObjectId};
use crate::tree::InsertError;
use crate::types::Rect;
use crate::util::{ceil, floor};

/// Leaf capacity of a node built without an explicit capacity.
pub const DEFAULT_CAPACITY: usize = 10;

/// Depth at which a full leaf stops subdividing and rejects further objects.
///
/// Regions one unit wide split into a one-unit child and an empty one, so without a
/// bound a stack of overlapping candidates would subdivide forever.
pub const MAX_DEPTH: u32 = 32;

/// One of the four children of an internal node.
///
/// The discriminant is the child's slot in [`QuadNode::children`]. Range queries and
/// content flattening visit children in slot order; insertion uses
/// [`Quadrant::INSERT_PRIORITY`] instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Left half, top half.
    TopLeft = 0,
    /// Right half, top half.
    TopRight = 1,
    /// Left half, bottom half.
    BottomLeft = 2,
    /// Right half, bottom half.
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in slot order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Order in which an internal node offers a new object to its children.
    pub const INSERT_PRIORITY: [Self; 4] = [
        Self::TopRight,
        Self::TopLeft,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    /// Slot of this quadrant in a node's child array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Split `region` into its four quadrants, in slot order.
///
/// The near (left/top) halves take `ceil(extent / 2)` and the far halves
/// `floor(extent / 2)`, so odd integer extents give the extra unit to the top/left.
///
/// ```
/// use gridscape_index::{Quadrant, Rect, quadrant_regions};
///
/// let q = quadrant_regions(&Rect::new(0.0, 0.0, 7.0, 5.0));
/// assert_eq!(q[Quadrant::TopLeft.index()], Rect::new(0.0, 0.0, 4.0, 3.0));
/// assert_eq!(q[Quadrant::BottomRight.index()], Rect::new(4.0, 3.0, 3.0, 2.0));
/// ```
pub fn quadrant_regions(region: &Rect) -> [Rect; 4] {
    let Rect { x, y, w, h } = *region;
    let near_w = ceil(w / 2.0);
    let far_w = floor(w / 2.0);
    let near_h = ceil(h / 2.0);
    let far_h = floor(h / 2.0);
    [
        Rect::new(x, y, near_w, near_h),
        Rect::new(x + near_w, y, far_w, near_h),
        Rect::new(x, y + near_h, near_w, far_h),
        Rect::new(x + near_w, y + near_h, far_w, far_h),
    ]
}

/// A rectangular region of a quadtree.
pub struct QuadNode {
    region: Rect,
    items: Vec<ObjectId>,
    children: Option<Box<[QuadNode; 4]>>,
    depth: u32,
    capacity: usize,
    changes: ChangeLog,
}

impl Debug for QuadNode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadNode")
            .field("region", &self.region)
            .field("depth", &self.depth)
            .field("capacity", &self.capacity)
            .field("items", &self.items.len())
            .field("divided", &self.is_divided())
            .finish_non_exhaustive()
    }
}

impl QuadNode {
    /// Create an empty leaf with [`DEFAULT_CAPACITY`] and its own change log.
    #[cfg(test)]
    pub(crate) fn new(region: Rect) -> Self {
        Self::with_log(region, DEFAULT_CAPACITY, 0, ChangeLog::new())
    }

    /// Create an empty leaf that reports into `changes`.
    ///
    /// A capacity of zero is treated as one.
    pub(crate) fn with_log(region: Rect, capacity: usize, depth: u32, changes: ChangeLog) -> Self {
        Self {
            region,
            items: Vec::new(),
            children: None,
            depth,
            capacity: capacity.max(1),
            changes,
        }
    }

    /// The region covered by this node.
    pub fn region(&self) -> Rect {
        self.region
    }

    /// Distance from the root (the root is at depth 0).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Maximum number of objects a leaf holds before it subdivides.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether this node has been split into quadrants.
    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    /// Objects stored directly in this node. Always empty for internal nodes.
    pub fn items(&self) -> &[ObjectId] {
        &self.items
    }

    /// The four children in slot order, if divided.
    pub fn children(&self) -> Option<&[Self; 4]> {
        self.children.as_deref()
    }

    /// The child covering `quadrant`, if divided.
    pub fn child(&self, quadrant: Quadrant) -> Option<&Self> {
        self.children().map(|c| &c[quadrant.index()])
    }

    /// Total number of objects stored in this subtree. Computed on demand.
    pub fn size(&self) -> usize {
        self.items.len()
            + self
                .children()
                .map_or(0, |c| c.iter().map(Self::size).sum::<usize>())
    }

    /// Every object in this subtree: own items first, then each child in slot order.
    pub fn content(&self) -> Vec<ObjectId> {
        let mut out = Vec::new();
        self.collect_content(&mut out);
        out
    }

    fn collect_content(&self, out: &mut Vec<ObjectId>) {
        out.extend_from_slice(&self.items);
        if let Some(children) = self.children() {
            for child in children {
                child.collect_content(out);
            }
        }
    }

    /// Depth-first iterator over the leaves of this subtree, children in slot order.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: alloc::vec![self] }
    }

    /// Record a change for this node's region in the shared log.
    pub fn emit_change(&self, event: ChangeEvent) {
        self.changes.emit(self.region, event);
    }

    /// The quadrant a point query descends into.
    ///
    /// Points on the vertical midline count as left and points on the horizontal
    /// midline count as top.
    pub fn point_quadrant(&self, x: f64, y: f64) -> Quadrant {
        let left = x <= self.region.x + self.region.w / 2.0;
        let top = y <= self.region.y + self.region.h / 2.0;
        match (left, top) {
            (true, false) => Quadrant::BottomLeft,
            (false, true) => Quadrant::TopRight,
            (false, false) => Quadrant::BottomRight,
            (true, true) => Quadrant::TopLeft,
        }
    }

    /// Try to store `id`, whose rectangle is `bounds`.
    ///
    /// `objects` resolves the ids already stored in the tree; `id` itself does not need
    /// to be resolvable yet. When every candidate child refuses, the most specific
    /// reason wins: a depth limit over a collision over lying outside the child.
    pub(crate) fn insert<B: Bounded>(
        &mut self,
        id: ObjectId,
        bounds: Rect,
        objects: &[B],
    ) -> Result<(), InsertError> {
        if !self.region.overlaps(&bounds) {
            return Err(InsertError::OutOfBounds);
        }

        if self.children.is_none() {
            if self.items.len() < self.capacity {
                if self
                    .items
                    .iter()
                    .any(|other| objects[other.idx()].overlaps(&bounds))
                {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(?id, region = ?self.region, "insert rejected: overlaps leaf content");
                    return Err(InsertError::Collision);
                }
                self.items.push(id);
                self.emit_change(ChangeEvent::Inserted(id));
                return Ok(());
            }

            if self.depth >= MAX_DEPTH {
                #[cfg(feature = "tracing")]
                tracing::debug!(?id, depth = self.depth, "insert rejected: depth limit");
                return Err(InsertError::DepthLimit);
            }

            self.subdivide();
            for item in core::mem::take(&mut self.items) {
                let item_bounds = objects[item.idx()].bounds();
                if let Err(_reason) = self.insert(item, item_bounds, objects) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(?item, reason = %_reason, region = ?self.region, "object dropped while subdividing");
                }
            }
        }

        let Some(children) = self.children.as_deref_mut() else {
            return Err(InsertError::OutOfBounds);
        };
        let mut refusal = InsertError::OutOfBounds;
        for quadrant in Quadrant::INSERT_PRIORITY {
            match children[quadrant.index()].insert(id, bounds, objects) {
                Ok(()) => return Ok(()),
                Err(reason) => refusal = refusal.max(reason),
            }
        }
        Err(refusal)
    }

    fn subdivide(&mut self) {
        let depth = self.depth + 1;
        let [tl, tr, bl, br] = quadrant_regions(&self.region);
        let child = |region| Self::with_log(region, self.capacity, depth, self.changes.clone());
        let children = Box::new([child(tl), child(tr), child(bl), child(br)]);
        self.children = Some(children);

        #[cfg(feature = "tracing")]
        tracing::trace!(region = ?self.region, depth, "subdivided");
        self.emit_change(ChangeEvent::Subdivided);
    }

    /// Append every object overlapping `range` to `out`.
    ///
    /// No deduplication happens; an object reachable through two branches would be
    /// reported twice.
    pub(crate) fn query<B: Bounded>(&self, range: &Rect, objects: &[B], out: &mut Vec<ObjectId>) {
        if !self.region.overlaps(range) {
            return;
        }
        match self.children() {
            Some(children) => {
                for child in children {
                    child.query(range, objects, out);
                }
            }
            None => out.extend(
                self.items
                    .iter()
                    .copied()
                    .filter(|id| objects[id.idx()].overlaps(range)),
            ),
        }
    }

    /// Find the first object containing the point.
    ///
    /// An internal node examines only the quadrant chosen by [`Self::point_quadrant`],
    /// scanning that quadrant's flattened content. Objects stored in a neighbouring
    /// quadrant are not found even if they cover the point.
    pub(crate) fn query_point<B: Bounded>(&self, x: f64, y: f64, objects: &[B]) -> Option<ObjectId> {
        if !self.region.contains_point(x, y) {
            return None;
        }
        let contains = |id: &ObjectId| objects[id.idx()].contains(x, y);
        match self.children() {
            None => self.items.iter().copied().find(contains),
            Some(children) => children[self.point_quadrant(x, y).index()]
                .content()
                .into_iter()
                .find(contains),
        }
    }
}

/// Iterator over leaf nodes, returned by [`QuadNode::leaves`].
#[derive(Debug)]
pub struct Leaves<'a> {
    stack: Vec<&'a QuadNode>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a QuadNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node.children() {
                Some(children) => self.stack.extend(children.iter().rev()),
                None => return Some(node),
            }
        }
        None
    }
}
