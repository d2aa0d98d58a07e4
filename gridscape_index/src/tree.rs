// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public [`Quadtree`] API: an append-only region quadtree that owns its objects.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Display};

use crate::changes::{ChangeBatch, ChangeEvent, ChangeLog};
use crate::node::QuadNode;
use crate::object::{Bounded, BoundsObject, ObjectId};
use crate::types::Rect;

/// Leaf capacity of the root built by [`Quadtree::new`].
pub const ROOT_CAPACITY: usize = 100;

/// Why an insertion was refused.
///
/// Variants are ordered from least to most specific.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum InsertError {
    /// The object does not overlap the tree's extent.
    OutOfBounds,
    /// The object overlaps an object already stored in the leaf it was routed to.
    Collision,
    /// The leaf it was routed to is full and already at [`MAX_DEPTH`](crate::MAX_DEPTH).
    DepthLimit,
}

impl Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("object lies outside the tree extent"),
            Self::Collision => f.write_str("object overlaps an existing object"),
            Self::DepthLimit => f.write_str("target leaf is full at the depth limit"),
        }
    }
}

impl core::error::Error for InsertError {}

/// A refused insertion. Hands the object back to the caller.
#[derive(Clone, Debug)]
pub struct Rejected<B> {
    /// Why the tree refused the object.
    pub reason: InsertError,
    /// The object that was not inserted.
    pub object: B,
}

impl<B> Rejected<B> {
    /// Recover the object.
    pub fn into_inner(self) -> B {
        self.object
    }
}

impl<B> Display for Rejected<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "insert rejected: {}", self.reason)
    }
}

impl<B: Debug> core::error::Error for Rejected<B> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.reason)
    }
}

/// Region quadtree over a fixed logical extent.
///
/// The tree owns every inserted object; [`ObjectId`]s are handed out in insertion order
/// and never invalidated because the index does not support removal.
pub struct Quadtree<B = BoundsObject> {
    width: f64,
    height: f64,
    root: QuadNode,
    objects: Vec<B>,
    changes: ChangeLog,
}

impl<B> Debug for Quadtree<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quadtree")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("objects", &self.objects.len())
            .field("pending_changes", &self.changes.pending())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl<B: Bounded> Quadtree<B> {
    /// Create an empty tree covering `{0, 0, width, height}` with a root capacity of
    /// [`ROOT_CAPACITY`].
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_capacity(width, height, ROOT_CAPACITY)
    }

    /// Create an empty tree with a custom leaf capacity (zero is treated as one).
    ///
    /// Change recording starts off; see [`Self::record_changes`].
    pub fn with_capacity(width: f64, height: f64, capacity: usize) -> Self {
        let changes = ChangeLog::new();
        changes.set_recording(false);
        let root = QuadNode::with_log(
            Rect::new(0.0, 0.0, width, height),
            capacity,
            0,
            changes.clone(),
        );
        Self {
            width,
            height,
            root,
            objects: Vec::new(),
            changes,
        }
    }

    /// Logical width fixed at construction.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Logical height fixed at construction.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The root node, for read-only inspection of the tree structure.
    pub fn root(&self) -> &QuadNode {
        &self.root
    }

    /// Insert an object, taking ownership on success.
    ///
    /// Fails with [`InsertError::OutOfBounds`] when the object does not overlap the
    /// extent, with [`InsertError::Collision`] when the leaf it lands in already
    /// holds an overlapping object, and with [`InsertError::DepthLimit`] when that leaf
    /// is full and may not split further. A refused object is returned inside [`Rejected`].
    ///
    /// ```
    /// use gridscape_index::{BoundsObject, InsertError, Quadtree, Rect};
    ///
    /// let mut tree = Quadtree::new(10.0, 10.0);
    /// assert!(tree.insert(BoundsObject::new(Rect::new(0.0, 0.0, 2.0, 2.0))).is_ok());
    ///
    /// let err = tree.insert(BoundsObject::new(Rect::new(1.0, 1.0, 1.0, 1.0))).unwrap_err();
    /// assert_eq!(err.reason, InsertError::Collision);
    /// assert_eq!(tree.size(), 1);
    /// ```
    pub fn insert(&mut self, object: B) -> Result<ObjectId, Rejected<B>> {
        let id = ObjectId::new(self.objects.len());
        let bounds = object.bounds();
        match self.root.insert(id, bounds, &self.objects) {
            Ok(()) => {
                self.objects.push(object);
                Ok(id)
            }
            Err(reason) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(?bounds, %reason, "insert rejected");
                Err(Rejected { reason, object })
            }
        }
    }

    /// Objects overlapping `range`, in traversal order.
    ///
    /// Children are visited top-left, top-right, bottom-left, bottom-right. Results are
    /// not deduplicated.
    pub fn query(&self, range: &Rect) -> impl Iterator<Item = (ObjectId, &B)> + use<'_, B> {
        let mut ids = Vec::new();
        self.root.query(range, &self.objects, &mut ids);
        ids.into_iter().map(move |id| (id, &self.objects[id.idx()]))
    }

    /// The first object containing the point, if any.
    ///
    /// Below the root's first subdivision only one quadrant is searched, so an object
    /// stored in a neighbouring quadrant is missed even when it covers the point.
    pub fn query_point(&self, x: f64, y: f64) -> Option<(ObjectId, &B)> {
        let id = self.root.query_point(x, y, &self.objects)?;
        Some((id, &self.objects[id.idx()]))
    }

    /// Number of objects reachable from the root. Computed on demand.
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Whether the tree holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Look up an object by id.
    pub fn get(&self, id: ObjectId) -> Option<&B> {
        self.objects.get(id.idx())
    }

    /// Mutable access to an object's non-spatial state.
    ///
    /// Changing the object's bounds through this reference desynchronizes the index.
    /// Call [`Self::mark_updated`] afterwards so observers can repaint.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut B> {
        self.objects.get_mut(id.idx())
    }

    /// All owned objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &B)> + '_ {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, o)| (ObjectId::new(i), o))
    }

    /// Report an in-place change to `id` through the change log.
    pub fn mark_updated(&self, id: ObjectId) {
        if let Some(object) = self.get(id) {
            self.changes.emit(object.bounds(), ChangeEvent::Updated(id));
        }
    }

    /// Start or stop recording changes. Stopping discards anything not yet drained.
    ///
    /// While recording, every change is kept until [`Self::take_changes`] drains it.
    pub fn record_changes(&mut self, on: bool) {
        self.changes.set_recording(on);
    }

    /// Whether changes are being recorded.
    pub fn is_recording_changes(&self) -> bool {
        self.changes.is_recording()
    }

    /// Number of recorded changes waiting to be drained.
    pub fn pending_changes(&self) -> usize {
        self.changes.pending()
    }

    /// Drain every change recorded since the last call.
    pub fn take_changes(&mut self) -> ChangeBatch {
        self.changes.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Quadrant;

    fn unit(x: f64, y: f64) -> BoundsObject {
        BoundsObject::new(Rect::new(x, y, 1.0, 1.0))
    }

    #[test]
    fn rejected_overlapping_insert_keeps_size() {
        let mut tree = Quadtree::new(400.0, 400.0);
        assert!(
            tree.insert(BoundsObject::new(Rect::new(0.0, 0.0, 2.0, 2.0)))
                .is_ok()
        );
        let err = tree
            .insert(BoundsObject::new(Rect::new(1.0, 1.0, 1.0, 1.0)))
            .unwrap_err();
        assert_eq!(err.reason, InsertError::Collision);
        assert_eq!(err.into_inner().rect, Rect::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(tree.size(), 1);
    }

    #[test]
    fn outside_extent_is_out_of_bounds() {
        let mut tree: Quadtree = Quadtree::new(10.0, 10.0);
        for r in [
            Rect::new(10.0, 0.0, 1.0, 1.0),
            Rect::new(-1.0, 0.0, 1.0, 1.0),
            Rect::new(3.0, 12.0, 1.0, 1.0),
        ] {
            let err = tree.insert(BoundsObject::new(r)).unwrap_err();
            assert_eq!(err.reason, InsertError::OutOfBounds);
        }
        assert!(tree.is_empty());
        assert!(tree.take_changes().is_empty());
    }

    #[test]
    fn root_capacity_is_one_hundred() {
        let mut tree: Quadtree = Quadtree::new(20.0, 20.0);
        assert_eq!(tree.root().capacity(), ROOT_CAPACITY);
        for i in 0..100 {
            let (x, y) = ((i % 20) as f64, (i / 20) as f64);
            assert!(tree.insert(unit(x, y)).is_ok());
        }
        assert!(!tree.root().is_divided());
        assert!(tree.insert(unit(0.0, 10.0)).is_ok());
        assert!(tree.root().is_divided());
        assert_eq!(tree.size(), 101);
    }

    #[test]
    fn point_round_trip_on_integer_cells() {
        let mut tree: Quadtree = Quadtree::with_capacity(16.0, 16.0, 4);
        let mut ids = Vec::new();
        for y in 0..16 {
            for x in 0..16 {
                ids.push(((x, y), tree.insert(unit(x as f64, y as f64)).unwrap()));
            }
        }
        for ((x, y), id) in ids {
            let (hit, obj) = tree
                .query_point(x as f64 + 0.5, y as f64 + 0.5)
                .expect("cell center resolves");
            assert_eq!(hit, id);
            assert_eq!(obj.rect, Rect::new(x as f64, y as f64, 1.0, 1.0));
        }
        assert!(tree.query_point(-0.5, 3.0).is_none());
        assert!(tree.query_point(3.0, 16.5).is_none());
    }

    #[test]
    fn query_filters_by_half_open_overlap() {
        let mut tree: Quadtree = Quadtree::with_capacity(8.0, 8.0, 2);
        for y in 0..8 {
            for x in 0..8 {
                tree.insert(unit(x as f64, y as f64)).unwrap();
            }
        }
        let mut hits: Vec<Rect> = tree
            .query(&Rect::new(2.0, 2.0, 3.0, 2.0))
            .map(|(_, o)| o.rect)
            .collect();
        hits.sort_by(|a, b| (a.y, a.x).partial_cmp(&(b.y, b.x)).unwrap());
        let expected: Vec<Rect> = (2..4)
            .flat_map(|y| (2..5).map(move |x| Rect::new(x as f64, y as f64, 1.0, 1.0)))
            .collect();
        assert_eq!(hits, expected);
        assert_eq!(tree.query(&Rect::new(20.0, 20.0, 5.0, 5.0)).count(), 0);
    }

    #[test]
    fn leaves_respect_capacity_and_overlap_invariants() {
        let mut tree: Quadtree = Quadtree::with_capacity(32.0, 32.0, 7);
        for y in 0..32 {
            for x in 0..32 {
                tree.insert(unit(x as f64, y as f64)).unwrap();
            }
        }
        assert_eq!(tree.size(), 1024);
        for leaf in tree.root().leaves() {
            assert!(leaf.items().len() <= leaf.capacity());
            for (i, a) in leaf.items().iter().enumerate() {
                for b in &leaf.items()[i + 1..] {
                    let (a, b) = (tree.get(*a).unwrap(), tree.get(*b).unwrap());
                    assert!(!a.overlaps(&b.rect), "leaf holds overlapping objects");
                }
            }
        }
        let mut internal = alloc::vec![tree.root()];
        while let Some(node) = internal.pop() {
            if let Some(children) = node.children() {
                assert!(node.items().is_empty(), "internal nodes hold no objects");
                internal.extend(children.iter());
            }
        }
    }

    #[test]
    fn changes_report_inserts_subdivisions_and_updates() {
        let mut tree: Quadtree = Quadtree::with_capacity(4.0, 4.0, 1);
        tree.record_changes(true);
        let a = tree.insert(unit(0.0, 0.0)).unwrap();
        let first = tree.take_changes();
        assert_eq!(first.inserted().collect::<Vec<_>>(), [a]);
        assert_eq!(first.union(), Some(Rect::new(0.0, 0.0, 4.0, 4.0)));

        let b = tree.insert(unit(3.0, 3.0)).unwrap();
        let second = tree.take_changes();
        assert!(
            second
                .changes
                .iter()
                .any(|c| c.event == ChangeEvent::Subdivided)
        );
        assert_eq!(second.inserted().collect::<Vec<_>>(), [a, b]);

        tree.get_mut(b).unwrap().toggle();
        tree.mark_updated(b);
        let third = tree.take_changes();
        assert_eq!(third.len(), 1);
        assert_eq!(third.changes[0].event, ChangeEvent::Updated(b));
        assert_eq!(third.changes[0].region, Rect::new(3.0, 3.0, 1.0, 1.0));
        assert!(tree.get(b).unwrap().is_selected());

        let br = tree.root().child(Quadrant::BottomRight).unwrap();
        assert_eq!(br.items(), &[b]);
    }

    #[test]
    fn changes_are_dropped_unless_recording() {
        let mut tree: Quadtree = Quadtree::with_capacity(16.0, 16.0, 4);
        assert!(!tree.is_recording_changes());
        for y in 0..16 {
            for x in 0..16 {
                tree.insert(unit(x as f64, y as f64)).unwrap();
            }
        }
        assert_eq!(tree.pending_changes(), 0);

        tree.record_changes(true);
        tree.get_mut(ObjectId::new(3)).unwrap().toggle();
        tree.mark_updated(ObjectId::new(3));
        assert_eq!(tree.pending_changes(), 1);

        tree.record_changes(false);
        assert_eq!(tree.pending_changes(), 0, "stopping discards undrained changes");
        assert!(tree.take_changes().is_empty());
    }

    #[test]
    fn disjoint_object_past_depth_limit_is_not_a_collision() {
        let mut tree: Quadtree = Quadtree::with_capacity(4.0, 4.0, 1);
        tree.insert(BoundsObject::new(Rect::new(0.0, 0.0, 0.5, 0.5)))
            .unwrap();
        let err = tree
            .insert(BoundsObject::new(Rect::new(0.5, 0.5, 0.5, 0.5)))
            .unwrap_err();
        assert_eq!(err.reason, InsertError::DepthLimit);
        assert_eq!(tree.size(), 1);
    }

    #[test]
    fn range_query_lists_top_left_quadrant_first() {
        let mut tree: Quadtree = Quadtree::with_capacity(4.0, 4.0, 1);
        let left = tree.insert(unit(0.0, 0.0)).unwrap();
        let right = tree.insert(unit(3.0, 0.0)).unwrap();
        let hits: Vec<_> = tree
            .query(&Rect::new(0.0, 0.0, 4.0, 4.0))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(hits, [left, right]);
    }

    #[test]
    fn iter_yields_insertion_order() {
        let mut tree: Quadtree = Quadtree::new(4.0, 4.0);
        let a = tree.insert(unit(2.0, 2.0)).unwrap();
        let b = tree.insert(unit(0.0, 0.0)).unwrap();
        let ids: Vec<_> = tree.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, [a, b]);
        assert!(a < b);
    }
}
