// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the quadtree.
//!
//! 1. Overlap is symmetric.
//! 2. Every leaf holds at most `capacity` objects.
//! 3. No two objects in one leaf overlap.
//! 4. Range queries have no false negatives.
//! 5. Quadrant splits conserve the parent extent.
//! 6. Unit cells round-trip through point queries.

use gridscape_index::{Bounded, BoundsObject, Quadrant, Quadtree, Rect, quadrant_regions};
use proptest::prelude::*;

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-50.0..150.0_f64, -50.0..150.0_f64, 0.0..40.0_f64, 0.0..40.0_f64)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn grid_rect_strategy() -> impl Strategy<Value = Rect> {
    (0u16..64, 0u16..64, 1u16..6, 1u16..6)
        .prop_map(|(x, y, w, h)| Rect::new(x.into(), y.into(), w.into(), h.into()))
}

fn build(rects: &[Rect], capacity: usize) -> (Quadtree, Vec<Rect>) {
    let mut tree = Quadtree::with_capacity(64.0, 64.0, capacity);
    let mut accepted = Vec::new();
    for r in rects {
        if tree.insert(BoundsObject::new(*r)).is_ok() {
            accepted.push(*r);
        }
    }
    (tree, accepted)
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a), "a={:?}, b={:?}", a, b);
    }

    #[test]
    fn leaves_hold_at_most_capacity(
        rects in prop::collection::vec(grid_rect_strategy(), 0..300),
        capacity in 1usize..12,
    ) {
        let (tree, accepted) = build(&rects, capacity);
        prop_assert_eq!(tree.size(), accepted.len());
        for leaf in tree.root().leaves() {
            prop_assert!(leaf.items().len() <= capacity);
        }
    }

    #[test]
    fn leaves_hold_no_overlapping_pairs(
        rects in prop::collection::vec(grid_rect_strategy(), 0..300),
        capacity in 1usize..12,
    ) {
        let (tree, _) = build(&rects, capacity);
        for leaf in tree.root().leaves() {
            let items = leaf.items();
            for (i, a) in items.iter().enumerate() {
                for b in &items[i + 1..] {
                    let a = tree.get(*a).unwrap();
                    let b = tree.get(*b).unwrap();
                    prop_assert!(!a.overlaps(&b.bounds()));
                }
            }
        }
    }

    // Completeness holds for objects that sit inside a single leaf region, which is
    // always the case for integer-aligned unit cells. An object straddling quadrants
    // is stored once and can be missed by a range touching only its other part.
    #[test]
    fn query_has_no_false_negatives(
        cells in prop::collection::btree_set((0u8..64, 0u8..64), 0..300),
        range in rect_strategy(),
        capacity in 1usize..12,
    ) {
        let rects: Vec<Rect> = cells
            .into_iter()
            .map(|(x, y)| Rect::new(x.into(), y.into(), 1.0, 1.0))
            .collect();
        let (tree, accepted) = build(&rects, capacity);
        prop_assert_eq!(accepted.len(), rects.len());
        let hits: Vec<_> = tree.query(&range).map(|(id, _)| id).collect();
        for (id, object) in tree.iter() {
            if object.overlaps(&range) {
                prop_assert!(hits.contains(&id), "missing {:?} for range {:?}", object, range);
            }
        }
        for (_, object) in tree.query(&range) {
            prop_assert!(object.overlaps(&range));
        }
    }

    #[test]
    fn split_conserves_extent(x in -100i32..100, y in -100i32..100, w in 0u32..1000, h in 0u32..1000) {
        let parent = Rect::new(x.into(), y.into(), w.into(), h.into());
        let q = quadrant_regions(&parent);
        let tl = q[Quadrant::TopLeft.index()];
        let tr = q[Quadrant::TopRight.index()];
        let bl = q[Quadrant::BottomLeft.index()];
        let br = q[Quadrant::BottomRight.index()];
        prop_assert_eq!(tl.w + tr.w, parent.w);
        prop_assert_eq!(bl.w + br.w, parent.w);
        prop_assert_eq!(tl.h + bl.h, parent.h);
        prop_assert_eq!(tr.h + br.h, parent.h);
        prop_assert!(tl.w >= tr.w && tl.h >= bl.h, "extra unit goes top/left");
    }

    #[test]
    fn unit_cells_round_trip(cells in prop::collection::btree_set((0u8..64, 0u8..64), 1..200)) {
        let mut tree: Quadtree = Quadtree::with_capacity(64.0, 64.0, 4);
        let mut placed = Vec::new();
        for (x, y) in cells {
            let r = Rect::new(x.into(), y.into(), 1.0, 1.0);
            let id = tree.insert(BoundsObject::new(r)).unwrap();
            placed.push((r, id));
        }
        for (r, id) in placed {
            let hit = tree.query_point(r.x + 0.5, r.y + 0.5).map(|(hit, _)| hit);
            prop_assert_eq!(hit, Some(id));
        }
    }
}
