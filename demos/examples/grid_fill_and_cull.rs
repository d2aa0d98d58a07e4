// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fill a 400x400 grid with unit cells, then cull it through a panning, zooming viewport.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p gridscape_demos --example grid_fill_and_cull`

use gridscape_index::{BoundsObject, Quadtree, Rect};
use gridscape_view::{Viewport, ViewportConfig};
use kurbo::{Point, Vec2};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = Quadtree::new(400.0, 400.0);
    tree.record_changes(true);
    for x in 0..400_u32 {
        for y in 0..400_u32 {
            let cell = Rect::new(f64::from(x), f64::from(y), 1.0, 1.0);
            if let Err(rejected) = tree.insert(BoundsObject::new(cell)) {
                tracing::warn!(%rejected, "cell refused");
            }
        }
    }
    let changes = tree.take_changes();
    tracing::info!(
        objects = tree.size(),
        changes = changes.len(),
        "grid filled"
    );

    let mut view = Viewport::new(&ViewportConfig {
        base_size: 40.0,
        ..ViewportConfig::default()
    })
    .expect("valid viewport configuration");

    let visible = view.visible_region();
    println!(
        "initial: visible={visible:?} hits={}",
        tree.query(&visible).count()
    );

    // Drag a few screens to the right and down, zooming out around the center as we go.
    for step in 1..=5 {
        view.pan_by(Vec2::new(-120.0, -80.0));
        view.wheel_zoom(Point::new(400.0, 400.0), 20.0);
        let visible = view.visible_region();
        let changes = view.changes();
        println!(
            "step {step}: scale={:.2} pan=({:.1}, {:.1}) visible=({:.2}, {:.2}, {:.2}x{:.2}) hits={}",
            changes.scale,
            changes.pan_x,
            changes.pan_y,
            visible.x,
            visible.y,
            visible.w,
            visible.h,
            tree.query(&visible).count()
        );
    }

    println!("view state: ?{}", view.state().to_query());
}
