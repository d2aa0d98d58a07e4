// Copyright 2025 the Gridscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use gridscape_index::{BoundsObject, Quadtree, Rect};
use gridscape_view::{Viewport, ViewportConfig};
use kurbo::{Point, Vec2};

fn gen_grid_cells(n: usize) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Rect::new(x as f64, y as f64, 1.0, 1.0));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Integer-aligned rectangles of 1 to 4 cells per side. Many collide and get refused.
fn gen_random_rects(count: usize, extent: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let w = (rng.next_f64() * 4.0).floor() + 1.0;
        let h = (rng.next_f64() * 4.0).floor() + 1.0;
        let x = (rng.next_f64() * (extent - w)).floor();
        let y = (rng.next_f64() * (extent - h)).floor();
        out.push(Rect::new(x, y, w, h));
    }
    out
}

fn filled(n: usize, capacity: usize) -> Quadtree {
    let mut tree = Quadtree::with_capacity(n as f64, n as f64, capacity);
    for r in gen_grid_cells(n) {
        let _ = tree.insert(BoundsObject::new(r));
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &capacity in &[10usize, 100] {
        for &n in &[32usize, 64, 128] {
            let cells = gen_grid_cells(n);
            group.throughput(Throughput::Elements((n * n) as u64));
            group.bench_function(format!("grid_n{n}_cap{capacity}"), |b| {
                b.iter_batched(
                    || Quadtree::with_capacity(n as f64, n as f64, capacity),
                    |mut tree| {
                        for r in cells.iter().copied() {
                            let _ = tree.insert(BoundsObject::new(r));
                        }
                        black_box(tree.size());
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    let rects = gen_random_rects(8192, 256.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("random_with_collisions", |b| {
        b.iter_batched(
            || Quadtree::new(256.0, 256.0),
            |mut tree| {
                let mut accepted = 0usize;
                for r in rects.iter().copied() {
                    accepted += usize::from(tree.insert(BoundsObject::new(r)).is_ok());
                }
                black_box(accepted);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let tree = filled(400, 100);
    for &window in &[5.0f64, 20.0, 80.0] {
        group.bench_function(format!("rect_{window}x{window}"), |b| {
            b.iter(|| {
                let mut total = 0usize;
                for q in 0..64 {
                    let x = f64::from(q % 8) * 40.0;
                    let y = f64::from(q / 8) * 40.0;
                    total += tree.query(&Rect::new(x, y, window, window)).count();
                }
                black_box(total)
            });
        });
    }
    group.bench_function("point_1k", |b| {
        let mut rng = Rng::new(0xBADC_F00D_1234_5678);
        let points: Vec<(f64, f64)> = (0..1000)
            .map(|_| (rng.next_f64() * 400.0, rng.next_f64() * 400.0))
            .collect();
        b.iter(|| {
            let mut hits = 0usize;
            for &(x, y) in &points {
                hits += usize::from(tree.query_point(x, y).is_some());
            }
            black_box(hits)
        });
    });
    group.finish();
}

fn bench_cull(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport_cull");
    let tree = filled(400, 100);
    group.bench_function("pan_zoom_then_query", |b| {
        b.iter_batched(
            || {
                Viewport::new(&ViewportConfig {
                    base_size: 40.0,
                    ..ViewportConfig::default()
                })
                .unwrap()
            },
            |mut view| {
                let mut total = 0usize;
                for step in 0..32 {
                    view.pan_by(Vec2::new(-37.0, -23.0));
                    view.wheel_zoom(Point::new(400.0, 400.0), if step % 2 == 0 { -10.0 } else { 5.0 });
                    total += tree.query(&view.visible_region()).count();
                }
                black_box(total);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_query, bench_cull);
criterion_main!(benches);
