// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_placement::{ArrowAlignment, LayoutDirection, PlacementRequest, Side, arrow_offset};

fn anchors(n: usize) -> Vec<Rect> {
    // Spread anchors over and past a 1280x800 viewport so every clamp branch runs.
    (0..n)
        .map(|i| {
            let x = (i * 37 % 1400) as f64 - 60.0;
            let y = (i * 53 % 900) as f64 - 50.0;
            Rect::new(x, y, x + 48.0, y + 32.0)
        })
        .collect()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/resolve");
    let container = Size::new(1280.0, 800.0);

    for len in [64usize, 1_024, 16_384] {
        let anchors = anchors(len);
        group.throughput(Throughput::Elements(len as u64));

        for side in [Side::Bottom, Side::Leading] {
            group.bench_with_input(
                BenchmarkId::new(format!("{side:?}"), len),
                &anchors,
                |b, anchors| {
                    b.iter(|| {
                        for &anchor in anchors {
                            let placement = PlacementRequest::new(
                                anchor,
                                Size::new(220.0, 120.0),
                                container,
                            )
                            .with_side(side)
                            .with_direction(LayoutDirection::RightToLeft)
                            .place();
                            black_box(placement);
                        }
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_arrow(c: &mut Criterion) {
    let container = Size::new(1280.0, 800.0);
    let anchors = anchors(1_024);
    let placed: Vec<_> = anchors
        .iter()
        .map(|&anchor| {
            let p = PlacementRequest::new(anchor, Size::new(220.0, 120.0), container).place();
            (anchor, p.rect)
        })
        .collect();

    c.bench_function("placement/arrow_offset", |b| {
        b.iter(|| {
            for &(anchor, rect) in &placed {
                black_box(arrow_offset(
                    anchor,
                    rect,
                    Side::Bottom,
                    ArrowAlignment::Center,
                    12.0,
                ));
            }
        });
    });
}

criterion_group!(benches, bench_resolve, bench_arrow);
criterion_main!(benches);
