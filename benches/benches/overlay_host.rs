// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Rect, Size};
use understory_overlay::{OverlayConfiguration, OverlayHost};
use understory_timing::TimerQueue;

fn ready_host() -> OverlayHost<u32> {
    let mut host = OverlayHost::new();
    host.set_container_size(Size::new(1280.0, 800.0));
    host.set_overlay_size(Size::new(220.0, 120.0));
    host
}

fn bench_supersede_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlay/supersede");

    // Rapid hover across a toolbar: every present supersedes the last one and
    // leaves a stale entry timer behind for `advance` to discard.
    for len in [16usize, 256, 4_096] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter_batched(
                ready_host,
                |mut host| {
                    for i in 0..len {
                        let x = (i % 20) as f64 * 60.0;
                        host.present(
                            i as u32,
                            OverlayConfiguration::new(),
                            Rect::new(x, 10.0, x + 48.0, 42.0),
                        );
                        host.advance(i as u64 * 16);
                    }
                    host.advance(len as u64 * 16 + 1_000);
                    black_box(host.state());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_anchor_tracking(c: &mut Criterion) {
    let mut host = ready_host();
    host.present(0, OverlayConfiguration::new(), Rect::new(100.0, 100.0, 148.0, 132.0));
    host.advance(300);

    c.bench_function("overlay/update_anchor_scroll", |b| {
        let mut y = 0.0;
        b.iter(|| {
            y = (y + 1.0) % 600.0;
            host.update_anchor(Rect::new(100.0, y + 10.0, 148.0, y + 42.0));
            black_box(host.state());
        });
    });
}

fn bench_timer_queue(c: &mut Criterion) {
    c.bench_function("timing/schedule_and_drain_1024", |b| {
        b.iter_batched(
            TimerQueue::<u32>::new,
            |mut queue| {
                for i in 0..1_024u32 {
                    queue.schedule(u64::from(i * 7 % 997), i);
                }
                black_box(queue.drain_due(1_000));
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_supersede_churn,
    bench_anchor_tracking,
    bench_timer_queue
);
criterion_main!(benches);
