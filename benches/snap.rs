// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use nodemap::geometry::{compute_snap, route_connection, Point, SnapConfig};

mod fixtures;

// Benchmark identity (keep stable):
// - Group names in this file: `snap.compute`, `route.connections`
// - Case IDs are the fixture ids (`small`, `medium`, `large`).
fn benches_snap(c: &mut Criterion) {
    let config = SnapConfig::default();
    let mut group = c.benchmark_group("snap.compute");

    for case in [
        fixtures::Case::Small,
        fixtures::Case::Medium,
        fixtures::Case::Large,
    ] {
        let (model, ids) = fixtures::grid_model(case);
        let moving = ids[ids.len() / 2];
        let moving_rect = model.node(moving).expect("moving node").rect();
        let others = model
            .document()
            .nodes()
            .filter(|node| node.id() != moving)
            .map(|node| (node.id(), node.rect()))
            .collect::<Vec<_>>();
        let candidate = Point::new(
            moving_rect.left() + fixtures::SPACING_X / 2.0 + 3.0,
            moving_rect.top() + 5.0,
        );

        group.throughput(Throughput::Elements(others.len() as u64));
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                let result = compute_snap(
                    moving_rect.size,
                    black_box(candidate),
                    others.iter().copied(),
                    &config,
                );
                black_box(result.position)
            })
        });
    }
    group.finish();
}

fn benches_route(c: &mut Criterion) {
    let mut group = c.benchmark_group("route.connections");

    for case in [fixtures::Case::Small, fixtures::Case::Large] {
        let (model, _) = fixtures::grid_model(case);
        let pairs = model
            .document()
            .connections()
            .filter_map(|connection| {
                let source = model.node(connection.source_id())?.rect();
                let target = model.node(connection.target_id())?.rect();
                Some((source, target))
            })
            .collect::<Vec<_>>();

        group.throughput(Throughput::Elements(pairs.len() as u64));
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                let mut acc = 0.0;
                for (source, target) in &pairs {
                    acc += route_connection(source, target, 20.0).corner.x;
                }
                black_box(acc)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benches_snap, benches_route);
criterion_main!(benches);
