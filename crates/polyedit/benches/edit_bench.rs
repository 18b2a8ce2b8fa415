//! Criterion benchmarks for the interactive hot paths.
//! Focus sizes: m polygons in {1, 10, 50, 100}.
//! The closest-edge scan and the snap scan are the only O(total
//! vertices) operations per pointer event.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use polyedit::prelude::*;

fn session_with_fixtures(m: usize, seed: u64) -> EditorSession {
    let mut s = EditorSession::new();
    for index in 0..m as u64 {
        let poly = draw_fixture_radial(RadialCfg::default(), ReplayToken { seed, index });
        let mut shape = Shape::new(ShapeKind::Polygon(poly));
        shape.transform.position = Vector2::new(
            (index % 10) as f64 * 150.0,
            (index / 10) as f64 * 150.0,
        );
        s.add_shape(shape);
    }
    s
}

fn bench_editor(c: &mut Criterion) {
    let mut group = c.benchmark_group("editor");
    for &m in &[1usize, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::new("closest_edge_insert", m), &m, |b, &m| {
            b.iter_batched(
                || session_with_fixtures(m, 42),
                |mut s| {
                    let _ = s.insert_vertex_at(Vector2::new(75.0, 10.0));
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("snap_drag_update", m), &m, |b, &m| {
            b.iter_batched(
                || {
                    let mut s = session_with_fixtures(m, 43);
                    // grab the first polygon's first vertex
                    let shape = &s.shapes()[0];
                    let v = shape.to_world(shape.as_polygon().unwrap().vertex(0));
                    s.on_pointer_down(v, PointerMode::Normal);
                    (s, v)
                },
                |(mut s, v)| {
                    s.on_pointer_move(v + Vector2::new(40.0, 25.0));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_editor);
criterion_main!(benches);
