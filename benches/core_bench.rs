use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use floorplan_editor::core::{SnapSettings, SnapThresholds};
use floorplan_editor::{
    extract_region, resolve_snap, Camera2D, FloorPlan, NodeId, SnapContext, WallSpec,
};
use glam::Vec2;
use std::hint::black_box;

const CELL: f32 = 4.0;

/// Raster aus `cells × cells` quadratischen Räumen.
fn build_grid_plan(cells: usize) -> FloorPlan {
    let mut plan = FloorPlan::default();
    let side = cells + 1;
    let mut ids: Vec<NodeId> = Vec::with_capacity(side * side);
    for row in 0..side {
        for column in 0..side {
            let pos = Vec2::new(column as f32 * CELL, row as f32 * CELL);
            ids.push(plan.add_node(pos).expect("Knoten"));
        }
    }
    let spec = WallSpec::new(0.2);
    for row in 0..side {
        for column in 0..side {
            let here = ids[row * side + column];
            if column + 1 < side {
                plan.add_wall(here, ids[row * side + column + 1], spec)
                    .expect("Wand");
            }
            if row + 1 < side {
                plan.add_wall(here, ids[(row + 1) * side + column], spec)
                    .expect("Wand");
            }
        }
    }
    plan
}

fn build_query_points(count: usize, extent: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let x = ((i * 37) % 1000) as f32 / 1000.0 * extent;
            let y = ((i * 91) % 1000) as f32 / 1000.0 * extent;
            Vec2::new(x + 0.013, y + 0.029)
        })
        .collect()
}

fn bench_snapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapping");
    let camera = Camera2D::new();
    let settings = SnapSettings::default();
    let thresholds = SnapThresholds::default();

    for &cells in &[10usize, 40usize] {
        let plan = build_grid_plan(cells);
        let points = build_query_points(512, cells as f32 * CELL);
        let context = SnapContext::anchored(Vec2::new(0.0, 0.0));

        group.bench_with_input(BenchmarkId::new("resolve_batch", cells), &plan, |b, plan| {
            b.iter(|| {
                let mut snapped = 0usize;
                for point in &points {
                    let result = resolve_snap(
                        black_box(*point),
                        plan,
                        &camera,
                        &settings,
                        &thresholds,
                        &context,
                    );
                    if result.kind.is_some() {
                        snapped += 1;
                    }
                }
                black_box(snapped)
            })
        });
    }

    group.finish();
}

fn bench_region_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("region");

    for &cells in &[10usize, 40usize] {
        let plan = build_grid_plan(cells);
        let center = cells as f32 * CELL * 0.5 + CELL * 0.5;

        group.bench_with_input(
            BenchmarkId::new("extract_center_cell", cells),
            &plan,
            |b, plan| {
                b.iter(|| {
                    let draft = extract_region(plan, black_box(Vec2::new(center, center)))
                        .expect("Raum");
                    black_box(draft.area)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(core_benches, bench_snapping, bench_region_extraction);
criterion_main!(core_benches);
