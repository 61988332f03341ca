use bevy::math::IVec3;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use multiblock::structure::footprint::Facing;
use multiblock::structure::registry::Structure;
use multiblock::structure::shape::ShapeDef;
use multiblock::world::GridWorld;

fn cuboid(width: i32, height: i32, depth: i32) -> Structure {
    Structure::from_def(&ShapeDef {
        name: "bench_cuboid".to_string(),
        id: 1,
        width,
        height,
        depth,
        ..ShapeDef::default()
    })
}

/// Validate a mid-sized cuboid footprint against an empty world.
fn bench_validate_cuboid(c: &mut Criterion) {
    let structure = cuboid(5, 4, 5);
    c.bench_function("validate_cuboid_5x4x5", |b| {
        let mut world = GridWorld::new();
        b.iter(|| {
            let ok = structure.can_place(
                &mut world,
                black_box(IVec3::new(0, 10, 0)),
                black_box(Facing::North),
            );
            black_box(ok);
        })
    });
}

/// Validate against a world where a single footprint cell is blocked,
/// exercising the early-out-free full walk.
fn bench_validate_with_obstacle(c: &mut Criterion) {
    let structure = cuboid(5, 4, 5);
    c.bench_function("validate_cuboid_blocked", |b| {
        let mut world = GridWorld::new();
        world.block(IVec3::new(1, 11, -2));
        b.iter(|| {
            let ok = structure.can_place(
                &mut world,
                black_box(IVec3::new(0, 10, 0)),
                black_box(Facing::North),
            );
            black_box(ok);
        })
    });
}

/// Full place-then-destroy cycle over all four facings.
fn bench_place_destroy_cycle(c: &mut Criterion) {
    let structure = cuboid(3, 3, 3);
    c.bench_function("place_destroy_cycle", |b| {
        let mut world = GridWorld::new();
        b.iter(|| {
            for facing in Facing::ALL {
                let anchor = IVec3::new(0, 10, 0);
                structure.place(&mut world, anchor, facing);
                structure.destroy(&mut world, anchor);
            }
            black_box(world.cell_count());
        })
    });
}

/// Walk a hollow shell, which skips the interior without firing the action.
fn bench_hollow_walk(c: &mut Criterion) {
    let structure = Structure::from_def(&ShapeDef {
        name: "bench_hollow".to_string(),
        id: 2,
        width: 7,
        height: 5,
        depth: 7,
        hollow: true,
        ..ShapeDef::default()
    });
    c.bench_function("hollow_walk_7x5x7", |b| {
        let mut world = GridWorld::new();
        b.iter(|| {
            let mut fired = 0usize;
            structure.for_each_cell(
                &mut world,
                black_box(IVec3::new(0, 10, 0)),
                Facing::East,
                |_, _, _| {
                    fired += 1;
                    true
                },
            );
            black_box(fired);
        })
    });
}

/// Walk a sparse shaped structure inside a large bounding box; the point
/// list is scanned for every local coordinate.
fn bench_shaped_walk(c: &mut Criterion) {
    let points: Vec<(i32, i32, i32)> = (0..8).map(|i| (i, 0, i)).collect();
    let structure = Structure::from_def(&ShapeDef {
        name: "bench_shaped".to_string(),
        id: 3,
        width: 8,
        height: 4,
        depth: 8,
        shaped: true,
        points,
        ..ShapeDef::default()
    });
    c.bench_function("shaped_walk_8x4x8", |b| {
        let mut world = GridWorld::new();
        b.iter(|| {
            let mut fired = 0usize;
            structure.for_each_cell(
                &mut world,
                black_box(IVec3::new(0, 10, 0)),
                Facing::South,
                |_, _, _| {
                    fired += 1;
                    true
                },
            );
            black_box(fired);
        })
    });
}

criterion_group!(
    benches,
    bench_validate_cuboid,
    bench_validate_with_obstacle,
    bench_place_destroy_cycle,
    bench_hollow_walk,
    bench_shaped_walk
);
criterion_main!(benches);
