use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use voxcull_core::{BlockId, WorldPos};
use voxcull_culling::{EntityCuller, FrameView};
use voxcull_entity::{
    BehaviorContext, CreatureKind, CreatureSpawn, EntityRegistry, VisibilitySettings,
};
use voxcull_render::Camera;
use voxcull_world::ChunkManager;

fn scene(count: usize) -> (ChunkManager, EntityRegistry) {
    let grid = ChunkManager::default();
    grid.fill(WorldPos::new(-48, 0, -48), WorldPos::new(48, 0, 48), BlockId::GRASS);
    grid.fill(WorldPos::new(-8, 1, -12), WorldPos::new(8, 4, -12), BlockId::STONE);
    grid.fill(WorldPos::new(-8, 1, 12), WorldPos::new(8, 4, 12), BlockId::GLASS);

    let mut registry = EntityRegistry::new();
    for i in 0..count {
        let angle = i as f32 * 0.618_034 * std::f32::consts::TAU;
        let radius = 4.0 + (i % 40) as f32 * 2.0;
        let kind = CreatureKind::ALL[i % CreatureKind::ALL.len()];
        let mut spawn = CreatureSpawn::new(
            kind,
            Vec3::new(angle.cos() * radius, 1.0, angle.sin() * radius),
        )
        .behavior(|ctx: &mut BehaviorContext<'_>, dt: f32| {
            ctx.transform.position.x += dt;
            true
        });
        if i % 5 == 0 {
            spawn = spawn.airborne();
        }
        registry.spawn(spawn);
    }
    (grid, registry)
}

fn bench_frame(c: &mut Criterion) {
    let mut camera = Camera::default();
    camera.set_position(Vec3::new(0.0, 1.6, 0.0));
    camera.look_at(Vec3::new(0.0, 1.6, -1.0));
    let view = FrameView::from_camera(&camera);
    let visibility = VisibilitySettings::default();

    for count in [100, 500] {
        let (grid, mut registry) = scene(count);
        let chunks = grid.read();
        let mut culler = EntityCuller::default();
        c.bench_function(&format!("run_frame_{count}"), |b| {
            b.iter(|| {
                black_box(culler.run_frame(
                    &mut registry,
                    &chunks,
                    black_box(&view),
                    &visibility,
                    1.0 / 60.0,
                ))
            });
        });
    }
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
