use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use std::sync::Arc;

use table_configurator::config::BuildSettings;
use table_configurator::geometry::GeometryBuilder;
use table_configurator::loaders::ModelTemplate;
use table_configurator::math::Color;
use table_configurator::parameters::Configuration;
use table_configurator::scene::{CompositeScene, SubAssembly};
use table_configurator::catalog::PlacementRule;

fn config(width: f32) -> Configuration {
    Configuration {
        height: 700.0,
        width,
        depth: 800.0,
        surface_color: Color::from_rgb8(0xc7, 0xb2, 0x99),
        accessory_ref: "prop_01.glb".to_string(),
    }
}

/// Flat grid of triangles standing in for an accessory mesh
fn template(triangles: usize) -> ModelTemplate {
    let tris = (0..triangles)
        .map(|i| {
            let o = Vec3::new(i as f32 * 0.001, 0.0, 0.0);
            [o, o + Vec3::new(0.001, 0.0, 0.0), o + Vec3::new(0.0, -0.01, 0.001)]
        })
        .collect();
    ModelTemplate::new("bench", tris, Color::new(0.4, 0.4, 0.4)).unwrap()
}

fn bench_build(c: &mut Criterion) {
    let builder = GeometryBuilder::new(BuildSettings::default());
    let config = config(1500.0);

    c.bench_function("geometry_build", |b| {
        b.iter(|| black_box(builder.build(black_box(&config))))
    });

    let layout = builder.layout(&config.dimensions());
    let surface = builder.surface_material(config.surface_color);
    c.bench_function("geometry_paint_cached_layout", |b| {
        b.iter(|| black_box(builder.paint(black_box(&layout), &surface)))
    });
}

fn bench_rebuild_cycle(c: &mut Criterion) {
    let builder = GeometryBuilder::new(BuildSettings::default());
    let mut scene = CompositeScene::new();

    c.bench_function("scene_replace_primitives", |b| {
        let mut width = 1200.0;
        b.iter(|| {
            width = if width >= 2400.0 { 1200.0 } else { width + 1.0 };
            let g = scene.issue_generation();
            scene.replace_primitives(g, builder.build(&config(width)));
        })
    });
}

fn bench_export(c: &mut Criterion) {
    let settings = BuildSettings::default();
    let builder = GeometryBuilder::new(settings);
    let config = config(1500.0);
    let positions = PlacementRule::default().resolve(&config.dimensions(), settings.thickness);

    let mut group = c.benchmark_group("scene_to_boxes");
    for triangles in [100, 1_000, 10_000] {
        let mut scene = CompositeScene::new();
        let g = scene.issue_generation();
        scene.replace_primitives(g, builder.build(&config));
        scene.install_sub_assembly(SubAssembly::instantiate(
            "prop_01.glb",
            g,
            Arc::new(template(triangles)),
            settings.accessory_scale,
            &positions,
        ));

        group.bench_with_input(BenchmarkId::from_parameter(triangles), &scene, |b, scene| {
            b.iter(|| black_box(scene.to_boxes()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_rebuild_cycle, bench_export);
criterion_main!(benches);
