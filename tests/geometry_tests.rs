use glam::Vec3;
use table_configurator::config::BuildSettings;
use table_configurator::geometry::{GeometryBuilder, PrimitiveKind};
use table_configurator::math::Color;
use table_configurator::parameters::Configuration;

fn config(height: f32, width: f32, depth: f32, color: &str) -> Configuration {
    Configuration {
        height,
        width,
        depth,
        surface_color: color.parse().unwrap(),
        accessory_ref: "prop_01.glb".to_string(),
    }
}

fn builder() -> GeometryBuilder {
    GeometryBuilder::new(BuildSettings::default())
}

#[test]
fn test_build_is_deterministic() {
    let c = config(730.0, 1650.0, 640.0, "#336699");
    let a = builder().build(&c);
    let b = builder().build(&c);
    assert_eq!(a, b);
    assert_eq!(a.len(), 7);
}

#[test]
fn test_corner_leg_placement() {
    let set = builder().build(&config(700.0, 1500.0, 800.0, "#c7b299"));
    let legs: Vec<_> = set.of_kind(PrimitiveKind::Leg).collect();
    assert_eq!(legs.len(), 4);

    for leg in &legs {
        assert_eq!(leg.position.x.abs(), 710.0);
        assert_eq!(leg.position.z.abs(), 360.0);
        assert_eq!(leg.position.y, 350.0);
        assert_eq!(leg.size, Vec3::new(40.0, 700.0, 40.0));
    }

    // Every corner used exactly once
    let mut corners: Vec<(i32, i32)> = legs
        .iter()
        .map(|l| (l.position.x.signum() as i32, l.position.z.signum() as i32))
        .collect();
    corners.sort();
    assert_eq!(corners, vec![(-1, -1), (-1, 1), (1, -1), (1, 1)]);
}

#[test]
fn test_brace_length() {
    let set = builder().build(&config(700.0, 1500.0, 800.0, "#c7b299"));
    let braces: Vec<_> = set.of_kind(PrimitiveKind::Brace).collect();
    assert_eq!(braces.len(), 2);
    for brace in braces {
        assert_eq!(brace.size.z, 720.0);
        assert_eq!(brace.position, Vec3::new(brace.position.x, 20.0, 0.0));
        assert_eq!(brace.position.x.abs(), 710.0);
    }
}

#[test]
fn test_top_slab() {
    let set = builder().build(&config(900.0, 2000.0, 600.0, "#ffffff"));
    let top = set.of_kind(PrimitiveKind::Top).next().unwrap();
    assert_eq!(top.position, Vec3::new(0.0, 900.0, 0.0));
    assert_eq!(top.size, Vec3::new(2000.0, 40.0, 600.0));
    assert_eq!(top.material.color, "#ffffff".parse::<Color>().unwrap());
}

#[test]
fn test_color_change_keeps_geometry() {
    let a = builder().build(&config(700.0, 1500.0, 800.0, "#c7b299"));
    let b = builder().build(&config(700.0, 1500.0, 800.0, "#112233"));

    for (pa, pb) in a.iter().zip(b.iter()) {
        assert_eq!(pa.kind, pb.kind);
        assert_eq!(pa.position, pb.position);
        assert_eq!(pa.size, pb.size);
    }
}

#[test]
fn test_dimension_change_keeps_colors() {
    let a = builder().build(&config(700.0, 1500.0, 800.0, "#c7b299"));
    let b = builder().build(&config(1100.0, 2300.0, 450.0, "#c7b299"));

    for (pa, pb) in a.iter().zip(b.iter()) {
        assert_eq!(pa.material, pb.material);
    }
}

#[test]
fn test_frame_color_ignores_surface_color() {
    let set = builder().build(&config(700.0, 1500.0, 800.0, "#ff0000"));
    let frame = BuildSettings::default().frame_color;
    for p in set.iter().filter(|p| p.kind != PrimitiveKind::Top) {
        assert_eq!(p.material.color, frame);
    }
}

#[test]
fn test_custom_thickness() {
    let settings = BuildSettings {
        thickness: 50.0,
        ..BuildSettings::default()
    };
    let set = GeometryBuilder::new(settings).build(&config(700.0, 1500.0, 800.0, "#c7b299"));
    let brace = set.of_kind(PrimitiveKind::Brace).next().unwrap();
    assert_eq!(brace.size, Vec3::new(50.0, 50.0, 700.0));
    assert_eq!(brace.position.y, 25.0);
}
