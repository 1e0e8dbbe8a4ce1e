// Behavioural tests for the particle field, driven headless through a DrawList.

use nannou::prelude::*;
use particle_field::{
    DrawCommand, DrawList, FieldConfig, FieldState, Particle, ParticleField, ParticleKind,
};
use pretty_assertions::assert_eq;

fn field_with(config: FieldConfig, width: f32, height: f32) -> ParticleField {
    let mut field = ParticleField::with_seed(config, 42);
    field.initialize(width, height).unwrap();
    field
}

fn no_ambient() -> FieldConfig {
    FieldConfig {
        ambient_count: 0,
        ..FieldConfig::default()
    }
}

fn line_alphas(canvas: &DrawList) -> Vec<f32> {
    canvas
        .lines()
        .filter_map(|c| match c {
            DrawCommand::Line { alpha, .. } => Some(*alpha),
            _ => None,
        })
        .collect()
}

#[test]
fn ambient_population_fills_the_surface() {
    let field = field_with(FieldConfig::default(), 800.0, 600.0);
    let surface = field.surface().unwrap();

    assert_eq!(field.state(), FieldState::Running);
    assert_eq!(field.len(), 100);
    for particle in field.particles() {
        assert!(surface.contains(particle.position), "{:?} outside surface", particle.position);
        assert_eq!(particle.kind, ParticleKind::Ambient);
    }
}

#[test]
fn configured_ambient_count_is_honoured() {
    let config = FieldConfig {
        ambient_count: 7,
        ..FieldConfig::default()
    };
    let field = field_with(config, 300.0, 300.0);
    assert_eq!(field.len(), 7);
}

#[test]
fn burst_appends_fresh_transients() {
    let mut field = field_with(FieldConfig::default(), 800.0, 600.0);
    field.burst(120.0, 80.0);

    assert_eq!(field.len(), 120);
    let burst = &field.particles()[100..];
    assert_eq!(burst.len(), 20);
    for particle in burst {
        assert_eq!(particle.position, pt2(120.0, 80.0));
        assert!(matches!(particle.kind, ParticleKind::Transient { age: 0, .. }));
        assert_eq!(particle.opacity, 0.8);
    }
}

#[test]
fn transient_lives_exactly_its_max_age() {
    let config = FieldConfig {
        burst_size: 1,
        burst_speed: 0.0,
        ..no_ambient()
    };
    let mut field = field_with(config, 800.0, 600.0);
    let mut canvas = DrawList::new();
    field.burst(10.0, 10.0);

    let (initial, max_age) = match field.particles()[0] {
        Particle {
            opacity,
            kind: ParticleKind::Transient { max_age, .. },
            ..
        } => (opacity, max_age),
        _ => panic!("burst particle must be transient"),
    };

    for _ in 0..max_age - 1 {
        field.tick(&mut canvas);
    }
    assert_eq!(field.len(), 1);
    let opacity = field.particles()[0].opacity;
    assert!(opacity < initial && opacity > 0.0, "opacity {opacity}");

    field.tick(&mut canvas);
    assert!(field.is_empty());
}

#[test]
fn ambient_particles_are_permanent() {
    let config = FieldConfig {
        ambient_count: 10,
        ..FieldConfig::default()
    };
    let mut field = field_with(config, 200.0, 150.0);
    let mut canvas = DrawList::new();

    for _ in 0..10_000 {
        field.tick(&mut canvas);
    }

    assert_eq!(field.len(), 10);
    let surface = field.surface().unwrap();
    for particle in field.particles() {
        assert!(particle.position.x >= 0.0 && particle.position.x <= surface.width);
        assert!(particle.position.y >= 0.0 && particle.position.y <= surface.height);
    }
}

#[test]
fn reaching_the_width_wraps_to_zero() {
    let config = FieldConfig {
        burst_size: 1,
        burst_speed: 0.0,
        ..no_ambient()
    };
    let mut field = field_with(config, 100.0, 100.0);
    let mut canvas = DrawList::new();

    // A still particle sitting exactly on the far edge is outside the surface
    field.burst(100.0, 50.0);
    field.tick(&mut canvas);
    assert_eq!(field.particles()[0].position, pt2(0.0, 50.0));

    // And one just inside stays where it is
    field.burst(99.5, 50.0);
    field.tick(&mut canvas);
    assert_eq!(field.particles()[1].position, pt2(99.5, 50.0));
}

#[test]
fn burst_outside_the_surface_wraps_on_next_tick() {
    for spatial_grid in [false, true] {
        let config = FieldConfig {
            burst_speed: 0.0,
            spatial_grid,
            ..no_ambient()
        };
        let mut field = field_with(config, 800.0, 600.0);
        let mut canvas = DrawList::new();

        field.burst(-50.0, 700.0);
        assert!(field.tick(&mut canvas));

        assert_eq!(field.len(), 20);
        for particle in field.particles() {
            assert_eq!(particle.position, pt2(800.0, 0.0));
        }

        // Coincident particles on the border are all linked to each other
        assert_eq!(line_alphas(&canvas).len(), 20 * 19 / 2, "spatial_grid = {spatial_grid}");

        // Sitting exactly on the far edge, they wrap again to the origin
        field.tick(&mut canvas);
        for particle in field.particles() {
            assert_eq!(particle.position, pt2(0.0, 0.0));
        }
    }
}

#[test]
fn distant_particles_are_not_linked() {
    let config = FieldConfig {
        burst_size: 1,
        burst_speed: 0.0,
        burst_lifetime: (50, 50),
        ..no_ambient()
    };
    let mut field = field_with(config, 800.0, 600.0);
    let mut canvas = DrawList::new();

    field.burst(100.0, 100.0);
    field.burst(220.0, 100.0); // exactly the link distance
    field.tick(&mut canvas);
    assert!(line_alphas(&canvas).is_empty());

    field.burst(100.0, 100.0); // coincides with the first particle
    field.tick(&mut canvas);
    let alphas = line_alphas(&canvas);
    assert_eq!(alphas.len(), 1);

    let ops: Vec<f32> = field.particles().iter().map(|p| p.opacity).collect();
    let expected = 0.15 * ops[0] * ops[2];
    assert!((alphas[0] - expected).abs() < 1e-6);
}

#[test]
fn teardown_stops_the_loop() {
    let mut field = field_with(FieldConfig::default(), 800.0, 600.0);
    let mut canvas = DrawList::new();
    field.tick(&mut canvas);

    field.teardown();
    let frozen = field.particles().to_vec();

    field.burst(400.0, 300.0);
    for _ in 0..200 {
        assert!(!field.tick(&mut canvas));
    }
    assert_eq!(field.particles(), &frozen[..]);
}

#[test]
fn single_burst_scenario() {
    let mut field = field_with(no_ambient(), 800.0, 600.0);
    let mut canvas = DrawList::new();
    field.burst(400.0, 300.0);
    assert_eq!(field.len(), 20);

    for tick in 1..=91u32 {
        field.tick(&mut canvas);
        let reach = 2.0 * tick as f32 + 0.01;
        for particle in field.particles() {
            assert!((particle.position.x - 400.0).abs() <= reach);
            assert!((particle.position.y - 300.0).abs() <= reach);
        }
    }
    assert!(field.is_empty());
}

#[test]
fn spatial_grid_matches_naive_scan() {
    let run = |spatial_grid: bool| {
        let config = FieldConfig {
            ambient_count: 300,
            spatial_grid,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::with_seed(config, 9);
        field.initialize(900.0, 700.0).unwrap();
        field.burst(450.0, 350.0);
        let mut canvas = DrawList::new();
        let mut frames = Vec::new();
        for _ in 0..20 {
            field.tick(&mut canvas);
            let mut lines: Vec<_> = canvas
                .lines()
                .map(|c| format!("{c:?}"))
                .collect();
            lines.sort();
            frames.push(lines);
        }
        frames
    };

    assert_eq!(run(false), run(true));
}

#[test]
fn sample_config_is_valid() {
    let config = FieldConfig::from_toml_str(include_str!("../config/field.toml")).unwrap();
    assert_eq!(config, FieldConfig::default());
}
