//! Integration tests for the particle field.
//!
//! These drive the public API the way a renderer would: build a field,
//! update it frame by frame and read positions and colours back.

use julia_particles::colorize::{distribute, escape_ratio, escape_time, tone};
use julia_particles::prelude::*;
use julia_particles::{ChannelOrder, GridDims, PermutationTable};
use rand::seq::SliceRandom;
use rand::Rng;

fn field_of(count: usize) -> ParticleField {
    ParticleField::new(FieldConfig::default().with_particle_count(count)).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_cube_scenario() {
    let field = ParticleField::new(
        FieldConfig::default()
            .with_particle_count(27)
            .with_range(-3.0, 3.0)
            .with_unit(0.2),
    )
    .unwrap();

    assert_eq!(
        field.dims(),
        GridDims {
            width: 3,
            height: 3,
            depth: 3
        }
    );
    let first = field.particles()[0];
    assert!((first.normalized_position() - Vec3::splat(-3.0)).abs().max_element() < 1e-6);
    assert!((first.display_position() - Vec3::splat(-0.3)).abs().max_element() < 1e-6);
}

#[test]
fn test_field_sized_by_count_not_lattice() {
    let field = field_of(100);
    assert_eq!(field.dims().cells(), 48);
    assert_eq!(field.len(), 100);
    assert_eq!(field.iter().len(), 100);
}

#[test]
fn test_invalid_configs_rejected() {
    let bad = [
        FieldConfig::default().with_particle_count(0),
        FieldConfig::default().with_max_iterations(0),
        FieldConfig::default().with_range(3.0, -3.0),
        FieldConfig::default().with_unit(-0.2),
    ];
    for config in bad {
        match ParticleField::new(config) {
            Err(FieldError::InvalidConfiguration(_)) => {}
            other => panic!("expected InvalidConfiguration, got {:?}", other.map(|f| f.len())),
        }
    }
}

#[test]
fn test_display_positions_centred() {
    let field = field_of(729);
    let sum = field
        .particles()
        .iter()
        .fold(Vec3::ZERO, |acc, p| acc + p.display_position());
    let mean = sum / field.len() as f32;
    // Lattice runs from -w/2 to w/2 - 1, so the mean sits half a unit below zero
    assert!((mean - Vec3::splat(-0.1)).abs().max_element() < 1e-4);
}

// ============================================================================
// Per-frame behaviour
// ============================================================================

#[test]
fn test_positions_never_change() {
    let mut field = field_of(1000);
    let before: Vec<_> = field
        .particles()
        .iter()
        .map(|p| (p.normalized_position(), p.display_position()))
        .collect();
    for _ in 0..300 {
        field.update();
    }
    let after: Vec<_> = field
        .particles()
        .iter()
        .map(|p| (p.normalized_position(), p.display_position()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_alpha_always_opaque() {
    let mut field = field_of(1000);
    for _ in 0..400 {
        field.update();
        assert!(field.iter().all(|(_, color)| color.w == 1.0));
    }
}

#[test]
fn test_deterministic_across_fields() {
    let mut a = field_of(2000);
    let mut b = field_of(2000);
    for _ in 0..250 {
        a.update();
        b.update();
    }
    assert_eq!(a.vertex_bytes(), b.vertex_bytes());
}

#[test]
fn test_first_reversal_rotates_once() {
    let mut field = field_of(27);
    let mut last_velocity = field.oscillator().velocity();
    loop {
        field.update();
        let v = field.oscillator().velocity();
        if (v < 0.0 && last_velocity > 0.0) || (v > 0.0 && last_velocity < 0.0) {
            break;
        }
        assert_eq!(field.channel_order(), ChannelOrder::IDENTITY);
        last_velocity = v;
        assert!(field.frame() < 10_000, "no reversal within 10k frames");
    }
    assert_eq!(field.channel_order().as_array(), [1, 2, 0]);
}

#[test]
fn test_colours_follow_driving_value() {
    let mut field = field_of(512);
    field.update();
    let early = field.vertices();
    for _ in 0..60 {
        field.update();
    }
    assert_ne!(early, field.vertices());
}

#[test]
fn test_half_ratio_scenario() {
    let mut rgb = distribute(0.5, ChannelOrder::IDENTITY);
    assert!((rgb[0] - 0.5).abs() < 1e-12);
    assert!((rgb[1] - 0.25).abs() < 1e-12);
    assert_eq!(rgb[2], 0.0);
    tone(&mut rgb, ChannelOrder::IDENTITY);
    assert!((rgb[0] - 0.125).abs() < 1e-12);
    assert!((rgb[1] - 0.25).abs() < 1e-12);
    assert_eq!(rgb[2], 0.0);
}

#[test]
fn test_flat_style_ignores_order() {
    let config = FieldConfig::default()
        .with_particle_count(343)
        .with_color_style(ColorStyle::Flat);
    let mut field = ParticleField::new(config).unwrap();
    let colorizer = *field.colorizer();
    for _ in 0..400 {
        field.update();
    }
    assert_ne!(field.channel_order(), ChannelOrder::IDENTITY);
    for p in field.particles() {
        let expected = colorizer.color(p.normalized_position(), field.driving_value(), ChannelOrder::IDENTITY);
        assert_eq!(p.color(), expected);
    }
}

#[test]
fn test_permutation_steps_from_config() {
    let field = ParticleField::new(
        FieldConfig::default()
            .with_particle_count(8)
            .with_permutation_steps(3),
    )
    .unwrap();
    assert_eq!(field.permutation(), &PermutationTable::new(3));
    assert_eq!(field.permutation().indices(), &[0, 2, 3, 1]);
}

// ============================================================================
// Randomized checks
// ============================================================================

#[test]
fn test_random_escape_ratio_in_unit_interval() {
    let mut rng = rand::thread_rng();
    for _ in 0..5_000 {
        let a = rng.gen_range(-3.0..3.0);
        let b = rng.gen_range(-3.0..3.0);
        let c = rng.gen_range(-3.0..3.0);
        let d = rng.gen_range(-3.0..3.0);
        let max = rng.gen_range(1..128);
        let ratio = escape_ratio(escape_time(a, b, c, d, max, 8.0), max);
        assert!((0.0..=1.0).contains(&ratio));
    }
}

#[test]
fn test_random_orders_are_rotations() {
    let mut rng = rand::thread_rng();
    let reachable = {
        let mut order = ChannelOrder::IDENTITY;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(order);
            order.rotate();
        }
        seen
    };
    for _ in 0..50 {
        let mut order = ChannelOrder::IDENTITY;
        for _ in 0..rng.gen_range(0..100) {
            order.rotate();
        }
        assert!(reachable.contains(&order));

        let mut raw = [0usize, 1, 2];
        raw.shuffle(&mut rng);
        let shuffled = ChannelOrder::new(raw).unwrap();
        let mut sorted = shuffled.as_array();
        sorted.sort_unstable();
        assert_eq!(sorted, [0, 1, 2]);
    }
}

// ============================================================================
// Config files
// ============================================================================

#[test]
fn test_field_from_saved_config() {
    let path = std::env::temp_dir().join(format!(
        "julia_particles_field_{}.json",
        std::process::id()
    ));
    let config = FieldConfig::default()
        .with_particle_count(64)
        .with_oscillator(-1.0, 0.001)
        .with_parallel(false);
    config.save(&path).unwrap();

    let loaded = FieldConfig::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let mut from_file = ParticleField::new(loaded).unwrap();
    let mut direct = ParticleField::new(config).unwrap();
    from_file.update();
    direct.update();
    assert_eq!(from_file.driving_value(), -1.0 + 0.001);
    assert_eq!(from_file.vertices(), direct.vertices());
}
