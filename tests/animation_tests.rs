//! Animator tests
//!
//! Animators are pure functions of elapsed time. These tests pin down the
//! properties the frame loop relies on: absolute-time evaluation (no
//! per-frame increments), bounded outputs, and opacity clamping.

mod common;

use backdrop::scene::strip::OPACITY_RANGE;
use backdrop::scene::{LineStrip, Transform};
use backdrop::Animator;
use common::approx_eq;
use glam::{Quat, Vec3};

fn test_strip(opacity: f32) -> LineStrip {
    LineStrip::from_polyline(&[Vec3::ZERO, Vec3::X], Vec3::ONE, opacity)
}

// ============================================================================
// Absolute-time evaluation
// ============================================================================

#[test]
fn spin_at_time_zero_is_the_base_rotation() {
    let base = Quat::from_rotation_y(0.8);
    let animator = Animator::spinning(Vec3::new(0.0, 1.0, 0.0), base);

    let mut t = Transform::new();
    animator.apply(0.0, &mut t, None);
    assert!(t.rotation.angle_between(base) < 1e-5);
}

#[test]
fn animators_are_pure_functions_of_time() {
    let animator = Animator::spinning(Vec3::new(0.2, 0.9, 0.0), Quat::IDENTITY)
        .with_sway(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, 0.7, 0.3)
        .with_pulse(0.5, 0.3, 1.1, 0.0);

    // Evaluating at t=5 directly must equal evaluating at t=1 then t=5:
    // nothing about the intermediate call may leak into the result.
    let mut direct = Transform::new();
    let mut direct_strip = test_strip(0.5);
    animator.apply(5.0, &mut direct, Some(&mut direct_strip));

    let mut stepped = Transform::new();
    let mut stepped_strip = test_strip(0.5);
    animator.apply(1.0, &mut stepped, Some(&mut stepped_strip));
    animator.apply(5.0, &mut stepped, Some(&mut stepped_strip));

    assert_eq!(direct.rotation, stepped.rotation);
    assert_eq!(direct.position, stepped.position);
    assert_eq!(direct_strip.opacity, stepped_strip.opacity);
}

#[test]
fn spin_advances_rotation_over_time() {
    let animator = Animator::spinning(Vec3::new(0.0, 0.5, 0.0), Quat::IDENTITY);
    let mut t = Transform::new();

    animator.apply(1.0, &mut t, None);
    // 0.5 rad/s around Y for one second
    let expected = Quat::from_rotation_y(0.5);
    assert!(t.rotation.angle_between(expected) < 1e-5);
}

// ============================================================================
// Bounded outputs
// ============================================================================

#[test]
fn sway_stays_inside_its_amplitude_envelope() {
    let base = Vec3::new(2.0, 1.0, -5.0);
    let amplitude = Vec3::new(0.0, 0.6, 0.0);
    let animator = Animator::swaying(base, amplitude, 0.9, 1.7);

    let mut t = Transform::new();
    for i in 0..2_000 {
        let time = i as f32 * 0.05;
        animator.apply(time, &mut t, None);
        assert!(
            (t.position.y - base.y).abs() <= amplitude.y + 1e-5,
            "sway escaped its envelope at t={time}: {}",
            t.position.y
        );
        assert!(approx_eq(t.position.x, base.x));
        assert!(approx_eq(t.position.z, base.z));
    }
}

#[test]
fn opacity_pulse_never_leaves_the_clamp_range() {
    // base + amplitude deliberately exceeds both clamp bounds.
    let animator = Animator::pulsing(0.5, 2.0, 1.3, 0.0);

    let mut t = Transform::new();
    let mut strip = test_strip(0.5);
    for i in 0..2_000 {
        let time = i as f32 * 0.05;
        animator.apply(time, &mut t, Some(&mut strip));
        assert!(
            (OPACITY_RANGE.0..=OPACITY_RANGE.1).contains(&strip.opacity),
            "opacity {} escaped the clamp at t={time}",
            strip.opacity
        );
    }
}

#[test]
fn pulse_without_a_strip_is_a_noop() {
    let animator = Animator::pulsing(0.5, 0.3, 1.0, 0.0);
    let mut t = Transform::new();
    let before = t.clone();
    animator.apply(3.0, &mut t, None);
    assert_eq!(t, before);
}

// ============================================================================
// Component combination
// ============================================================================

#[test]
fn combined_animator_drives_all_three_channels() {
    let base_position = Vec3::new(0.0, 1.0, 0.0);
    let animator = Animator::spinning(Vec3::new(0.0, 0.4, 0.0), Quat::IDENTITY)
        .with_sway(base_position, Vec3::new(0.0, 0.5, 0.0), 1.0, 0.0)
        .with_pulse(0.6, 0.3, 1.0, 0.0);

    let mut t = Transform::new();
    let mut strip = test_strip(0.6);
    // t chosen so sin(t) is clearly nonzero
    animator.apply(1.0, &mut t, Some(&mut strip));

    assert!(t.rotation != Quat::IDENTITY, "spin must rotate");
    assert!(t.position != base_position, "sway must displace");
    assert!(!approx_eq(strip.opacity, 0.6), "pulse must change opacity");
}

#[test]
fn default_animator_changes_nothing() {
    let animator = Animator::default();
    let mut t = Transform::new();
    let mut strip = test_strip(0.4);

    animator.apply(12.5, &mut t, Some(&mut strip));

    assert_eq!(t.position, Vec3::ZERO);
    assert_eq!(t.rotation, Quat::IDENTITY);
    assert!(approx_eq(strip.opacity, 0.4));
}
