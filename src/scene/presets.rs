//! Seeded backdrop scenes.
//!
//! Each preset populates a [`Scene`] from a `u64` seed. Generation happens
//! exactly once per context; the same seed always produces the same
//! geometry, animator phases and colors, so visuals are reproducible and
//! testable.

use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::animation::Animator;
use crate::scene::node::Node;
use crate::scene::scene::Scene;
use crate::scene::strip::LineStrip;

const NEON_CYAN: Vec3 = Vec3::new(0.0, 0.9, 0.9);
const NEON_MAGENTA: Vec3 = Vec3::new(0.9, 0.1, 0.7);
const NEON_VIOLET: Vec3 = Vec3::new(0.5, 0.2, 0.9);

/// A receding horizon grid with a slow opacity pulse.
#[must_use]
pub fn grid_horizon(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new();

    let strip = scene.add_strip(LineStrip::grid(40.0, 40, NEON_CYAN, 0.5));
    let mut node = Node::with_strip(strip);
    node.transform.position = Vec3::new(0.0, -2.0, 0.0);
    let key = scene.add_node(node);
    scene.set_animator(
        key,
        Animator::pulsing(0.5, 0.25, 0.6, rng.random_range(0.0..std::f32::consts::TAU)),
    );

    // A second, larger and fainter grid slightly below sells the depth.
    let far = scene.add_strip(LineStrip::grid(80.0, 20, NEON_VIOLET, 0.15));
    let mut far_node = Node::with_strip(far);
    far_node.transform.position = Vec3::new(0.0, -2.5, 0.0);
    scene.add_node(far_node);

    scene
}

/// Floating wireframe prisms that spin, sway and pulse out of phase.
#[must_use]
pub fn prism_field(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new();

    let count = 14;
    for i in 0..count {
        let color = if i % 2 == 0 { NEON_CYAN } else { NEON_MAGENTA };
        let half = Vec3::new(
            rng.random_range(0.3..1.2),
            rng.random_range(0.5..2.0),
            rng.random_range(0.3..1.2),
        );
        let strip = scene.add_strip(LineStrip::wire_box(half, color, 0.6));

        let base_position = Vec3::new(
            rng.random_range(-9.0..9.0),
            rng.random_range(-3.0..4.0),
            rng.random_range(-10.0..-2.0),
        );
        let base_rotation = Quat::from_euler(
            glam::EulerRot::XYZ,
            0.0,
            rng.random_range(0.0..std::f32::consts::TAU),
            0.0,
        );

        let mut node = Node::with_strip(strip);
        node.transform.position = base_position;
        node.transform.rotation = base_rotation;
        let key = scene.add_node(node);

        let spin_rate = Vec3::new(0.0, rng.random_range(0.1..0.5), 0.0);
        scene.set_animator(
            key,
            Animator::spinning(spin_rate, base_rotation)
                .with_sway(
                    base_position,
                    Vec3::new(0.0, rng.random_range(0.2..0.7), 0.0),
                    rng.random_range(0.3..0.8),
                    rng.random_range(0.0..std::f32::consts::TAU),
                )
                .with_pulse(
                    0.6,
                    0.3,
                    rng.random_range(0.4..1.2),
                    rng.random_range(0.0..std::f32::consts::TAU),
                ),
        );
    }

    scene
}

/// Horizontal "data lines": jittered polylines streaming across the view,
/// fading in and out at staggered phases.
#[must_use]
pub fn data_stream(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new();

    let lines = 24;
    for i in 0..lines {
        let y = rng.random_range(-4.0..4.0);
        let z = rng.random_range(-8.0..0.0);
        let color = match i % 3 {
            0 => NEON_CYAN,
            1 => NEON_MAGENTA,
            _ => NEON_VIOLET,
        };

        // Random-walk polyline along X with small vertical jitter.
        let mut points = Vec::with_capacity(16);
        let mut jitter = 0.0_f32;
        for step in 0..16 {
            jitter += rng.random_range(-0.15..0.15);
            jitter = jitter.clamp(-0.6, 0.6);
            let x = -12.0 + step as f32 * 1.6;
            points.push(Vec3::new(x, y + jitter, z));
        }

        let strip = scene.add_strip(LineStrip::from_polyline(&points, color, 0.4));
        let node = Node::with_strip(strip);
        let key = scene.add_node(node);

        scene.set_animator(
            key,
            Animator::pulsing(
                0.4,
                0.35,
                rng.random_range(0.8..2.0),
                i as f32 * 0.45,
            ),
        );
    }

    scene
}
