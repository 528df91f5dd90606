//! Scene graph tests
//!
//! Tests for:
//! - Transform dirty checking and look_at
//! - Hierarchical world-matrix propagation through the root rig
//! - Camera projection/aspect updates
//! - Line strip generators
//! - Preset determinism under seeding

mod common;

use backdrop::scene::strip::OPACITY_RANGE;
use backdrop::{presets, Camera, LineStrip, Node, Scene, Transform};
use common::approx_eq;
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn transform_default_is_identity() {
    let t = Transform::new();
    assert_eq!(t.position, Vec3::ZERO);
    assert_eq!(t.rotation, Quat::IDENTITY);
    assert_eq!(t.scale, Vec3::ONE);
}

#[test]
fn transform_update_local_matrix_dirty_check() {
    let mut t = Transform::new();

    // First call always recomputes (force_update starts true)
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.position = Vec3::new(1.0, 2.0, 3.0);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.rotation = Quat::from_rotation_y(FRAC_PI_2);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.mark_dirty();
    assert!(t.update_local_matrix());
}

#[test]
fn transform_euler_roundtrip() {
    let mut t = Transform::new();
    t.set_rotation_euler(0.3, 0.7, 1.2);
    // Quat round-trips lose a little precision, so the bound is loose.
    let euler = t.rotation_euler();
    assert!((euler.x - 0.3).abs() < 1e-4);
    assert!((euler.y - 0.7).abs() < 1e-4);
    assert!((euler.z - 1.2).abs() < 1e-4);
}

#[test]
fn transform_look_at_collinear_up_is_noop() {
    let mut t = Transform::new();
    let original = t.rotation;
    t.look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
    assert_eq!(t.rotation, original);
}

// ============================================================================
// Scene hierarchy
// ============================================================================

#[test]
fn nodes_default_under_the_root_rig() {
    let mut scene = Scene::new();
    let key = scene.add_node(Node::new());
    assert_eq!(scene.nodes[key].parent(), Some(scene.root()));
    assert_eq!(scene.nodes[scene.root()].children(), &[key]);
}

#[test]
fn world_matrices_accumulate_down_a_chain() {
    let mut scene = Scene::new();
    let mut parent = Node::new();
    parent.transform.position = Vec3::new(1.0, 0.0, 0.0);
    let parent_key = scene.add_node(parent);

    let mut child = Node::new();
    child.transform.position = Vec3::new(1.0, 0.0, 0.0);
    let child_key = scene.add_child(parent_key, child);

    scene.update_world();

    let child_world = scene.nodes[child_key].world_matrix().translation;
    assert!(vec3_approx(child_world.into(), Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn root_rig_rotation_affects_all_descendants() {
    let mut scene = Scene::new();
    let mut node = Node::new();
    node.transform.position = Vec3::new(1.0, 0.0, 0.0);
    let key = scene.add_node(node);

    let root = scene.root();
    scene.nodes[root]
        .transform
        .rotation = Quat::from_rotation_y(FRAC_PI_2);
    scene.update_world();

    // (1,0,0) rotated 90 degrees around Y lands on (0,0,-1)
    let world = scene.nodes[key].world_matrix().translation;
    assert!(vec3_approx(world.into(), Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn deep_chain_does_not_overflow_the_stack() {
    let mut scene = Scene::new();
    let mut parent = scene.root();
    for _ in 0..5_000 {
        let mut node = Node::new();
        node.transform.position = Vec3::new(1.0, 0.0, 0.0);
        parent = scene.add_child(parent, node);
    }

    scene.update_world();
    let last = scene.nodes[parent].world_matrix().translation;
    assert!(approx_eq(last.x, 5_000.0));
}

#[test]
fn draw_items_skip_invisible_nodes_and_strips() {
    let mut scene = Scene::new();
    let strip_a = scene.add_strip(LineStrip::grid(10.0, 4, Vec3::ONE, 0.5));
    let strip_b = scene.add_strip(LineStrip::grid(10.0, 4, Vec3::ONE, 0.5));

    scene.add_node(Node::with_strip(strip_a));
    let hidden = scene.add_node(Node::with_strip(strip_b));
    scene.nodes[hidden].visible = false;

    scene.update_world();
    assert_eq!(scene.draw_items().count(), 1);

    scene.nodes[hidden].visible = true;
    scene.strips[strip_b].visible = false;
    assert_eq!(scene.draw_items().count(), 1);
}

// ============================================================================
// Camera
// ============================================================================

#[test]
fn camera_aspect_updates_projection() {
    let mut camera = Camera::new_perspective(60.0, 1.0, 0.1, 100.0);
    let before = camera.view_projection_matrix();

    camera.set_aspect(2.5);
    assert_eq!(camera.aspect, 2.5);
    assert_ne!(camera.view_projection_matrix(), before);
}

#[test]
fn camera_set_position_keeps_looking_at_target() {
    let mut camera = Camera::new_perspective(60.0, 1.6, 0.1, 100.0);
    camera.target = Vec3::new(0.0, 1.0, 0.0);
    camera.set_position(Vec3::new(0.0, 1.0, 10.0));

    // The target must project to the center of the view: its view-space
    // x/y are zero.
    let view_target = camera.view_matrix().transform_point3(camera.target);
    assert!(approx_eq(view_target.x, 0.0));
    assert!(approx_eq(view_target.y, 0.0));
    assert!(view_target.z < 0.0, "target sits in front of the camera");
}

// ============================================================================
// Line strips
// ============================================================================

#[test]
fn wire_box_has_twelve_edges() {
    let strip = LineStrip::wire_box(Vec3::ONE, Vec3::ONE, 1.0);
    assert_eq!(strip.vertex_count(), 24);
}

#[test]
fn grid_line_counts_match_divisions() {
    let strip = LineStrip::grid(10.0, 10, Vec3::ONE, 1.0);
    // 11 lines per axis, 2 axes, 2 vertices per line
    assert_eq!(strip.vertex_count(), 44);
}

#[test]
fn polyline_expands_to_segment_pairs() {
    let points = [
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(2.0, 1.0, 0.0),
    ];
    let strip = LineStrip::from_polyline(&points, Vec3::ONE, 1.0);
    assert_eq!(strip.vertex_count(), 4);
}

#[test]
fn set_opacity_clamps_to_valid_range() {
    let mut strip = LineStrip::grid(10.0, 2, Vec3::ONE, 0.5);
    strip.set_opacity(7.0);
    assert_eq!(strip.opacity, OPACITY_RANGE.1);
    strip.set_opacity(-3.0);
    assert_eq!(strip.opacity, OPACITY_RANGE.0);
}

// ============================================================================
// Presets
// ============================================================================

fn strips_equal(a: &Scene, b: &Scene) -> bool {
    a.strips.len() == b.strips.len()
        && a.strips
            .values()
            .zip(b.strips.values())
            .all(|(x, y)| x.vertices() == y.vertices() && x.color == y.color)
}

#[test]
fn presets_are_deterministic_for_equal_seeds() {
    for build in [presets::grid_horizon, presets::prism_field, presets::data_stream] {
        let a = build(1234);
        let b = build(1234);
        assert!(strips_equal(&a, &b), "same seed must reproduce the scene");
        assert_eq!(a.nodes.len(), b.nodes.len());
    }
}

#[test]
fn prism_field_differs_across_seeds() {
    let a = presets::prism_field(1);
    let b = presets::prism_field(2);
    assert!(!strips_equal(&a, &b), "different seeds should vary the field");
}
