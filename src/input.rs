//! Pointer interaction: drag-to-rotate and clamped wheel zoom.
//!
//! All handlers run synchronously on the host thread, interleaved between
//! frame callbacks, and mutate owned state directly; there is no
//! concurrent writer and therefore no locking. This direct-mutation
//! contract is the point: interaction writes camera/rig state, the frame
//! callback reads it.

use glam::{Vec2, Vec3};

use crate::scene::camera::Camera;
use crate::scene::transform::Transform;

/// Zoom speed per wheel unit (exponential scaling, like orbit controls).
const ZOOM_SPEED: f32 = 0.05;

/// Transient pointer state. Reset on pointer-up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub dragging: bool,
    pub last_position: Vec2,
    /// Current zoom factor, kept inside the configured clamp range.
    pub zoom: f32,
}

/// Maps pointer deltas onto the scene's root rig rotation and wheel input
/// onto a clamped camera zoom around a fixed look-at target.
#[derive(Debug, Clone)]
pub struct DragControls {
    /// Radians of rig rotation per pixel of drag.
    pub rotate_sensitivity: f32,
    /// `(min, max)` clamp for the zoom factor.
    pub zoom_range: (f32, f32),

    /// Camera offset from the target at zoom factor 1.0.
    base_offset: Vec3,
    target: Vec3,

    // Accumulated drag rotation
    yaw: f32,
    pitch: f32,
}

impl DragControls {
    #[must_use]
    pub fn new(
        rotate_sensitivity: f32,
        zoom_range: (f32, f32),
        camera_position: Vec3,
        target: Vec3,
    ) -> Self {
        Self {
            rotate_sensitivity,
            zoom_range,
            base_offset: camera_position - target,
            target,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn pointer_down(&self, state: &mut PointerState, position: Vec2) {
        state.dragging = true;
        state.last_position = position;
    }

    /// While dragging, rotates the rig by the pointer delta scaled by
    /// `rotate_sensitivity`. Moves with no preceding pointer-down are
    /// ignored.
    pub fn pointer_move(&mut self, state: &mut PointerState, position: Vec2, rig: &mut Transform) {
        if !state.dragging {
            return;
        }
        let delta = position - state.last_position;
        state.last_position = position;

        self.yaw += delta.x * self.rotate_sensitivity;
        self.pitch += delta.y * self.rotate_sensitivity;
        rig.set_rotation_euler(self.pitch, self.yaw, 0.0);
    }

    pub fn pointer_up(&self, state: &mut PointerState) {
        state.dragging = false;
    }

    /// Adjusts the zoom factor exponentially by the wheel delta, clamps it
    /// to the configured range, and recomputes the camera position along
    /// the fixed look-at offset.
    pub fn wheel(&self, state: &mut PointerState, delta_y: f32, camera: &mut Camera) {
        if delta_y == 0.0 {
            return;
        }
        let scale = (1.0 - ZOOM_SPEED).powf(delta_y.abs());
        if delta_y > 0.0 {
            state.zoom /= scale;
        } else {
            state.zoom *= scale;
        }
        state.zoom = state.zoom.clamp(self.zoom_range.0, self.zoom_range.1);

        camera.set_position(self.target + self.base_offset / state.zoom);
    }
}
