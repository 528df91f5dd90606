use glam::{Mat4, Vec3};

/// Perspective camera with a fixed look-at target.
///
/// The backdrop use case never needs a free camera: the camera sits at a
/// position, looks at a fixed target, and zoom scales the offset between
/// them. View and projection matrices are cached and recomputed on change.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub position: Vec3,
    pub target: Vec3,

    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
    pub(crate) view_projection_matrix: Mat4,
}

impl Camera {
    #[must_use]
    pub fn new_perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov: fov_degrees.to_radians(),
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            view_projection_matrix: Mat4::IDENTITY,
        };
        cam.update_projection_matrix();
        cam.update_view_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        // glam perspective_rh targets the WGPU/Vulkan [0, 1] depth range
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    pub fn update_view_matrix(&mut self) {
        self.view_matrix = Mat4::look_at_rh(self.position, self.target, Vec3::Y);
        self.view_projection_matrix = self.projection_matrix * self.view_matrix;
    }

    /// Moves the camera and re-derives the view matrix toward the fixed
    /// target.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view_matrix();
    }

    /// Updates the aspect ratio (width / height) and the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    #[inline]
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    #[inline]
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.view_projection_matrix
    }
}
