use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// One vertex of a line list.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
}

impl LineVertex {
    #[must_use]
    pub fn new(p: Vec3) -> Self {
        Self {
            position: p.to_array(),
        }
    }
}

/// An unlit set of line segments with a single color and opacity.
///
/// Vertices are generated once during scene construction (deterministically
/// or from a seed) and cached for the lifetime of the context; per-frame
/// animation only mutates `opacity` and the owning node's transform. The
/// whole strip is torn down together with the scene graph, never
/// individually.
#[derive(Debug, Clone)]
pub struct LineStrip {
    /// Line-list vertices: every consecutive pair is one segment.
    vertices: Vec<LineVertex>,
    pub color: Vec3,
    pub opacity: f32,
    /// Resting opacity animators oscillate around.
    pub base_opacity: f32,
    pub visible: bool,
}

/// Opacity is clamped to this range so strips never flash fully
/// transparent or fully opaque.
pub const OPACITY_RANGE: (f32, f32) = (0.02, 1.0);

impl LineStrip {
    #[must_use]
    pub fn new(vertices: Vec<LineVertex>, color: Vec3, opacity: f32) -> Self {
        Self {
            vertices,
            color,
            opacity,
            base_opacity: opacity,
            visible: true,
        }
    }

    /// Builds a strip from a polyline, expanding it into line-list segments.
    #[must_use]
    pub fn from_polyline(points: &[Vec3], color: Vec3, opacity: f32) -> Self {
        let mut vertices = Vec::with_capacity(points.len().saturating_sub(1) * 2);
        for pair in points.windows(2) {
            vertices.push(LineVertex::new(pair[0]));
            vertices.push(LineVertex::new(pair[1]));
        }
        Self::new(vertices, color, opacity)
    }

    /// The 12 edges of an axis-aligned box centered at the origin.
    #[must_use]
    pub fn wire_box(half_extents: Vec3, color: Vec3, opacity: f32) -> Self {
        let h = half_extents;
        let corners = [
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ];
        const EDGES: [(usize, usize); 12] = [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];
        let mut vertices = Vec::with_capacity(24);
        for (a, b) in EDGES {
            vertices.push(LineVertex::new(corners[a]));
            vertices.push(LineVertex::new(corners[b]));
        }
        Self::new(vertices, color, opacity)
    }

    /// A flat grid of `divisions + 1` lines per axis in the XZ plane.
    #[must_use]
    pub fn grid(size: f32, divisions: u32, color: Vec3, opacity: f32) -> Self {
        let half = size / 2.0;
        let step = size / divisions as f32;
        let mut vertices = Vec::with_capacity(((divisions + 1) * 4) as usize);
        for i in 0..=divisions {
            let offset = -half + i as f32 * step;
            // Line parallel to X
            vertices.push(LineVertex::new(Vec3::new(-half, 0.0, offset)));
            vertices.push(LineVertex::new(Vec3::new(half, 0.0, offset)));
            // Line parallel to Z
            vertices.push(LineVertex::new(Vec3::new(offset, 0.0, -half)));
            vertices.push(LineVertex::new(Vec3::new(offset, 0.0, half)));
        }
        Self::new(vertices, color, opacity)
    }

    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Sets opacity, clamped to [`OPACITY_RANGE`].
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(OPACITY_RANGE.0, OPACITY_RANGE.1);
    }
}
