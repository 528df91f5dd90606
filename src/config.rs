//! Backdrop configuration.
//!
//! Plain data describing one rendering context: background, fog, camera,
//! pixel-ratio cap, interactivity and the reduced-motion override. A config
//! is captured at construction time and owned by the lifecycle manager;
//! only `reduced_motion` can change afterwards (live preference updates go
//! through [`crate::SceneLifecycle::set_reduced_motion`]).

use glam::{Vec3, Vec4};

/// Background of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    /// Clear to an opaque RGBA color every frame.
    Opaque(Vec4),
    /// Clear to fully transparent so page content behind the surface
    /// stays visible.
    Transparent,
}

impl Background {
    #[must_use]
    pub fn clear_color(&self) -> Vec4 {
        match self {
            Background::Opaque(c) => *c,
            Background::Transparent => Vec4::ZERO,
        }
    }
}

/// Linear distance fog. Disabled fog leaves colors untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub enabled: bool,
    pub near: f32,
    pub far: f32,
    pub color: Vec3,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            enabled: false,
            near: 10.0,
            far: 60.0,
            color: Vec3::ZERO,
        }
    }
}

/// Default radians of rig rotation per pixel of pointer drag.
pub const ROTATE_SENSITIVITY: f32 = 0.005;

/// Default clamp range for the wheel zoom factor.
pub const ZOOM_RANGE: (f32, f32) = (0.5, 3.0);

/// Configuration for one backdrop rendering context.
#[derive(Debug, Clone)]
pub struct BackdropConfig {
    pub background: Background,
    pub fog: Fog,

    /// Initial camera position in world space.
    pub camera_position: Vec3,
    /// Fixed look-at target; zoom recomputes the camera position along the
    /// offset to this point.
    pub camera_target: Vec3,
    /// Vertical field of view in degrees.
    pub field_of_view: f32,

    /// Device pixel ratio is clamped to this to bound GPU load.
    pub pixel_ratio_cap: f32,

    /// Attach pointer/wheel listeners and enable drag/zoom.
    pub interactive: bool,
    /// Suppress all time-based mutation. Can be forced for testing and
    /// updated live when the host observes the media preference.
    pub reduced_motion: bool,

    /// Wheel zoom factor clamp, `(min, max)`.
    pub zoom_range: (f32, f32),
    /// Radians of rig rotation per pixel of drag.
    pub rotate_sensitivity: f32,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            background: Background::Opaque(Vec4::new(0.01, 0.01, 0.03, 1.0)),
            fog: Fog::default(),
            camera_position: Vec3::new(0.0, 4.0, 14.0),
            camera_target: Vec3::ZERO,
            field_of_view: 60.0,
            pixel_ratio_cap: 2.0,
            interactive: false,
            reduced_motion: false,
            zoom_range: ZOOM_RANGE,
            rotate_sensitivity: ROTATE_SENSITIVITY,
        }
    }
}

impl BackdropConfig {
    #[must_use]
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    #[must_use]
    pub fn with_reduced_motion(mut self, on: bool) -> Self {
        self.reduced_motion = on;
        self
    }

    #[must_use]
    pub fn with_fog(mut self, near: f32, far: f32, color: Vec3) -> Self {
        self.fog = Fog {
            enabled: true,
            near,
            far,
            color,
        };
        self
    }

    #[must_use]
    pub fn transparent(mut self) -> Self {
        self.background = Background::Transparent;
        self
    }

    /// Clamps a raw device pixel ratio to the configured cap.
    #[must_use]
    pub fn clamp_pixel_ratio(&self, ratio: f64) -> f64 {
        ratio.clamp(0.5, f64::from(self.pixel_ratio_cap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_clamps_to_the_cap() {
        let config = BackdropConfig::default();
        assert_eq!(config.clamp_pixel_ratio(3.0), 2.0);
        assert_eq!(config.clamp_pixel_ratio(1.25), 1.25);
        assert_eq!(config.clamp_pixel_ratio(0.1), 0.5);
    }

    #[test]
    fn transparent_background_clears_to_zero() {
        assert_eq!(Background::Transparent.clear_color(), Vec4::ZERO);
        let c = Vec4::new(0.1, 0.2, 0.3, 1.0);
        assert_eq!(Background::Opaque(c).clear_color(), c);
    }
}
