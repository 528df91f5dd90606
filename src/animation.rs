//! Bounded, time-parameterized animators.
//!
//! Every animator computes an absolute value from the elapsed time of the
//! context (`value = f(t)`), never an increment from the previous frame.
//! Frame-rate independence falls out, skipped frames cannot accumulate
//! drift, and suppressing animation (reduced motion) simply means not
//! calling [`Animator::apply`].
//!
//! All outputs are bounded: opacity is clamped to
//! [`crate::scene::strip::OPACITY_RANGE`], sway oscillates inside its
//! amplitude envelope, and spin is a pure rotation.

use glam::{Quat, Vec3};

use crate::scene::strip::{LineStrip, OPACITY_RANGE};
use crate::scene::transform::Transform;

/// Continuous rotation at a fixed rate per axis, applied on top of a base
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    /// Radians per second around X/Y/Z.
    pub rate: Vec3,
    pub base_rotation: Quat,
}

/// Sinusoidal position offset around a base position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sway {
    pub base_position: Vec3,
    pub amplitude: Vec3,
    pub speed: f32,
    pub phase: f32,
}

/// Sinusoidal opacity pulse: `base + amplitude * sin(t * speed + phase)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityPulse {
    pub base: f32,
    pub amplitude: f32,
    pub speed: f32,
    pub phase: f32,
}

/// Per-node animator: any combination of spin, sway and opacity pulse.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Animator {
    pub spin: Option<Spin>,
    pub sway: Option<Sway>,
    pub pulse: Option<OpacityPulse>,
}

impl Animator {
    #[must_use]
    pub fn spinning(rate: Vec3, base_rotation: Quat) -> Self {
        Self {
            spin: Some(Spin {
                rate,
                base_rotation,
            }),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn swaying(base_position: Vec3, amplitude: Vec3, speed: f32, phase: f32) -> Self {
        Self {
            sway: Some(Sway {
                base_position,
                amplitude,
                speed,
                phase,
            }),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn pulsing(base: f32, amplitude: f32, speed: f32, phase: f32) -> Self {
        Self {
            pulse: Some(OpacityPulse {
                base,
                amplitude,
                speed,
                phase,
            }),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sway(mut self, base_position: Vec3, amplitude: Vec3, speed: f32, phase: f32) -> Self {
        self.sway = Some(Sway {
            base_position,
            amplitude,
            speed,
            phase,
        });
        self
    }

    #[must_use]
    pub fn with_pulse(mut self, base: f32, amplitude: f32, speed: f32, phase: f32) -> Self {
        self.pulse = Some(OpacityPulse {
            base,
            amplitude,
            speed,
            phase,
        });
        self
    }

    /// Applies all configured components at elapsed time `time` (seconds).
    pub fn apply(&self, time: f32, transform: &mut Transform, strip: Option<&mut LineStrip>) {
        if let Some(spin) = &self.spin {
            let angles = spin.rate * time;
            transform.rotation = spin.base_rotation
                * Quat::from_euler(glam::EulerRot::XYZ, angles.x, angles.y, angles.z);
        }

        if let Some(sway) = &self.sway {
            let s = (time * sway.speed + sway.phase).sin();
            transform.position = sway.base_position + sway.amplitude * s;
        }

        if let (Some(pulse), Some(strip)) = (&self.pulse, strip) {
            let raw = pulse.base + pulse.amplitude * (time * pulse.speed + pulse.phase).sin();
            strip.opacity = raw.clamp(OPACITY_RANGE.0, OPACITY_RANGE.1);
        }
    }
}
