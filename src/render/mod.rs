//! Render backend seam.
//!
//! [`RenderBackend`] is the ownership boundary between the lifecycle
//! manager and the host environment: the drawing surface, the GPU context,
//! the frame scheduler and the input-listener registry all live behind it.
//! The production implementation is [`WgpuBackend`]; test harnesses
//! implement the trait with counters to verify the lifecycle contract
//! (no scheduled frames or listeners survive teardown).

pub mod wgpu_backend;

pub use wgpu_backend::WgpuBackend;

use crate::config::BackdropConfig;
use crate::errors::Result;
use crate::scene::camera::Camera;
use crate::scene::Scene;

/// Logical size of the mount point plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Physical pixel width, never zero.
    #[must_use]
    pub fn physical_width(&self) -> u32 {
        ((f64::from(self.width) * self.pixel_ratio).round() as u32).max(1)
    }

    /// Physical pixel height, never zero.
    #[must_use]
    pub fn physical_height(&self) -> u32 {
        ((f64::from(self.height) * self.pixel_ratio).round() as u32).max(1)
    }

    /// Logical aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / (self.height.max(1)) as f32
    }
}

/// Opaque token identifying one scheduled frame callback.
///
/// At most one handle is outstanding per rendering context; the lifecycle
/// manager consumes it at the start of each frame and cancels it during
/// teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host-environment boundary owned by a [`crate::SceneLifecycle`].
///
/// Implementations own the GPU context and the drawing surface
/// exclusively; nothing is shared between concurrently mounted contexts.
/// Teardown calls arrive in a fixed order: `cancel_frame` (if a frame is
/// pending), `unregister_input`, `release`, `detach`. Every method must be
/// safe to call in any phase; `release` and `detach` must be idempotent.
pub trait RenderBackend {
    /// Acquires the GPU context and binds it to the drawing surface.
    ///
    /// On failure the backend must leave no partial state behind; the
    /// caller additionally cancels frames and unregisters listeners
    /// defensively.
    fn attach(&mut self, size: SurfaceSize, config: &BackdropConfig) -> Result<()>;

    /// Attaches pointer/wheel listeners to the drawing surface.
    fn register_input(&mut self);

    /// Removes all listeners added by `register_input`. Safe to call when
    /// none were registered.
    fn unregister_input(&mut self);

    /// Schedules the next frame callback and returns its handle.
    fn schedule_frame(&mut self) -> FrameHandle;

    /// Cancels a scheduled frame callback.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Resizes the renderer output to match the mount point.
    fn resize(&mut self, size: SurfaceSize);

    /// Renders the scene through the camera to the drawing surface exactly
    /// once. `time` is the elapsed seconds of the context's monotonic
    /// clock.
    fn draw(&mut self, scene: &Scene, camera: &Camera, time: f32) -> Result<()>;

    /// Releases GPU-side geometry/material resources for every scene
    /// object.
    fn release(&mut self);

    /// Releases the GPU context and detaches the drawing surface from the
    /// mount point.
    fn detach(&mut self);
}
