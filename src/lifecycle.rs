//! Scene lifecycle management.
//!
//! [`SceneLifecycle`] owns one rendering context end to end: construction,
//! per-frame mutation, interaction, resize, and guaranteed teardown. It is
//! the generalization of the construct/animate/dispose pattern that
//! animated backdrop widgets otherwise re-implement individually.
//!
//! # Ownership contract
//!
//! Every context created must be paired with exactly one teardown that
//! cancels the pending frame, removes input listeners, releases GPU-side
//! resources for every scene object, releases the GPU context and detaches
//! the drawing surface. [`SceneLifecycle::teardown`] performs all of that
//! in order, is idempotent, and also runs from `Drop` as a safety net.
//!
//! # Phases
//!
//! `Uninitialized → Constructing → Running → TearingDown → Disposed`,
//! strictly one-directional; `Disposed` is terminal. Frame, resize and
//! pointer entry points are no-ops outside `Running`, and that check is
//! evaluated at the start of every frame callback so no in-flight frame
//! can draw through a released context.

use glam::Vec2;

use crate::config::BackdropConfig;
use crate::errors::{BackdropError, Result};
use crate::input::{DragControls, PointerState};
use crate::render::{FrameHandle, RenderBackend, SurfaceSize};
use crate::scene::camera::Camera;
use crate::scene::Scene;
use crate::utils::Timer;

/// Lifecycle phase of a rendering context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Constructing,
    Running,
    TearingDown,
    Disposed,
}

/// Owns a scene, a camera and a render backend, and drives them through
/// the construct → run → dispose lifecycle.
pub struct SceneLifecycle<B: RenderBackend> {
    backend: B,
    scene: Scene,
    camera: Camera,
    config: BackdropConfig,

    phase: Phase,
    timer: Timer,
    pending_frame: Option<FrameHandle>,
    input_registered: bool,
    reduced_motion: bool,

    pointer: PointerState,
    controls: DragControls,
}

impl<B: RenderBackend> SceneLifecycle<B> {
    /// Constructs a rendering context: attaches the backend to the mount
    /// point, registers input listeners when interactive, and schedules
    /// the first frame.
    ///
    /// On attach failure no partially registered state survives: any
    /// scheduled frame is cancelled and listeners are removed defensively
    /// before the error is reported (once) as `ContextUnavailable`.
    pub fn create(
        mut backend: B,
        config: BackdropConfig,
        scene: Scene,
        size: SurfaceSize,
    ) -> Result<Self> {
        let mut camera = Camera::new_perspective(config.field_of_view, size.aspect(), 0.1, 200.0);
        camera.target = config.camera_target;
        camera.set_position(config.camera_position);

        if let Err(e) = backend.attach(size, &config) {
            // Defensive teardown steps 1-2: nothing may be left scheduled
            // or listening after a failed construction.
            backend.cancel_frame(FrameHandle(0));
            backend.unregister_input();
            log::error!("Backdrop construction failed: {e}");
            return Err(BackdropError::ContextUnavailable(e.to_string()));
        }

        let input_registered = config.interactive;
        if input_registered {
            backend.register_input();
        }

        let controls = DragControls::new(
            config.rotate_sensitivity,
            config.zoom_range,
            config.camera_position,
            config.camera_target,
        );
        let pointer = PointerState {
            zoom: 1.0,
            ..PointerState::default()
        };

        let reduced_motion = config.reduced_motion;
        let pending_frame = Some(backend.schedule_frame());

        Ok(Self {
            backend,
            scene,
            camera,
            config,
            phase: Phase::Running,
            timer: Timer::new(),
            pending_frame,
            input_registered,
            reduced_motion,
            pointer,
            controls,
        })
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    #[must_use]
    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    /// Live reduced-motion preference update from the host.
    pub fn set_reduced_motion(&mut self, on: bool) {
        self.reduced_motion = on;
    }

    /// Frame callback driven by the host's real clock.
    pub fn frame(&mut self) {
        self.timer.tick();
        let elapsed = self.timer.elapsed_seconds();
        self.advance(elapsed);
    }

    /// Frame callback at an explicit elapsed time (seconds). Exposed so
    /// hosts and tests can drive simulated time; [`Self::frame`] delegates
    /// here.
    pub fn advance(&mut self, elapsed: f32) {
        // Evaluated first, every frame: a stray callback after teardown
        // must never mutate or draw.
        if self.phase != Phase::Running {
            return;
        }

        // This invocation consumes the outstanding handle.
        self.pending_frame = None;

        if !self.reduced_motion {
            self.scene.animate(elapsed);
        }
        self.scene.update_world();

        // Per-frame error boundary: log and keep looping. A single bad
        // frame must not kill the visual permanently.
        if let Err(e) = self.backend.draw(&self.scene, &self.camera, elapsed) {
            log::warn!("Frame draw failed: {e}");
        }

        // Teardown may have been requested from within draw's host
        // callbacks; re-check before rescheduling.
        if self.phase == Phase::Running {
            self.pending_frame = Some(self.backend.schedule_frame());
        }
    }

    /// Mount-point size change: updates the camera aspect ratio and the
    /// renderer output size. No other state changes.
    pub fn resize(&mut self, size: SurfaceSize) {
        if self.phase != Phase::Running {
            return;
        }
        self.camera.set_aspect(size.aspect());
        self.backend.resize(size);
    }

    // ========================================================================
    // Pointer entry points (host event handlers call these synchronously)
    // ========================================================================

    pub fn pointer_down(&mut self, position: Vec2) {
        if !self.interaction_active() {
            return;
        }
        self.controls.pointer_down(&mut self.pointer, position);
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        if !self.interaction_active() {
            return;
        }
        let root = self.scene.root();
        if let Some(node) = self.scene.nodes.get_mut(root) {
            self.controls
                .pointer_move(&mut self.pointer, position, &mut node.transform);
        }
    }

    pub fn pointer_up(&mut self) {
        if !self.interaction_active() {
            return;
        }
        self.controls.pointer_up(&mut self.pointer);
    }

    pub fn wheel(&mut self, delta_y: f32) {
        if !self.interaction_active() {
            return;
        }
        self.controls
            .wheel(&mut self.pointer, delta_y, &mut self.camera);
    }

    fn interaction_active(&self) -> bool {
        self.phase == Phase::Running && self.input_registered
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Tears the context down: cancel pending frame, remove listeners,
    /// release per-object GPU resources, release the GPU context, detach
    /// the drawing surface. Idempotent; the second call is a no-op.
    /// Teardown errors are logged, never re-thrown.
    pub fn teardown(&mut self) {
        match self.phase {
            Phase::TearingDown | Phase::Disposed => return,
            _ => {}
        }
        self.phase = Phase::TearingDown;

        if let Some(handle) = self.pending_frame.take() {
            self.backend.cancel_frame(handle);
        }
        if self.input_registered {
            self.backend.unregister_input();
            self.input_registered = false;
        }
        self.backend.release();
        self.backend.detach();

        self.phase = Phase::Disposed;
        log::debug!(
            "Backdrop context disposed after {} frames",
            self.timer.frame_count
        );
    }
}

impl<B: RenderBackend> Drop for SceneLifecycle<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
