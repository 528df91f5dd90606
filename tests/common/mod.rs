//! Shared test harness: a counting render backend.
//!
//! `RecordingBackend` implements `RenderBackend` with shared counters so
//! tests can verify the lifecycle contract from outside: how many frame
//! callbacks are outstanding, how many listeners are attached, whether GPU
//! resources were released and the context detached.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use backdrop::errors::{BackdropError, Result};
use backdrop::render::{FrameHandle, RenderBackend, SurfaceSize};
use backdrop::scene::camera::Camera;
use backdrop::scene::Scene;
use backdrop::{BackdropConfig, SceneLifecycle};

#[derive(Default)]
pub struct Counters {
    pub attach_calls: u32,
    pub attached: bool,
    /// Configure before `create` to simulate "no WebGL context".
    pub fail_attach: bool,

    pub listeners: u32,
    pub unregister_calls: u32,

    /// Frame callbacks scheduled but not yet fired or cancelled.
    pub outstanding: Vec<u64>,
    pub schedule_calls: u32,
    pub cancel_calls: u32,
    next_frame_id: u64,

    pub draw_calls: u32,
    /// Configure to make every draw fail.
    pub fail_draws: bool,

    pub release_calls: u32,
    pub detach_calls: u32,
    pub last_resize: Option<SurfaceSize>,
}

pub type SharedCounters = Rc<RefCell<Counters>>;

pub struct RecordingBackend {
    counters: SharedCounters,
}

impl RecordingBackend {
    pub fn new() -> (Self, SharedCounters) {
        let counters: SharedCounters = Rc::default();
        (
            Self {
                counters: counters.clone(),
            },
            counters,
        )
    }
}

impl RenderBackend for RecordingBackend {
    fn attach(&mut self, _size: SurfaceSize, _config: &BackdropConfig) -> Result<()> {
        let mut c = self.counters.borrow_mut();
        c.attach_calls += 1;
        if c.fail_attach {
            return Err(BackdropError::AdapterRequestFailed(
                "no adapter in test".into(),
            ));
        }
        c.attached = true;
        Ok(())
    }

    fn register_input(&mut self) {
        self.counters.borrow_mut().listeners += 1;
    }

    fn unregister_input(&mut self) {
        let mut c = self.counters.borrow_mut();
        c.listeners = 0;
        c.unregister_calls += 1;
    }

    fn schedule_frame(&mut self) -> FrameHandle {
        let mut c = self.counters.borrow_mut();
        c.next_frame_id += 1;
        let id = c.next_frame_id;
        c.outstanding.push(id);
        c.schedule_calls += 1;
        FrameHandle(id)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut c = self.counters.borrow_mut();
        c.outstanding.retain(|&id| id != handle.0);
        c.cancel_calls += 1;
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.counters.borrow_mut().last_resize = Some(size);
    }

    fn draw(&mut self, _scene: &Scene, _camera: &Camera, _time: f32) -> Result<()> {
        let mut c = self.counters.borrow_mut();
        c.draw_calls += 1;
        if c.fail_draws {
            return Err(BackdropError::DrawFailed("injected draw failure".into()));
        }
        Ok(())
    }

    fn release(&mut self) {
        self.counters.borrow_mut().release_calls += 1;
    }

    fn detach(&mut self) {
        self.counters.borrow_mut().detach_calls += 1;
    }
}

/// Delivers the oldest scheduled frame callback: the host fires it, then
/// the lifecycle advances at the given elapsed time.
pub fn run_frame(
    lifecycle: &mut SceneLifecycle<RecordingBackend>,
    counters: &SharedCounters,
    elapsed: f32,
) {
    {
        let mut c = counters.borrow_mut();
        if !c.outstanding.is_empty() {
            c.outstanding.remove(0);
        }
    }
    lifecycle.advance(elapsed);
}

pub const EPSILON: f32 = 1e-5;

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

pub fn default_size() -> SurfaceSize {
    SurfaceSize::new(800, 600, 1.0)
}
