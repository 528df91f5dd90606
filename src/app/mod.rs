//! Winit host for a backdrop context.
//!
//! [`App`] opens a window, constructs a [`SceneLifecycle`] over the
//! production [`WgpuBackend`], and forwards window events into it: redraws
//! become frame callbacks, resizes update camera aspect and surface size,
//! pointer and wheel events drive the interaction entry points.

use std::sync::Arc;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::BackdropConfig;
use crate::errors::Result;
use crate::lifecycle::SceneLifecycle;
use crate::render::{SurfaceSize, WgpuBackend};
use crate::scene::Scene;

pub struct App {
    title: String,
    config: BackdropConfig,
    // Taken on resume, when the context is constructed.
    scene: Option<Scene>,

    window: Option<Arc<Window>>,
    lifecycle: Option<SceneLifecycle<WgpuBackend>>,
    cursor: Vec2,
}

impl App {
    #[must_use]
    pub fn new(config: BackdropConfig, scene: Scene) -> Self {
        Self {
            title: "Backdrop".into(),
            config,
            scene: Some(scene),
            window: None,
            lifecycle: None,
            cursor: Vec2::ZERO,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    fn surface_size(window: &Window) -> SurfaceSize {
        let scale = window.scale_factor();
        let logical = window.inner_size().to_logical::<u32>(scale);
        SurfaceSize::new(logical.width.max(1), logical.height.max(1), scale)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_transparent(matches!(
                self.config.background,
                crate::config::Background::Transparent
            ))
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let Some(scene) = self.scene.take() else {
            return;
        };
        let size = Self::surface_size(&window);
        let backend = WgpuBackend::new(window);

        match SceneLifecycle::create(backend, self.config.clone(), scene, size) {
            Ok(lifecycle) => self.lifecycle = Some(lifecycle),
            Err(e) => {
                // No renderable context: degrade to a plain window rather
                // than retrying indefinitely.
                log::error!("Backdrop unavailable, falling back to static window: {e}");
                self.lifecycle = None;
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(lifecycle) = self.lifecycle.as_mut() else {
            if matches!(event, WindowEvent::CloseRequested) {
                event_loop.exit();
            }
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                lifecycle.teardown();
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    lifecycle.resize(Self::surface_size(window));
                }
            }
            WindowEvent::RedrawRequested => {
                lifecycle.frame();
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                lifecycle.pointer_moved(self.cursor);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => lifecycle.pointer_down(self.cursor),
                ElementState::Released => lifecycle.pointer_up(),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                lifecycle.wheel(dy);
            }
            _ => {}
        }
    }
}
