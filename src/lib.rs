#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod app;
pub mod config;
pub mod errors;
pub mod input;
pub mod lifecycle;
pub mod render;
pub mod scene;
pub mod utils;

pub use animation::Animator;
pub use app::App;
pub use config::{Background, BackdropConfig, Fog, ROTATE_SENSITIVITY, ZOOM_RANGE};
pub use errors::BackdropError;
pub use input::{DragControls, PointerState};
pub use lifecycle::{Phase, SceneLifecycle};
pub use render::{FrameHandle, RenderBackend, SurfaceSize, WgpuBackend};
pub use scene::{presets, Camera, LineStrip, Node, Scene, Transform};
pub use utils::Timer;
