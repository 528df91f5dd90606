//! Scene graph module.
//!
//! - [`Node`]: scene node (hierarchy + transform)
//! - [`Transform`]: TRS component with cached matrices
//! - [`Scene`]: scene container (node arena, strip pool, animators)
//! - [`Camera`]: perspective camera
//! - [`LineStrip`]: unlit line-set scene object
//! - [`presets`]: seeded backdrop scene builders

pub mod camera;
pub mod node;
pub mod presets;
pub mod scene;
pub mod strip;
pub mod transform;

pub use camera::Camera;
pub use node::Node;
pub use scene::Scene;
pub use strip::{LineStrip, LineVertex};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeKey;
    pub struct StripKey;
}
