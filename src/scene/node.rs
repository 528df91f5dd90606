use crate::scene::transform::Transform;
use crate::scene::{NodeKey, StripKey};
use glam::Affine3A;

/// A minimal scene node: hierarchy, transform, visibility.
///
/// Only data traversed every frame lives here; the line-strip component is
/// referenced by key and stored in the scene's strip pool, and animators
/// live in a side map keyed by node. This keeps nodes small and the
/// per-frame traversal cache-friendly.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node key (None for the root rig)
    pub(crate) parent: Option<NodeKey>,
    /// Child node keys
    pub(crate) children: Vec<NodeKey>,

    /// Transform component (hot data accessed every frame)
    pub transform: Transform,

    /// Visibility flag; invisible nodes are skipped by the backend.
    pub visible: bool,

    /// Optional line-strip component rendered at this node.
    pub strip: Option<StripKey>,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            strip: None,
        }
    }

    #[must_use]
    pub fn with_strip(strip: StripKey) -> Self {
        let mut node = Self::new();
        node.strip = Some(strip);
        node
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// World transformation matrix, updated by the scene traversal.
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
