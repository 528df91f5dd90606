use glam::{Affine3A, Mat4};
use slotmap::{SecondaryMap, SlotMap};

use crate::animation::Animator;
use crate::scene::node::Node;
use crate::scene::strip::LineStrip;
use crate::scene::{NodeKey, StripKey};

/// Scene container: node arena, strip pool and animator side map.
///
/// The scene is a pure data layer. Every scene owns a single root "rig"
/// node; nodes added through [`Scene::add_node`] become its children, so
/// drag interaction can rotate the whole backdrop by mutating one
/// transform. GPU-side resources for strips are owned by the render
/// backend, keyed by [`StripKey`], and torn down together with the graph.
pub struct Scene {
    pub nodes: SlotMap<NodeKey, Node>,
    pub strips: SlotMap<StripKey, LineStrip>,
    pub animators: SecondaryMap<NodeKey, Animator>,

    root: NodeKey,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new());
        Self {
            nodes,
            strips: SlotMap::with_key(),
            animators: SecondaryMap::new(),
            root,
        }
    }

    /// The root rig node all content hangs off.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Adds a strip to the pool without attaching it to a node.
    pub fn add_strip(&mut self, strip: LineStrip) -> StripKey {
        self.strips.insert(strip)
    }

    /// Adds a node as a child of the root rig.
    pub fn add_node(&mut self, node: Node) -> NodeKey {
        self.add_child(self.root, node)
    }

    /// Adds a node as a child of `parent`, keeping both sides of the
    /// relationship in sync.
    pub fn add_child(&mut self, parent: NodeKey, mut node: Node) -> NodeKey {
        node.parent = Some(parent);
        let key = self.nodes.insert(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(key);
        }
        key
    }

    /// Attaches an animator to a node, replacing any existing one.
    pub fn set_animator(&mut self, node: NodeKey, animator: Animator) {
        self.animators.insert(node, animator);
    }

    /// Applies every animator at the given elapsed time.
    ///
    /// Animators compute absolute values from `time`, so the result is
    /// independent of how many frames were skipped in between.
    pub fn animate(&mut self, time: f32) {
        for (key, animator) in &self.animators {
            if let Some(node) = self.nodes.get_mut(key) {
                let strip = node.strip.and_then(|s| self.strips.get_mut(s));
                animator.apply(time, &mut node.transform, strip);
            }
        }
    }

    /// Propagates world matrices from the root down, iteratively.
    ///
    /// Iterative on an explicit stack so deep graphs cannot overflow the
    /// call stack.
    pub fn update_world(&mut self) {
        let mut stack: Vec<(NodeKey, Affine3A)> = vec![(self.root, Affine3A::IDENTITY)];

        while let Some((key, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(key) else {
                continue;
            };
            node.transform.update_local_matrix();
            let world = parent_world * *node.transform.local_matrix();
            node.transform.set_world_matrix(world);

            for &child in &node.children {
                stack.push((child, world));
            }
        }
    }

    /// Visible strip instances with their world matrices, in node order.
    pub fn draw_items(&self) -> impl Iterator<Item = (StripKey, Mat4, &LineStrip)> {
        self.nodes.iter().filter_map(move |(_, node)| {
            if !node.visible {
                return None;
            }
            let key = node.strip?;
            let strip = self.strips.get(key)?;
            if !strip.visible {
                return None;
            }
            Some((key, node.transform.world_matrix_as_mat4(), strip))
        })
    }

    /// Number of visible strips (used by backends to size buffers).
    #[must_use]
    pub fn strip_count(&self) -> usize {
        self.strips.len()
    }
}
