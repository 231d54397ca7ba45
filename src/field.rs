//! The particle-field simulation.
//!
//! [`NodeField`] owns the node set and the interaction state, advances one
//! frame per [`step`](NodeField::step), and emits a renderable
//! [`FrameSnapshot`] on demand. The host drives it from its redraw callback
//! and forwards pointer events; nothing here blocks or fails.
//!
//! # Usage
//!
//! ```ignore
//! let mut field = NodeField::new(FieldParams::new(800.0, 600.0));
//! loop {
//!     field.step();
//!     draw(&field.snapshot());
//! }
//! ```

use glam::Vec2;

use crate::node::{Node, NodeId};
use crate::params::FieldParams;
use crate::physics;
use crate::pointer::PointerState;
use crate::snapshot::{self, FrameSnapshot, NodeView};
use crate::spawn::SpawnContext;

/// A bounded field of drifting, colliding, connectable nodes.
#[derive(Debug)]
pub struct NodeField {
    params: FieldParams,
    nodes: Vec<Node>,
    pointer: PointerState,
    spawn: SpawnContext,
    next_id: u32,
}

impl NodeField {
    /// Create a field and spawn its initial population.
    pub fn new(params: FieldParams) -> Self {
        Self::with_spawner(params, SpawnContext::new())
    }

    /// Create a field with a caller-provided (e.g. seeded) spawn context.
    pub fn with_spawner(params: FieldParams, spawn: SpawnContext) -> Self {
        let mut field = Self {
            params,
            nodes: Vec::new(),
            pointer: PointerState::new(),
            spawn,
            next_id: 0,
        };
        field.populate();
        field
    }

    /// Current node set, in creation (ascending id) order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Live node count. Never decreases; capped at `params.max_nodes`.
    pub fn population(&self) -> usize {
        self.nodes.len()
    }

    /// Discard all nodes and respawn from scratch at the new dimensions.
    ///
    /// In-flight nodes are deliberately not preserved: the jump coincides
    /// with a host layout change and is imperceptible. Any grab or hover is
    /// dropped with the nodes it referred to. Ids keep counting up.
    pub fn resize(&mut self, width: f32, height: f32) {
        debug_assert!(width > 0.0 && height > 0.0, "viewport must be positive");
        self.params.width = width;
        self.params.height = height;
        self.pointer.clear();
        self.nodes.clear();
        self.populate();
        log::debug!("field resized to {width}x{height}, repopulated");
    }

    /// Advance the simulation one frame.
    ///
    /// Phases, in order: integration (stationary nodes skip movement and
    /// lose their trail), damped wall reflection, pairwise elastic
    /// collisions, collision spawning below the population cap, and a final
    /// confinement clamp so collision separation can never leave a node
    /// outside the walls.
    pub fn step(&mut self) {
        // Copied out so the borrow does not tie up `self.nodes`.
        let pointer = self.pointer.clone();
        let pinned = |id: NodeId| pointer.is_stationary(id);

        // 1. Integration + trail growth.
        for node in &mut self.nodes {
            if pinned(node.id) {
                node.clear_trail();
                continue;
            }
            node.position += node.velocity;
            node.record_trail(self.params.trail_len);
        }

        // 2. Wall reflection.
        for node in &mut self.nodes {
            if pinned(node.id) {
                continue;
            }
            physics::reflect_walls(
                node,
                self.params.width,
                self.params.height,
                self.params.wall_damping,
            );
        }

        // 3. Pairwise collisions over every unordered pair present at the
        // start of the scan. Pinned nodes sit this phase out.
        let scanned = self.nodes.len();
        let mut collisions = 0usize;
        for i in 0..scanned {
            for j in i + 1..scanned {
                let (head, tail) = self.nodes.split_at_mut(j);
                let a = &mut head[i];
                let b = &mut tail[0];
                if pinned(a.id) || pinned(b.id) {
                    continue;
                }
                if physics::collide_pair(a, b) {
                    collisions += 1;
                }
            }
        }

        // 4. Each collision below the cap spawns one node. The cap is
        // checked before every spawn; the population never shrinks.
        for _ in 0..collisions {
            if self.nodes.len() >= self.params.max_nodes {
                break;
            }
            let id = self.take_id();
            let node = self.spawn.spawned_node(id, &self.params);
            log::debug!("collision spawned node {id} (population {})", self.nodes.len() + 1);
            self.nodes.push(node);
        }

        // Confinement: separation pushes and fresh spawns must still end the
        // frame inside [half_size, dim - half_size].
        for node in &mut self.nodes {
            physics::clamp_to_bounds(node, self.params.width, self.params.height);
        }
    }

    /// Produce the renderable state for the frame just stepped.
    ///
    /// Connections are derived wholesale from the current positions; the
    /// snapshot owns all its data and never aliases the live node set.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            nodes: self.nodes.iter().map(NodeView::from).collect(),
            connections: snapshot::connections(
                &self.nodes,
                self.pointer.position,
                self.params.connection_radius,
                self.params.glow_radius,
            ),
        }
    }

    /// First node (in creation order) whose hit circle contains `point`.
    ///
    /// First-match, not nearest-match: among overlapping candidates the
    /// earliest-created node wins. This tie-break is deliberate and tested.
    pub fn hit_test(&self, point: Vec2) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|node| node.contains(point))
            .map(|node| node.id)
    }

    /// Record a pointer move. While nothing is grabbed, re-derives the
    /// hovered node; a hovered node is stationary just like a grabbed one.
    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer.position = position;
        if self.pointer.grabbed.is_none() {
            self.pointer.hovered = self.hit_test(position);
        }
    }

    /// Primary-button press: grab the first node under the pointer.
    ///
    /// A grabbed node stops dead (velocity zeroed, trail cleared) and the
    /// press position becomes the slingshot anchor.
    pub fn press(&mut self, position: Vec2) -> Option<NodeId> {
        self.pointer.position = position;
        let id = self.hit_test(position)?;
        if let Some(node) = self.node_mut(id) {
            node.velocity = Vec2::ZERO;
            node.clear_trail();
        }
        self.pointer.grabbed = Some(id);
        self.pointer.grab_origin = position;
        log::debug!("grabbed node {id}");
        Some(id)
    }

    /// Release a grab, launching the node opposite to the drag direction.
    ///
    /// The launch vector is the negation of (pointer - grab origin),
    /// normalized and scaled to the fixed speed. A zero-length drag falls
    /// back to a fresh random direction rather than leaving the node inert.
    pub fn release(&mut self) -> Option<NodeId> {
        let id = self.pointer.grabbed.take()?;
        let drag = self.pointer.position - self.pointer.grab_origin;
        let direction = if drag.length_squared() > 0.0 {
            -drag.normalize()
        } else {
            self.spawn.random_direction()
        };
        let speed = self.params.node_speed;
        if let Some(node) = self.node_mut(id) {
            node.velocity = direction * speed;
        }
        // The pointer may no longer sit over the released node.
        self.pointer.hovered = self.hit_test(self.pointer.position);
        log::debug!("released node {id}");
        Some(id)
    }

    /// Explicit hover control for hosts that hit-test themselves.
    pub fn set_hovered(&mut self, id: Option<NodeId>) {
        self.pointer.hovered = id;
    }

    fn populate(&mut self) {
        for _ in 0..self.params.initial_count {
            let id = self.take_id();
            let node = self.spawn.initial_node(id, &self.params);
            self.nodes.push(node);
        }
        log::info!(
            "field populated: {} nodes in {}x{}",
            self.nodes.len(),
            self.params.width,
            self.params.height
        );
    }

    fn take_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }
}
