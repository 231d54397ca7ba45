//! Randomized node creation.
//!
//! [`SpawnContext`] owns the field's RNG and knows the creation rules for
//! both initial nodes and collision-spawned nodes: a uniformly random
//! position, a fixed scalar speed in a uniformly random direction, a size
//! drawn from the relevant bounded range, a random kind, and an opacity near
//! 1.0. Tests seed it for determinism.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::node::{Node, NodeId, NodeKind};
use crate::params::FieldParams;

/// RNG wrapper with helpers for the spawn patterns the field needs.
#[derive(Debug)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Context seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Context with a fixed seed, for deterministic tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Random unit vector from a uniform angle.
    pub fn random_direction(&mut self) -> Vec2 {
        Vec2::from_angle(self.rng.gen_range(0.0..TAU))
    }

    /// Random point inside a `width` x `height` rectangle anchored at the
    /// origin.
    pub fn random_in_rect(&mut self, width: f32, height: f32) -> Vec2 {
        Vec2::new(
            self.rng.gen_range(0.0..width),
            self.rng.gen_range(0.0..height),
        )
    }

    /// Uniformly random cosmetic kind.
    pub fn random_kind(&mut self) -> NodeKind {
        if self.rng.gen::<bool>() {
            NodeKind::Primary
        } else {
            NodeKind::Accent
        }
    }

    /// A node for the initial population.
    pub fn initial_node(&mut self, id: NodeId, params: &FieldParams) -> Node {
        let size = self.rng.gen_range(params.node_size.clone());
        self.node_with_size(id, size, params)
    }

    /// A node spawned by a pairwise collision. Same rules, smaller sizes.
    pub fn spawned_node(&mut self, id: NodeId, params: &FieldParams) -> Node {
        let size = self.rng.gen_range(params.spawn_size.clone());
        self.node_with_size(id, size, params)
    }

    fn node_with_size(&mut self, id: NodeId, size: f32, params: &FieldParams) -> Node {
        Node {
            id,
            position: self.random_in_rect(params.width, params.height),
            velocity: self.random_direction() * params.node_speed,
            size,
            kind: self.random_kind(),
            opacity: self.rng.gen_range(params.opacity.clone()),
            trail: VecDeque::new(),
        }
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::new()
    }
}
