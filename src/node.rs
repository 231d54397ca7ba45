//! Node data model.
//!
//! A [`Node`] is one simulated particle: a position, a velocity, a handful of
//! fixed visual attributes, and a bounded trail of recent positions used for
//! fading-trail rendering.

use std::collections::VecDeque;

use glam::Vec2;

/// Unique node identity.
///
/// Ids are assigned monotonically by the field and never reused, so storage
/// order (creation order) is also ascending id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cosmetic node category, chosen uniformly at random at creation.
///
/// Affects only coloring and connection styling, never behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Primary,
    Accent,
}

/// One recorded trail sample: where the node was, and how big it was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Vec2,
    pub size: f32,
}

/// A simulated particle.
///
/// Positions and velocities are in viewport pixels; `size` is the node's
/// diameter, so its effective radius (for hit-testing, wall clamping, and
/// pairwise collision) is `size / 2`.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub kind: NodeKind,
    /// Fixed at creation, in [0.9, 1.0].
    pub opacity: f32,
    /// Recent positions, oldest first. Bounded; cleared while stationary.
    pub trail: VecDeque<TrailPoint>,
}

impl Node {
    /// Effective radius for collision and hit-testing.
    #[inline]
    pub fn half_size(&self) -> f32 {
        self.size * 0.5
    }

    /// Whether `point` falls inside the node's hit circle.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance_squared(point) < self.half_size() * self.half_size()
    }

    /// Append the current position to the trail, evicting the oldest sample
    /// once the trail exceeds `max_len`.
    pub(crate) fn record_trail(&mut self, max_len: usize) {
        self.trail.push_back(TrailPoint {
            position: self.position,
            size: self.size,
        });
        while self.trail.len() > max_len {
            self.trail.pop_front();
        }
    }

    /// Drop all trail samples. Called whenever the node becomes stationary.
    #[inline]
    pub(crate) fn clear_trail(&mut self) {
        self.trail.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_at(position: Vec2) -> Node {
        Node {
            id: NodeId(0),
            position,
            velocity: Vec2::ZERO,
            size: 20.0,
            kind: NodeKind::Primary,
            opacity: 1.0,
            trail: VecDeque::new(),
        }
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut node = node_at(Vec2::ZERO);
        for i in 0..40 {
            node.position = Vec2::new(i as f32, 0.0);
            node.record_trail(15);
        }
        assert_eq!(node.trail.len(), 15);
    }

    #[test]
    fn test_trail_evicts_oldest_first() {
        let mut node = node_at(Vec2::ZERO);
        for i in 0..20 {
            node.position = Vec2::new(i as f32, 0.0);
            node.record_trail(15);
        }
        // Samples 0..=4 were evicted; the front is sample 5.
        assert_eq!(node.trail.front().unwrap().position.x, 5.0);
        assert_eq!(node.trail.back().unwrap().position.x, 19.0);
    }

    #[test]
    fn test_clear_trail() {
        let mut node = node_at(Vec2::ZERO);
        node.record_trail(15);
        node.record_trail(15);
        node.clear_trail();
        assert!(node.trail.is_empty());
    }

    #[test]
    fn test_contains_uses_half_size() {
        let node = node_at(Vec2::new(100.0, 100.0));
        // size 20 => hit radius 10
        assert!(node.contains(Vec2::new(105.0, 100.0)));
        assert!(!node.contains(Vec2::new(111.0, 100.0)));
    }
}
