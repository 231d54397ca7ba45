//! Wall reflection and pairwise elastic collision.
//!
//! Two free functions the field applies each frame: damped wall bounces that
//! keep every node inside `[half_size, dim - half_size]`, and an equal-mass
//! elastic collision that swaps the velocity components along the line
//! joining two overlapping centers while leaving the tangential components
//! untouched.

use glam::Vec2;

use crate::node::Node;

/// Squared center distance below which a pair has no usable collision
/// normal and is skipped for the frame.
const MIN_DIST_SQ: f32 = 1e-4;

/// Reflect a node off the viewport walls.
///
/// A node whose center crosses `[half_size, dim - half_size]` on an axis is
/// clamped to that boundary and has that velocity component reversed at
/// `damping` of its magnitude (0.25 by default: a soft bounce losing 75% of
/// the energy on the offending axis).
pub fn reflect_walls(node: &mut Node, width: f32, height: f32, damping: f32) {
    let half = node.half_size();

    if node.position.x < half {
        node.position.x = half;
        node.velocity.x *= -damping;
    } else if node.position.x > width - half {
        node.position.x = width - half;
        node.velocity.x *= -damping;
    }

    if node.position.y < half {
        node.position.y = half;
        node.velocity.y *= -damping;
    } else if node.position.y > height - half {
        node.position.y = height - half;
        node.velocity.y *= -damping;
    }
}

/// Clamp a node's center into `[half_size, dim - half_size]` without
/// touching its velocity. Applied after collision separation, which may
/// push a node past a wall mid-frame.
///
/// A viewport dimension smaller than the node collapses the band to the
/// single point `half_size` instead of inverting it.
pub fn clamp_to_bounds(node: &mut Node, width: f32, height: f32) {
    let half = node.half_size();
    node.position.x = node.position.x.clamp(half, (width - half).max(half));
    node.position.y = node.position.y.clamp(half, (height - half).max(half));
}

/// Resolve one pairwise collision, if the nodes overlap.
///
/// Equal implicit masses: rotate both velocities into the collision-normal
/// frame, swap the normal components, keep the tangential components, rotate
/// back. The pair is then separated along the normal by half the overlap
/// each. Returns whether a collision happened (the field spawns on `true`).
pub fn collide_pair(a: &mut Node, b: &mut Node) -> bool {
    let delta = b.position - a.position;
    let dist_sq = delta.length_squared();
    let min_dist = a.half_size() + b.half_size();
    if dist_sq >= min_dist * min_dist {
        return false;
    }
    if dist_sq < MIN_DIST_SQ {
        // Coincident centers: no collision normal this frame.
        return false;
    }

    let dist = dist_sq.sqrt();
    let normal = delta / dist;
    let tangent = normal.perp();

    let (van, vat) = (a.velocity.dot(normal), a.velocity.dot(tangent));
    let (vbn, vbt) = (b.velocity.dot(normal), b.velocity.dot(tangent));

    // Swap the normal components; the normal-axis momentum sum is unchanged.
    a.velocity = normal * vbn + tangent * vat;
    b.velocity = normal * van + tangent * vbt;

    let push = normal * ((min_dist - dist) * 0.5);
    a.position -= push;
    b.position += push;

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeId, NodeKind};
    use std::collections::VecDeque;

    fn node(id: u32, position: Vec2, velocity: Vec2, size: f32) -> Node {
        Node {
            id: NodeId(id),
            position,
            velocity,
            size,
            kind: NodeKind::Primary,
            opacity: 1.0,
            trail: VecDeque::new(),
        }
    }

    #[test]
    fn test_wall_reflection_damps_and_clamps() {
        // Crossing x = 10 (half-size 10) with vx = -1: clamp to 10, flip to +0.25.
        let mut n = node(0, Vec2::new(9.5, 100.0), Vec2::new(-1.0, 0.0), 20.0);
        reflect_walls(&mut n, 800.0, 600.0, 0.25);
        assert_eq!(n.position.x, 10.0);
        assert!((n.velocity.x - 0.25).abs() < 1e-6);
        assert_eq!(n.velocity.y, 0.0);
    }

    #[test]
    fn test_wall_reflection_far_edge() {
        let mut n = node(0, Vec2::new(400.0, 595.0), Vec2::new(0.0, 2.0), 20.0);
        reflect_walls(&mut n, 800.0, 600.0, 0.25);
        assert_eq!(n.position.y, 590.0);
        assert!((n.velocity.y - (-0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_wall_reflection_leaves_interior_nodes_alone() {
        let mut n = node(0, Vec2::new(400.0, 300.0), Vec2::new(1.0, 1.0), 20.0);
        reflect_walls(&mut n, 800.0, 600.0, 0.25);
        assert_eq!(n.position, Vec2::new(400.0, 300.0));
        assert_eq!(n.velocity, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_head_on_collision_swaps_normal_components() {
        let mut a = node(0, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 20.0);
        let mut b = node(1, Vec2::new(15.0, 0.0), Vec2::new(-1.0, 0.0), 20.0);
        assert!(collide_pair(&mut a, &mut b));
        assert!((a.velocity.x - (-1.0)).abs() < 1e-5);
        assert!((b.velocity.x - 1.0).abs() < 1e-5);
        // Separated by half the overlap (5.0) each.
        assert!((a.position.x - (-2.5)).abs() < 1e-5);
        assert!((b.position.x - 17.5).abs() < 1e-5);
    }

    #[test]
    fn test_collision_preserves_normal_momentum_and_tangent() {
        let mut a = node(0, Vec2::new(0.0, 0.0), Vec2::new(2.0, 1.5), 20.0);
        let mut b = node(1, Vec2::new(12.0, 0.0), Vec2::new(-0.5, -3.0), 20.0);
        let normal = Vec2::X;
        let momentum_before = a.velocity.dot(normal) + b.velocity.dot(normal);
        let (tan_a, tan_b) = (a.velocity.y, b.velocity.y);

        assert!(collide_pair(&mut a, &mut b));

        let momentum_after = a.velocity.dot(normal) + b.velocity.dot(normal);
        assert!((momentum_before - momentum_after).abs() < 1e-5);
        // Normal components swapped, tangential components untouched.
        assert!((a.velocity.x - (-0.5)).abs() < 1e-5);
        assert!((b.velocity.x - 2.0).abs() < 1e-5);
        assert!((a.velocity.y - tan_a).abs() < 1e-5);
        assert!((b.velocity.y - tan_b).abs() < 1e-5);
    }

    #[test]
    fn test_clamp_handles_viewport_smaller_than_node() {
        // A 40px node in a 30x30 viewport: the band is empty, so the
        // center pins to half_size instead of panicking on an inverted
        // clamp range.
        let mut n = node(0, Vec2::new(25.0, -3.0), Vec2::new(1.0, 1.0), 40.0);
        clamp_to_bounds(&mut n, 30.0, 30.0);
        assert_eq!(n.position, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_separated_nodes_do_not_collide() {
        let mut a = node(0, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 20.0);
        let mut b = node(1, Vec2::new(50.0, 0.0), Vec2::new(-1.0, 0.0), 20.0);
        assert!(!collide_pair(&mut a, &mut b));
        assert_eq!(a.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_coincident_centers_are_skipped() {
        let mut a = node(0, Vec2::new(5.0, 5.0), Vec2::new(1.0, 0.0), 20.0);
        let mut b = node(1, Vec2::new(5.0, 5.0), Vec2::new(-1.0, 0.0), 20.0);
        assert!(!collide_pair(&mut a, &mut b));
        assert!(a.velocity.is_finite());
        assert!(b.velocity.is_finite());
    }
}
