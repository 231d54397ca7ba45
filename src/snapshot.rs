//! Per-frame renderable output.
//!
//! At the end of each step the field emits a [`FrameSnapshot`]: owned view
//! records for every node plus the derived connection set. Connections have
//! no identity and no persistence; they are recomputed wholesale from the
//! current positions on every call, so the renderer never aliases live
//! simulation state.

use glam::Vec2;

use crate::node::{Node, NodeKind, TrailPoint};

/// Stroke width of a connection at the distance threshold.
pub const CONNECTION_WIDTH_MIN: f32 = 1.5;

/// Extra width gained as the pair distance approaches zero (max ~3.5).
pub const CONNECTION_WIDTH_GAIN: f32 = 2.0;

/// Base connection opacity.
pub const CONNECTION_OPACITY: f32 = 0.4;

/// Opacity when either endpoint is within the pointer glow radius.
pub const CONNECTION_OPACITY_GLOW: f32 = 0.7;

/// Renderable state of one node.
#[derive(Debug, Clone)]
pub struct NodeView {
    pub id: crate::node::NodeId,
    pub position: Vec2,
    pub size: f32,
    pub kind: NodeKind,
    pub opacity: f32,
    /// Trail samples, oldest first.
    pub trail: Vec<TrailPoint>,
}

/// A derived edge between two nearby nodes.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionView {
    pub a: Vec2,
    pub b: Vec2,
    /// Stroke width, wider for closer pairs.
    pub width: f32,
    /// 0.4, boosted to 0.7 near the pointer.
    pub opacity: f32,
    pub kinds: (NodeKind, NodeKind),
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameSnapshot {
    pub nodes: Vec<NodeView>,
    pub connections: Vec<ConnectionView>,
}

impl From<&Node> for NodeView {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id,
            position: node.position,
            size: node.size,
            kind: node.kind,
            opacity: node.opacity,
            trail: node.trail.iter().copied().collect(),
        }
    }
}

/// Compute the connection set for the current positions.
///
/// Every unordered pair closer than `radius` yields one edge. Width scales
/// inversely with distance (floor 1.5 at the threshold, up to 3.5 for a
/// touching pair); opacity is boosted when either endpoint sits within
/// `glow_radius` of the pointer.
pub(crate) fn connections(
    nodes: &[Node],
    pointer: Vec2,
    radius: f32,
    glow_radius: f32,
) -> Vec<ConnectionView> {
    let mut edges = Vec::new();
    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            let dist = a.position.distance(b.position);
            if dist >= radius {
                continue;
            }
            let width = CONNECTION_WIDTH_MIN + CONNECTION_WIDTH_GAIN * (1.0 - dist / radius);
            let glow = a.position.distance(pointer) < glow_radius
                || b.position.distance(pointer) < glow_radius;
            edges.push(ConnectionView {
                a: a.position,
                b: b.position,
                width,
                opacity: if glow {
                    CONNECTION_OPACITY_GLOW
                } else {
                    CONNECTION_OPACITY
                },
                kinds: (a.kind, b.kind),
            });
        }
    }
    edges
}
