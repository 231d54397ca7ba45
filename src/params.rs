//! Simulation tunables.
//!
//! All the constants that shape the field live here so the simulation code
//! reads as algorithm, not magic numbers. Defaults reproduce the reference
//! look; every knob has a `with_*` setter for hosts that want to deviate.

use std::ops::Range;

/// Nodes created at initialization (and after every resize).
pub const INITIAL_COUNT: usize = 5;

/// Hard population cap. Collisions stop spawning once this is reached.
pub const MAX_NODES: usize = 25;

/// Scalar speed assigned to every fresh velocity, in pixels per frame.
pub const NODE_SPEED: f32 = 2.0;

/// Maximum trail samples kept per node.
pub const TRAIL_LEN: usize = 15;

/// Velocity magnitude retained on the reflected axis after a wall hit.
pub const WALL_DAMPING: f32 = 0.25;

/// Center distance below which two nodes are connected.
pub const CONNECTION_RADIUS: f32 = 180.0;

/// Pointer distance below which connections and nodes glow.
pub const GLOW_RADIUS: f32 = 120.0;

/// Configuration for a [`NodeField`](crate::field::NodeField).
///
/// # Usage
///
/// ```ignore
/// let params = FieldParams::new(1280.0, 720.0)
///     .with_initial_count(8)
///     .with_node_speed(3.0);
/// ```
#[derive(Debug, Clone)]
pub struct FieldParams {
    /// Viewport width in pixels. Must be positive.
    pub width: f32,
    /// Viewport height in pixels. Must be positive.
    pub height: f32,
    /// Nodes spawned at initialization.
    pub initial_count: usize,
    /// Population cap.
    pub max_nodes: usize,
    /// Fixed scalar speed for fresh velocities.
    pub node_speed: f32,
    /// Size range for initial nodes.
    pub node_size: Range<f32>,
    /// Size range for collision-spawned nodes.
    pub spawn_size: Range<f32>,
    /// Opacity range sampled once at creation.
    pub opacity: Range<f32>,
    /// Trail cap per node.
    pub trail_len: usize,
    /// Wall reflection damping factor.
    pub wall_damping: f32,
    /// Connection distance threshold.
    pub connection_radius: f32,
    /// Pointer proximity threshold for the glow boost.
    pub glow_radius: f32,
}

impl FieldParams {
    /// Parameters for a viewport of the given size, everything else default.
    ///
    /// Non-positive dimensions are a host precondition violation.
    pub fn new(width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "viewport must be positive");
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_initial_count(mut self, count: usize) -> Self {
        self.initial_count = count;
        self
    }

    pub fn with_max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = max;
        self
    }

    pub fn with_node_speed(mut self, speed: f32) -> Self {
        self.node_speed = speed;
        self
    }

    pub fn with_trail_len(mut self, len: usize) -> Self {
        self.trail_len = len;
        self
    }

    pub fn with_connection_radius(mut self, radius: f32) -> Self {
        self.connection_radius = radius;
        self
    }

    pub fn with_glow_radius(mut self, radius: f32) -> Self {
        self.glow_radius = radius;
        self
    }
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            initial_count: INITIAL_COUNT,
            max_nodes: MAX_NODES,
            node_speed: NODE_SPEED,
            node_size: 20.0..35.0,
            spawn_size: 15.0..25.0,
            opacity: 0.9..1.0,
            trail_len: TRAIL_LEN,
            wall_damping: WALL_DAMPING,
            connection_radius: CONNECTION_RADIUS,
            glow_radius: GLOW_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = FieldParams::default();
        assert_eq!(params.initial_count, 5);
        assert_eq!(params.max_nodes, 25);
        assert_eq!(params.trail_len, 15);
        assert_eq!(params.wall_damping, 0.25);
        assert_eq!(params.connection_radius, 180.0);
    }

    #[test]
    fn test_builder_setters() {
        let params = FieldParams::new(1024.0, 768.0)
            .with_initial_count(8)
            .with_node_speed(3.0);
        assert_eq!(params.width, 1024.0);
        assert_eq!(params.initial_count, 8);
        assert_eq!(params.node_speed, 3.0);
        // Untouched knobs keep their defaults.
        assert_eq!(params.max_nodes, 25);
    }
}
