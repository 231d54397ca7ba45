//! Pointer interaction state.
//!
//! Plain state written by the host's event handlers and consumed
//! synchronously by the next frame step: current pointer position, at most
//! one grabbed node, at most one hovered node, and the position the grab
//! started at (the slingshot anchor). Grab and hover are tracked
//! independently; a node is *stationary* while either applies to it.

use glam::Vec2;

use crate::node::NodeId;

/// Interaction state for one field.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerState {
    /// Last reported pointer position.
    pub position: Vec2,
    /// Node currently held by a pressed pointer, if any.
    pub grabbed: Option<NodeId>,
    /// Node currently under the pointer, if any.
    pub hovered: Option<NodeId>,
    /// Pointer position at the moment of grab; the launch vector on release
    /// points from the current position back toward this anchor.
    pub grab_origin: Vec2,
}

impl PointerState {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            grabbed: None,
            hovered: None,
            grab_origin: Vec2::ZERO,
        }
    }

    /// Whether the node is exempt from integration and trail growth.
    #[inline]
    pub fn is_stationary(&self, id: NodeId) -> bool {
        self.grabbed == Some(id) || self.hovered == Some(id)
    }

    /// Drop any grab and hover, e.g. when the node set is rebuilt.
    pub fn clear(&mut self) {
        self.grabbed = None;
        self.hovered = None;
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stationary_covers_grab_and_hover() {
        let mut pointer = PointerState::new();
        assert!(!pointer.is_stationary(NodeId(1)));

        pointer.grabbed = Some(NodeId(1));
        pointer.hovered = Some(NodeId(2));
        assert!(pointer.is_stationary(NodeId(1)));
        assert!(pointer.is_stationary(NodeId(2)));
        assert!(!pointer.is_stationary(NodeId(3)));
    }

    #[test]
    fn test_clear_drops_grab_and_hover() {
        let mut pointer = PointerState::new();
        pointer.grabbed = Some(NodeId(1));
        pointer.hovered = Some(NodeId(1));
        pointer.clear();
        assert_eq!(pointer.grabbed, None);
        assert_eq!(pointer.hovered, None);
    }
}
