//! Interactive particle-network background.
//!
//! A bounded field of drifting nodes: they bounce off the viewport walls
//! with damped reflections, collide elastically with each other, spawn new
//! nodes on collision up to a cap, leave bounded fading trails, and link up
//! with distance-scaled connection lines. The pointer can hover a node to
//! freeze it, or grab and slingshot it.
//!
//! The simulation ([`field::NodeField`]) is self-contained and renderer
//! agnostic; [`window::run`] wraps it in a winit window with a wgpu
//! renderer for standalone use.
//!
//! # Quick start
//!
//! ```ignore
//! use nodemesh::prelude::*;
//!
//! fn main() -> Result<(), nodemesh::error::RunError> {
//!     nodemesh::window::run(FieldParams::new(800.0, 600.0), VisualConfig::default())
//! }
//! ```
//!
//! Hosts with their own render loop drive the field directly:
//!
//! ```ignore
//! let mut field = NodeField::new(FieldParams::new(800.0, 600.0));
//! loop {
//!     field.step();
//!     draw(&field.snapshot());
//! }
//! ```

pub mod error;
pub mod field;
pub mod node;
pub mod params;
pub mod physics;
pub mod pointer;
pub mod render;
pub mod snapshot;
pub mod spawn;
pub mod time;
pub mod visuals;
pub mod window;

pub use glam::Vec2;

/// Common imports for hosts embedding a field.
pub mod prelude {
    pub use crate::field::NodeField;
    pub use crate::node::{Node, NodeId, NodeKind};
    pub use crate::params::FieldParams;
    pub use crate::snapshot::FrameSnapshot;
    pub use crate::visuals::VisualConfig;
    pub use glam::Vec2;
}
