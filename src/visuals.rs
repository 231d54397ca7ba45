//! Visual configuration for field rendering.
//!
//! Colors that control how the field appears, separate from the simulation
//! parameters that control how it moves. All colors are linear RGBA in
//! `[0, 1]`; alphas here are base values that per-element opacity multiplies
//! into.
//!
//! # Usage
//!
//! ```ignore
//! let visuals = VisualConfig::default()
//!     .with_background([0.02, 0.02, 0.05, 1.0])
//!     .with_glow_color([1.0, 0.41, 0.71, 0.5]);
//! ```

/// Linear RGBA color.
pub type Color = [f32; 4];

/// Color scheme for a rendered field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualConfig {
    /// Clear color behind everything.
    pub background: Color,
    /// Fill for `NodeKind::Primary` nodes and their trails.
    pub primary_color: Color,
    /// Fill for `NodeKind::Accent` nodes and their trails.
    pub accent_color: Color,
    /// Tint applied to nodes and connections near the pointer.
    pub glow_color: Color,
    /// Stroke color for connections away from the pointer.
    pub connection_color: Color,
}

impl VisualConfig {
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_primary_color(mut self, color: Color) -> Self {
        self.primary_color = color;
        self
    }

    pub fn with_accent_color(mut self, color: Color) -> Self {
        self.accent_color = color;
        self
    }

    pub fn with_glow_color(mut self, color: Color) -> Self {
        self.glow_color = color;
        self
    }

    pub fn with_connection_color(mut self, color: Color) -> Self {
        self.connection_color = color;
        self
    }
}

impl Default for VisualConfig {
    /// Dark palette: near-black background, blue network, pink glow.
    fn default() -> Self {
        Self {
            background: [0.016, 0.016, 0.047, 1.0],
            primary_color: [0.231, 0.51, 0.965, 1.0],
            accent_color: [0.545, 0.361, 0.965, 1.0],
            glow_color: [1.0, 0.412, 0.706, 1.0],
            connection_color: [0.231, 0.51, 0.965, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_is_dark() {
        let visuals = VisualConfig::default();
        assert!(visuals.background[0] < 0.1);
        assert_eq!(visuals.background[3], 1.0);
        // Blue network, pink glow.
        assert!(visuals.primary_color[2] > visuals.primary_color[0]);
        assert!(visuals.glow_color[0] > visuals.glow_color[2]);
    }

    #[test]
    fn test_builder_overrides() {
        let visuals = VisualConfig::default().with_background([1.0, 1.0, 1.0, 1.0]);
        assert_eq!(visuals.background, [1.0, 1.0, 1.0, 1.0]);
        // Untouched colors keep their defaults.
        assert_eq!(visuals.glow_color, VisualConfig::default().glow_color);
    }
}
