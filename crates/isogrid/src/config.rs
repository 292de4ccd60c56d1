//! Configuration types for grid behaviour.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining depth and rotation settings.
//! - [`DepthConfig`] - Controls the spacing of depth keys.
//! - [`RotationConfig`] - Controls the cycle `rotate` steps through.
//!
//! # Example
//!
//! ```
//! # use isogrid::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [depth]
//!     step = 10
//!
//!     [rotation]
//!     order = ["sw", "se", "ne", "nw"]
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.depth().step(), 10);
//! ```

use serde::Deserialize;

use isogrid_core::orientation::RotationOrder;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    depth: DepthConfig,

    #[serde(default)]
    rotation: RotationConfig,
}

impl AppConfig {
    pub fn new(depth: DepthConfig, rotation: RotationConfig) -> Self {
        Self { depth, rotation }
    }

    pub fn depth(&self) -> &DepthConfig {
        &self.depth
    }

    pub fn rotation(&self) -> &RotationConfig {
        &self.rotation
    }
}

/// Depth key settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DepthConfig {
    /// Distance between an entity's depth and the deepest entity it covers.
    #[serde(default = "default_step")]
    step: u32,
}

fn default_step() -> u32 {
    1
}

impl DepthConfig {
    pub fn new(step: u32) -> Self {
        Self { step }
    }

    pub fn step(&self) -> u32 {
        self.step
    }
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
        }
    }
}

/// Rotation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RotationConfig {
    /// Orientations in clockwise order. Validated on load.
    #[serde(default)]
    order: RotationOrder,
}

impl RotationConfig {
    pub fn new(order: RotationOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> &RotationOrder {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use isogrid_core::orientation::Orientation;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.depth().step(), 1);
        assert_eq!(config.rotation().order().as_slice(), &Orientation::ALL);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.depth().step(), 1);
        assert_eq!(config.rotation().order(), &RotationOrder::default());
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str("[depth]\n").unwrap();
        assert_eq!(config.depth().step(), 1);

        let config: AppConfig = toml::from_str("[rotation]\norder = [\"ne\", \"sw\"]\n").unwrap();
        assert_eq!(
            config.rotation().order().as_slice(),
            &[Orientation::NorthEast, Orientation::SouthWest]
        );
    }

    #[test]
    fn test_invalid_rotation_order_rejected() {
        assert!(toml::from_str::<AppConfig>("[rotation]\norder = []\n").is_err());
        assert!(toml::from_str::<AppConfig>("[rotation]\norder = [\"sw\", \"sw\"]\n").is_err());
        assert!(toml::from_str::<AppConfig>("[rotation]\norder = [\"up\"]\n").is_err());
    }
}
