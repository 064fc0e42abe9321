//! Configuration types for Lineage layouts.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! configuration file; missing fields fall back to their defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Font ratio, outline style and packing switch.
//! - [`Style`] - Box sizes and spacing, re-exported from `lineage-core`.
//!
//! # Example
//!
//! ```
//! # use lineage::config::{AppConfig, OutlineStyle};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().outline(), OutlineStyle::Edges);
//! assert_eq!(config.style().grid_step(), 30);
//! ```

use serde::Deserialize;

pub use lineage_core::style::Style;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: Style,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: Style) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &Style {
        &self.style
    }
}

impl From<LayoutConfig> for AppConfig {
    fn from(layout: LayoutConfig) -> Self {
        Self::new(layout, Style::default())
    }
}

/// How family outlines are traced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineStyle {
    /// Follow the outer edges of the first and last root subtree.
    #[default]
    Edges,
    /// Hug every box of the block, generation by generation.
    Levels,
}

/// Layout settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Ratio of the rendering font's average glyph width to its size.
    font_ratio: f32,

    /// Outline style of family blocks.
    outline: OutlineStyle,

    /// Whether linked families are packed together.
    pack: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font_ratio: 1.0,
            outline: OutlineStyle::default(),
            pack: true,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `font_ratio` - Default font ratio, used when a request does not bring its own.
    /// * `outline` - Outline style of family blocks.
    /// * `pack` - Whether linked families are packed together.
    pub fn new(font_ratio: f32, outline: OutlineStyle, pack: bool) -> Self {
        Self {
            font_ratio,
            outline,
            pack,
        }
    }

    pub fn font_ratio(&self) -> f32 {
        self.font_ratio
    }

    pub fn outline(&self) -> OutlineStyle {
        self.outline
    }

    pub fn pack(&self) -> bool {
        self.pack
    }

    pub fn with_font_ratio(self, font_ratio: f32) -> Self {
        Self { font_ratio, ..self }
    }

    pub fn with_outline(self, outline: OutlineStyle) -> Self {
        Self { outline, ..self }
    }

    pub fn with_pack(self, pack: bool) -> Self {
        Self { pack, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();

        assert_eq!(config.font_ratio(), 1.0);
        assert_eq!(config.outline(), OutlineStyle::Edges);
        assert!(config.pack());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            outline = "levels"

            [style]
            grid_step = 20
            "#,
        )
        .expect("valid config");

        assert_eq!(config.layout().outline(), OutlineStyle::Levels);
        assert_eq!(config.layout().font_ratio(), 1.0);
        assert!(config.layout().pack());
        assert_eq!(config.style().grid_step(), 20);
        assert_eq!(config.style().family_padding(), 10);
    }

    #[test]
    fn test_unknown_outline_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[layout]\noutline = \"round\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_builders() {
        let config = LayoutConfig::default()
            .with_font_ratio(0.6)
            .with_outline(OutlineStyle::Levels)
            .with_pack(false);

        assert_eq!(config, LayoutConfig::new(0.6, OutlineStyle::Levels, false));
    }
}
