use serde::{Deserialize, Serialize};
use crate::assets::variant::VariantSpec;
use crate::overlay::tooltip::TooltipLayout;

/// Configuration for the hexagon field, provided by the host page.
/// Every field has a default, so `{}` is a valid JSON config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Upper bound on the number of sprites (default: 30).
    pub max_sprites: usize,
    /// Base radius on wide viewports (default: 60).
    pub base_radius_wide: f32,
    /// Base radius on narrow viewports (default: 40).
    pub base_radius_narrow: f32,
    /// Viewport width above which the wide radius is used (default: 1024).
    pub wide_breakpoint: f32,
    /// Per-axis speed bound; each velocity component is drawn from
    /// `[-max_speed, max_speed)` (default: 1.0).
    pub max_speed: f32,
    /// Scale target while hovered (default: 1.5).
    pub hover_scale: f32,
    /// Scale target otherwise (default: 1.0).
    pub rest_scale: f32,
    /// Fraction of the remaining distance to the target covered per frame (default: 0.1).
    pub smoothing: f32,
    /// Draw-size multiplier forced while hovered (default: 2.0).
    pub hover_draw_multiplier: f32,
    /// Thumbnail variant requested at sprite creation.
    pub low_quality: VariantSpec,
    /// Full-size variant requested on first hover.
    pub high_quality: VariantSpec,
    /// Hover border stroke width in pixels (default: 4).
    pub border_width: f32,
    /// Overlay placement constants.
    pub tooltip: TooltipLayout,
    /// Fixed RNG seed. `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            max_sprites: 30,
            base_radius_wide: 60.0,
            base_radius_narrow: 40.0,
            wide_breakpoint: 1024.0,
            max_speed: 1.0,
            hover_scale: 1.5,
            rest_scale: 1.0,
            smoothing: 0.1,
            hover_draw_multiplier: 2.0,
            low_quality: VariantSpec::LOW,
            high_quality: VariantSpec::HIGH,
            border_width: 4.0,
            tooltip: TooltipLayout::default(),
            seed: None,
        }
    }
}

impl HeroConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Base sprite radius for a viewport of the given width.
    pub fn base_radius(&self, viewport_width: f32) -> f32 {
        if viewport_width > self.wide_breakpoint {
            self.base_radius_wide
        } else {
            self.base_radius_narrow
        }
    }

    /// Number of sprites for `url_count` images. An empty list still fills the pool.
    pub fn pool_size(&self, url_count: usize) -> usize {
        let wanted = if url_count == 0 { self.max_sprites } else { url_count };
        wanted.min(self.max_sprites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = HeroConfig::from_json("{}").unwrap();
        assert_eq!(config, HeroConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = HeroConfig::from_json(
            r#"{ "max_sprites": 12, "high_quality": { "width": 800, "quality": 90 }, "seed": 3 }"#,
        )
        .unwrap();
        assert_eq!(config.max_sprites, 12);
        assert_eq!(config.high_quality, VariantSpec { width: 800, quality: 90 });
        assert_eq!(config.low_quality, VariantSpec::LOW);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn base_radius_breakpoint() {
        let config = HeroConfig::default();
        assert_eq!(config.base_radius(1280.0), 60.0);
        assert_eq!(config.base_radius(1024.0), 40.0);
        assert_eq!(config.base_radius(375.0), 40.0);
    }

    #[test]
    fn pool_size_rules() {
        let config = HeroConfig::default();
        assert_eq!(config.pool_size(0), 30);
        assert_eq!(config.pool_size(3), 3);
        assert_eq!(config.pool_size(30), 30);
        assert_eq!(config.pool_size(100), 30);
    }
}
