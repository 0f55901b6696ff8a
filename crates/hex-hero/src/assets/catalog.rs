use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Per-product metadata keyed by image URL.
/// Only the score is read by the renderer; other fields are kept for the overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductMeta {
    /// 0-100 health score. Colors the hover border.
    #[serde(default)]
    pub health_score: Option<f32>,
    /// Display name, if the data layer provides one.
    #[serde(default)]
    pub product_name: Option<String>,
}

/// Input handed over by the data layer: image URLs in pool order plus
/// optional metadata and tooltip text keyed by the same URLs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub products: HashMap<String, ProductMeta>,
    /// Free-text tooltip info keyed by image URL.
    #[serde(default)]
    pub info: HashMap<String, String>,
}

impl Catalog {
    pub fn new(image_urls: Vec<String>) -> Self {
        Self {
            image_urls,
            ..Default::default()
        }
    }

    /// Parse a catalog from a JSON string. Unknown fields are ignored.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_score(mut self, url: impl Into<String>, score: f32) -> Self {
        self.products.entry(url.into()).or_default().health_score = Some(score);
        self
    }

    pub fn with_info(mut self, url: impl Into<String>, info: impl Into<String>) -> Self {
        self.info.insert(url.into(), info.into());
        self
    }

    /// Health score for `url`; `None` when absent.
    pub fn score_for(&self, url: &str) -> Option<f32> {
        self.products.get(url).and_then(|p| p.health_score)
    }

    /// Tooltip text for `url`; empty when absent.
    pub fn info_for(&self, url: &str) -> &str {
        self.info.get(url).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_catalog_ignoring_unknown_fields() {
        let json = r#"{
            "image_urls": ["a.jpg", "b.jpg"],
            "products": {
                "a.jpg": { "health_score": 82, "category": "Soap", "tags": ["vegan"] },
                "b.jpg": { "product_name": "Shampoo" }
            },
            "info": { "a.jpg": "Gentle bar soap" }
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.image_urls.len(), 2);
        assert_eq!(catalog.score_for("a.jpg"), Some(82.0));
        assert_eq!(catalog.score_for("b.jpg"), None);
        assert_eq!(catalog.products["b.jpg"].product_name.as_deref(), Some("Shampoo"));
        assert_eq!(catalog.info_for("a.jpg"), "Gentle bar soap");
    }

    #[test]
    fn missing_entries_have_no_score_or_info() {
        let catalog = Catalog::from_json("{}").unwrap();
        assert!(catalog.image_urls.is_empty());
        assert_eq!(catalog.score_for("x.jpg"), None);
        assert_eq!(catalog.info_for("x.jpg"), "");
    }

    #[test]
    fn builder_helpers() {
        let catalog = Catalog::new(vec!["a.jpg".into()])
            .with_score("a.jpg", 45.0)
            .with_info("a.jpg", "ok");
        assert_eq!(catalog.score_for("a.jpg"), Some(45.0));
        assert_eq!(catalog.info_for("a.jpg"), "ok");
    }
}
