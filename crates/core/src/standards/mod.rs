// Design-standards document: loaded once at startup, read-only thereafter

mod css;
mod search;

pub use css::{generate_stylesheet, render_component, render_variables, DEFAULT_COMPONENTS};
pub use search::{search_document, SearchMatch};

use anyhow::Context;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Lookup failure against the standards document. The message lists valid
/// keys so the caller can self-correct.
#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("Unknown brand '{requested}'. Valid brands: {available}")]
    UnknownBrand { requested: String, available: String },

    #[error("Unknown component '{requested}'. Valid components: {available}")]
    UnknownComponent { requested: String, available: String },

    #[error("Unknown CSS category '{requested}' for brand '{brand}'. Valid categories: {available}")]
    UnknownCategory {
        requested: String,
        brand: String,
        available: String,
    },

    #[error("Unknown usage category '{requested}'. Valid categories: {available}")]
    UnknownUsageCategory { requested: String, available: String },

    #[error("Brand '{brand}' has no css variables defined")]
    NoCssVariables { brand: String },
}

/// The single design-standards tree: brand tokens, component CSS rules,
/// and usage guidelines. Parsed from JSON once at process start; object
/// iteration preserves the declaration order of the source file.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardsDocument {
    pub brands: Map<String, Value>,
    #[serde(rename = "cssRules")]
    pub css_rules: Map<String, Value>,
    #[serde(default)]
    pub usage: Map<String, Value>,
}

impl StandardsDocument {
    /// Load and parse the backing JSON file. A failure here is fatal to the
    /// process: every standards tool is unusable without the document.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read standards document {}", path.display()))?;
        let doc: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse standards document {}", path.display()))?;
        tracing::info!(
            "Loaded standards document: {} brands, {} components, {} usage categories",
            doc.brands.len(),
            doc.css_rules.len(),
            doc.usage.len()
        );
        Ok(doc)
    }

    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        serde_json::from_value(value).context("Invalid standards document structure")
    }

    pub fn brand(&self, id: &str) -> Result<&Value, StandardsError> {
        self.brands
            .get(id)
            .ok_or_else(|| StandardsError::UnknownBrand {
                requested: id.to_string(),
                available: join_keys(&self.brands),
            })
    }

    pub fn component(&self, id: &str) -> Result<&Value, StandardsError> {
        self.css_rules
            .get(id)
            .ok_or_else(|| StandardsError::UnknownComponent {
                requested: id.to_string(),
                available: join_keys(&self.css_rules),
            })
    }

    pub fn usage_category(&self, category: &str) -> Result<&Value, StandardsError> {
        self.usage
            .get(category)
            .ok_or_else(|| StandardsError::UnknownUsageCategory {
                requested: category.to_string(),
                available: join_keys(&self.usage),
            })
    }

    /// The brand's css variable tree (category -> variable -> value).
    pub fn brand_css<'a>(&self, id: &str, brand: &'a Value) -> Result<&'a Map<String, Value>, StandardsError> {
        brand
            .get("css")
            .and_then(Value::as_object)
            .ok_or_else(|| StandardsError::NoCssVariables {
                brand: id.to_string(),
            })
    }

    /// Display name of a brand, falling back to the id.
    pub fn brand_name<'a>(&self, id: &'a str, brand: &'a Value) -> &'a str {
        brand.get("name").and_then(Value::as_str).unwrap_or(id)
    }

    /// Short name of a brand (used as a CSS selector prefix), falling back
    /// to the id.
    pub fn brand_short_name<'a>(&self, id: &'a str, brand: &'a Value) -> &'a str {
        brand
            .get("shortName")
            .and_then(Value::as_str)
            .unwrap_or(id)
    }
}

fn join_keys(map: &Map<String, Value>) -> String {
    map.keys().cloned().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
pub(crate) fn sample_document() -> StandardsDocument {
    StandardsDocument::from_value(serde_json::json!({
        "brands": {
            "pmc": {
                "name": "PMC",
                "shortName": "pmc",
                "css": {
                    "colors": {
                        "primary": "#AB292C",
                        "secondary": "#1A1A1A"
                    },
                    "borderRadius": { "standard": "4px" },
                    "fontFamily": { "body": "'Graphik', sans-serif" },
                    "fontFiles": { "graphik": "/fonts/graphik.woff2" }
                }
            },
            "variety": {
                "name": "Variety",
                "shortName": "vty",
                "css": {
                    "colors": { "primary": "#00808C" }
                }
            }
        },
        "cssRules": {
            "buttons": {
                "primary": {
                    "css": "padding: 8px 16px; border-radius: 4px;",
                    "hover": { "css": "opacity: 0.9;" }
                }
            },
            "cards": {
                "default": { "css": "box-shadow: 0 1px 3px rgba(0,0,0,0.2);" }
            },
            "modals": {
                "overlay": { "css": "background: rgba(0,0,0,0.5);" }
            }
        },
        "usage": {
            "colors": { "primary": "Use for primary calls to action" },
            "typography": { "body": "Graphik at 16px" }
        }
    }))
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_round_trips_through_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({
            "brands": { "pmc": { "name": "PMC", "shortName": "pmc" } },
            "cssRules": { "buttons": {} },
            "usage": {}
        });
        write!(file, "{}", json).unwrap();

        let doc = StandardsDocument::load(file.path()).unwrap();
        assert_eq!(doc.brands.len(), 1);
        assert!(doc.brand("pmc").is_ok());
    }

    #[test]
    fn load_fails_on_missing_file() {
        assert!(StandardsDocument::load(Path::new("/nonexistent/standards.json")).is_err());
    }

    #[test]
    fn load_fails_on_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(StandardsDocument::load(file.path()).is_err());
    }

    #[test]
    fn unknown_brand_error_lists_valid_brands() {
        let doc = sample_document();
        let err = doc.brand("rollingstone").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("rollingstone"));
        assert!(msg.contains("pmc"));
        assert!(msg.contains("variety"));
    }

    #[test]
    fn unknown_component_error_lists_valid_components() {
        let doc = sample_document();
        let err = doc.component("tables").unwrap_err();
        assert!(err.to_string().contains("buttons"));
    }

    #[test]
    fn brand_names_fall_back_to_id() {
        let doc = sample_document();
        let brand = doc.brand("pmc").unwrap();
        assert_eq!(doc.brand_name("pmc", brand), "PMC");
        assert_eq!(doc.brand_short_name("pmc", brand), "pmc");

        let bare = serde_json::json!({});
        assert_eq!(doc.brand_name("x", &bare), "x");
        assert_eq!(doc.brand_short_name("x", &bare), "x");
    }
}
