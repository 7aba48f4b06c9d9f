// Design-standards tools: brand/component/usage projections, search, and
// CSS generation

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_array, json_schema_boolean, json_schema_number, json_schema_object,
    json_schema_string, Tool,
};
use anyhow::{Context, Result};
use brandkit_core::standards::{
    generate_stylesheet, render_component, render_variables, search_document, DEFAULT_COMPONENTS,
};
use brandkit_core::{StandardsDocument, StandardsError};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Format {
    Json,
    Css,
}

impl Default for Format {
    fn default() -> Self {
        Format::Json
    }
}

fn pretty(value: &Value) -> Result<CallToolResult> {
    Ok(CallToolResult::text(serde_json::to_string_pretty(value)?))
}

/// Enum schema over the live keys of a document section, so clients see the
/// actual valid ids rather than a free-form string.
fn key_enum<'a>(keys: impl Iterator<Item = &'a String>, description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "enum": keys.collect::<Vec<_>>(),
        "description": description
    })
}

fn brand_schema(document: &StandardsDocument) -> Value {
    key_enum(document.brands.keys(), "Brand id (see list_brands)")
}

fn component_schema(document: &StandardsDocument, description: &str) -> Value {
    key_enum(document.css_rules.keys(), description)
}

/// Union of variable categories across every brand, in document order.
fn category_schema(document: &StandardsDocument) -> Value {
    let mut categories: Vec<&String> = Vec::new();
    for brand in document.brands.values() {
        if let Some(css) = brand.get("css").and_then(Value::as_object) {
            for category in css.keys() {
                if !categories.contains(&category) {
                    categories.push(category);
                }
            }
        }
    }
    serde_json::json!({
        "type": "string",
        "enum": categories,
        "description": "Variable category to filter to"
    })
}

/// Tool listing every brand in the standards document
pub struct ListBrandsTool {
    document: Arc<StandardsDocument>,
}

impl ListBrandsTool {
    pub fn new(document: Arc<StandardsDocument>) -> Self {
        Self { document }
    }
}

#[async_trait::async_trait]
impl Tool for ListBrandsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_brands".to_string(),
            description: "List every brand in the design standards with its display and short names".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        let lines: Vec<String> = self
            .document
            .brands
            .iter()
            .map(|(id, brand)| {
                format!(
                    "- {}: {} (short: {})",
                    id,
                    self.document.brand_name(id, brand),
                    self.document.brand_short_name(id, brand)
                )
            })
            .collect();

        Ok(CallToolResult::text(format!(
            "Available brands ({}):\n\n{}",
            lines.len(),
            lines.join("\n")
        )))
    }
}

/// Tool returning a brand's full style entry
pub struct GetBrandStylesTool {
    document: Arc<StandardsDocument>,
}

impl GetBrandStylesTool {
    pub fn new(document: Arc<StandardsDocument>) -> Self {
        Self { document }
    }
}

#[derive(Debug, Deserialize)]
struct GetBrandStylesArgs {
    brand: String,
    #[serde(default)]
    format: Format,
}

#[async_trait::async_trait]
impl Tool for GetBrandStylesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_brand_styles".to_string(),
            description: "Get the complete style entry for a brand, as JSON or rendered CSS variables".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "brand": brand_schema(&self.document),
                    "format": format_schema(),
                }),
                vec!["brand"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetBrandStylesArgs =
            serde_json::from_value(arguments).context("Invalid arguments for get_brand_styles")?;

        let brand = match self.document.brand(&args.brand) {
            Ok(b) => b,
            Err(e) => return Ok(CallToolResult::error(e.to_string())),
        };

        match args.format {
            Format::Json => pretty(brand),
            Format::Css => match self.document.brand_css(&args.brand, brand) {
                Ok(css) => Ok(CallToolResult::text(render_variables(css))),
                Err(e) => Ok(CallToolResult::error(e.to_string())),
            },
        }
    }
}

/// Tool returning a brand's CSS variables, optionally one category
pub struct GetCssVariablesTool {
    document: Arc<StandardsDocument>,
}

impl GetCssVariablesTool {
    pub fn new(document: Arc<StandardsDocument>) -> Self {
        Self { document }
    }
}

#[derive(Debug, Deserialize)]
struct GetCssVariablesArgs {
    brand: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    format: Format,
}

#[async_trait::async_trait]
impl Tool for GetCssVariablesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_css_variables".to_string(),
            description: "Get a brand's CSS variable tokens, filtered to one category if given, as JSON or a :root block".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "brand": brand_schema(&self.document),
                    "category": category_schema(&self.document),
                    "format": format_schema(),
                }),
                vec!["brand"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetCssVariablesArgs =
            serde_json::from_value(arguments).context("Invalid arguments for get_css_variables")?;

        let brand = match self.document.brand(&args.brand) {
            Ok(b) => b,
            Err(e) => return Ok(CallToolResult::error(e.to_string())),
        };
        let css = match self.document.brand_css(&args.brand, brand) {
            Ok(css) => css,
            Err(e) => return Ok(CallToolResult::error(e.to_string())),
        };

        let selected = match &args.category {
            None => css.clone(),
            Some(category) => match css.get(category) {
                Some(variables) => {
                    let mut map = serde_json::Map::new();
                    map.insert(category.clone(), variables.clone());
                    map
                }
                None => {
                    let err = StandardsError::UnknownCategory {
                        requested: category.clone(),
                        brand: args.brand.clone(),
                        available: css.keys().cloned().collect::<Vec<_>>().join(", "),
                    };
                    return Ok(CallToolResult::error(err.to_string()));
                }
            },
        };

        match args.format {
            Format::Json => pretty(&Value::Object(selected)),
            Format::Css => Ok(CallToolResult::text(render_variables(&selected))),
        }
    }
}

/// Tool returning one component's rule tree
pub struct GetCssRulesTool {
    document: Arc<StandardsDocument>,
}

impl GetCssRulesTool {
    pub fn new(document: Arc<StandardsDocument>) -> Self {
        Self { document }
    }
}

#[derive(Debug, Deserialize)]
struct GetCssRulesArgs {
    component: String,
    #[serde(default)]
    format: Format,
    #[serde(default)]
    brand: Option<String>,
}

#[async_trait::async_trait]
impl Tool for GetCssRulesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_css_rules".to_string(),
            description: "Get the CSS rule tree for a component (buttons, cards, modals, spacing, typography, mediaQueries, contrast, accessibility), as JSON or rendered CSS. A brand id adds its prefix to the selectors".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "component": component_schema(&self.document, "Component id"),
                    "format": format_schema(),
                    "brand": brand_schema(&self.document),
                }),
                vec!["component"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetCssRulesArgs =
            serde_json::from_value(arguments).context("Invalid arguments for get_css_rules")?;

        let rules = match self.document.component(&args.component) {
            Ok(r) => r,
            Err(e) => return Ok(CallToolResult::error(e.to_string())),
        };

        match args.format {
            Format::Json => pretty(rules),
            Format::Css => {
                let prefix = match &args.brand {
                    None => None,
                    Some(brand_id) => match self.document.brand(brand_id) {
                        Ok(brand) => {
                            Some(self.document.brand_short_name(brand_id, brand).to_string())
                        }
                        Err(e) => return Ok(CallToolResult::error(e.to_string())),
                    },
                };
                Ok(CallToolResult::text(render_component(
                    prefix.as_deref(),
                    &args.component,
                    rules,
                )))
            }
        }
    }
}

/// Tool composing a full brand stylesheet
pub struct GenerateCssTool {
    document: Arc<StandardsDocument>,
}

impl GenerateCssTool {
    pub fn new(document: Arc<StandardsDocument>) -> Self {
        Self { document }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateCssArgs {
    brand: String,
    #[serde(default)]
    include_components: Option<Vec<String>>,
}

#[async_trait::async_trait]
impl Tool for GenerateCssTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "generate_css".to_string(),
            description: "Generate a complete stylesheet for a brand: :root variables plus component rules (default: buttons, cards, modals)".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "brand": brand_schema(&self.document),
                    "includeComponents": json_schema_array(
                        component_schema(&self.document, "Component id"),
                        "Components to render, in order (default: buttons, cards, modals)"
                    ),
                }),
                vec!["brand"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GenerateCssArgs =
            serde_json::from_value(arguments).context("Invalid arguments for generate_css")?;

        let components: Vec<String> = args.include_components.unwrap_or_else(|| {
            DEFAULT_COMPONENTS.iter().map(|c| c.to_string()).collect()
        });

        match generate_stylesheet(&self.document, &args.brand, &components) {
            Ok(css) => Ok(CallToolResult::text(css)),
            Err(e) => Ok(CallToolResult::error(e.to_string())),
        }
    }
}

/// Tool searching keys, paths, and string values across the whole document
pub struct SearchStandardsTool {
    document: Arc<StandardsDocument>,
}

impl SearchStandardsTool {
    pub fn new(document: Arc<StandardsDocument>) -> Self {
        Self { document }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchStandardsArgs {
    query: String,
    #[serde(default)]
    case_sensitive: bool,
    #[serde(default = "default_max_results")]
    max_results: usize,
}

fn default_max_results() -> usize {
    20
}

#[async_trait::async_trait]
impl Tool for SearchStandardsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_design_standards".to_string(),
            description: "Search the design standards for a substring in keys, dotted paths, or string values".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "query": json_schema_string("Substring to search for"),
                    "caseSensitive": json_schema_boolean("Match case exactly (default: false)"),
                    "maxResults": json_schema_number("Maximum matches to return (default: 20)"),
                }),
                vec!["query"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchStandardsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for search_design_standards")?;

        let matches = search_document(&self.document, &args.query, args.case_sensitive);
        let total = matches.len();

        if total == 0 {
            return Ok(CallToolResult::text(format!(
                "No matches for '{}'.",
                args.query
            )));
        }

        let truncated = total > args.max_results;
        let shown = matches.iter().take(args.max_results);

        let lines: Vec<String> = shown
            .map(|m| {
                let rendered = match &m.value {
                    Value::String(s) => s.clone(),
                    other => serde_json::to_string(other).unwrap_or_default(),
                };
                format!("- {} = {}", m.path, rendered)
            })
            .collect();

        let mut text = format!(
            "Found {} match(es) for '{}':\n\n{}",
            total,
            args.query,
            lines.join("\n")
        );
        if truncated {
            text.push_str(&format!(
                "\n\nShowing first {} of {}; more results exist (raise 'maxResults').",
                args.max_results, total
            ));
        }

        Ok(CallToolResult::text(text))
    }
}

/// Tool returning usage guidelines, optionally one category
pub struct GetUsageGuidelinesTool {
    document: Arc<StandardsDocument>,
}

impl GetUsageGuidelinesTool {
    pub fn new(document: Arc<StandardsDocument>) -> Self {
        Self { document }
    }
}

#[derive(Debug, Deserialize)]
struct GetUsageGuidelinesArgs {
    #[serde(default = "default_category")]
    category: String,
}

fn default_category() -> String {
    "all".to_string()
}

#[async_trait::async_trait]
impl Tool for GetUsageGuidelinesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_usage_guidelines".to_string(),
            description: "Get usage guidelines for a category, or every category with 'all' (the default)".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "category": key_enum(
                        std::iter::once(&"all".to_string()).chain(self.document.usage.keys()),
                        "Guideline category, or 'all' (default)",
                    ),
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetUsageGuidelinesArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_usage_guidelines")?;

        if args.category == "all" {
            return pretty(&Value::Object(self.document.usage.clone()));
        }

        match self.document.usage_category(&args.category) {
            Ok(guidance) => pretty(guidance),
            Err(e) => Ok(CallToolResult::error(e.to_string())),
        }
    }
}

fn format_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "enum": ["json", "css"],
        "description": "Output format (default: json)"
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Arc<StandardsDocument> {
        Arc::new(
            StandardsDocument::from_value(serde_json::json!({
                "brands": {
                    "pmc": {
                        "name": "PMC",
                        "shortName": "pmc",
                        "css": {
                            "colors": { "primary": "#AB292C" },
                            "fontFiles": { "graphik": "/fonts/graphik.woff2" }
                        }
                    },
                    "variety": { "name": "Variety", "shortName": "vty" }
                },
                "cssRules": {
                    "buttons": {
                        "primary": {
                            "css": "padding: 8px 16px;",
                            "hover": { "css": "opacity: 0.9;" }
                        }
                    },
                    "cards": { "default": { "css": "border: 1px solid #eee;" } },
                    "modals": { "overlay": { "css": "background: rgba(0,0,0,0.5);" } }
                },
                "usage": {
                    "colors": { "primary": "Use for primary calls to action" }
                }
            }))
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn list_brands_names_every_brand() {
        let tool = ListBrandsTool::new(sample_document());
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        let text = result.content[0].as_text();
        assert!(text.contains("pmc: PMC"));
        assert!(text.contains("variety: Variety (short: vty)"));
    }

    #[tokio::test]
    async fn get_brand_styles_unknown_brand_is_error_envelope() {
        let tool = GetBrandStylesTool::new(sample_document());
        let result = tool
            .execute(serde_json::json!({"brand": "unknown"}))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(result.content[0].as_text().contains("pmc"));
    }

    #[tokio::test]
    async fn get_brand_styles_css_renders_root_block() {
        let tool = GetBrandStylesTool::new(sample_document());
        let result = tool
            .execute(serde_json::json!({"brand": "pmc", "format": "css"}))
            .await
            .unwrap();
        let text = result.content[0].as_text();
        assert!(text.contains(":root {"));
        assert!(text.contains("--primary: #AB292C;"));
        assert!(!text.contains("graphik.woff2"));
    }

    #[tokio::test]
    async fn get_css_variables_filters_by_category() {
        let tool = GetCssVariablesTool::new(sample_document());
        let result = tool
            .execute(serde_json::json!({"brand": "pmc", "category": "colors"}))
            .await
            .unwrap();
        assert!(result.content[0].as_text().contains("#AB292C"));

        let missing = tool
            .execute(serde_json::json!({"brand": "pmc", "category": "spacing"}))
            .await
            .unwrap();
        assert_eq!(missing.is_error, Some(true));
        assert!(missing.content[0].as_text().contains("colors"));
    }

    #[tokio::test]
    async fn get_css_rules_prefixes_with_brand_short_name() {
        let tool = GetCssRulesTool::new(sample_document());
        let result = tool
            .execute(serde_json::json!({
                "component": "buttons",
                "format": "css",
                "brand": "variety"
            }))
            .await
            .unwrap();
        let text = result.content[0].as_text();
        assert!(text.contains(".vty-buttons {"));
        assert!(text.contains(".vty-buttons:hover {"));
    }

    #[tokio::test]
    async fn get_css_rules_without_brand_uses_bare_class() {
        let tool = GetCssRulesTool::new(sample_document());
        let result = tool
            .execute(serde_json::json!({"component": "cards", "format": "css"}))
            .await
            .unwrap();
        assert!(result.content[0].as_text().contains(".cards {"));
    }

    #[tokio::test]
    async fn get_css_rules_unknown_component_is_error() {
        let tool = GetCssRulesTool::new(sample_document());
        let result = tool
            .execute(serde_json::json!({"component": "tables"}))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn generate_css_default_components() {
        let tool = GenerateCssTool::new(sample_document());
        let result = tool
            .execute(serde_json::json!({"brand": "pmc"}))
            .await
            .unwrap();
        let text = result.content[0].as_text();
        assert!(text.contains(":root {"));
        assert!(text.contains(".pmc-buttons {"));
        assert!(text.contains(".pmc-buttons:hover {"));
        assert!(text.contains(".pmc-cards {"));
        assert!(text.contains(".pmc-modals {"));
    }

    #[tokio::test]
    async fn search_standards_truncates_and_flags_more() {
        let tool = SearchStandardsTool::new(sample_document());
        let result = tool
            .execute(serde_json::json!({"query": "c", "maxResults": 2}))
            .await
            .unwrap();
        let text = result.content[0].as_text();
        assert!(text.contains("more results exist"));
        assert!(text.lines().filter(|l| l.starts_with("- ")).count() <= 2);
    }

    #[tokio::test]
    async fn search_standards_value_match_returns_value() {
        let tool = SearchStandardsTool::new(sample_document());
        let result = tool
            .execute(serde_json::json!({"query": "AB292C"}))
            .await
            .unwrap();
        assert!(result.is_error.is_none());
        assert!(result.content[0].as_text().contains("#AB292C"));
    }

    #[tokio::test]
    async fn search_standards_no_results_is_not_an_error() {
        let tool = SearchStandardsTool::new(sample_document());
        let result = tool
            .execute(serde_json::json!({"query": "nonexistent-xyz"}))
            .await
            .unwrap();
        assert!(result.is_error.is_none());
        assert!(result.content[0].as_text().contains("No matches"));
    }

    #[tokio::test]
    async fn usage_guidelines_default_returns_all() {
        let tool = GetUsageGuidelinesTool::new(sample_document());
        let result = tool.execute(serde_json::json!({})).await.unwrap();
        assert!(result.content[0].as_text().contains("calls to action"));
    }

    #[tokio::test]
    async fn usage_guidelines_unknown_category_is_error() {
        let tool = GetUsageGuidelinesTool::new(sample_document());
        let result = tool
            .execute(serde_json::json!({"category": "motion"}))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(result.content[0].as_text().contains("colors"));
    }
}
