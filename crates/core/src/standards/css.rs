// CSS generation from the standards tree

use super::{StandardsDocument, StandardsError};
use serde_json::{Map, Value};

/// Components rendered by `generate_stylesheet` when the caller does not
/// ask for a specific set.
pub const DEFAULT_COMPONENTS: [&str; 3] = ["buttons", "cards", "modals"];

// Font file paths are asset references, not custom-property material.
const EXCLUDED_CATEGORIES: [&str; 1] = ["fontFiles"];

/// Render a brand's variable tree as a `:root` block: one custom property
/// per variable across every category except `fontFiles`, each category
/// preceded by a comment. Category order follows the document.
pub fn render_variables(css: &Map<String, Value>) -> String {
    let mut out = String::from(":root {\n");
    for (category, variables) in css {
        if EXCLUDED_CATEGORIES.contains(&category.as_str()) {
            continue;
        }
        let Some(variables) = variables.as_object() else {
            continue;
        };
        out.push_str(&format!("  /* {} */\n", category));
        for (name, value) in variables {
            if let Some(value) = value.as_str() {
                out.push_str(&format!("  --{}: {};\n", name, value));
            }
        }
    }
    out.push_str("}\n");
    out
}

/// Render one component's rule tree as class selectors.
///
/// Two passes: the base block concatenates every `css` leaf found one level
/// down (skipping `hover`), then a separate `:hover` block is emitted when
/// present. Pseudo-classes cannot live inside a flat declaration body, hence
/// the split.
pub fn render_component(prefix: Option<&str>, component: &str, rules: &Value) -> String {
    let selector = match prefix {
        Some(prefix) => format!(".{}-{}", prefix, component),
        None => format!(".{}", component),
    };

    let mut base = String::new();
    let mut hover = String::new();
    collect_rules(rules, &mut base, &mut hover);

    let mut out = format!("{} {{\n{}}}\n", selector, base);
    if !hover.is_empty() {
        out.push_str(&format!("\n{}:hover {{\n{}}}\n", selector, hover));
    }
    out
}

fn collect_rules(rules: &Value, base: &mut String, hover: &mut String) {
    let Some(rules) = rules.as_object() else {
        return;
    };

    if let Some(css) = rules.get("css").and_then(Value::as_str) {
        push_declarations(base, css);
    }

    for (key, value) in rules {
        if key == "css" {
            continue;
        }
        if key == "hover" {
            if let Some(css) = value.get("css").and_then(Value::as_str) {
                push_declarations(hover, css);
            }
            continue;
        }
        // One level of variants (e.g. primary/secondary) carrying css leaves.
        if let Some(css) = value.get("css").and_then(Value::as_str) {
            push_declarations(base, css);
        }
        if let Some(css) = value
            .get("hover")
            .and_then(|h| h.get("css"))
            .and_then(Value::as_str)
        {
            push_declarations(hover, css);
        }
    }
}

fn push_declarations(out: &mut String, css: &str) {
    for declaration in css.split(';') {
        let declaration = declaration.trim();
        if !declaration.is_empty() {
            out.push_str(&format!("  {};\n", declaration));
        }
    }
}

/// Compose a full stylesheet for a brand: header comment, variable block,
/// then each requested component in caller order.
pub fn generate_stylesheet(
    doc: &StandardsDocument,
    brand_id: &str,
    components: &[String],
) -> Result<String, StandardsError> {
    let brand = doc.brand(brand_id)?;
    let name = doc.brand_name(brand_id, brand);
    let prefix = doc.brand_short_name(brand_id, brand);

    let mut out = format!(
        "/* {} design standards\n   Generated: {} */\n\n",
        name,
        chrono::Utc::now().to_rfc3339()
    );

    match doc.brand_css(brand_id, brand) {
        Ok(css) => out.push_str(&render_variables(css)),
        Err(_) => out.push_str(":root {\n}\n"),
    }

    for component in components {
        let rules = doc.component(component)?;
        out.push_str(&format!("\n/* {} */\n", uppercase_first(component)));
        out.push_str(&render_component(Some(prefix), component, rules));
    }

    Ok(out)
}

fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::sample_document;
    use super::*;

    #[test]
    fn variables_block_skips_font_files_and_comments_categories() {
        let doc = sample_document();
        let brand = doc.brand("pmc").unwrap();
        let css = doc.brand_css("pmc", brand).unwrap();
        let block = render_variables(css);

        assert!(block.starts_with(":root {"));
        assert!(block.contains("/* colors */"));
        assert!(block.contains("--primary: #AB292C;"));
        assert!(block.contains("--standard: 4px;"));
        assert!(!block.contains("graphik.woff2"));
    }

    #[test]
    fn category_order_follows_document() {
        let doc = sample_document();
        let brand = doc.brand("pmc").unwrap();
        let block = render_variables(doc.brand_css("pmc", brand).unwrap());
        let colors = block.find("/* colors */").unwrap();
        let radius = block.find("/* borderRadius */").unwrap();
        assert!(colors < radius);
    }

    #[test]
    fn component_renders_base_and_hover_blocks() {
        let doc = sample_document();
        let rules = doc.component("buttons").unwrap();
        let out = render_component(Some("pmc"), "buttons", rules);

        assert!(out.contains(".pmc-buttons {"));
        assert!(out.contains("padding: 8px 16px;"));
        assert!(out.contains(".pmc-buttons:hover {"));
        assert!(out.contains("opacity: 0.9;"));
    }

    #[test]
    fn component_without_hover_emits_single_block() {
        let doc = sample_document();
        let rules = doc.component("cards").unwrap();
        let out = render_component(Some("pmc"), "cards", rules);
        assert!(out.contains(".pmc-cards {"));
        assert!(!out.contains(":hover"));
    }

    #[test]
    fn component_without_prefix_uses_bare_class() {
        let doc = sample_document();
        let rules = doc.component("cards").unwrap();
        assert!(render_component(None, "cards", rules).contains(".cards {"));
    }

    #[test]
    fn stylesheet_has_header_root_and_sections() {
        let doc = sample_document();
        let components = vec!["buttons".to_string(), "cards".to_string()];
        let sheet = generate_stylesheet(&doc, "pmc", &components).unwrap();

        assert!(sheet.starts_with("/* PMC design standards"));
        assert!(sheet.contains(":root {"));
        assert!(sheet.contains("/* Buttons */"));
        assert!(sheet.contains(".pmc-buttons {"));
        assert!(sheet.contains(".pmc-buttons:hover {"));
        assert!(sheet.contains("/* Cards */"));
        // Caller order is preserved.
        assert!(sheet.find("/* Buttons */").unwrap() < sheet.find("/* Cards */").unwrap());
    }

    #[test]
    fn stylesheet_unknown_brand_errors() {
        let doc = sample_document();
        assert!(generate_stylesheet(&doc, "unknown", &[]).is_err());
    }

    #[test]
    fn stylesheet_unknown_component_errors() {
        let doc = sample_document();
        let err = generate_stylesheet(&doc, "pmc", &["tables".to_string()]);
        assert!(err.is_err());
    }
}
