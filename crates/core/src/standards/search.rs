// Depth-first key/path/value search over the standards tree

use super::StandardsDocument;
use serde_json::Value;

/// A single search hit: where it was found and what was there.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch {
    /// Dotted path from the document root, e.g. `brands.pmc.css.colors.primary`.
    pub path: String,
    /// The final key on the path.
    pub key: String,
    /// The value at that key.
    pub value: Value,
}

/// Walk the whole document depth-first in declaration order, collecting a
/// match whenever the key or its dotted path contains the query, and
/// independently whenever a string value contains the query. A node whose
/// key and value both match produces two records; that duplication is
/// intentional, matching the observed behavior of the queries this serves.
pub fn search_document(
    doc: &StandardsDocument,
    query: &str,
    case_sensitive: bool,
) -> Vec<SearchMatch> {
    let needle = if case_sensitive {
        query.to_string()
    } else {
        query.to_lowercase()
    };

    let mut matches = Vec::new();
    for (section, entries) in [
        ("brands", &doc.brands),
        ("cssRules", &doc.css_rules),
        ("usage", &doc.usage),
    ] {
        for (key, value) in entries {
            walk(section, key, value, &needle, case_sensitive, &mut matches);
        }
    }
    matches
}

fn walk(
    parent_path: &str,
    key: &str,
    value: &Value,
    needle: &str,
    case_sensitive: bool,
    matches: &mut Vec<SearchMatch>,
) {
    let path = format!("{}.{}", parent_path, key);

    let (key_hay, path_hay) = if case_sensitive {
        (key.to_string(), path.clone())
    } else {
        (key.to_lowercase(), path.to_lowercase())
    };

    if key_hay.contains(needle) || path_hay.contains(needle) {
        matches.push(SearchMatch {
            path: path.clone(),
            key: key.to_string(),
            value: value.clone(),
        });
    }

    if let Value::String(s) = value {
        let value_hay = if case_sensitive {
            s.clone()
        } else {
            s.to_lowercase()
        };
        if value_hay.contains(needle) {
            matches.push(SearchMatch {
                path: path.clone(),
                key: key.to_string(),
                value: value.clone(),
            });
        }
    }

    if let Value::Object(children) = value {
        for (child_key, child_value) in children {
            walk(&path, child_key, child_value, needle, case_sensitive, matches);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::sample_document;
    use super::*;

    #[test]
    fn finds_string_value_by_substring() {
        let doc = sample_document();
        let matches = search_document(&doc, "ab292c", false);
        assert!(matches
            .iter()
            .any(|m| m.value == Value::String("#AB292C".to_string())));
    }

    #[test]
    fn finds_key_by_substring_with_full_path() {
        let doc = sample_document();
        let matches = search_document(&doc, "borderRadius", false);
        assert!(matches
            .iter()
            .any(|m| m.path == "brands.pmc.css.borderRadius"));
    }

    #[test]
    fn no_hits_yields_empty_not_error() {
        let doc = sample_document();
        assert!(search_document(&doc, "nonexistent-xyz", false).is_empty());
    }

    #[test]
    fn case_sensitive_flag_is_honored() {
        let doc = sample_document();
        assert!(search_document(&doc, "AB292C", true)
            .iter()
            .any(|m| m.key == "primary"));
        assert!(search_document(&doc, "ab292c", true).is_empty());
    }

    // Observed behavior, not a bug fix target: when a key and its string
    // value both contain the query, two records are emitted for that node.
    #[test]
    fn key_and_value_both_match_produce_two_records() {
        let doc = super::super::StandardsDocument::from_value(serde_json::json!({
            "brands": { "primary": "primary-red" },
            "cssRules": {},
            "usage": {}
        }))
        .unwrap();

        let matches = search_document(&doc, "primary", false);
        let at_node: Vec<_> = matches
            .iter()
            .filter(|m| m.path == "brands.primary")
            .collect();
        assert_eq!(at_node.len(), 2);
    }

    #[test]
    fn traversal_follows_declaration_order() {
        let doc = sample_document();
        let matches = search_document(&doc, "primary", false);
        let paths: Vec<_> = matches.iter().map(|m| m.path.as_str()).collect();
        let pmc = paths
            .iter()
            .position(|p| p.starts_with("brands.pmc"))
            .unwrap();
        let variety = paths
            .iter()
            .position(|p| p.starts_with("brands.variety"))
            .unwrap();
        let rules = paths
            .iter()
            .position(|p| p.starts_with("cssRules"))
            .unwrap();
        assert!(pmc < variety);
        assert!(variety < rules);
    }
}
