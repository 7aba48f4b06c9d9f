// Site query tools: sitemap listing, page fetching, and URL search

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_schema_boolean, json_schema_enum, json_schema_number, json_schema_object,
    json_schema_string, Tool,
};
use anyhow::{Context, Result};
use brandkit_core::html::extract_text;
use brandkit_core::sites::{parse_sitemap, Site, SiteId};
use brandkit_core::PageFetcher;
use serde::Deserialize;
use std::sync::Arc;

const SITE_IDS: [&str; 3] = ["sxsw", "lifeisbeautiful", "goldenglobes"];

fn resolve_site(id: &str) -> Result<&'static Site, CallToolResult> {
    match id.parse::<SiteId>() {
        Ok(site_id) => Ok(site_id.site()),
        Err(e) => Err(CallToolResult::error(e.to_string())),
    }
}

/// Fetch a site's sitemap and parse its URLs, or explain why we couldn't.
async fn load_sitemap(
    fetcher: &dyn PageFetcher,
    site: &Site,
) -> Result<Vec<String>, CallToolResult> {
    match fetcher.fetch_text(&site.sitemap_url()).await {
        Ok(xml) => Ok(parse_sitemap(&xml)),
        Err(e) => Err(CallToolResult::error(e.to_string())),
    }
}

/// Tool returning the full ordered URL list from a site's sitemap
pub struct FetchSitemapTool {
    fetcher: Arc<dyn PageFetcher>,
}

impl FetchSitemapTool {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[derive(Debug, Deserialize)]
struct FetchSitemapArgs {
    site: String,
}

#[async_trait::async_trait]
impl Tool for FetchSitemapTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "fetch_sitemap".to_string(),
            description: "Fetch and parse the sitemap of a registered event website, returning every page URL in document order".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "site": json_schema_enum(&SITE_IDS, "The event site to query"),
                }),
                vec!["site"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: FetchSitemapArgs =
            serde_json::from_value(arguments).context("Invalid arguments for fetch_sitemap")?;

        let site = match resolve_site(&args.site) {
            Ok(s) => s,
            Err(err) => return Ok(err),
        };

        let urls = match load_sitemap(self.fetcher.as_ref(), site).await {
            Ok(urls) => urls,
            Err(err) => return Ok(err),
        };

        if urls.is_empty() {
            return Ok(CallToolResult::text(format!(
                "Sitemap for {} contains no URLs.",
                site.name
            )));
        }

        Ok(CallToolResult::text(format!(
            "Sitemap for {} ({} URLs):\n\n{}",
            site.name,
            urls.len(),
            urls.join("\n")
        )))
    }
}

/// Tool fetching a single page, optionally reduced to plain text
pub struct GetEventPageTool {
    fetcher: Arc<dyn PageFetcher>,
}

impl GetEventPageTool {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetEventPageArgs {
    url: String,
    #[serde(default)]
    site: Option<String>,
    #[serde(default = "default_true")]
    extract_text: bool,
}

fn default_true() -> bool {
    true
}

#[async_trait::async_trait]
impl Tool for GetEventPageTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_event_page".to_string(),
            description: "Fetch an event page by absolute URL, or by path relative to a registered site. Returns extracted plain text unless extractText is false".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "url": json_schema_string("Absolute URL, or a path relative to the site's base URL"),
                    "site": json_schema_enum(&SITE_IDS, "Site to resolve a relative path against"),
                    "extractText": json_schema_boolean("Strip HTML down to plain text (default: true)"),
                }),
                vec!["url"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetEventPageArgs =
            serde_json::from_value(arguments).context("Invalid arguments for get_event_page")?;

        let full_url = if args.url.starts_with("http://") || args.url.starts_with("https://") {
            args.url.clone()
        } else {
            let Some(site_arg) = args.site.as_deref() else {
                return Ok(CallToolResult::error(
                    "A relative url requires a 'site' to resolve against. \
                     Provide an absolute URL or one of the registered sites.",
                ));
            };
            let site = match resolve_site(site_arg) {
                Ok(s) => s,
                Err(err) => return Ok(err),
            };
            if args.url.starts_with('/') {
                format!("{}{}", site.base_url, args.url)
            } else {
                format!("{}/{}", site.base_url, args.url)
            }
        };

        let body = match self.fetcher.fetch_text(&full_url).await {
            Ok(body) => body,
            Err(e) => return Ok(CallToolResult::error(e.to_string())),
        };

        let text = if args.extract_text {
            extract_text(&body)
        } else {
            body
        };

        Ok(CallToolResult::text(text))
    }
}

/// Tool filtering sitemap URLs by substring
pub struct SearchEventsTool {
    fetcher: Arc<dyn PageFetcher>,
}

impl SearchEventsTool {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchEventsArgs {
    site: String,
    pattern: String,
    #[serde(default = "default_true")]
    case_insensitive: bool,
}

#[async_trait::async_trait]
impl Tool for SearchEventsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_events".to_string(),
            description: "Search a site's sitemap URLs for a plain substring (not a regex). Case-insensitive by default".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "site": json_schema_enum(&SITE_IDS, "The event site to search"),
                    "pattern": json_schema_string("Substring to look for in each URL"),
                    "caseInsensitive": json_schema_boolean("Fold case on both sides (default: true)"),
                }),
                vec!["site", "pattern"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchEventsArgs =
            serde_json::from_value(arguments).context("Invalid arguments for search_events")?;

        let site = match resolve_site(&args.site) {
            Ok(s) => s,
            Err(err) => return Ok(err),
        };

        let urls = match load_sitemap(self.fetcher.as_ref(), site).await {
            Ok(urls) => urls,
            Err(err) => return Ok(err),
        };

        let needle = if args.case_insensitive {
            args.pattern.to_lowercase()
        } else {
            args.pattern.clone()
        };

        let total = urls.len();
        let hits: Vec<&String> = urls
            .iter()
            .filter(|url| {
                if args.case_insensitive {
                    url.to_lowercase().contains(&needle)
                } else {
                    url.contains(&needle)
                }
            })
            .collect();

        if hits.is_empty() {
            return Ok(CallToolResult::text(format!(
                "No URLs matching '{}' in {} sitemap entries for {}.",
                args.pattern, total, site.name
            )));
        }

        Ok(CallToolResult::text(format!(
            "Found {} URL(s) matching '{}' on {}:\n\n{}",
            hits.len(),
            args.pattern,
            site.name,
            hits.iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        )))
    }
}

/// Tool listing sitemap URLs with a result cap
pub struct ListAllEventsTool {
    fetcher: Arc<dyn PageFetcher>,
}

impl ListAllEventsTool {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[derive(Debug, Deserialize)]
struct ListAllEventsArgs {
    site: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    50
}

#[async_trait::async_trait]
impl Tool for ListAllEventsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "list_all_events".to_string(),
            description: "List a site's sitemap URLs in document order, truncated to a limit (default 50; 0 means unlimited)".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "site": json_schema_enum(&SITE_IDS, "The event site to list"),
                    "limit": json_schema_number("Maximum URLs to return (default: 50, 0 = unlimited)"),
                }),
                vec!["site"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListAllEventsArgs =
            serde_json::from_value(arguments).context("Invalid arguments for list_all_events")?;

        let site = match resolve_site(&args.site) {
            Ok(s) => s,
            Err(err) => return Ok(err),
        };

        let urls = match load_sitemap(self.fetcher.as_ref(), site).await {
            Ok(urls) => urls,
            Err(err) => return Ok(err),
        };

        let total = urls.len();
        if total == 0 {
            return Ok(CallToolResult::text(format!(
                "Sitemap for {} contains no URLs.",
                site.name
            )));
        }

        let shown: Vec<&String> = if args.limit > 0 {
            urls.iter().take(args.limit).collect()
        } else {
            urls.iter().collect()
        };

        let mut text = format!(
            "{} pages on {} (showing {} of {}):\n\n{}",
            total,
            site.name,
            shown.len(),
            total,
            shown
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        );
        if shown.len() < total {
            text.push_str(&format!(
                "\n\n... {} more not shown (raise 'limit' or pass 0 for all)",
                total - shown.len()
            ));
        }

        Ok(CallToolResult::text(text))
    }
}
