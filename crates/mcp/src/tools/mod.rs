pub mod sites;
pub mod standards;
mod registry;

pub use registry::{
    json_schema_array, json_schema_boolean, json_schema_enum, json_schema_number,
    json_schema_object, json_schema_string, Tool, ToolRegistry,
};
pub use sites::{FetchSitemapTool, GetEventPageTool, ListAllEventsTool, SearchEventsTool};
pub use standards::{
    GenerateCssTool, GetBrandStylesTool, GetCssRulesTool, GetCssVariablesTool,
    GetUsageGuidelinesTool, ListBrandsTool, SearchStandardsTool,
};

use brandkit_core::{PageFetcher, StandardsDocument};
use std::sync::Arc;

/// Register the full Brandkit tool set: four site query tools and seven
/// design-standards tools, all sharing the injected fetcher and document.
pub fn build_registry(
    document: Arc<StandardsDocument>,
    fetcher: Arc<dyn PageFetcher>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    // Site query tools
    registry.register(Arc::new(FetchSitemapTool::new(fetcher.clone())));
    registry.register(Arc::new(GetEventPageTool::new(fetcher.clone())));
    registry.register(Arc::new(SearchEventsTool::new(fetcher.clone())));
    registry.register(Arc::new(ListAllEventsTool::new(fetcher)));

    // Design-standards tools
    registry.register(Arc::new(ListBrandsTool::new(document.clone())));
    registry.register(Arc::new(GetBrandStylesTool::new(document.clone())));
    registry.register(Arc::new(GetCssVariablesTool::new(document.clone())));
    registry.register(Arc::new(GetCssRulesTool::new(document.clone())));
    registry.register(Arc::new(GenerateCssTool::new(document.clone())));
    registry.register(Arc::new(SearchStandardsTool::new(document.clone())));
    registry.register(Arc::new(GetUsageGuidelinesTool::new(document)));

    registry
}
