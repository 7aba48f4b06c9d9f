// Core domain logic for Brandkit: site registry, sitemap parsing,
// HTML text extraction, remote fetching, and design-standards queries.

pub mod fetch;
pub mod html;
pub mod sites;
pub mod standards;

pub use fetch::{FetchError, HttpFetcher, PageFetcher};
pub use sites::{parse_sitemap, Site, SiteId};
pub use standards::{StandardsDocument, StandardsError};
