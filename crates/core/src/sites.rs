// Static registry of event websites and the sitemap URL scanner

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier for a registered event website.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteId {
    Sxsw,
    Lifeisbeautiful,
    Goldenglobes,
}

impl SiteId {
    pub const ALL: [SiteId; 3] = [
        SiteId::Sxsw,
        SiteId::Lifeisbeautiful,
        SiteId::Goldenglobes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteId::Sxsw => "sxsw",
            SiteId::Lifeisbeautiful => "lifeisbeautiful",
            SiteId::Goldenglobes => "goldenglobes",
        }
    }

    /// Valid identifiers, for error messages listing the options.
    pub fn options() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn site(&self) -> &'static Site {
        match self {
            SiteId::Sxsw => &Site {
                name: "SXSW",
                base_url: "https://www.sxsw.com",
                sitemap_path: "/sitemap.xml",
            },
            SiteId::Lifeisbeautiful => &Site {
                name: "Life is Beautiful",
                base_url: "https://www.lifeisbeautiful.com",
                sitemap_path: "/sitemap.xml",
            },
            SiteId::Goldenglobes => &Site {
                name: "Golden Globes",
                base_url: "https://www.goldenglobes.com",
                sitemap_path: "/sitemap.xml",
            },
        }
    }
}

impl FromStr for SiteId {
    type Err = UnknownSite;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sxsw" => Ok(SiteId::Sxsw),
            "lifeisbeautiful" => Ok(SiteId::Lifeisbeautiful),
            "goldenglobes" => Ok(SiteId::Goldenglobes),
            other => Err(UnknownSite(other.to_string())),
        }
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown site identifier. The message lists the valid options so the
/// caller can self-correct.
#[derive(Debug, thiserror::Error)]
#[error("Unknown site '{0}'. Valid sites: {options}", options = SiteId::options())]
pub struct UnknownSite(pub String);

/// A registered event website: display name plus where its sitemap lives.
#[derive(Debug, Clone)]
pub struct Site {
    pub name: &'static str,
    pub base_url: &'static str,
    pub sitemap_path: &'static str,
}

impl Site {
    /// Full URL of the site's sitemap document.
    pub fn sitemap_url(&self) -> String {
        format!("{}{}", self.base_url, self.sitemap_path)
    }
}

static LOC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<loc>(.*?)</loc>").unwrap());

/// Extract all `<loc>…</loc>` URLs from sitemap XML, in document order.
///
/// Deliberately permissive: no XML validation, malformed input just yields
/// fewer (or zero) matches. The target sites emit well-formed pairs.
pub fn parse_sitemap(xml: &str) -> Vec<String> {
    LOC_RE
        .captures_iter(xml)
        .map(|c| c[1].trim().to_string())
        .collect()
}
