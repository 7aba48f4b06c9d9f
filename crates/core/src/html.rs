// Plain-text extraction from HTML

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap());
static STYLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Reduce an HTML document to a plain-text approximation.
///
/// Script and style blocks are dropped with their contents before tag
/// stripping, otherwise code and CSS text would leak into the output.
/// Exactly six named entities are decoded; anything else passes through
/// literally. Whitespace runs collapse to a single space.
pub fn extract_text(html: &str) -> String {
    let without_script = SCRIPT_RE.replace_all(html, " ");
    let without_style = STYLE_RE.replace_all(&without_script, " ");
    let without_tags = TAG_RE.replace_all(&without_style, " ");

    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        let html = "<html><body>\n  <h1>Film   Festival</h1>\n  <p>March 2026</p>\n</body></html>";
        assert_eq!(extract_text(html), "Film Festival March 2026");
    }

    #[test]
    fn removes_script_and_style_content() {
        let html = concat!(
            "<head><style type=\"text/css\">body { color: red; }</style>",
            "<script src=\"x.js\" async>console.log('hi > there');</script></head>",
            "<body>Visible</body>",
        );
        assert_eq!(extract_text(html), "Visible");
    }

    #[test]
    fn decodes_the_six_named_entities() {
        let html = "<p>Tom&nbsp;&amp;&nbsp;Jerry &lt;live&gt; &quot;on&quot; &#39;stage&#39;</p>";
        assert_eq!(extract_text(html), "Tom & Jerry <live> \"on\" 'stage'");
    }

    #[test]
    fn unknown_entities_pass_through() {
        assert_eq!(extract_text("<p>caf&eacute; &#8212;</p>"), "caf&eacute; &#8212;");
    }

    #[test]
    fn idempotent_on_its_own_output() {
        let html = "<div><script>var x = 1;</script><p>Lineup &amp; tickets</p></div>";
        let once = extract_text(html);
        assert_eq!(extract_text(&once), once);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(extract_text(""), "");
        assert_eq!(extract_text("<br/><hr>"), "");
    }
}
