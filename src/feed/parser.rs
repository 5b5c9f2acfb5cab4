//! Permissive RSS 2.0 / Atom 1.0 entry extraction.
//!
//! Real-world feeds are frequently malformed, so this module deliberately
//! avoids a validating XML parser. Fields are pulled out with tag-content
//! pattern matching; anything that does not match degrades to a default
//! value instead of raising. Structures that do not look like an
//! `<entry>`/`<item>` container are silently skipped.

use once_cell::sync::Lazy;
use regex::Regex;

/// One article extracted from a feed, prior to normalization.
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub title: String,
    pub url: String,
    pub description: String,
    /// Raw date string as found in the feed; parsed later during ranking.
    pub pub_date: Option<String>,
    pub categories: Vec<String>,
    /// Primary category, set only by [`ParserKind::AstroPaper`].
    pub category: Option<String>,
    /// Secondary tags, set only by [`ParserKind::AstroPaper`].
    pub tags: Option<Vec<String>>,
}

/// Feed parser variants, selected per feed by configuration.
///
/// `"default"` and `"jekyllFeed"` both name the generic parser; unknown
/// names fall back to it rather than failing the feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParserKind {
    #[default]
    Default,
    AstroPaper,
}

impl ParserKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "astroPaper" => ParserKind::AstroPaper,
            _ => ParserKind::Default,
        }
    }

    pub fn parse(self, xml: &str) -> Vec<RawEntry> {
        match self {
            ParserKind::Default => parse_feed(xml),
            ParserKind::AstroPaper => parse_astro_paper(xml),
        }
    }
}

static ENTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<entry(?:\s[^>]*)?>(.*?)</entry>").unwrap());
static ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<item(?:\s[^>]*)?>(.*?)</item>").unwrap());
static CDATA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<!\[CDATA\[(.*?)\]\]>").unwrap());
static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<link[^>]*href=["']([^"']+)["'][^>]*>"#).unwrap());
static ATOM_CATEGORY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<category[^>]*term=["']([^"']+)["'][^>]*>"#).unwrap());
static RSS_CATEGORY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<category(?:\s[^>]*)?>(.*?)</category>").unwrap());
static DOUBLE_SLASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^:])/{2,}").unwrap());

/// Strip CDATA wrappers and HTML tags, returning trimmed plain text.
fn strip_html(html: &str) -> String {
    let unwrapped = CDATA_RE.replace_all(html, "$1");
    HTML_TAG_RE.replace_all(&unwrapped, "").trim().to_string()
}

/// First occurrence of `<tag ...>inner</tag>`, CDATA-unwrapped and trimmed.
///
/// Returns `None` for a missing tag or empty content, so callers can chain
/// fallback tags with `or_else`.
fn tag_content(xml: &str, tag: &str) -> Option<String> {
    let re = Regex::new(&format!(r"(?is)<{tag}(?:\s[^>]*)?>(.*?)</{tag}>")).ok()?;
    let inner = re.captures(xml)?.get(1)?.as_str();
    let unwrapped = CDATA_RE.replace_all(inner, "$1");
    let trimmed = unwrapped.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Collapse runs of 2+ slashes not preceded by a colon, repairing accidental
/// double-slash artifacts in links without touching the scheme separator.
fn repair_slashes(url: &str) -> String {
    DOUBLE_SLASH_RE.replace_all(url, "${1}/").to_string()
}

/// Extract the entry link: Atom-style `<link href="...">` attribute first,
/// then RSS-style `<link>text</link>`, defaulting to `"#"`.
fn link_href(xml: &str) -> String {
    if let Some(caps) = HREF_RE.captures(xml) {
        return repair_slashes(&caps[1]);
    }
    if let Some(text) = tag_content(xml, "link") {
        return repair_slashes(&text);
    }
    "#".to_string()
}

/// Ordered, de-duplicated union of Atom `term="X"` attributes and RSS
/// `<category>X</category>` tag contents.
fn categories(xml: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for caps in ATOM_CATEGORY_RE.captures_iter(xml) {
        let term = caps[1].to_string();
        if !found.contains(&term) {
            found.push(term);
        }
    }
    for caps in RSS_CATEGORY_RE.captures_iter(xml) {
        let cat = strip_html(&caps[1]);
        if !cat.is_empty() && !found.contains(&cat) {
            found.push(cat);
        }
    }
    found
}

/// Generic RSS 2.0 / Atom 1.0 parser.
///
/// Atom `<entry>` and RSS `<item>` containers are matched separately and
/// merged back into document order, so mixed or unusual feeds keep their
/// original entry ordering.
fn parse_feed(xml: &str) -> Vec<RawEntry> {
    let mut blocks: Vec<(usize, &str)> = Vec::new();
    for caps in ENTRY_RE.captures_iter(xml) {
        if let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) {
            blocks.push((whole.start(), inner.as_str()));
        }
    }
    for caps in ITEM_RE.captures_iter(xml) {
        if let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) {
            blocks.push((whole.start(), inner.as_str()));
        }
    }
    blocks.sort_by_key(|(start, _)| *start);

    blocks
        .into_iter()
        .map(|(_, content)| {
            let title = tag_content(content, "title").unwrap_or_else(|| "Untitled".to_string());
            let description = tag_content(content, "summary")
                .or_else(|| tag_content(content, "description"))
                .or_else(|| tag_content(content, "content"))
                .unwrap_or_default();
            let pub_date = tag_content(content, "updated")
                .or_else(|| tag_content(content, "pubDate"))
                .or_else(|| tag_content(content, "published"));

            RawEntry {
                title: strip_html(&title),
                url: link_href(content),
                description: strip_html(&description),
                pub_date,
                categories: categories(content),
                category: None,
                tags: None,
            }
        })
        .collect()
}

/// Astro Paper themed variant: first category becomes the primary category,
/// the rest become tags, and `categories` is rewritten as `[category, tags...]`.
fn parse_astro_paper(xml: &str) -> Vec<RawEntry> {
    parse_feed(xml)
        .into_iter()
        .map(|mut entry| {
            let mut cleaned = entry
                .categories
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty());

            let category = cleaned
                .next()
                .unwrap_or_else(|| "Uncategorized".to_string());
            let tags: Vec<String> = cleaned.collect();

            entry.categories = std::iter::once(category.clone())
                .chain(tags.iter().cloned())
                .collect();
            entry.category = Some(category);
            entry.tags = Some(tags);
            entry
        })
        .collect()
}
