//! Runtime settings and per-locale feed configuration.
//!
//! Feed sources live inside each locale's i18n content file at the JSON path
//! `featuredPosts.rss`. A missing file, missing key, unreadable JSON, or
//! `enabled: false` all degrade to "no feeds configured" for that locale —
//! the locale then produces an empty result list rather than an error.

use crate::feed::ParserKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Result limit applied when a locale's config does not set one.
pub const DEFAULT_LIMIT: usize = 4;

/// Ambient constants for a pipeline run.
///
/// Passed by value into [`crate::pipeline::run`] so tests can override the
/// network knobs and paths without touching process-global state.
#[derive(Debug, Clone)]
pub struct Settings {
    /// User-Agent sent with every feed request.
    pub user_agent: String,
    /// Per-attempt fetch timeout.
    pub fetch_timeout: Duration,
    /// Maximum fetch attempts per feed.
    pub max_retries: u32,
    /// Locale codes to process, in output order.
    pub locales: Vec<String>,
    /// Directory holding `{locale}.json` i18n content files.
    pub i18n_dir: PathBuf,
    /// Path of the JSON snapshot consumed at page-build time.
    pub output_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: "feedsnap/0.1 (+https://github.com/feedsnap/feedsnap)".to_string(),
            fetch_timeout: Duration::from_secs(15),
            max_retries: 3,
            locales: vec!["zh_CN".to_string(), "en_US".to_string()],
            i18n_dir: PathBuf::from("i18n"),
            output_path: PathBuf::from("src/data/rss-posts.json"),
        }
    }
}

/// One configured feed: where to fetch and which parser variant to use.
#[derive(Debug, Clone)]
pub struct FeedSource {
    pub url: String,
    pub parser: ParserKind,
}

/// Resolved feed configuration for one locale.
#[derive(Debug, Clone, Default)]
pub struct FeedConfig {
    pub feeds: Vec<FeedSource>,
    pub limit: usize,
}

// Raw shapes of the i18n content file. Only the `featuredPosts.rss` subtree
// matters here; everything else in the file is presentation content.

#[derive(Debug, Deserialize)]
struct LocaleFile {
    #[serde(default, rename = "featuredPosts")]
    featured_posts: Option<FeaturedPosts>,
}

#[derive(Debug, Deserialize)]
struct FeaturedPosts {
    #[serde(default)]
    rss: Option<RssSection>,
}

#[derive(Debug, Deserialize)]
struct RssSection {
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    feeds: Vec<FeedEntry>,
    limit: Option<usize>,
}

fn default_enabled() -> bool {
    true
}

/// A feed entry is either a bare URL string (implying the default parser)
/// or an object naming a parser variant.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedEntry {
    Url(String),
    Detailed {
        url: String,
        #[serde(default)]
        parser: Option<String>,
    },
}

impl From<FeedEntry> for FeedSource {
    fn from(entry: FeedEntry) -> Self {
        match entry {
            FeedEntry::Url(url) => FeedSource {
                url,
                parser: ParserKind::Default,
            },
            FeedEntry::Detailed { url, parser } => FeedSource {
                url,
                parser: ParserKind::from_name(parser.as_deref().unwrap_or("default")),
            },
        }
    }
}

/// Load the feed configuration for one locale.
///
/// Never fails: every degraded case is logged and yields an empty
/// [`FeedConfig`], keeping a broken locale file from aborting the run.
pub fn load_feed_config(i18n_dir: &Path, locale: &str) -> FeedConfig {
    let path = i18n_dir.join(format!("{locale}.json"));

    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), locale = locale, "No locale file, no feeds configured");
            return FeedConfig::default();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), locale = locale, error = %e, "Failed to read locale file");
            return FeedConfig::default();
        }
    };

    let parsed: LocaleFile = match serde_json::from_str(&content) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(path = %path.display(), locale = locale, error = %e, "Invalid JSON in locale file");
            return FeedConfig::default();
        }
    };

    let Some(rss) = parsed.featured_posts.and_then(|fp| fp.rss) else {
        tracing::debug!(locale = locale, "No featuredPosts.rss section, no feeds configured");
        return FeedConfig::default();
    };

    if !rss.enabled {
        tracing::info!(locale = locale, "RSS feeds disabled for locale");
        return FeedConfig::default();
    }

    FeedConfig {
        feeds: rss.feeds.into_iter().map(FeedSource::from).collect(),
        limit: rss.limit.unwrap_or(DEFAULT_LIMIT),
    }
}
