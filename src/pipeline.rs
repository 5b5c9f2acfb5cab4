//! Pipeline orchestration: config → fetch → parse → normalize → write.
//!
//! Locales are processed one after another, and within a locale the feeds
//! are fetched sequentially. Failures are contained at the feed boundary: a
//! feed that cannot be fetched or parsed contributes zero entries and the
//! run continues. Only the final snapshot write can fail the whole run.

use crate::config::{self, FeedSource, Settings};
use crate::feed::{build_client, fetch_with_retry, normalize, FetchError, Post, RawEntry, RetryPolicy};
use crate::writer;
use anyhow::{Context, Result};

/// Run the full ingestion pipeline and write the snapshot.
///
/// Returns an error only for run-fatal conditions (HTTP client construction
/// or the output write); per-feed failures are logged and absorbed.
pub async fn run(settings: &Settings) -> Result<()> {
    let client = build_client(&settings.user_agent).context("Failed to build HTTP client")?;
    let policy = RetryPolicy {
        retries: settings.max_retries,
        timeout: settings.fetch_timeout,
    };

    let mut snapshot: Vec<(String, Vec<Post>)> = Vec::new();
    for locale in &settings.locales {
        let posts = process_locale(&client, &policy, settings, locale).await;
        tracing::info!(locale = %locale, posts = posts.len(), "Locale processed");
        snapshot.push((locale.clone(), posts));
    }

    writer::write(&settings.output_path, &snapshot)
        .with_context(|| format!("Failed to write {}", settings.output_path.display()))?;
    Ok(())
}

/// Process one locale: read its feed config, ingest every feed behind a
/// per-feed fault boundary, then dedup/rank/shape the combined entries.
async fn process_locale(
    client: &reqwest::Client,
    policy: &RetryPolicy,
    settings: &Settings,
    locale: &str,
) -> Vec<Post> {
    let config = config::load_feed_config(&settings.i18n_dir, locale);
    if config.feeds.is_empty() {
        tracing::info!(locale = locale, "No feeds configured, skipping");
        return Vec::new();
    }

    tracing::info!(locale = locale, feeds = config.feeds.len(), "Fetching feeds");

    let mut entries: Vec<RawEntry> = Vec::new();
    for feed in &config.feeds {
        match ingest_feed(client, policy, feed).await {
            Ok(items) => {
                tracing::info!(url = %feed.url, entries = items.len(), "Feed parsed");
                entries.extend(items);
            }
            Err(e) => {
                // One bad feed must not drop the locale's other results
                tracing::error!(locale = locale, url = %feed.url, error = %e, "Feed failed, continuing");
            }
        }
    }

    normalize(locale, entries, config.limit)
}

/// Fetch and parse a single feed. The fault boundary in
/// [`process_locale`] catches everything this returns.
async fn ingest_feed(
    client: &reqwest::Client,
    policy: &RetryPolicy,
    feed: &FeedSource,
) -> Result<Vec<RawEntry>, FetchError> {
    let xml = fetch_with_retry(client, &feed.url, policy).await?;
    Ok(feed.parser.parse(&xml))
}
