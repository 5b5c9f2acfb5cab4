//! Deduplication, ranking, and shaping of parsed entries into final posts.

use crate::feed::parser::RawEntry;
use crate::util::short_hash;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::HashSet;

const MAX_DESCRIPTION_CHARS: usize = 200;

/// Final output record for one featured post.
///
/// Field names are contractual with the page-build consumer of the JSON
/// snapshot; renames here would break the homepage at build time.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub categories: Vec<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    #[serde(rename = "overlayColor")]
    pub overlay_color: String,
    #[serde(rename = "overlayOpacity")]
    pub overlay_opacity: String,
    #[serde(rename = "isRSS")]
    pub is_rss: bool,
}

/// Parse the date formats feeds actually emit: RFC 2822 (`pubDate`),
/// RFC 3339 (`updated`/`published`), and a couple of sloppy naive fallbacks.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Ellipsis-truncate a description to 200 characters. Char-based, so a
/// multi-byte boundary can never split.
fn truncate_description(text: &str) -> String {
    if text.chars().count() > MAX_DESCRIPTION_CHARS {
        let cut: String = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

/// Deduplicate, rank, truncate, and shape a locale's entries.
///
/// 1. Keep the first entry seen per distinct `url` (encounter order across
///    the locale's feeds).
/// 2. Stable sort by publish date descending; missing or unparseable dates
///    rank as the Unix epoch, i.e. oldest.
/// 3. Keep the first `limit` entries.
/// 4. Shape each survivor: deterministic id and image seed, 200-char
///    description, ISO-8601 date, category/tags split, fixed display hints.
pub fn normalize(locale: &str, entries: Vec<RawEntry>, limit: usize) -> Vec<Post> {
    let mut seen = HashSet::new();
    let deduped: Vec<RawEntry> = entries
        .into_iter()
        .filter(|e| seen.insert(e.url.clone()))
        .collect();

    let mut dated: Vec<(RawEntry, DateTime<Utc>)> = deduped
        .into_iter()
        .map(|e| {
            let when = e
                .pub_date
                .as_deref()
                .and_then(parse_date)
                .unwrap_or(DateTime::UNIX_EPOCH);
            (e, when)
        })
        .collect();
    // Vec::sort_by is stable, so equal dates keep encounter order
    dated.sort_by(|a, b| b.1.cmp(&a.1));
    dated.truncate(limit);

    dated
        .into_iter()
        .enumerate()
        .map(|(index, (entry, _))| shape(locale, index, entry))
        .collect()
}

fn shape(locale: &str, index: usize, entry: RawEntry) -> Post {
    let seed = short_hash(&format!("{}{}", entry.url, entry.title));
    let id_hash = short_hash(&entry.url);

    let category = entry
        .category
        .clone()
        .or_else(|| entry.categories.first().cloned());
    let tags: Vec<String> = entry
        .tags
        .clone()
        .unwrap_or_else(|| entry.categories.iter().skip(1).cloned().collect());
    let categories: Vec<String> = category
        .clone()
        .into_iter()
        .chain(tags.iter().cloned())
        .filter(|c| !c.is_empty())
        .collect();

    let pub_date = entry
        .pub_date
        .as_deref()
        .and_then(parse_date)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true));

    Post {
        id: format!("rss-{locale}-{index}-{id_hash}"),
        title: entry.title,
        description: truncate_description(&entry.description),
        url: entry.url,
        image: format!("https://picsum.photos/seed/{seed}/600/350.jpg"),
        pub_date,
        categories,
        category,
        tags,
        overlay_color: "bg-black".to_string(),
        overlay_opacity: "bg-opacity-70".to_string(),
        is_rss: true,
    }
}
