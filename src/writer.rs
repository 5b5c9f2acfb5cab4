//! Snapshot writer: serializes the per-locale post lists as one
//! pretty-printed JSON document.

use crate::feed::Post;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Write the locale → posts mapping to `path` as pretty-printed JSON.
///
/// Locales appear in the order given (serde_json's `preserve_order` keeps
/// map insertion order). Parent directories are created as needed; an
/// existing file is overwritten unconditionally. Called exactly once, after
/// all locales are fully processed, so the consumer never observes a
/// partially built snapshot from an interleaved writer.
pub fn write(path: &Path, locales: &[(String, Vec<Post>)]) -> Result<(), WriteError> {
    let mut document = serde_json::Map::new();
    for (locale, posts) in locales {
        document.insert(locale.clone(), serde_json::to_value(posts)?);
    }
    let json = serde_json::to_string_pretty(&serde_json::Value::Object(document))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    std::fs::write(path, json).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{normalize, RawEntry};

    fn sample_posts(locale: &str) -> Vec<Post> {
        let entry = RawEntry {
            title: "Title".to_string(),
            url: "https://example.com/post".to_string(),
            description: "Desc".to_string(),
            pub_date: Some("2024-01-02T00:00:00Z".to_string()),
            categories: vec!["Tech".to_string()],
            category: None,
            tags: None,
        };
        normalize(locale, vec![entry], 4)
    }

    #[test]
    fn test_written_document_round_trips() {
        let dir = std::env::temp_dir().join("feedsnap_writer_roundtrip");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rss-posts.json");

        let locales = vec![
            ("zh_CN".to_string(), Vec::new()),
            ("en_US".to_string(), sample_posts("en_US")),
        ];
        write(&path, &locales).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["zh_CN"].as_array().unwrap().len(), 0);
        let posts = value["en_US"].as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["title"], "Title");
        assert_eq!(posts[0]["pubDate"], "2024-01-02T00:00:00.000Z");
        assert_eq!(posts[0]["overlayColor"], "bg-black");
        assert_eq!(posts[0]["overlayOpacity"], "bg-opacity-70");
        assert_eq!(posts[0]["isRSS"], true);
        assert_eq!(posts[0]["category"], "Tech");
        // pretty-printed output, not a single line
        assert!(content.lines().count() > 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_locale_order_is_preserved() {
        let dir = std::env::temp_dir().join("feedsnap_writer_order");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rss-posts.json");

        // zh_CN first even though en_US sorts before it alphabetically
        let locales = vec![
            ("zh_CN".to_string(), Vec::new()),
            ("en_US".to_string(), Vec::new()),
        ];
        write(&path, &locales).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let zh = content.find("\"zh_CN\"").unwrap();
        let en = content.find("\"en_US\"").unwrap();
        assert!(zh < en);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let dir = std::env::temp_dir().join("feedsnap_writer_overwrite");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rss-posts.json");
        std::fs::write(&path, "{\"stale\": true}").unwrap();

        write(&path, &[("en_US".to_string(), Vec::new())]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        assert!(content.contains("en_US"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_parent_directories_are_created() {
        let dir = std::env::temp_dir().join("feedsnap_writer_mkdirs");
        std::fs::remove_dir_all(&dir).ok();
        let path = dir.join("src").join("data").join("rss-posts.json");

        write(&path, &[("en_US".to_string(), Vec::new())]).unwrap();
        assert!(path.exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
