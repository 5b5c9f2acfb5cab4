//! feedsnap — build-time RSS/Atom aggregator.
//!
//! Fetches the feeds configured per locale, normalizes the entries into
//! "featured post" records, and writes one JSON snapshot consumed by the
//! static-site build. Always a batch run: every invocation refetches all
//! feeds and rewrites the snapshot from scratch.

pub mod config;
pub mod feed;
pub mod pipeline;
pub mod util;
pub mod writer;
