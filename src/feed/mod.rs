//! Feed ingestion: fetching, parsing, and normalizing RSS/Atom documents.
//!
//! The module is organized into three submodules:
//!
//! - [`fetcher`] - HTTP retrieval with per-attempt timeout and exponential backoff
//! - [`parser`] - Permissive RSS 2.0 / Atom 1.0 entry extraction and parser variants
//! - [`normalizer`] - Deduplication, date ranking, and final record shaping

mod fetcher;
mod normalizer;
mod parser;

pub use fetcher::{build_client, fetch_with_retry, FetchError, RetryPolicy};
pub use normalizer::{normalize, Post};
pub use parser::{ParserKind, RawEntry};
