//! Small shared utilities.
//!
//! Currently just [`short_hash`], the deterministic digest behind post IDs
//! and placeholder-image seeds.

mod hash;

pub use hash::short_hash;
