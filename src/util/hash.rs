use md5::{Digest, Md5};

/// Deterministic 8-hex-character digest of a string.
///
/// Used for stable post identifiers and placeholder-image seeds, so repeated
/// runs over unchanged feeds produce byte-identical output. Collision
/// tolerance is fine here; this is not a security boundary.
pub fn short_hash(input: &str) -> String {
    let digest = Md5::digest(input.as_bytes());
    let hex = format!("{:x}", digest);
    hex[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let a = short_hash("https://example.com/post");
        let b = short_hash("https://example.com/post");
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_is_eight_hex_chars() {
        let h = short_hash("anything at all");
        assert_eq!(h.len(), 8);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_differs_for_different_input() {
        assert_ne!(short_hash("a"), short_hash("b"));
    }

    #[test]
    fn test_known_md5_prefix() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(short_hash(""), "d41d8cd9");
        // md5("hello") = 5d41402abc4b2a76b9719d911017c592
        assert_eq!(short_hash("hello"), "5d41402a");
    }
}
