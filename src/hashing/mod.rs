//! BLAKE3 helpers for dataset fingerprints and suggestion cache keys.

/// Fingerprints raw taxonomy bytes so a reload can detect unchanged datasets.
#[inline]
pub fn fingerprint(bytes: &[u8]) -> [u8; 32] {
    *blake3::hash(bytes).as_bytes()
}

/// Hashes a product's title and description into a suggestion cache key.
///
/// A separator byte prevents `("ab", "c")` and `("a", "bc")` from colliding.
pub fn hash_product(title: &str, description: &str) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(title.as_bytes());
    hasher.update(&[0x1f]);
    hasher.update(description.as_bytes());
    *hasher.finalize().as_bytes()
}

/// Lowercase hex rendering of the first 8 bytes, for log fields.
pub fn short_hex(hash: &[u8; 32]) -> String {
    hash[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_determinism() {
        let data = br#"[{"id": 1, "name": "Apparel"}]"#;
        assert_eq!(fingerprint(data), fingerprint(data));
    }

    #[test]
    fn test_fingerprint_sensitivity() {
        assert_ne!(fingerprint(b"Apparel"), fingerprint(b"apparel"));
        assert_ne!(fingerprint(b""), fingerprint(b" "));
    }

    #[test]
    fn test_hash_product_separator_prevents_ambiguity() {
        let hash1 = hash_product("ab", "c");
        let hash2 = hash_product("a", "bc");
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_hash_product_description_sensitivity() {
        let plain = hash_product("Chef Knife", "");
        let described = hash_product("Chef Knife", "8 inch stainless blade");
        assert_ne!(plain, described);
        assert_eq!(plain, hash_product("Chef Knife", ""));
    }

    #[test]
    fn test_short_hex() {
        let hash = [0xabu8; 32];
        assert_eq!(short_hex(&hash), "abababababababab");
        assert_eq!(short_hex(&fingerprint(b"x")).len(), 16);
    }
}
