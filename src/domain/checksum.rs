//! Content checksums

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of raw bytes.
///
/// Images are identified by the checksum of their pixel buffer: the same picture
/// re-encoded by another application yields different encoded bytes but the same pixels.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_digest() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let digest = sha256_hex(&[0xff, 0x00, 0x10]);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn different_bytes_differ() {
        assert_ne!(sha256_hex(&[1, 2, 3]), sha256_hex(&[3, 2, 1]));
    }
}
