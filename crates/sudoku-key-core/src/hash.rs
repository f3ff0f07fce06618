//! Iterated SHA-256.
//!
//! Both halves of the derived key come out of [`repeated_hash`]. The first
//! round hashes `text ‖ salt`; every further round hashes the previous
//! digest alone.

use sha2::{Digest, Sha256};

/// SHA-256 output size in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Salt length used by both key halves.
pub const SALT_SIZE: usize = 16;

/// The salt is constant and all zero, so keys depend on the passphrase only.
pub const FIXED_SALT: [u8; SALT_SIZE] = [0u8; SALT_SIZE];

pub type HashDigest = [u8; DIGEST_SIZE];

/// Compute SHA-256 of arbitrary data.
pub fn sha256(data: &[u8]) -> HashDigest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash `text ‖ salt`, then re-hash the digest `iterations - 1` more times.
///
/// An iteration count of 0 behaves like 1. Callers that take the count from
/// user input reject 0 up front (see [`crate::KeyParams::validate`]).
pub fn repeated_hash(text: &[u8], iterations: u16, salt: &[u8]) -> HashDigest {
    let mut hasher = Sha256::new();
    hasher.update(text);
    hasher.update(salt);
    let mut digest: HashDigest = hasher.finalize().into();

    for _ in 1..iterations {
        digest = sha256(&digest);
    }
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn sha256_abc() {
        // NIST: SHA-256("abc") = ba7816bf...
        assert_eq!(
            hex(&sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn single_round_hashes_text_then_salt() {
        let salt = [7u8; SALT_SIZE];
        let mut joined = b"passphrase".to_vec();
        joined.extend_from_slice(&salt);
        assert_eq!(repeated_hash(b"passphrase", 1, &salt), sha256(&joined));
    }

    #[test]
    fn empty_text_with_empty_salt_is_plain_sha256() {
        assert_eq!(
            hex(&repeated_hash(b"", 1, &[])),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn extra_rounds_rehash_previous_digest() {
        let first = repeated_hash(b"key", 1, &FIXED_SALT);
        let mut expected = first;
        for _ in 0..4 {
            expected = sha256(&expected);
        }
        assert_eq!(repeated_hash(b"key", 5, &FIXED_SALT), expected);
    }

    #[test]
    fn zero_iterations_match_one() {
        assert_eq!(
            repeated_hash(b"key", 0, &FIXED_SALT),
            repeated_hash(b"key", 1, &FIXED_SALT)
        );
    }

    #[test]
    fn salt_changes_digest() {
        assert_ne!(
            repeated_hash(b"key", 9, &FIXED_SALT),
            repeated_hash(b"key", 9, &[1u8; SALT_SIZE])
        );
    }
}
