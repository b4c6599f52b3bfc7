//! Opaque API token generation and hashing.
//!
//! Tokens are random hex strings sent back to the caller once; only their
//! SHA-256 hash is stored server-side so a database leak does not
//! compromise active credentials. Re-authenticating rotates the token.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a fresh opaque API token.
///
/// Returns a tuple of `(plaintext_token, sha256_hex_hash)`. The plaintext
/// goes to the client in the `/api-token-auth/` response; only the hash
/// should be persisted.
pub fn generate_token() -> (String, String) {
    // Two UUIDs' worth of randomness, hex-encoded (64 chars).
    let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let hash = hash_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a token.
///
/// Use this to compare an incoming `Authorization: Token <v>` credential
/// against the stored hash.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_hash_is_stable() {
        let (plaintext, hash) = generate_token();
        assert_eq!(hash, hash_token(&plaintext));
        // SHA-256 hex digest is always 64 chars.
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_tokens_are_unique() {
        let (a, _) = generate_token();
        let (b, _) = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }
}
