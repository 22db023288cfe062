/// Bearer token key generation
///
/// Auth tokens are opaque random keys bound to a single user. They are the
/// sole authentication credential for the API: clients send them as
/// `Authorization: Token <key>` and the server resolves the key to its
/// owning user. Keys never rotate or expire.
///
/// # Key Format
///
/// Keys follow the pattern `tb_{40_chars}` (43 chars total):
/// - Prefix: "tb_" (3 chars)
/// - Random part: 40 alphanumeric chars (base62: [A-Za-z0-9])
///
/// # Example
///
/// ```
/// use taskbook_shared::auth::token::{generate_token_key, validate_token_key_format};
///
/// let key = generate_token_key();
/// assert!(key.starts_with("tb_"));
/// assert_eq!(key.len(), 43);
/// assert!(validate_token_key_format(&key));
/// ```

use rand::Rng;

/// Length of the random part of a token key (characters)
const KEY_RANDOM_LENGTH: usize = 40;

/// Token key prefix
const KEY_PREFIX: &str = "tb_";

/// Total length of a token key (prefix + random)
pub const TOKEN_KEY_LENGTH: usize = KEY_PREFIX.len() + KEY_RANDOM_LENGTH;

/// Generates a new token key
///
/// Uses `rand::thread_rng()`; the key space is 62^40, far beyond guessing
/// range.
pub fn generate_token_key() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    let random: String = (0..KEY_RANDOM_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();

    format!("{}{}", KEY_PREFIX, random)
}

/// Validates token key format
///
/// Checks prefix, length and that the random part is alphanumeric. This is
/// a cheap pre-filter before the database lookup; it never replaces it.
///
/// # Example
///
/// ```
/// use taskbook_shared::auth::token::{generate_token_key, validate_token_key_format};
///
/// assert!(validate_token_key_format(&generate_token_key()));
/// assert!(!validate_token_key_format(""));
/// assert!(!validate_token_key_format("tb_short"));
/// assert!(!validate_token_key_format("wrong_prefix_aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
/// ```
pub fn validate_token_key_format(key: &str) -> bool {
    if key.len() != TOKEN_KEY_LENGTH {
        return false;
    }

    if !key.starts_with(KEY_PREFIX) {
        return false;
    }

    let random_part = &key[KEY_PREFIX.len()..];
    random_part.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_key() {
        let key1 = generate_token_key();
        let key2 = generate_token_key();

        assert!(key1.starts_with("tb_"));
        assert_eq!(key1.len(), TOKEN_KEY_LENGTH);

        // Should be random
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_generated_keys_are_alphanumeric() {
        let key = generate_token_key();
        let random_part = &key[KEY_PREFIX.len()..];
        assert!(random_part.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_validate_token_key_format() {
        assert!(validate_token_key_format(&generate_token_key()));

        // Wrong prefix
        assert!(!validate_token_key_format(
            "xx_aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
        ));

        // Too short
        assert!(!validate_token_key_format("tb_short"));

        // Too long
        assert!(!validate_token_key_format(
            "tb_aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"
        ));

        // Special characters in random part
        assert!(!validate_token_key_format(
            "tb_aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa!"
        ));

        // Empty
        assert!(!validate_token_key_format(""));
    }
}
