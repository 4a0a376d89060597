//! Share link token generation.

use rand::RngCore;
use rand::rngs::OsRng;

/// Fewest random bytes a token may carry.
const MIN_TOKEN_BYTES: usize = 16;

/// Generates share tokens and the public URLs that carry them.
#[derive(Debug, Clone)]
pub struct LinkService {
    token_bytes: usize,
}

impl LinkService {
    /// Creates a link service issuing tokens of `token_bytes` random bytes.
    pub fn new(token_bytes: usize) -> Self {
        Self {
            token_bytes: token_bytes.max(MIN_TOKEN_BYTES),
        }
    }

    /// Generates a cryptographically secure random token, hex-encoded.
    pub fn generate_token(&self) -> String {
        let mut bytes = vec![0u8; self.token_bytes];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Public URL of a shared folder.
    pub fn folder_url(&self, origin: &str, token: &str) -> String {
        format!("{}/shared/folder/{token}", origin.trim_end_matches('/'))
    }
}

impl Default for LinkService {
    fn default() -> Self {
        Self::new(32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_hex_and_distinct() {
        let links = LinkService::default();
        let a = links.generate_token();
        let b = links.generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_token_config_is_raised() {
        assert_eq!(LinkService::new(4).generate_token().len(), 32);
    }

    #[test]
    fn test_folder_url() {
        let links = LinkService::default();
        assert_eq!(
            links.folder_url("https://drive.example.com/", "abc"),
            "https://drive.example.com/shared/folder/abc"
        );
    }
}
