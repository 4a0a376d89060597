//! Share link configuration.

use serde::{Deserialize, Serialize};

/// Settings for folder share links and presigned file URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Origin used to build public folder links when the caller supplies none.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// TTL of the presigned URL returned for a direct file download.
    #[serde(default = "default_file_url_ttl")]
    pub file_url_ttl_seconds: u64,
    /// Upper bound for any presigned URL TTL, regardless of share lifetime.
    #[serde(default = "default_max_presign_ttl")]
    pub max_presign_ttl_seconds: u64,
    /// Number of random bytes in a share token (hex-encoded, so twice as many chars).
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
            file_url_ttl_seconds: default_file_url_ttl(),
            max_presign_ttl_seconds: default_max_presign_ttl(),
            token_bytes: default_token_bytes(),
        }
    }
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_file_url_ttl() -> u64 {
    3600
}

fn default_max_presign_ttl() -> u64 {
    604_800 // 7 days, the S3 SigV4 ceiling
}

fn default_token_bytes() -> usize {
    32
}
