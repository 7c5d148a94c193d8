//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT and password settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signing access tokens.
    pub jwt_secret: String,
    /// Access token lifetime in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// Minimum accepted password length.
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_min_password_length() -> usize {
    8
}
