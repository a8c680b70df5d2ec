//! JWT authentication configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("your-secret-key-change-in-production"),
            access_token_expiry: 1800,    // 30 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("sunlighter"),
            audience: String::from("sunlighter-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.secret = secret;
        }
        if let Ok(expiry) = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
            if let Ok(minutes) = expiry.parse::<i64>() {
                config.access_token_expiry = minutes * 60;
            }
        }
        if let Ok(expiry) = std::env::var("REFRESH_TOKEN_EXPIRE_DAYS") {
            if let Ok(days) = expiry.parse::<i64>() {
                config.refresh_token_expiry = days * 86400;
            }
        }
        config
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "your-secret-key-change-in-production"
    }
}
