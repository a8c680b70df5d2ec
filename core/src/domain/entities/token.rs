//! JWT token types for stateless authentication.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, TokenError};

/// Kind of JWT issued by the token service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims carried by both access and refresh tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's UUID as a string
    pub sub: String,

    /// User type ("employee" or "employer"), present on access tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,

    /// Token kind
    pub token_type: TokenType,

    /// Unique token identifier
    pub jti: String,

    /// Issued-at (seconds since epoch)
    pub iat: i64,

    /// Expiry (seconds since epoch)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl Claims {
    /// Parse the subject claim back into a user UUID
    pub fn user_id(&self) -> Result<Uuid, DomainError> {
        Uuid::parse_str(&self.sub).map_err(|_| DomainError::Token(TokenError::InvalidClaims))
    }

    /// Checks whether this is an access token
    pub fn is_access_token(&self) -> bool {
        self.token_type == TokenType::Access
    }
}

/// Access/refresh token pair returned on successful authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token
    pub access_token: String,

    /// Long-lived refresh token
    pub refresh_token: String,

    /// Token scheme for the Authorization header
    pub token_type: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    /// Create a bearer token pair
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "bearer".to_string(),
            expires_in,
        }
    }
}
