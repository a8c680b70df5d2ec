//! Main token service implementation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use sl_shared::config::JwtConfig;

use crate::domain::entities::token::{Claims, TokenPair, TokenType};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};

/// Service for issuing and verifying JWT tokens
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service from JWT configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generates an access/refresh token pair for a user
    pub fn generate_token_pair(&self, user: &User) -> Result<TokenPair, DomainError> {
        let access_token = self.generate_token(
            user,
            TokenType::Access,
            self.config.access_token_expiry,
        )?;
        let refresh_token = self.generate_token(
            user,
            TokenType::Refresh,
            self.config.refresh_token_expiry,
        )?;
        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry,
        ))
    }

    /// Verifies an access token and returns its claims
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(DomainError::Token(TokenError::WrongTokenType));
        }
        Ok(claims)
    }

    /// Verifies a refresh token and returns its claims
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.verify_token(token)?;
        if claims.token_type != TokenType::Refresh {
            return Err(DomainError::Token(TokenError::WrongTokenType));
        }
        Ok(claims)
    }

    fn generate_token(
        &self,
        user: &User,
        token_type: TokenType,
        expiry_seconds: i64,
    ) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            user_type: match token_type {
                TokenType::Access => Some(user.user_type.as_str().to_string()),
                TokenType::Refresh => None,
            },
            token_type,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry_seconds)).timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to encode JWT");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let error = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenError::InvalidSignature
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => TokenError::InvalidTokenFormat,
                    _ => TokenError::InvalidClaims,
                };
                DomainError::Token(error)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::UserType;

    fn service() -> TokenService {
        TokenService::new(JwtConfig::new("test-secret"))
    }

    fn sample_user(user_type: UserType) -> User {
        User::new(
            "alice@example.com".to_string(),
            "hash".to_string(),
            "Alice Doe".to_string(),
            user_type,
        )
    }

    #[test]
    fn test_access_token_roundtrip() {
        let service = service();
        let user = sample_user(UserType::Employee);

        let pair = service.generate_token_pair(&user).unwrap();
        let claims = service.verify_access_token(&pair.access_token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.user_type.as_deref(), Some("employee"));
        assert_eq!(claims.iss, "sunlighter");
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let service = service();
        let user = sample_user(UserType::Employer);

        let pair = service.generate_token_pair(&user).unwrap();
        let claims = service.verify_refresh_token(&pair.refresh_token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert!(claims.user_type.is_none());
    }

    #[test]
    fn test_token_type_enforced() {
        let service = service();
        let user = sample_user(UserType::Employee);
        let pair = service.generate_token_pair(&user).unwrap();

        assert!(matches!(
            service.verify_access_token(&pair.refresh_token),
            Err(DomainError::Token(TokenError::WrongTokenType))
        ));
        assert!(matches!(
            service.verify_refresh_token(&pair.access_token),
            Err(DomainError::Token(TokenError::WrongTokenType))
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = service();
        let other = TokenService::new(JwtConfig::new("other-secret"));
        let user = sample_user(UserType::Employee);

        let pair = other.generate_token_pair(&user).unwrap();
        assert!(service.verify_access_token(&pair.access_token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = service();
        assert!(service.verify_access_token("not-a-jwt").is_err());
    }
}
