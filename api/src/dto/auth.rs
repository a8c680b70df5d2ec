//! Authentication request and response DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use sl_core::domain::entities::token::TokenPair;
use sl_core::domain::entities::user::UserType;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 255))]
    pub full_name: String,

    pub user_type: UserType,

    #[validate(length(max = 32))]
    pub phone_number: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    #[validate(length(max = 2000))]
    pub bio: Option<String>,

    #[validate(length(max = 255))]
    pub company_name: Option<String>,

    #[validate(url)]
    pub company_website: Option<String>,

    #[validate(length(max = 32))]
    pub company_size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<TokenPair> for AuthResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterRequest {
        RegisterRequest {
            email: "alice@example.com".to_string(),
            password: "correct horse battery staple".to_string(),
            full_name: "Alice Doe".to_string(),
            user_type: UserType::Employee,
            phone_number: None,
            location: None,
            bio: None,
            company_name: None,
            company_website: None,
            company_size: None,
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(valid_register().validate().is_ok());

        let mut bad_email = valid_register();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        let mut short_password = valid_register();
        short_password.password = "short".to_string();
        assert!(short_password.validate().is_err());

        let mut bad_website = valid_register();
        bad_website.company_website = Some("not a url".to_string());
        assert!(bad_website.validate().is_err());
    }

    #[test]
    fn test_user_type_deserializes_lowercase() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{
                "email": "hr@acme.com",
                "password": "hunter2hunter2",
                "full_name": "Bob HR",
                "user_type": "employer",
                "company_name": "Acme Corp"
            }"#,
        )
        .unwrap();
        assert_eq!(request.user_type, UserType::Employer);
    }
}
