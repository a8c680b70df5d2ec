//! User response DTO.
//!
//! The password hash never leaves the server; this DTO is the only user
//! shape handlers return.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sl_core::domain::entities::user::{User, UserType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_handle: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            user_type: user.user_type,
            public_id: user.public_id,
            employer_number: user.employer_number,
            company_handle: user.company_handle,
            is_active: user.is_active,
            is_verified: user.is_verified,
            phone_number: user.phone_number,
            location: user.location,
            bio: user.bio,
            company_name: user.company_name,
            company_website: user.company_website,
            company_size: user.company_size,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}
