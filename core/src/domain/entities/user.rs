//! User entity representing a registered account in the SunLighter system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the type of user in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// An employee who registers employment records and issues codes
    Employee,
    /// An employer who redeems codes to verify employment
    Employer,
}

impl UserType {
    /// Convert to string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Employer => "employer",
        }
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "employee" => Some(Self::Employee),
            "employer" => Some(Self::Employer),
            _ => None,
        }
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address (globally unique)
    pub email: String,

    /// Bcrypt-hashed password
    pub hashed_password: String,

    /// Display name
    pub full_name: String,

    /// Type of user (Employee or Employer)
    pub user_type: UserType,

    /// Public alphanumeric identifier for employees (e.g. "Z2DU79")
    pub public_id: Option<String>,

    /// Internal numeric identifier for employers (100000-999999)
    pub employer_number: Option<i32>,

    /// Public handle for employers, derived from the company name
    pub company_handle: Option<String>,

    /// Whether the account is active
    pub is_active: bool,

    /// Whether the account email has been verified
    pub is_verified: bool,

    /// Contact phone number
    pub phone_number: Option<String>,

    /// Free-form location
    pub location: Option<String>,

    /// Short profile text
    pub bio: Option<String>,

    /// Company name (employers)
    pub company_name: Option<String>,

    /// Company website (employers)
    pub company_website: Option<String>,

    /// Company size bracket (employers)
    pub company_size: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new User with the given credentials
    pub fn new(
        email: String,
        hashed_password: String,
        full_name: String,
        user_type: UserType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            hashed_password,
            full_name,
            user_type,
            public_id: None,
            employer_number: None,
            company_handle: None,
            is_active: true,
            is_verified: false,
            phone_number: None,
            location: None,
            bio: None,
            company_name: None,
            company_website: None,
            company_size: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Checks if the user is an employee
    pub fn is_employee(&self) -> bool {
        self.user_type == UserType::Employee
    }

    /// Checks if the user is an employer
    pub fn is_employer(&self) -> bool {
        self.user_type == UserType::Employer
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_creation() {
        let user = User::new(
            "alice@example.com".to_string(),
            "$2b$12$hash".to_string(),
            "Alice Doe".to_string(),
            UserType::Employee,
        );

        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.user_type, UserType::Employee);
        assert!(user.is_active);
        assert!(!user.is_verified);
        assert!(user.public_id.is_none());
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_user_type_roundtrip() {
        assert_eq!(UserType::parse("employee"), Some(UserType::Employee));
        assert_eq!(UserType::parse("employer"), Some(UserType::Employer));
        assert_eq!(UserType::parse("admin"), None);
        assert_eq!(UserType::Employer.as_str(), "employer");
    }

    #[test]
    fn test_role_predicates() {
        let employee = User::new(
            "a@b.com".into(),
            "h".into(),
            "A".into(),
            UserType::Employee,
        );
        assert!(employee.is_employee());
        assert!(!employee.is_employer());
    }

    #[test]
    fn test_update_last_login() {
        let mut user = User::new(
            "a@b.com".into(),
            "h".into(),
            "A".into(),
            UserType::Employer,
        );
        assert!(user.last_login_at.is_none());
        user.update_last_login();
        assert!(user.last_login_at.is_some());
    }
}
