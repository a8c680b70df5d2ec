//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sl_core::domain::entities::user::{User, UserType};
use sl_core::errors::DomainError;
use sl_core::repositories::UserRepository;

const USER_COLUMNS: &str = r#"
    id, email, hashed_password, full_name, user_type, public_id,
    employer_number, company_handle, is_active, is_verified, phone_number,
    location, bio, company_name, company_website, company_size,
    created_at, updated_at, last_login_at
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn internal(context: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

/// Convert a database row to a User entity
pub(crate) fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
    let id: String = row.try_get("id").map_err(|e| internal("Failed to get id", e))?;
    let user_type_str: String = row
        .try_get("user_type")
        .map_err(|e| internal("Failed to get user_type", e))?;
    let user_type = UserType::parse(&user_type_str)
        .ok_or_else(|| internal("Unknown user type", &user_type_str))?;

    Ok(User {
        id: Uuid::parse_str(&id).map_err(|e| internal("Invalid user UUID", e))?,
        email: row
            .try_get("email")
            .map_err(|e| internal("Failed to get email", e))?,
        hashed_password: row
            .try_get("hashed_password")
            .map_err(|e| internal("Failed to get hashed_password", e))?,
        full_name: row
            .try_get("full_name")
            .map_err(|e| internal("Failed to get full_name", e))?,
        user_type,
        public_id: row
            .try_get("public_id")
            .map_err(|e| internal("Failed to get public_id", e))?,
        employer_number: row
            .try_get("employer_number")
            .map_err(|e| internal("Failed to get employer_number", e))?,
        company_handle: row
            .try_get("company_handle")
            .map_err(|e| internal("Failed to get company_handle", e))?,
        is_active: row
            .try_get("is_active")
            .map_err(|e| internal("Failed to get is_active", e))?,
        is_verified: row
            .try_get("is_verified")
            .map_err(|e| internal("Failed to get is_verified", e))?,
        phone_number: row
            .try_get("phone_number")
            .map_err(|e| internal("Failed to get phone_number", e))?,
        location: row
            .try_get("location")
            .map_err(|e| internal("Failed to get location", e))?,
        bio: row.try_get("bio").map_err(|e| internal("Failed to get bio", e))?,
        company_name: row
            .try_get("company_name")
            .map_err(|e| internal("Failed to get company_name", e))?,
        company_website: row
            .try_get("company_website")
            .map_err(|e| internal("Failed to get company_website", e))?,
        company_size: row
            .try_get("company_size")
            .map_err(|e| internal("Failed to get company_size", e))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| internal("Failed to get created_at", e))?,
        updated_at: row
            .try_get::<DateTime<Utc>, _>("updated_at")
            .map_err(|e| internal("Failed to get updated_at", e))?,
        last_login_at: row
            .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
            .map_err(|e| internal("Failed to get last_login_at", e))?,
    })
}

fn count_from_row(row: &sqlx::mysql::MySqlRow) -> Result<i64, DomainError> {
    row.try_get("count")
        .map_err(|e| internal("Failed to get count", e))
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find user by id", e))?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find user by email", e))?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to check email existence", e))?;
        Ok(count_from_row(&row)? > 0)
    }

    async fn exists_by_public_id(&self, public_id: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM users WHERE public_id = ?")
            .bind(public_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to check public id existence", e))?;
        Ok(count_from_row(&row)? > 0)
    }

    async fn exists_by_employer_number(
        &self,
        employer_number: i32,
    ) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM users WHERE employer_number = ?")
            .bind(employer_number)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to check employer number existence", e))?;
        Ok(count_from_row(&row)? > 0)
    }

    async fn exists_by_company_handle(&self, handle: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM users WHERE company_handle = ?")
            .bind(handle)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to check company handle existence", e))?;
        Ok(count_from_row(&row)? > 0)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, hashed_password, full_name, user_type, public_id,
                employer_number, company_handle, is_active, is_verified,
                phone_number, location, bio, company_name, company_website,
                company_size, created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.hashed_password)
            .bind(&user.full_name)
            .bind(user.user_type.as_str())
            .bind(&user.public_id)
            .bind(user.employer_number)
            .bind(&user.company_handle)
            .bind(user.is_active)
            .bind(user.is_verified)
            .bind(&user.phone_number)
            .bind(&user.location)
            .bind(&user.bio)
            .bind(&user.company_name)
            .bind(&user.company_website)
            .bind(&user.company_size)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.as_database_error()
                    .map_or(false, |db| db.is_unique_violation())
                {
                    DomainError::Conflict {
                        resource: format!("user email {}", user.email),
                    }
                } else {
                    internal("Failed to create user", e)
                }
            })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET email = ?, hashed_password = ?, full_name = ?, user_type = ?,
                public_id = ?, employer_number = ?, company_handle = ?,
                is_active = ?, is_verified = ?, phone_number = ?, location = ?,
                bio = ?, company_name = ?, company_website = ?, company_size = ?,
                updated_at = ?, last_login_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.hashed_password)
            .bind(&user.full_name)
            .bind(user.user_type.as_str())
            .bind(&user.public_id)
            .bind(user.employer_number)
            .bind(&user.company_handle)
            .bind(user.is_active)
            .bind(user.is_verified)
            .bind(&user.phone_number)
            .bind(&user.location)
            .bind(&user.bio)
            .bind(&user.company_name)
            .bind(&user.company_website)
            .bind(&user.company_size)
            .bind(Utc::now())
            .bind(user.last_login_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("user"));
        }
        Ok(user)
    }

    async fn update_last_login(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET last_login_at = ?, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to update last login", e))?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }
}
