//! Main authentication service implementation

use std::sync::Arc;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{User, UserType};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::identity;

/// Maximum attempts to find an unused public identifier before giving up
const MAX_ID_GENERATION_ATTEMPTS: u32 = 16;

/// Maximum counter-based de-dup suffixes tried for a company handle before
/// falling back to a random suffix
const MAX_HANDLE_COUNTER: u32 = 999;

/// Input for account registration
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub user_type: UserType,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub company_size: Option<String>,
}

/// Authentication service handling registration, login, and token refresh
pub struct AuthService<U: UserRepository> {
    user_repository: Arc<U>,
    token_service: Arc<TokenService>,
}

impl<U: UserRepository> AuthService<U> {
    /// Create a new authentication service
    pub fn new(user_repository: Arc<U>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_repository,
            token_service,
        }
    }

    /// Register a new account and log it in
    ///
    /// Generates the role-specific public identifiers, hashes the password,
    /// persists the user, and returns the user with a fresh token pair.
    pub async fn register(&self, input: RegisterInput) -> DomainResult<(User, TokenPair)> {
        if self.user_repository.exists_by_email(&input.email).await? {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }

        let hashed_password = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)
            .map_err(|_| DomainError::Auth(AuthError::PasswordHashingFailed))?;

        let mut user = User::new(
            input.email.clone(),
            hashed_password,
            input.full_name,
            input.user_type,
        );
        user.phone_number = input.phone_number;
        user.location = input.location;
        user.bio = input.bio;
        user.company_name = input.company_name.clone();
        user.company_website = input.company_website;
        user.company_size = input.company_size;

        match input.user_type {
            UserType::Employee => {
                user.public_id = Some(self.allocate_public_id().await?);
            }
            UserType::Employer => {
                user.employer_number = Some(self.allocate_employer_number().await?);
                if let Some(company_name) = &input.company_name {
                    user.company_handle = Some(self.allocate_company_handle(company_name).await?);
                }
            }
        }

        let user = self.user_repository.create(user).await.map_err(|e| {
            // The email uniqueness pre-check can lose a race against a
            // concurrent registration; the store constraint is authoritative
            match e {
                DomainError::Conflict { .. } => DomainError::Auth(AuthError::EmailAlreadyRegistered),
                other => other,
            }
        })?;

        self.user_repository.update_last_login(user.id).await?;
        let tokens = self.token_service.generate_token_pair(&user)?;

        tracing::info!(
            user_id = %user.id,
            user_type = user.user_type.as_str(),
            "Registered new user"
        );

        Ok((user, tokens))
    }

    /// Authenticate with email and password
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<(User, TokenPair)> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;

        let password_matches = bcrypt::verify(password, &user.hashed_password)
            .map_err(|_| DomainError::Auth(AuthError::InvalidCredentials))?;
        if !password_matches {
            tracing::warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        if !user.is_active {
            return Err(DomainError::Auth(AuthError::AccountInactive));
        }

        self.user_repository.update_last_login(user.id).await?;
        let tokens = self.token_service.generate_token_pair(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok((user, tokens))
    }

    /// Issue a fresh token pair from a valid refresh token
    pub async fn refresh_tokens(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self.token_service.verify_refresh_token(refresh_token)?;
        let user_id = claims.user_id()?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        if !user.is_active {
            return Err(DomainError::Auth(AuthError::AccountInactive));
        }

        self.token_service.generate_token_pair(&user)
    }

    /// Look up the authenticated user
    pub async fn current_user(&self, user_id: uuid::Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    async fn allocate_public_id(&self) -> DomainResult<String> {
        for _ in 0..MAX_ID_GENERATION_ATTEMPTS {
            let candidate = identity::generate_public_id();
            if !self.user_repository.exists_by_public_id(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(DomainError::internal(
            "Exhausted retries generating a unique public ID",
        ))
    }

    async fn allocate_employer_number(&self) -> DomainResult<i32> {
        for _ in 0..MAX_ID_GENERATION_ATTEMPTS {
            let candidate = identity::generate_employer_number();
            if !self
                .user_repository
                .exists_by_employer_number(candidate)
                .await?
            {
                return Ok(candidate);
            }
        }
        Err(DomainError::internal(
            "Exhausted retries generating a unique employer number",
        ))
    }

    async fn allocate_company_handle(&self, company_name: &str) -> DomainResult<String> {
        let base = identity::slugify_company_name(company_name);

        for counter in 0..=MAX_HANDLE_COUNTER {
            let candidate = if counter == 0 {
                base.clone()
            } else {
                format!("{}{}", base, counter)
            };
            if !self
                .user_repository
                .exists_by_company_handle(&candidate)
                .await?
            {
                return Ok(candidate);
            }
        }

        // Every counter suffix is taken; a random suffix breaks the tie
        Ok(format!("{}{}", base, identity::random_handle_suffix()))
    }
}
