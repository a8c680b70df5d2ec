//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the bearer token from the Authorization header,
//! verifies it through the core `TokenService` registered in app data, and
//! injects an `AuthContext` into the request extensions. Handlers receive
//! the context through its `FromRequest` implementation.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorInternalServerError, ErrorUnauthorized},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use sl_core::domain::entities::token::Claims;
use sl_core::domain::entities::user::UserType;
use sl_core::errors::{DomainError, TokenError};
use sl_core::services::token::TokenService;

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: Uuid,
    /// User role extracted from JWT claims
    pub user_type: UserType,
    /// JWT ID for tracing
    pub jti: String,
}

impl AuthContext {
    /// Creates an authentication context from access token claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims.user_id()?;
        let user_type = claims
            .user_type
            .as_deref()
            .and_then(UserType::parse)
            .ok_or(DomainError::Token(TokenError::InvalidClaims))?;
        Ok(Self {
            user_id,
            user_type,
            jti: claims.jti,
        })
    }

    /// Checks if the authenticated user is an employee
    pub fn is_employee(&self) -> bool {
        self.user_type == UserType::Employee
    }

    /// Checks if the authenticated user is an employer
    pub fn is_employer(&self) -> bool {
        self.user_type == UserType::Employer
    }
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthContext>()
                .cloned()
                .ok_or_else(|| ErrorUnauthorized("Authentication required")),
        )
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth;

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = extract_bearer_token(req.request())
                .ok_or_else(|| ErrorUnauthorized("Missing or invalid Authorization header"))?;

            let token_service = req
                .app_data::<web::Data<Arc<TokenService>>>()
                .ok_or_else(|| ErrorInternalServerError("Token service not configured"))?;

            match token_service.verify_access_token(&token) {
                Ok(claims) => {
                    let context = AuthContext::from_claims(claims)
                        .map_err(|e| ErrorUnauthorized(format!("Invalid token: {}", e)))?;
                    req.extensions_mut().insert(context);
                    service.call(req).await
                }
                Err(e) => Err(ErrorUnauthorized(format!("Invalid token: {}", e))),
            }
        })
    }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

/// Extract the client IP address, honoring reverse-proxy headers
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            if let Some(ip) = forwarded_str.split(',').next() {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return Some(ip.to_string());
                }
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return Some(ip_str.to_string());
        }
    }

    req.connection_info()
        .peer_addr()
        .map(|addr| addr.to_string())
}

/// Extract the user agent from request headers
pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|ua| ua.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use sl_core::domain::entities::token::TokenType;

    #[test]
    fn test_extract_bearer_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req).as_deref(), Some("abc.def.ghi"));

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(extract_bearer_token(&req).is_none());

        let req = TestRequest::default().to_http_request();
        assert!(extract_bearer_token(&req).is_none());
    }

    #[test]
    fn test_extract_client_ip_prefers_forwarded_for() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "198.51.100.2"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_auth_context_requires_user_type() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            user_type: None,
            token_type: TokenType::Access,
            jti: "jti".to_string(),
            iat: 0,
            exp: 0,
            iss: "sunlighter".to_string(),
            aud: "sunlighter-api".to_string(),
        };
        assert!(AuthContext::from_claims(claims).is_err());
    }

    #[test]
    fn test_auth_context_role_predicates() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            user_type: Some("employer".to_string()),
            token_type: TokenType::Access,
            jti: "jti".to_string(),
            iat: 0,
            exp: 0,
            iss: "sunlighter".to_string(),
            aud: "sunlighter-api".to_string(),
        };
        let context = AuthContext::from_claims(claims).unwrap();
        assert!(context.is_employer());
        assert!(!context.is_employee());
    }
}
