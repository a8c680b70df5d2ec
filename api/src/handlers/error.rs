//! Domain error to HTTP response mapping.

use actix_web::HttpResponse;
use validator::ValidationErrors;

use sl_core::errors::{AuthError, DomainError, TokenError};
use sl_shared::errors::{error_codes, ErrorResponse};

/// Convert a domain error into the appropriate HTTP response
///
/// Business-rule redemption rejections never reach this function: the
/// redemption engine answers those with 200 responses carrying
/// `success = false`.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match &error {
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("{} not found", capitalize(resource)),
        )),
        DomainError::Forbidden { message } => {
            HttpResponse::Forbidden().json(ErrorResponse::new(error_codes::FORBIDDEN, message))
        }
        DomainError::Conflict { resource } => HttpResponse::Conflict().json(ErrorResponse::new(
            error_codes::CONFLICT,
            format!("{} already exists", capitalize(resource)),
        )),
        DomainError::Unauthorized => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::UNAUTHORIZED,
            "Unauthorized access",
        )),
        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message)),
        DomainError::ValidationErr(validation_error) => HttpResponse::BadRequest().json(
            ErrorResponse::new(error_codes::VALIDATION_ERROR, validation_error.to_string()),
        ),
        DomainError::BusinessRule { message } => HttpResponse::UnprocessableEntity().json(
            ErrorResponse::new(error_codes::BUSINESS_RULE_VIOLATION, message),
        ),
        DomainError::Auth(auth_error) => handle_auth_error(auth_error),
        DomainError::Token(token_error) => handle_token_error(token_error),
        DomainError::Internal { .. } => {
            log::error!("Internal error: {:?}", error);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

fn handle_auth_error(error: &AuthError) -> HttpResponse {
    match error {
        AuthError::EmailAlreadyRegistered => HttpResponse::Conflict().json(ErrorResponse::new(
            error_codes::EMAIL_ALREADY_REGISTERED,
            error.to_string(),
        )),
        AuthError::InvalidCredentials | AuthError::AccountInactive => HttpResponse::Unauthorized()
            .json(ErrorResponse::new(
                error_codes::INVALID_CREDENTIALS,
                error.to_string(),
            )),
        AuthError::UserNotFound => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            error.to_string(),
        )),
        AuthError::InsufficientPermissions => HttpResponse::Forbidden().json(ErrorResponse::new(
            error_codes::FORBIDDEN,
            error.to_string(),
        )),
        AuthError::PasswordHashingFailed => {
            log::error!("Password hashing failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

fn handle_token_error(error: &TokenError) -> HttpResponse {
    let code = match error {
        TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
        _ => error_codes::TOKEN_INVALID,
    };
    HttpResponse::Unauthorized().json(ErrorResponse::new(code, error.to_string()))
}

/// Convert request DTO validation failures into a 400 response
pub fn handle_validation_errors(errors: ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }
    HttpResponse::BadRequest().json(response)
}

/// Build a 403 response for role-gated endpoints
pub fn forbidden_role(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ErrorResponse::new(error_codes::FORBIDDEN, message))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = handle_domain_error(DomainError::not_found("employment"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let response = handle_domain_error(DomainError::forbidden("Not enough permissions"));
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let response = handle_domain_error(DomainError::Conflict {
            resource: "verification code".to_string(),
        });
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_business_rule_maps_to_422() {
        let response = handle_domain_error(DomainError::BusinessRule {
            message: "Access request has already been decided".to_string(),
        });
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_invalid_credentials_maps_to_401() {
        let response = handle_domain_error(DomainError::Auth(AuthError::InvalidCredentials));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let response = handle_domain_error(DomainError::internal("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
