use actix_web::HttpResponse;

use crate::middleware::auth::AuthContext;

/// Handler for POST /api/v1/auth/logout
///
/// Tokens are stateless JWTs, so logout is a client-side discard; the
/// endpoint exists so clients have a uniform call to make.
pub async fn logout(auth: AuthContext) -> HttpResponse {
    log::info!("User {} logged out", auth.user_id);
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Successfully logged out"
    }))
}
