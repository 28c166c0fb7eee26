use auth::Claims;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedClaims;

/// Echo the identity the auth gate attached to the request.
pub async fn me(
    Extension(AuthenticatedClaims(claims)): Extension<AuthenticatedClaims>,
) -> ApiSuccess<Claims> {
    ApiSuccess::new(StatusCode::OK, claims)
}
