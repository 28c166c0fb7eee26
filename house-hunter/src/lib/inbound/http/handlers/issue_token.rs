use auth::Claims;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::error::Category;
use serde_json::Map;
use serde_json::Value;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

/// Sign whatever object the caller posts.
///
/// A missing body, an empty body or a body not declared as JSON is signed as
/// an empty object.
pub async fn issue_token<US: UserServicePort>(
    State(state): State<AppState<US>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ApiSuccess<IssueTokenResponseData>, ApiError> {
    let payload = parse_payload(&headers, &body)?;

    let token = state
        .authenticator
        .issue_token(Claims::from_payload(payload))
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        IssueTokenResponseData { token },
    ))
}

fn parse_payload(headers: &HeaderMap, body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    serde_json::from_slice(body).map_err(|e| match e.classify() {
        Category::Data => ApiError::UnprocessableEntity(format!(
            "Failed to deserialize the JSON body into the target type: {}",
            e
        )),
        _ => ApiError::BadRequest(format!("Failed to parse the request body as JSON: {}", e)),
    })
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueTokenResponseData {
    pub token: String,
}
