use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub const REGISTERED_MESSAGE: &str = "User registered successfully";

pub async fn register_user<US: UserServicePort>(
    State(state): State<AppState<US>>,
    body: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegisterUserResponseData>, ApiError> {
    let Json(body) = body?;
    let email = body.email.clone();

    let command = match body.try_into_command() {
        Ok(command) => command,
        Err(invalid) => {
            // A registered email is reported ahead of any field error.
            if let Ok(email) = EmailAddress::new(email) {
                state.user_service.ensure_email_available(&email).await?;
            }
            return Err(invalid.into());
        }
    };

    state
        .user_service
        .register_user(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    phone: String,
    role: String,
    password: String,
}

impl RegisterUserRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, UserError> {
        let name = PersonName::new(self.name)?;
        let email = EmailAddress::new(self.email)?;
        let phone = PhoneNumber::new(self.phone)?;
        let role = self.role.parse::<Role>()?;
        RegisterUserCommand::new(name, email, phone, role, self.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterUserResponseData {
    pub email: String,
    pub message: String,
}

impl From<&User> for RegisterUserResponseData {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.as_str().to_string(),
            message: REGISTERED_MESSAGE.to_string(),
        }
    }
}
