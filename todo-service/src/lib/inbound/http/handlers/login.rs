use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;
    let command = LoginCommand::new(body.username, body.password).map_err(AuthError::from)?;

    let outcome = state.auth_service.login(command).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData::try_from(outcome)?,
    ))
}

/// Absent fields deserialize as empty so they surface as validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(flatten)]
    pub user: UserData,
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_expires_at: DateTime<Utc>,
}

impl TryFrom<LoginOutcome> for LoginResponseData {
    type Error = ApiError;

    fn try_from(outcome: LoginOutcome) -> Result<Self, Self::Error> {
        let tokens = outcome.tokens;

        Ok(Self {
            user: (&outcome.user).into(),
            access_token: tokens.access_token,
            access_token_expires_at: expiry(tokens.access_token_expires_at)?,
            refresh_token: tokens.refresh_token,
            refresh_token_expires_at: expiry(tokens.refresh_token_expires_at)?,
        })
    }
}

fn expiry(timestamp: i64) -> Result<DateTime<Utc>, ApiError> {
    DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
        ApiError::InternalServerError(format!("token expiry {} is out of range", timestamp))
    })
}
