use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::RefreshTokenCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh_token(
    State(state): State<AppState>,
    body: Result<Json<RefreshTokenRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<RefreshTokenResponseData>, ApiError> {
    let Json(body) = body?;
    let command = RefreshTokenCommand {
        access_token: body.access_token,
        refresh_token: body.refresh_token,
    };

    state
        .auth_service
        .refresh_token(command)
        .await
        .map_err(ApiError::from)
        .map(|access_token| {
            ApiSuccess::new(
                StatusCode::OK,
                RefreshTokenResponseData {
                    // Empty when the presented access token was still valid.
                    access_token: access_token.unwrap_or_default(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenRequestBody {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshTokenResponseData {
    pub access_token: String,
}
