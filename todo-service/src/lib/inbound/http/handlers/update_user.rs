use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        let username = self.username.map(Username::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(UpdateUserCommand {
            username,
            password: self.password,
            name: self.name,
            email,
            phone_number: self.phone_number,
        })
    }
}

// TODO: compare the path id with the bearer subject once the guard forwards claims.
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .user_service
        .update_user(&UserId(user_id), command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
