use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service backed by `repository`.
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if command.password.is_empty() {
            return Err(UserError::MissingPassword);
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = NewUser {
            username: command.username,
            password_hash,
            name: command.name,
            email: command.email,
            phone_number: command.phone_number,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, username = %created_user.username, "User created");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.0))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.0))?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_name) = command.name {
            user.name = new_name;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_phone_number) = command.phone_number {
            user.phone_number = new_phone_number;
        }

        if let Some(new_password) = command.password {
            if new_password.is_empty() {
                return Err(UserError::MissingPassword);
            }
            user.password_hash = self.password_hasher.hash(&new_password)?;
        }

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
