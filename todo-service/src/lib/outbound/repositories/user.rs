use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    name: String,
    email: String,
    phone_number: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            password_hash: row.password_hash,
            name: row.name,
            email: EmailAddress::new(row.email)?,
            phone_number: row.phone_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Translate unique violations into their domain errors.
fn map_write_error(e: sqlx::Error, username: &Username, email: &EmailAddress) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(USERNAME_CONSTRAINT) => {
                    return UserError::UsernameAlreadyExists(username.to_string())
                }
                Some(EMAIL_CONSTRAINT) => {
                    return UserError::EmailAlreadyExists(email.as_str().to_string())
                }
                _ => {}
            }
        }
    }
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash, name, email, phone_number)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, password_hash, name, email, phone_number, created_at, updated_at
            "#,
        )
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.phone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user.username, &user.email))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, name, email, phone_number, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, name, email, phone_number, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::try_from)
        .transpose()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $2, password_hash = $3, name = $4, email = $5, phone_number = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, password_hash, name, email, phone_number, created_at, updated_at
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &user.username, &user.email))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(UserError::NotFound(user.id.0)),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.0));
        }

        Ok(())
    }
}
