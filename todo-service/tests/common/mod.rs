use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use chrono::Utc;
use todo_service::domain::auth::service::AuthService;
use todo_service::domain::user::models::NewUser;
use todo_service::domain::user::models::User;
use todo_service::domain::user::models::UserId;
use todo_service::domain::user::models::Username;
use todo_service::domain::user::ports::UserRepository;
use todo_service::domain::user::service::UserService;
use todo_service::inbound::http::router::create_router;
use todo_service::user::errors::UserError;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const JWT_ISSUER: &str = "todo-service";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::default());
        let authenticator = Arc::new(Authenticator::new(jwt_handler()));

        let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
        let auth_service = Arc::new(AuthService::new(user_repository, authenticator));

        let router = create_router(user_service, auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: jwt_handler(),
        }
    }

    /// Register an account through the public endpoint.
    pub async fn register(&self, username: &str, password: &str) -> serde_json::Value {
        let response = self
            .post("/api/users")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
                "name": "Budi Santoso",
                "email": format!("{}@example.com", username),
                "phone_number": "08123456789",
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        response.json().await.expect("Failed to parse response")
    }

    /// Post credentials to the login endpoint.
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}

pub fn jwt_handler() -> JwtHandler {
    JwtHandler::new(JWT_SECRET, JWT_ISSUER).expect("Failed to create JWT handler")
}

/// Credential store kept in memory so the HTTP tests need no database.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    fn check_unique(users: &[User], candidate: &User) -> Result<(), UserError> {
        for user in users.iter().filter(|u| u.id != candidate.id) {
            if user.username == candidate.username {
                return Err(UserError::UsernameAlreadyExists(
                    candidate.username.to_string(),
                ));
            }
            if user.email == candidate.email {
                return Err(UserError::EmailAlreadyExists(
                    candidate.email.as_str().to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        let now = Utc::now();
        let next_id = users.iter().map(|u| u.id.0).max().unwrap_or(0) + 1;

        let user = User {
            id: UserId(next_id),
            username: user.username,
            password_hash: user.password_hash,
            name: user.name,
            email: user.email,
            phone_number: user.phone_number,
            created_at: now,
            updated_at: now,
        };
        Self::check_unique(&users, &user)?;

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == *username).cloned())
    }

    async fn update(&self, mut user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        Self::check_unique(&users, &user)?;

        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(UserError::NotFound(user.id.0))?;
        user.updated_at = Utc::now();
        *slot = user.clone();

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != *id);

        if users.len() == before {
            return Err(UserError::NotFound(id.0));
        }
        Ok(())
    }
}
