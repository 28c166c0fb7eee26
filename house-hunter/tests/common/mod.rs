#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::JwtHandler;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use house_hunter::domain::user::models::EmailAddress;
use house_hunter::domain::user::models::User;
use house_hunter::domain::user::ports::UserRepository;
use house_hunter::domain::user::service::UserService;
use house_hunter::inbound::http::router::create_router;
use house_hunter::user::errors::UserError;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Email-keyed store with the same uniqueness contract as the users table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
    inserts: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryUserRepository {
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn stored(&self, email: &str) -> Option<User> {
        self.users.lock().unwrap().get(email).cloned()
    }

    /// Make every subsequent call fail like a lost database connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), UserError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(UserError::DatabaseError(
                "connection to server at 10.0.0.5 refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        self.check_available()?;

        let mut users = self.users.lock().unwrap();
        let key = user.email.as_str().to_string();
        if users.contains_key(&key) {
            return Err(UserError::EmailAlreadyExists(key));
        }
        users.insert(key, user.clone());
        self.inserts.fetch_add(1, Ordering::SeqCst);

        Ok(user)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        self.check_available()?;

        Ok(self.users.lock().unwrap().get(email.as_str()).cloned())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
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

        let repository = Arc::new(InMemoryUserRepository::default());
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET, Duration::hours(24)));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
        ));

        let router = create_router(user_service, authenticator);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(TEST_SECRET),
        }
    }

    /// Sign claims with the server's secret at an arbitrary issue time.
    pub fn token_issued_at(&self, claims: Claims, issued_at: DateTime<Utc>) -> String {
        self.jwt_handler
            .issue_at(claims, issued_at)
            .expect("Failed to issue token")
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

    pub async fn register(&self, body: serde_json::Value) -> reqwest::Response {
        self.post("/register")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
