use std::sync::Arc;

use auth::Authenticator;
use auth::FixedClock;
use auth::SigningSecret;
use auth::TokenClass;
use auth::TokenService;
use garden_api::inbound::http::router::create_router;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_service: TokenService,
}

impl TestApp {
    /// Spawn the application with the test signing secret
    pub async fn spawn() -> Self {
        Self::spawn_with_secret(Some(TEST_SECRET)).await
    }

    /// Spawn the application; `None` simulates a deployment without a secret
    pub async fn spawn_with_secret(secret: Option<&str>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = secret
            .and_then(SigningSecret::new)
            .map(|secret| Arc::new(Authenticator::new(secret)));

        let router = create_router(authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_service: TokenService::new(),
        }
    }

    pub fn secret() -> SigningSecret {
        SigningSecret::new(TEST_SECRET).expect("Test secret is not empty")
    }

    /// Issue a token signed with the test secret
    pub fn token(&self, subject_id: &str, class: TokenClass) -> String {
        self.token_service
            .issue(subject_id, &Self::secret(), class)
            .expect("Failed to issue token")
    }

    /// Issue an access token that expired long ago
    pub fn expired_token(&self, subject_id: &str) -> String {
        TokenService::with_clock(FixedClock(1_000_000))
            .issue_access(subject_id, &Self::secret())
            .expect("Failed to issue token")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }
}
