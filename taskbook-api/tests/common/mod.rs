/// Common test utilities for integration tests
///
/// Shared infrastructure for integration tests:
/// - Test database setup (migrated via the embedded migrations)
/// - Test user creation with issued tokens
/// - Tag/task fixtures
/// - Request helpers driving the router in-process

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use taskbook_api::app::{build_router, AppState};
use taskbook_api::config::Config;
use taskbook_shared::auth::password::hash_password;
use taskbook_shared::models::auth_token::AuthToken;
use taskbook_shared::models::tag::{CreateTag, Tag};
use taskbook_shared::models::task::{CreateTask, Task};
use taskbook_shared::models::user::{CreateUser, User};
use tower::ServiceExt;
use uuid::Uuid;

/// Password used for all fixture users
pub const TEST_PASSWORD: &str = "test-password-123";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context over a migrated database
    pub async fn new() -> anyhow::Result<Self> {
        // Load test configuration (DATABASE_URL must point at a test database)
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../migrations").run(&db).await?;

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Creates a user with a unique username and an issued token
    ///
    /// Returns the user and the token key for the Authorization header.
    pub async fn create_user(&self, prefix: &str) -> anyhow::Result<(User, String)> {
        let user = User::create(
            &self.db,
            CreateUser {
                username: format!("{}-{}", prefix, Uuid::new_v4()),
                password_hash: hash_password(TEST_PASSWORD)?,
            },
        )
        .await?;

        let token = AuthToken::get_or_create(&self.db, user.id).await?;

        Ok((user, token.key))
    }

    /// Creates a tag owned by the given user
    pub async fn create_tag(&self, owner: &User, name: &str) -> anyhow::Result<Tag> {
        let tag = Tag::create(
            &self.db,
            CreateTag {
                user_id: owner.id,
                name: name.to_string(),
            },
        )
        .await?;

        Ok(tag)
    }

    /// Creates a task owned by the given user
    pub async fn create_task(
        &self,
        owner: &User,
        name: &str,
        description: &str,
        tags: Vec<Uuid>,
    ) -> anyhow::Result<Task> {
        let task = Task::create(
            &self.db,
            CreateTask {
                user_id: owner.id,
                name: name.to_string(),
                description: description.to_string(),
                tags,
            },
        )
        .await?;

        Ok(task)
    }

    /// Sends a GET request, optionally authenticated
    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Token {}", token));
        }
        let request = builder.body(Body::empty()).unwrap();

        send(self.app.clone(), request).await
    }

    /// Sends a POST request with a JSON body, optionally authenticated
    pub async fn post_json(
        &self,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Token {}", token));
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        send(self.app.clone(), request).await
    }

    /// Deletes fixture users; tokens, tags and tasks cascade
    pub async fn cleanup_users(&self, ids: &[Uuid]) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM users WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Drives a request through the router and parses the JSON response
async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, body)
}
