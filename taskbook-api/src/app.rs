/// Application state and router builder
///
/// This module defines the shared application state and provides a function
/// to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskbook_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskbook_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses Arc
/// internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health               # Health check (open)
/// ├── POST /register        # Account registration (open)
/// ├── POST /login           # Login (open)
/// ├── GET  /tags/           # List caller's tags        (token)
/// ├── GET  /tag/:id         # Tag detail + its tasks    (token)
/// ├── POST /tag/create/     # Create tag                (token)
/// ├── GET  /tasks/          # List caller's tasks       (token)
/// ├── GET  /task/:id        # Task detail + its tags    (token)
/// └── POST /task/create/    # Create task               (token)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Token authentication (protected routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (open, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Registration and login (open, no auth required)
    let open_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Tag and task routes (require a valid token)
    let protected_routes = Router::new()
        .route("/tags/", get(routes::tags::list_tags))
        .route("/tag/:id", get(routes::tags::tag_detail))
        .route("/tag/create/", post(routes::tags::create_tag))
        .route("/tasks/", get(routes::tasks::list_tasks))
        .route("/task/:id", get(routes::tasks::task_detail))
        .route("/task/create/", post(routes::tasks::create_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            token_auth_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .merge(open_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Token authentication middleware layer
///
/// Resolves the `Authorization: Token <key>` header to the owning user and
/// injects `CurrentUser` into request extensions.
async fn token_auth_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    taskbook_shared::auth::middleware::token_auth_middleware(state.db.clone(), req, next)
        .await
        .map_err(crate::error::ApiError::from)
}
