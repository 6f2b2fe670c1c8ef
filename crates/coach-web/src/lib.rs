//! LoveCoach web server.
//!
//! Serves the JSON API, the provider webhooks and a server-rendered
//! dashboard over a SQLite store. AI and messaging providers run in mock
//! mode until their credentials are configured.

pub mod coaching;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use state::AppState;

/// Build the application with middleware and state applied.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers(Any);

    routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
