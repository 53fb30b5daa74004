//! Contains all the routes that this application can handle.

mod api;

use axum::{
    http::StatusCode,
    routing::{any, get},
    Router,
};

use crate::AppState;

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(app_state))
        .route("/health-check", get(health_check))
}

/// API - Routes nested under "/api" path.
/// Every signup route takes any method, the handlers answer preflights and reject the rest.
fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/quick-alert", any(api::quick_alert))
        .route("/custom-alert", any(api::custom_alert))
        .route("/newsletter-signup", any(api::newsletter_signup))
        .with_state(app_state)
}
