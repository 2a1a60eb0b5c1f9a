//! Contact Desk
//!
//! Client-side contact state with optimistic updates, plus a JSON contact service
//! the state layer can run against in-process or over HTTP.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use service::InMemoryContactService;

pub use errors::AppError;
pub use models::{Contact, ContactFilters, ContactFormData, FilterUpdate, User, UserRole};
pub use service::{ContactService, HttpContactService, ServiceLatency};
pub use store::{ContactState, ContactStore, ModalState};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<InMemoryContactService>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/contacts", get(api::list_contacts).post(api::create_contact))
        .route(
            "/contacts/{id}",
            get(api::get_contact)
                .put(api::update_contact)
                .delete(api::delete_contact),
        );

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
