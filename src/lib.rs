use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

pub mod config;
pub mod error;
pub mod ledger;
pub mod routes;
pub mod session;
pub mod theme;
pub mod views;

use session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub production: bool,
}

impl AppState {
    pub fn new(config: &config::Config) -> Self {
        AppState {
            sessions: SessionStore::new(config.session_idle_minutes),
            production: config.production,
        }
    }
}

/// Application routes with session resolution applied. Transport-level
/// layers (rate limiting, CORS, security headers) are added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home::home))
        .route("/theme", post(routes::home::set_theme))
        .route("/donate", get(routes::donations::donate_page).post(routes::donations::submit_donation))
        .route("/donations", get(routes::donations::donations_page))
        .route("/request", get(routes::requests::request_page).post(routes::requests::submit_request))
        .route("/admin", get(routes::admin::dashboard))
        .route("/admin/export.csv", get(routes::admin::export_csv))
        // API Routes
        .route("/api/donations", get(routes::donations::list_donations).post(routes::donations::create_donation))
        .route("/api/requests", post(routes::requests::create_request))
        .route("/api/admin/summary", get(routes::admin::summary))
        .fallback(routes::home::not_found)
        .layer(from_fn_with_state(state.clone(), session::attach_session))
        // Registered after the session layer so probes never create sessions.
        .route("/health", get(routes::home::health_check))
        .with_state(state)
}
