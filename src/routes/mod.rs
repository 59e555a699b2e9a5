use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;

use crate::config::{Config, RoundSettings};
use crate::preferences::PreferencesHandle;
use crate::round::catalog::Catalog;

mod health;
mod metrics;
mod preferences;
mod round;

pub struct AppState {
    pub round_settings: RoundSettings,
    pub catalog: Catalog,
    pub preferences: PreferencesHandle,
    pub inactivity_timeout: Duration,
}

pub fn create_router(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::get))
        .route("/metrics", get(metrics::metrics_handler))
        .route(
            "/preferences",
            get(preferences::get).put(preferences::update),
        )
        .route(
            "/preferences/onboarding",
            post(preferences::complete_onboarding),
        )
        .route("/round/ws", get(round::connect_player_to_websocket))
        .layer(if config.allow_cors {
            log::info!("CorsLayer Permissive");
            CorsLayer::permissive()
        } else {
            CorsLayer::default()
        })
}
