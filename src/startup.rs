use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::Error;
use crate::metrics;
use crate::preferences::PreferencesStore;
use crate::round::catalog::Catalog;
use crate::routes::{self, AppState};

pub async fn create_web_server(config: Config, listener: TcpListener) -> Result<(), Error> {
    metrics::register_metrics();

    let preferences = PreferencesStore::open(&config.preferences.file_path)?.into_handle();
    let state = Arc::new(AppState {
        round_settings: config.round.clone(),
        catalog: Catalog::new(config.round.categories.clone()),
        preferences,
        inactivity_timeout: config.player.inactivity_timeout(),
    });

    let router = routes::create_router(&config).with_state(state);

    match listener.local_addr() {
        Ok(address) => log::info!("Listening on {address}"),
        Err(error) => log::warn!("Listening on an unknown address. Error: '{error}'."),
    }
    axum::serve(listener, router).await.map_err(|error| {
        Error::log_and_create_internal(&format!("The web server stopped. Error: '{error}'."))
    })
}
