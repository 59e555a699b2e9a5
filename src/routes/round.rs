use std::sync::Arc;

use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;

use crate::player::actor::PlayerActor;
use crate::routes::AppState;
use crate::session::actor::RoundActor;

pub async fn connect_player_to_websocket(
    State(state): State<Arc<AppState>>,
    websocket_upgrade: WebSocketUpgrade,
) -> Response {
    websocket_upgrade.on_upgrade(move |websocket| async move {
        let round = RoundActor::spawn(
            state.round_settings.clone(),
            state.catalog.clone(),
            Arc::clone(&state.preferences),
        );
        PlayerActor::create(round, websocket, state.inactivity_timeout).await
    })
}
