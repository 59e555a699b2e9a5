use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::preferences::{self, Preferences, PreferencesStore, Theme};
use crate::routes::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    theme: Option<Theme>,
    sound_enabled: Option<bool>,
}

#[derive(Serialize)]
struct ErrorResponse {
    r#type: String,
    detail: String,
}

pub async fn get(State(state): State<Arc<AppState>>) -> Response {
    respond(with_store(&state, |store| Ok(store.preferences().clone())))
}

pub async fn update(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdatePreferencesRequest>,
) -> Response {
    respond(with_store(&state, |store| {
        if let Some(theme) = request.theme {
            store.set_theme(theme)?;
        }
        if let Some(sound_enabled) = request.sound_enabled {
            store.set_sound_enabled(sound_enabled)?;
        }
        Ok(store.preferences().clone())
    }))
}

pub async fn complete_onboarding(State(state): State<Arc<AppState>>) -> Response {
    respond(with_store(&state, |store| {
        store.complete_onboarding()?;
        Ok(store.preferences().clone())
    }))
}

fn with_store<F>(state: &AppState, action: F) -> Result<Preferences, Error>
where
    F: FnOnce(&mut PreferencesStore) -> Result<Preferences, Error>,
{
    let mut store = preferences::lock(&state.preferences)?;
    action(&mut *store)
}

fn respond(result: Result<Preferences, Error>) -> Response {
    match result {
        Ok(preferences) => (StatusCode::OK, Json(preferences)).into_response(),
        Err(error) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                r#type: match error {
                    Error::Storage(_) => "STORAGE",
                    _ => "INTERNAL_SERVER",
                }
                .to_string(),
                detail: error.to_string(),
            }),
        )
            .into_response(),
    }
}
