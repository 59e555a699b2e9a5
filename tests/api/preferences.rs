use serde_json::json;

use crate::helpers::test_app::{PreferencesResponse, TestApp};

#[tokio::test]
async fn preferences_start_with_defaults() {
    let app = TestApp::spawn_app().await;

    let preferences = app.get_preferences().await;

    assert_eq!(
        preferences,
        PreferencesResponse {
            theme: "minimalist".to_string(),
            sound_enabled: true,
            play_count: 0,
            has_seen_onboarding: false,
        }
    );
}

#[tokio::test]
async fn theme_and_sound_can_be_updated() {
    let app = TestApp::spawn_app().await;

    let response = app
        .put_preferences(json!({ "theme": "cyber", "soundEnabled": false }))
        .await;
    assert!(response.status().is_success());

    let preferences = app.get_preferences().await;
    assert_eq!(preferences.theme, "cyber");
    assert!(!preferences.sound_enabled);
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let app = TestApp::spawn_app().await;
    app.put_preferences(json!({ "soundEnabled": false })).await;

    app.put_preferences(json!({ "theme": "party" })).await;

    let preferences = app.get_preferences().await;
    assert_eq!(preferences.theme, "party");
    assert!(!preferences.sound_enabled);
}

#[tokio::test]
async fn unknown_theme_is_rejected() {
    let app = TestApp::spawn_app().await;

    let response = app.put_preferences(json!({ "theme": "neon" })).await;

    assert!(response.status().is_client_error());
    assert_eq!(app.get_preferences().await.theme, "minimalist");
}

#[tokio::test]
async fn onboarding_is_remembered() {
    let app = TestApp::spawn_app().await;

    let preferences = app.complete_onboarding().await;

    assert!(preferences.has_seen_onboarding);
    assert!(app.get_preferences().await.has_seen_onboarding);
}
