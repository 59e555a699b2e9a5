use std::time::Duration;

use tokio_tungstenite::tungstenite::Message;

use crate::helpers::test_app::{TestApp, DURATION_SECONDS, SELECTION_TICKS};
use crate::helpers::test_player::{WsMessageIn, WsMessageOut};

#[tokio::test]
async fn new_connection_receives_idle_state() {
    let app = TestApp::spawn_app().await;
    let mut player = app.connect_player().await;

    let message = player.receive().await.unwrap();

    assert_eq!(
        message,
        WsMessageIn::RoundState {
            phase: "IDLE".to_string(),
            category: None,
            letter: None,
            remaining_seconds: None,
            score: None,
            feedback_percent: None,
        }
    );
}

#[tokio::test]
async fn full_round_reaches_complete_with_feedback() {
    let app = TestApp::spawn_app().await;
    let mut player = app.connect_player().await;
    let _ = player.receive().await.unwrap();

    player.send(WsMessageOut::Start).await;
    let messages = player.receive_until_phase("EXPIRED").await.unwrap();

    let states: Vec<&WsMessageIn> = messages
        .iter()
        .filter(|message| message.phase().is_some())
        .collect();
    assert_eq!(states.first().unwrap().phase(), Some("SELECTING"));
    assert_eq!(
        states.len(),
        1 + SELECTION_TICKS as usize + DURATION_SECONDS as usize
    );
    assert!(messages
        .iter()
        .any(|message| matches!(message, WsMessageIn::Cue { cue } if cue == "TIMER_POP")));

    let committed: Vec<(Option<String>, Option<String>)> = states
        .iter()
        .filter(|message| message.phase() != Some("SELECTING"))
        .map(|message| match message {
            WsMessageIn::RoundState {
                category, letter, ..
            } => (category.clone(), letter.clone()),
            _ => unreachable!(),
        })
        .collect();
    assert!(committed.windows(2).all(|pair| pair[0] == pair[1]));

    player.send(WsMessageOut::RequestScore).await;
    let message = player.receive().await.unwrap();
    assert_eq!(message.phase(), Some("AWAITING_SCORE"));

    player
        .send(WsMessageOut::SubmitScore {
            input: "none".to_string(),
        })
        .await;
    let message = player.receive().await.unwrap();
    assert_eq!(message.phase(), Some("AWAITING_SCORE"));

    player
        .send(WsMessageOut::SubmitScore {
            input: "12".to_string(),
        })
        .await;
    match player.receive().await.unwrap() {
        WsMessageIn::RoundState {
            phase,
            remaining_seconds,
            score,
            feedback_percent,
            ..
        } => {
            assert_eq!(phase, "COMPLETE");
            assert_eq!(remaining_seconds, Some(0));
            assert_eq!(score, Some(12));
            assert_eq!(feedback_percent, Some(52));
        }
        message => panic!("Unexpected message {message:?}"),
    }

    assert_eq!(app.get_preferences().await.play_count, 1);
}

#[tokio::test]
async fn skipped_score_has_no_feedback_and_allows_a_new_round() {
    let app = TestApp::spawn_app().await;
    let mut player = app.connect_player().await;
    let _ = player.receive().await.unwrap();
    player.send(WsMessageOut::Start).await;
    player.receive_until_phase("EXPIRED").await.unwrap();

    player.send(WsMessageOut::RequestScore).await;
    player.send(WsMessageOut::SkipScore).await;
    let messages = player.receive_until_phase("COMPLETE").await.unwrap();
    match messages.last().unwrap() {
        WsMessageIn::RoundState {
            score,
            feedback_percent,
            ..
        } => {
            assert_eq!(*score, None);
            assert_eq!(*feedback_percent, None);
        }
        message => panic!("Unexpected message {message:?}"),
    }

    player.send(WsMessageOut::Start).await;
    match player.receive().await.unwrap() {
        WsMessageIn::RoundState {
            phase,
            remaining_seconds,
            ..
        } => {
            assert_eq!(phase, "SELECTING");
            assert_eq!(remaining_seconds, Some(DURATION_SECONDS));
        }
        message => panic!("Unexpected message {message:?}"),
    }
    player.receive_until_phase("EXPIRED").await.unwrap();

    assert_eq!(app.get_preferences().await.play_count, 2);
}

#[tokio::test]
async fn score_cannot_be_submitted_before_the_round_ends() {
    let app = TestApp::spawn_app().await;
    let mut player = app.connect_player().await;
    let _ = player.receive().await.unwrap();

    player
        .send(WsMessageOut::SubmitScore {
            input: "10".to_string(),
        })
        .await;

    let message = player.receive().await.unwrap();
    assert_eq!(message.phase(), Some("IDLE"));
}

#[tokio::test]
async fn malformed_message_returns_error_and_keeps_connection() {
    let app = TestApp::spawn_app().await;
    let mut player = app.connect_player().await;
    let _ = player.receive().await.unwrap();

    player
        .send_raw_message(Message::Text("{\"type\":\"CHEAT\"}".to_string()))
        .await;
    match player.receive().await.unwrap() {
        WsMessageIn::Error {
            error_type,
            title,
            detail,
        } => {
            assert_eq!(error_type, "UNPROCESSABLE_WEBSOCKET_MESSAGE");
            assert!(!title.is_empty());
            assert!(!detail.is_empty());
        }
        message => panic!("Unexpected message {message:?}"),
    }

    player.send_raw_message(Message::Text("ping".to_string())).await;
    assert_eq!(player.receive_text().await.unwrap(), "pong");
}

#[tokio::test]
async fn silent_player_is_disconnected_while_the_round_runs() {
    let app = TestApp::spawn_app_with(|config| {
        config.round.duration_seconds = 60;
        config.round.countdown_interval_millis = 100;
        config.player.inactivity_timeout_seconds = 1;
    })
    .await;
    let mut player = app.connect_player().await;
    let _ = player.receive().await.unwrap();

    player.send(WsMessageOut::Start).await;
    // Round states keep arriving, but the player never sends anything else
    let messages = player
        .receive_until_closed(Duration::from_secs(4))
        .await
        .unwrap();

    let last: WsMessageIn = serde_json::from_str(messages.last().unwrap()).unwrap();
    match last {
        WsMessageIn::Error { error_type, .. } => assert_eq!(error_type, "WEBSOCKET_CLOSED"),
        message => panic!("Unexpected message {message:?}"),
    }
}
