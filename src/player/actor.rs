use axum::extract::ws::{Message, WebSocket};
use std::time::Duration;
use tokio::select;
use tokio::time::{sleep_until, Instant};

use crate::error::Error;
use crate::metrics::CONNECTED_PLAYERS;
use crate::session::actor::RoundEvent;
use crate::session::actor_client::{RoundClient, RoundEventReceiver};
use crate::websocket::message::{WsMessageIn, WsMessageOut};
use crate::websocket::{close, parse_message, send_error, send_message, send_message_string};

/// Bridges one player's websocket with their round session.
pub struct PlayerActor {
    round: RoundClient,
    round_event_receiver: RoundEventReceiver,
    websocket: WebSocket,
    inactivity_timeout: Duration,
    last_client_message_at: Instant,
}

impl PlayerActor {
    pub async fn create(round: RoundClient, mut websocket: WebSocket, inactivity_timeout: Duration) {
        let round_event_receiver = round.subscribe();
        let initial_state = match round.snapshot().await {
            Ok(snapshot) => send_message(&mut websocket, &WsMessageOut::from(snapshot)).await,
            Err(error) => Err(error),
        };

        match initial_state {
            Ok(()) => {
                PlayerActor {
                    round,
                    round_event_receiver,
                    websocket,
                    inactivity_timeout,
                    last_client_message_at: Instant::now(),
                }
                .start()
                .await
            }
            Err(error) => {
                send_error(&mut websocket, &error).await;
                close(websocket).await;
            }
        }
    }

    async fn start(mut self) {
        CONNECTED_PLAYERS.inc();

        loop {
            // Only frames from the player count as activity, pushed round events do not
            let inactivity_deadline = self.last_client_message_at + self.inactivity_timeout;
            select! {
                round_event = self.round_event_receiver.next() => {
                    if let Err(error) = self.receive_round_event(round_event).await {
                        send_error(&mut self.websocket, &error).await;
                        if error.should_close_websocket() {
                            break;
                        }
                    }
                },
                websocket_message = self.websocket.recv() => {
                    self.last_client_message_at = Instant::now();
                    if let Err(error) = self.receive_websocket_message(websocket_message).await {
                        send_error(&mut self.websocket, &error).await;
                        if error.should_close_websocket() {
                            break;
                        }
                    }
                },
                _ = sleep_until(inactivity_deadline) => {
                    let reason = "connection timed out; missing 'ping' messages";
                    self.log_connection_lost_with_player(reason);
                    send_error(&mut self.websocket, &Error::WebsocketClosed(reason.to_string())).await;
                    break;
                },
            }
        }

        // Dropping the client stops the round session and its pending timers
        close(self.websocket).await;
        CONNECTED_PLAYERS.dec();
    }

    async fn receive_round_event(
        &mut self,
        round_event: Result<RoundEvent, Error>,
    ) -> Result<(), Error> {
        match round_event? {
            RoundEvent::State(snapshot) => {
                send_message(&mut self.websocket, &WsMessageOut::from(snapshot)).await
            }
            RoundEvent::Cue(cue) => {
                send_message(&mut self.websocket, &WsMessageOut::Cue { cue }).await
            }
        }
    }

    async fn receive_websocket_message(
        &mut self,
        websocket_message: Option<Result<Message, axum::Error>>,
    ) -> Result<(), Error> {
        match websocket_message {
            Some(Ok(Message::Text(txt))) => match txt.as_str() {
                "ping" => send_message_string(&mut self.websocket, "pong").await,
                message => match parse_message(message)? {
                    WsMessageIn::Start => self.round.start().await,
                    WsMessageIn::RequestScore => self.round.request_score().await,
                    WsMessageIn::SubmitScore { input } => self.round.submit_score(&input).await,
                    WsMessageIn::SkipScore => self.round.skip_score().await,
                },
            },
            // browser said "close"
            Some(Ok(Message::Close(_))) => {
                self.log_connection_lost_with_player("browser sent 'Close' websocket frame");
                Err(Error::WebsocketClosed(
                    "browser sent 'Close' websocket frame".to_string(),
                ))
            }
            // websocket was closed
            None => {
                self.log_connection_lost_with_player("other end of websocket was closed abruptly");
                Err(Error::WebsocketClosed(
                    "other end of websocket was closed abruptly".to_string(),
                ))
            }
            Some(Err(error)) => Err(Error::UnprocessableMessage(
                error.to_string(),
                "Message cannot be loaded".to_string(),
            )),
            // Protocol level ping/pong frames are answered by axum
            Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => Ok(()),
            Some(Ok(_)) => Err(Error::UnprocessableMessage(
                "Unsupported message type".to_string(),
                "Unsupported message type".to_string(),
            )),
        }
    }

    fn log_connection_lost_with_player(&self, reason: &str) {
        log::info!(
            "Connection with player lost due to: {}. Stopping player actor.",
            reason,
        );
    }
}
