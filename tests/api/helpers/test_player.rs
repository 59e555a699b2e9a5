use std::time::Duration;

use futures_util::{
    stream::{SplitSink, SplitStream},
    SinkExt, StreamExt,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "type")]
pub enum WsMessageIn {
    #[serde(rename_all = "camelCase")]
    RoundState {
        phase: String,
        category: Option<String>,
        letter: Option<String>,
        remaining_seconds: Option<u32>,
        score: Option<u32>,
        feedback_percent: Option<u32>,
    },
    Cue {
        cue: String,
    },
    #[serde(rename_all = "camelCase")]
    Error {
        error_type: String,
        title: String,
        detail: String,
    },
}

impl WsMessageIn {
    pub fn phase(&self) -> Option<&str> {
        match self {
            WsMessageIn::RoundState { phase, .. } => Some(phase),
            _ => None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "type")]
pub enum WsMessageOut {
    Start,
    RequestScore,
    SubmitScore { input: String },
    SkipScore,
}

pub struct TestPlayer {
    pub tx: SplitSink<Socket, Message>,
    pub rx: SplitStream<Socket>,
}

impl TestPlayer {
    pub fn new(websocket: Socket) -> Self {
        let (tx, rx) = websocket.split();
        TestPlayer { tx, rx }
    }

    pub async fn receive_text(&mut self) -> Result<String, String> {
        match timeout(Duration::from_secs(5), self.rx.next()).await {
            Ok(Some(Ok(message))) => message
                .into_text()
                .map_err(|error| format!("Message was not a text. Error: '{error}'.")),
            Ok(Some(Err(error))) => Err(format!("Websocket returned an error {error}")),
            Ok(None) => Err("Websocket closed before expected.".to_string()),
            Err(_) => Err("Timed out waiting for a message.".to_string()),
        }
    }

    pub async fn receive(&mut self) -> Result<WsMessageIn, String> {
        let text = self.receive_text().await?;
        serde_json::from_str(&text)
            .map_err(|error| format!("Could not parse the message. Error: '{error}'."))
    }

    /// Reads messages until a round state with `phase` arrives, returning everything read.
    pub async fn receive_until_phase(&mut self, phase: &str) -> Result<Vec<WsMessageIn>, String> {
        let mut messages = vec![];
        loop {
            let message = self.receive().await?;
            let reached = message.phase() == Some(phase);
            messages.push(message);
            if reached {
                return Ok(messages);
            }
        }
    }

    /// Reads until the server closes the socket, returning the text messages read before it.
    pub async fn receive_until_closed(&mut self, limit: Duration) -> Result<Vec<String>, String> {
        let mut messages = vec![];
        timeout(limit, async {
            while let Some(Ok(message)) = self.rx.next().await {
                match message {
                    Message::Text(text) => messages.push(text),
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        })
        .await
        .map_err(|_| "Timed out waiting for the websocket to close.".to_string())?;
        Ok(messages)
    }

    pub async fn send(&mut self, message: WsMessageOut) {
        self.send_raw_message(Message::Text(
            serde_json::to_string(&message).expect("Could not serialize message"),
        ))
        .await;
    }

    pub async fn send_raw_message(&mut self, message: Message) {
        self.tx.send(message).await.expect("Could not send message");
    }
}
