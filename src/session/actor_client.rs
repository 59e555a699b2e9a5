use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::round::RoundSnapshot;
use crate::session::actor::{RoundCommand, RoundEvent};

#[derive(Clone, Debug)]
pub struct RoundClient {
    pub(super) round_tx: Sender<RoundCommand>,
    pub(super) broadcast_tx: broadcast::Sender<RoundEvent>,
}

impl RoundClient {
    pub fn subscribe(&self) -> RoundEventReceiver {
        RoundEventReceiver {
            broadcast_rx: self.broadcast_tx.subscribe(),
        }
    }

    pub async fn start(&self) -> Result<(), Error> {
        self.send(RoundCommand::Start, "RoundCommand::Start").await
    }

    pub async fn request_score(&self) -> Result<(), Error> {
        self.send(RoundCommand::RequestScore, "RoundCommand::RequestScore")
            .await
    }

    pub async fn submit_score(&self, input: &str) -> Result<(), Error> {
        self.send(
            RoundCommand::SubmitScore {
                input: input.to_string(),
            },
            "RoundCommand::SubmitScore",
        )
        .await
    }

    pub async fn skip_score(&self) -> Result<(), Error> {
        self.send(RoundCommand::SkipScore, "RoundCommand::SkipScore")
            .await
    }

    pub async fn snapshot(&self) -> Result<RoundSnapshot, Error> {
        let (tx, rx): (OneshotSender<RoundSnapshot>, OneshotReceiver<RoundSnapshot>) =
            oneshot::channel();

        self.send(
            RoundCommand::GetSnapshot { response_tx: tx },
            "RoundCommand::GetSnapshot",
        )
        .await?;

        rx.await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Sent a RoundCommand::GetSnapshot but the RoundActor dropped the response channel. Error: '{error}'."
            ))
        })
    }

    async fn send(&self, command: RoundCommand, name: &str) -> Result<(), Error> {
        self.round_tx.send(command).await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Tried to send {name} but RoundActor is not listening. Error: {error}."
            ))
        })
    }
}

pub struct RoundEventReceiver {
    broadcast_rx: broadcast::Receiver<RoundEvent>,
}

impl RoundEventReceiver {
    pub async fn next(&mut self) -> Result<RoundEvent, Error> {
        loop {
            match self.broadcast_rx.recv().await {
                Ok(event) => return Ok(event),
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Round subscriber lagged behind. SkippedEvents: '{skipped}'.");
                }
                Err(error) => {
                    return Err(Error::log_and_create_internal(&format!(
                        "The broadcast channel with the Round has been closed. Error: {error}."
                    )))
                }
            }
        }
    }
}
