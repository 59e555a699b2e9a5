use tokio::select;
use tokio::sync::oneshot::Sender as OneshotSender;
use tokio::sync::{
    broadcast,
    mpsc::{self, Receiver, Sender},
};
use tokio::time::{self, Instant};

use crate::config::RoundSettings;
use crate::metrics::{ACTIVE_SESSIONS, ROUNDS_STARTED, SCORES_SUBMITTED};
use crate::preferences::{self, PreferencesHandle, Theme};
use crate::round::catalog::Catalog;
use crate::round::controller::RoundController;
use crate::round::sequence::{Action, Cue, Schedule};
use crate::round::RoundSnapshot;
use crate::session::actor_client::RoundClient;

/// Owns one controller and runs its schedule on a single task.
pub struct RoundActor {
    controller: RoundController,
    schedule: Schedule,
    last_step_at: Instant,
    preferences: PreferencesHandle,
    round_rx: Receiver<RoundCommand>,
    broadcast_tx: broadcast::Sender<RoundEvent>,
}

impl RoundActor {
    pub fn spawn(
        settings: RoundSettings,
        catalog: Catalog,
        preferences: PreferencesHandle,
    ) -> RoundClient {
        RoundActor::spawn_with_controller(RoundController::new(settings, catalog), preferences)
    }

    pub fn spawn_with_controller(
        controller: RoundController,
        preferences: PreferencesHandle,
    ) -> RoundClient {
        let (round_tx, round_rx): (Sender<RoundCommand>, Receiver<RoundCommand>) =
            mpsc::channel(32);
        let (broadcast_tx, _): (broadcast::Sender<RoundEvent>, broadcast::Receiver<RoundEvent>) =
            broadcast::channel(128);

        tokio::spawn(
            RoundActor {
                controller,
                schedule: Schedule::default(),
                last_step_at: Instant::now(),
                preferences,
                round_rx,
                broadcast_tx: broadcast_tx.clone(),
            }
            .start(),
        );

        RoundClient {
            round_tx,
            broadcast_tx,
        }
    }

    async fn start(mut self) {
        ACTIVE_SESSIONS.inc();

        loop {
            let deadline = self
                .schedule
                .peek_delay()
                .map(|delay| self.last_step_at + delay);

            select! {
                command = self.round_rx.recv() => match command {
                    Some(command) => self.receive_command(command),
                    None => {
                        log::info!("Round channel has been dropped. Stopping round actor.");
                        break;
                    }
                },
                _ = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(deadline) = deadline {
                        self.last_step_at = deadline;
                    }
                    self.run_next_step();
                },
            }
        }

        // Pending steps die with the session
        self.schedule.clear();
        ACTIVE_SESSIONS.dec();
    }

    fn receive_command(&mut self, command: RoundCommand) {
        match command {
            RoundCommand::Start => {
                if self.controller.start() {
                    ROUNDS_STARTED.inc();
                    let theme = self.record_play();
                    self.schedule = Schedule::for_round(self.controller.settings(), theme);
                    self.last_step_at = Instant::now();
                }
            }
            RoundCommand::RequestScore => {
                self.controller.request_score();
            }
            RoundCommand::SubmitScore { input } => {
                if self.controller.submit_score_input(&input) {
                    SCORES_SUBMITTED.inc();
                }
            }
            RoundCommand::SkipScore => {
                self.controller.skip_score();
            }
            RoundCommand::GetSnapshot { response_tx } => {
                if response_tx.send(self.controller.snapshot()).is_err() {
                    log::error!("Sent a RoundSnapshot but the response channel is closed.");
                }
                return;
            }
        }
        self.send_round_state();
    }

    fn run_next_step(&mut self) {
        let Some(step) = self.schedule.next_step() else {
            return;
        };
        match step.action {
            Action::Resample => {
                if self.controller.selection_tick() {
                    self.send_round_state();
                }
            }
            Action::Tick => {
                if self.controller.tick() {
                    self.send_round_state();
                }
            }
            Action::Cue(cue) => self.send(RoundEvent::Cue(cue)),
        }
    }

    /// Reads the theme for this round and bumps the play count off the actor task.
    fn record_play(&self) -> Theme {
        let theme = match preferences::lock(&self.preferences) {
            Ok(store) => store.preferences().theme,
            Err(_) => Theme::default(),
        };

        let handle = self.preferences.clone();
        tokio::task::spawn_blocking(move || {
            match preferences::lock(&handle).and_then(|mut store| store.record_play()) {
                Ok(play_count) => log::info!("Round started. PlayCount: '{play_count}'."),
                Err(error) => log::error!("Could not record the play. Error: '{error}'."),
            }
        });

        theme
    }

    fn send_round_state(&self) {
        self.send(RoundEvent::State(self.controller.snapshot()));
    }

    fn send(&self, event: RoundEvent) {
        // Nobody listening is not an error, the player may be reconnecting
        if self.broadcast_tx.send(event).is_err() {
            log::debug!("RoundEvent sent without subscribers.");
        }
    }
}

#[derive(Debug)]
pub(crate) enum RoundCommand {
    Start,
    RequestScore,
    SubmitScore {
        input: String,
    },
    SkipScore,
    GetSnapshot {
        response_tx: OneshotSender<RoundSnapshot>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum RoundEvent {
    State(RoundSnapshot),
    Cue(Cue),
}
