use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_fsm::StateMachine;

use crate::config::RoundSettings;
use crate::round::catalog::Catalog;
use crate::round::round_fsm::{RoundFsm, RoundFsmInput, RoundFsmState};
use crate::round::score::{parse_score_input, percentile_feedback};
use crate::round::{Round, RoundSnapshot};

/// Drives one round at a time through its phases.
///
/// Every operation returns `true` when it changed the state. Calls that are not valid in the
/// current phase are ignored and return `false`.
pub struct RoundController {
    settings: RoundSettings,
    catalog: Catalog,
    fsm: StateMachine<RoundFsm>,
    round: Option<Round>,
    selection_ticks: u32,
    feedback_percent: Option<u32>,
    rng: StdRng,
}

impl RoundController {
    pub fn new(settings: RoundSettings, catalog: Catalog) -> Self {
        RoundController::with_rng(settings, catalog, StdRng::from_entropy())
    }

    pub fn with_rng(settings: RoundSettings, catalog: Catalog, rng: StdRng) -> Self {
        RoundController {
            settings,
            catalog,
            fsm: StateMachine::new(),
            round: None,
            selection_ticks: 0,
            feedback_percent: None,
            rng,
        }
    }

    pub fn phase(&self) -> &RoundFsmState {
        self.fsm.state()
    }

    #[cfg(test)]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    #[cfg(test)]
    pub fn feedback_percent(&self) -> Option<u32> {
        self.feedback_percent
    }

    pub fn settings(&self) -> &RoundSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase().clone(),
            round: self.round.clone(),
            feedback_percent: self.feedback_percent,
        }
    }

    pub fn start(&mut self) -> bool {
        if !self.transition(&RoundFsmInput::Start) {
            return false;
        }

        // The previous round is discarded here
        let category = self.catalog.draw_category(&mut self.rng);
        let letter = Catalog::draw_letter(&mut self.rng);
        self.round = Some(Round::new(
            category,
            letter,
            self.settings.duration_seconds(),
        ));
        self.selection_ticks = 0;
        self.feedback_percent = None;
        true
    }

    pub fn selection_tick(&mut self) -> bool {
        if self.phase() != &RoundFsmState::Selecting {
            return false;
        }

        let category = self.catalog.draw_category(&mut self.rng);
        let letter = Catalog::draw_letter(&mut self.rng);
        if let Some(round) = self.round.as_mut() {
            round.category = category;
            round.letter = letter;
        }
        self.selection_ticks += 1;

        if self.selection_ticks >= self.settings.selection_ticks() {
            self.transition(&RoundFsmInput::SelectionFinished);
        }
        true
    }

    pub fn tick(&mut self) -> bool {
        if self.phase() != &RoundFsmState::Active {
            return false;
        }

        let remaining_seconds = match self.round.as_mut() {
            Some(round) => {
                round.remaining_seconds = round.remaining_seconds.saturating_sub(1);
                round.remaining_seconds
            }
            None => {
                log::error!("Active round without round data, there is a bug in the code.");
                return false;
            }
        };

        if remaining_seconds == 0 {
            self.transition(&RoundFsmInput::TimeUp);
        }
        true
    }

    pub fn request_score(&mut self) -> bool {
        self.transition(&RoundFsmInput::RequestScore)
    }

    pub fn submit_score(&mut self, score: i64) -> bool {
        if self.phase() != &RoundFsmState::AwaitingScore {
            log::debug!(
                "Ignoring score submission. Phase: '{}', Score: '{score}'.",
                self.phase()
            );
            return false;
        }
        let score = match u32::try_from(score) {
            Ok(score) if score > 0 => score,
            _ => {
                log::debug!("Ignoring non positive score. Score: '{score}'.");
                return false;
            }
        };

        self.transition(&RoundFsmInput::SubmitScore);
        if let Some(round) = self.round.as_mut() {
            round.score = Some(score);
        }
        self.feedback_percent = Some(percentile_feedback(
            score,
            self.settings.max_reference_score(),
            self.settings.top_bracket_percent,
        ));
        true
    }

    pub fn submit_score_input(&mut self, input: &str) -> bool {
        match parse_score_input(input) {
            Some(score) => self.submit_score(score),
            None => {
                log::debug!("Ignoring non numeric score input. Input: '{input}'.");
                false
            }
        }
    }

    pub fn skip_score(&mut self) -> bool {
        self.transition(&RoundFsmInput::SkipScore)
    }

    fn transition(&mut self, input: &RoundFsmInput) -> bool {
        match self.fsm.consume(input) {
            Ok(_) => true,
            Err(_) => {
                log::debug!(
                    "Ignoring {:?} in phase {}.",
                    input,
                    self.fsm.state()
                );
                false
            }
        }
    }
}
