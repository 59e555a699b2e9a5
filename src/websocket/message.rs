use serde::{Deserialize, Serialize};

use crate::round::round_fsm::RoundFsmState;
use crate::round::sequence::Cue;
use crate::round::RoundSnapshot;

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "type")]
pub enum WsMessageIn {
    Start,
    RequestScore,
    SubmitScore { input: String },
    SkipScore,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "type")]
pub enum WsMessageOut {
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
        #[serde(flatten)]
        cue: Cue,
    },
    #[serde(rename_all = "camelCase")]
    Error {
        error_type: String,
        title: String,
        detail: String,
    },
}

impl From<RoundSnapshot> for WsMessageOut {
    fn from(snapshot: RoundSnapshot) -> Self {
        let round = snapshot.round;
        WsMessageOut::RoundState {
            phase: phase_to_string(&snapshot.phase),
            category: round.as_ref().map(|round| round.category.clone()),
            letter: round.as_ref().map(|round| round.letter.to_string()),
            remaining_seconds: round.as_ref().map(|round| round.remaining_seconds),
            score: round.as_ref().and_then(|round| round.score),
            feedback_percent: snapshot.feedback_percent,
        }
    }
}

pub fn phase_to_string(phase: &RoundFsmState) -> String {
    match phase {
        RoundFsmState::Idle => "IDLE",
        RoundFsmState::Selecting => "SELECTING",
        RoundFsmState::Active => "ACTIVE",
        RoundFsmState::Expired => "EXPIRED",
        RoundFsmState::AwaitingScore => "AWAITING_SCORE",
        RoundFsmState::Complete => "COMPLETE",
    }
    .to_string()
}
