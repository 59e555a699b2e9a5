pub mod catalog;
pub mod controller;
pub mod round_fsm;
pub mod score;
pub mod sequence;

use self::round_fsm::RoundFsmState;

#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub category: String,
    pub letter: char,
    pub remaining_seconds: u32,
    pub score: Option<u32>,
}

impl Round {
    pub fn new(category: String, letter: char, duration_seconds: u32) -> Self {
        Round {
            category,
            letter,
            remaining_seconds: duration_seconds,
            score: None,
        }
    }
}

/// Read-only view of the controller handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSnapshot {
    pub phase: RoundFsmState,
    pub round: Option<Round>,
    pub feedback_percent: Option<u32>,
}
