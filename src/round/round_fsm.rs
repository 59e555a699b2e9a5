use std::fmt;

use rust_fsm::state_machine;

/*
 * Idle
 * Selecting
 *    Resample category and letter until the reveal is over
 * Active
 *    Countdown
 * Expired
 * AwaitingScore
 * Complete
 *    Start again goes back to Selecting with a new round
 */
state_machine! {
    derive(Debug, Clone, PartialEq)
    pub RoundFsm(Idle)

    Idle => {
        Start => Selecting
    },
    Selecting => {
        SelectionFinished => Active
    },
    Active => {
        TimeUp => Expired
    },
    Expired => {
        RequestScore => AwaitingScore
    },
    AwaitingScore => {
        SubmitScore => Complete,
        SkipScore => Complete,
    },
    Complete => {
        Start => Selecting
    }
}

impl fmt::Display for RoundFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
