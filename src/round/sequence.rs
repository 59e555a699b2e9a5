use std::collections::VecDeque;
use std::time::Duration;

use serde::Serialize;

use crate::config::RoundSettings;
use crate::preferences::Theme;

const CONFETTI_PAUSE: Duration = Duration::from_millis(600);
const BLINK_DURATION: Duration = Duration::from_millis(200);
const BLINK_TIMES: usize = 3;
const TIMER_POP_DELAY: Duration = Duration::from_millis(300);
const TIMER_POP_DURATION: Duration = Duration::from_millis(300);

/// Presentation hints emitted between the reveal and the countdown.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "cue")]
pub enum Cue {
    Confetti,
    Blink { visible: bool },
    TimerPop { scaled: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Resample,
    Cue(Cue),
    Tick,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// Wait after the previous step
    pub delay: Duration,
    pub action: Action,
}

impl Step {
    fn new(delay: Duration, action: Action) -> Self {
        Step { delay, action }
    }
}

/// The full timing of one round, from the first resample to the last countdown tick.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    steps: VecDeque<Step>,
}

impl Schedule {
    pub fn for_round(settings: &RoundSettings, theme: Theme) -> Self {
        let mut steps = VecDeque::new();

        for _ in 0..settings.selection_ticks() {
            steps.push_back(Step::new(settings.selection_interval(), Action::Resample));
        }

        let pause_before_pop = match theme {
            Theme::Minimalist => Duration::ZERO,
            Theme::Party => {
                steps.push_back(Step::new(Duration::ZERO, Action::Cue(Cue::Confetti)));
                CONFETTI_PAUSE
            }
            Theme::Cyber => {
                for blink in 0..BLINK_TIMES {
                    let delay = if blink == 0 {
                        Duration::ZERO
                    } else {
                        BLINK_DURATION
                    };
                    steps.push_back(Step::new(
                        delay,
                        Action::Cue(Cue::Blink { visible: false }),
                    ));
                    steps.push_back(Step::new(
                        BLINK_DURATION,
                        Action::Cue(Cue::Blink { visible: true }),
                    ));
                }
                BLINK_DURATION
            }
        };

        steps.push_back(Step::new(
            pause_before_pop + TIMER_POP_DELAY,
            Action::Cue(Cue::TimerPop { scaled: true }),
        ));
        steps.push_back(Step::new(
            TIMER_POP_DURATION,
            Action::Cue(Cue::TimerPop { scaled: false }),
        ));

        for _ in 0..settings.duration_seconds() {
            steps.push_back(Step::new(settings.countdown_interval(), Action::Tick));
        }

        Schedule { steps }
    }

    pub fn next_step(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }

    pub fn peek_delay(&self) -> Option<Duration> {
        self.steps.front().map(|step| step.delay)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    #[cfg(test)]
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }
}
