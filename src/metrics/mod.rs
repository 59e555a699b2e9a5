use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ACTIVE_SESSIONS: IntGauge =
        IntGauge::new("wordblitz_active_sessions", "Round sessions currently alive")
            .expect("metric cannot be created");
    pub static ref CONNECTED_PLAYERS: IntGauge =
        IntGauge::new("wordblitz_connected_players", "Amount of players connected")
            .expect("metric cannot be created");
    pub static ref ROUNDS_STARTED: IntCounter =
        IntCounter::new("wordblitz_rounds_started", "Rounds that entered the selection phase")
            .expect("metric cannot be created");
    pub static ref SCORES_SUBMITTED: IntCounter =
        IntCounter::new("wordblitz_scores_submitted", "Rounds completed with a reported score")
            .expect("metric cannot be created");
}

pub fn register_metrics() {
    let collectors: [Box<dyn prometheus::core::Collector>; 4] = [
        Box::new(ACTIVE_SESSIONS.clone()),
        Box::new(CONNECTED_PLAYERS.clone()),
        Box::new(ROUNDS_STARTED.clone()),
        Box::new(SCORES_SUBMITTED.clone()),
    ];
    for collector in collectors {
        // Registering twice happens when several servers share the process (tests)
        if let Err(error) = REGISTRY.register(collector) {
            log::debug!("Collector already registered. Error: '{error}'.");
        }
    }
}
