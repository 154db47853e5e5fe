use std::time::Duration;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

/// Pacing of the pre-race countdown and the progress poll.
#[derive(Clone, Debug, PartialEq)]
pub struct RaceTiming {
    pub countdown_lead_in: Duration,
    pub countdown_tick: Duration,
    pub countdown_ticks: u32,
    pub poll_interval: Duration,
}

impl Default for RaceTiming {
    fn default() -> Self {
        Self {
            countdown_lead_in: Duration::from_secs(1),
            countdown_tick: Duration::from_secs(1),
            countdown_ticks: 3,
            poll_interval: Duration::from_millis(500),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timing: RaceTiming,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timing: RaceTiming::default(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_URL)
    }
}
