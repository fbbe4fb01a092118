use std::time::Duration;

/// Simulated backend latency per operation, stand-in for database/contract round trips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Latency {
    pub list: Duration,
    pub get: Duration,
    pub participants: Duration,
    pub check: Duration,
    pub entries: Duration,
    pub winners: Duration,
    pub enter: Duration,
    pub draw: Duration,
}

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Delay applied before each operation runs
    pub latency: Latency,
    /// Winners board size when the caller does not give one
    pub winners_board_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            latency: Latency::default(),
            winners_board_limit: 10,
        }
    }
}

impl ServiceConfig {
    /// Delays matching the demo backend (list 500ms, get 300ms, enter 1.5s, draw 2s, ...)
    pub fn simulated() -> Self {
        Self {
            latency: Latency {
                list: Duration::from_millis(500),
                get: Duration::from_millis(300),
                participants: Duration::from_millis(300),
                check: Duration::from_millis(200),
                entries: Duration::from_millis(500),
                winners: Duration::from_millis(800),
                enter: Duration::from_millis(1500),
                draw: Duration::from_millis(2000),
            },
            ..Self::default()
        }
    }

    pub fn with_winners_board_limit(mut self, limit: usize) -> Self {
        self.winners_board_limit = limit;
        self
    }
}

/// Sleep for `delay`, skipping the timer entirely when it is zero
pub(crate) async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_latency() {
        let config = ServiceConfig::default();
        assert_eq!(config.latency, Latency::default());
        assert_eq!(config.winners_board_limit, 10);
    }

    #[test]
    fn simulated_matches_demo_delays() {
        let config = ServiceConfig::simulated();
        assert_eq!(config.latency.enter, Duration::from_millis(1500));
        assert_eq!(config.latency.draw, Duration::from_millis(2000));
        assert_eq!(config.latency.check, Duration::from_millis(200));
        assert_eq!(config.winners_board_limit, 10);
    }
}
