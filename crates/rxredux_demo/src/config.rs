use std::path::PathBuf;
use std::time::Duration;

use engine_logging::LogDestination;

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub page_size: usize,
    /// Simulated latency of every repository call.
    pub latency: Duration,
    /// Where the durable screen state is kept between runs.
    pub state_file: PathBuf,
    pub log_destination: LogDestination,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            page_size: 3,
            latency: Duration::from_millis(150),
            state_file: PathBuf::from(".rxredux_demo_state.ron"),
            log_destination: LogDestination::default(),
        }
    }
}
