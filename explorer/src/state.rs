use chrono::{DateTime, Utc};
use ethscope_config::{Config, Network};
use ethscope_core::Explorer;

pub struct AppState {
    pub explorer: Explorer,
    pub network: Network,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(explorer: Explorer, network: Network) -> Self {
        AppState {
            explorer,
            network,
            started_at: Utc::now(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(Explorer::from_config(cfg), cfg.network)
    }
}
