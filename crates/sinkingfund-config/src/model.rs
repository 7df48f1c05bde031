use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HORIZON_DAYS: u32 = 365;
pub const DEFAULT_LOG_FILTER: &str = "sinkingfund=info";
const BILLS_FILE_NAME: &str = "bills.json";

/// Planner preferences persisted as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Days ahead covered by "upcoming" queries.
    #[serde(default = "Config::default_horizon_days")]
    pub horizon_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom bills file. Defaults to `~/Documents/SinkingFund/bills.json`.
    pub bills_path: Option<PathBuf>,
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            horizon_days: Self::default_horizon_days(),
            bills_path: None,
            log_filter: Self::default_log_filter(),
        }
    }
}

impl Config {
    pub fn default_horizon_days() -> u32 {
        DEFAULT_HORIZON_DAYS
    }

    pub fn default_log_filter() -> String {
        DEFAULT_LOG_FILTER.into()
    }

    /// Tracing directive to install, falling back to the default when blank.
    pub fn effective_log_filter(&self) -> &str {
        match self.log_filter.trim() {
            "" => DEFAULT_LOG_FILTER,
            filter => filter,
        }
    }

    pub fn resolve_bills_path(&self) -> PathBuf {
        if let Some(path) = &self.bills_path {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("SinkingFund").join(BILLS_FILE_NAME)
    }
}
