use thiserror::Error;

use sinkingfund_config::ConfigError;
use sinkingfund_core::CoreError;

/// Error type for operations that touch both configuration and bills.
#[derive(Debug, Error)]
pub enum SinkingFundError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
}
