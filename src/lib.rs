#![doc(test(attr(deny(warnings))))]

//! Sinking Fund turns bill definitions into dated, exact-amount schedules.
//!
//! The member crates are re-exported so callers depend on this crate alone.

pub mod errors;
pub mod planner;
pub mod utils;

pub use sinkingfund_config as config;
pub use sinkingfund_core as services;
pub use sinkingfund_domain as domain;
pub use sinkingfund_storage_json as storage;

pub use errors::SinkingFundError;
pub use planner::Planner;
pub use sinkingfund_domain::{
    instances_in_range, iter_instances_in_range, Bill, BillInstance, Frequency,
};

use std::sync::OnceLock;

use sinkingfund_config::Config;

static TRACING_FILTER: OnceLock<String> = OnceLock::new();

/// Initializes global tracing with the default filter and emits a startup info log.
pub fn init() {
    init_with_filter(sinkingfund_config::model::DEFAULT_LOG_FILTER);
}

/// Initializes tracing with the `log_filter` saved in `config`.
pub fn init_from_config(config: &Config) {
    init_with_filter(config.effective_log_filter());
}

/// Like [`init`], using `filter` when `RUST_LOG` is unset. Only the first call takes effect.
pub fn init_with_filter(filter: &str) {
    TRACING_FILTER.get_or_init(|| {
        utils::init_tracing(filter);
        tracing::info!(filter, "Sinking Fund tracing initialized.");
        filter.to_string()
    });
}

/// Default directive handed to the subscriber, once tracing has been initialized.
pub fn tracing_filter() -> Option<&'static str> {
    TRACING_FILTER.get().map(String::as_str)
}
