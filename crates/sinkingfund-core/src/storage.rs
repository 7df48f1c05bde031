use std::path::Path;

use sinkingfund_domain::Bill;

use crate::CoreError;

/// Abstraction over persistence backends capable of storing bill definitions.
pub trait BillStorage: Send + Sync {
    fn load_bills(&self, path: &Path) -> Result<Vec<Bill>, CoreError>;
    fn save_bills(&self, path: &Path, bills: &[Bill]) -> Result<(), CoreError>;
}
