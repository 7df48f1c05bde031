//! sinkingfund-domain
//!
//! Bill definitions, calendar stepping, and occurrence generation.
//! No I/O, no storage. Every type here is immutable once built.

pub mod bill;
pub mod calendar;
pub mod error;
pub mod instance;
pub mod recurring;

pub use bill::{Bill, BillBuilder, RecurrenceEnd, Schedule, MINOR_UNIT_SCALE};
pub use calendar::{advance, checked_advance, Frequency};
pub use error::{RangeError, ValidationError};
pub use instance::BillInstance;
pub use recurring::{instances_in_range, iter_instances_in_range, BillInstances};
