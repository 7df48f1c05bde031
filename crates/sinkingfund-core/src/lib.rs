//! sinkingfund-core
//!
//! Services that work across many bills: the bill book, multi-bill schedules,
//! and the storage contract. Depends on sinkingfund-domain. No terminal I/O.

pub mod bill_book;
pub mod error;
pub mod schedule_service;
pub mod storage;
pub mod time;


pub use bill_book::BillBook;
pub use error::CoreError;
pub use schedule_service::ScheduleService;
pub use storage::BillStorage;
pub use time::{Clock, FixedClock, SystemClock};
