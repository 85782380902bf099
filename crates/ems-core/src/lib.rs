pub mod alerts;
pub mod breakdown;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod documents;
pub mod error;
pub mod filter;
pub mod format;
pub mod id;
pub mod lock;
pub mod mail;
pub mod objects;
pub mod reminders;
pub mod resolve;
pub mod storage;
pub mod store;
pub mod types;
pub mod visa;

pub use error::{EmsError, Result};
