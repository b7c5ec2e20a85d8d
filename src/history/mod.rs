//! Query history module.

mod store;

pub use store::{HistoryEntry, QueryHistory};
