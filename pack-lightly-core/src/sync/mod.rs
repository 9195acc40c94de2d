//! Category synchronization.
//!
//! One engine per selected packing list. The view layer mutates the shared
//! `ChecklistStore` and calls `SyncEngine::sync_category` for the affected
//! category after every mutation; the engine owns the status transitions,
//! the transient-badge expiry and the single automatic retry.

mod engine;
mod transport;

pub use engine::{SyncEngine, RETRY_DELAY, SAVED_TTL};
pub use transport::CategoryTransport;
