//! Push reconciliation of local records to the cloud.

mod engine;


pub use engine::{SyncEngine, SyncError, SyncReport};
