mod errors;
mod sync_controller;

pub use errors::SyncError;
pub use sync_controller::{LoadOutcome, LoadPolicy, MutationMode, SyncController};
