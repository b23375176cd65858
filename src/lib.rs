//! Client-side synchronisation of a user's transactions and balance summary
//! against a remote personal-finance service.
//!
//! [`validation`] turns form input into creation requests, [`controller`]
//! drives reads and writes through a [`service::TransactionService`], and
//! [`store`] holds what the presentation layer renders.

pub mod config;
pub mod controller;
pub mod models;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

pub use controller::{LoadOutcome, LoadPolicy, MutationMode, SyncController, SyncError};
pub use models::{Category, NewTransaction, Summary, Transaction};
pub use service::{HttpTransactionService, InMemoryTransactionService, ServiceError, TransactionService};
pub use store::{SyncState, TransactionStore};
pub use types::{TransactionId, UserId};
pub use validation::{TransactionDraft, ValidationError};
