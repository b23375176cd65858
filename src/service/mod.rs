mod errors;
mod http;
mod memory;

use std::future::Future;

use crate::models::{NewTransaction, Summary, Transaction};
use crate::types::{TransactionId, UserId};

pub use errors::ServiceError;
pub use http::HttpTransactionService;
pub use memory::{InMemoryTransactionService, ServiceCalls};

/// Contract of the remote transaction service.
///
/// The sync layer only ever talks to the service through this trait, so any
/// transport can sit behind it.
pub trait TransactionService: Send + Sync {
    /// Transactions owned by `user_id`, in the order the service returns them.
    fn list_transactions(&self, user_id: &UserId) -> impl Future<Output = Result<Vec<Transaction>, ServiceError>> + Send;

    fn get_summary(&self, user_id: &UserId) -> impl Future<Output = Result<Summary, ServiceError>> + Send;

    /// Persists a validated request. Returns the stored transaction when the
    /// service echoes it back, `None` for a bare acknowledgement.
    fn create_transaction(&self, request: &NewTransaction) -> impl Future<Output = Result<Option<Transaction>, ServiceError>> + Send;

    fn delete_transaction(&self, id: &TransactionId) -> impl Future<Output = Result<(), ServiceError>> + Send;
}
