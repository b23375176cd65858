use thiserror::Error;

use crate::service::ServiceError;
use crate::types::TransactionId;
use crate::validation::ValidationError;

pub const CREATE_FAILED_MESSAGE: &str = "Failed to create transaction";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete transaction";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("Failed to load {}", failed_slices(.transactions, .summary))]
    LoadFailed {
        transactions: Option<ServiceError>,
        summary: Option<ServiceError>
    },
    #[error("{reason}")]
    CreateFailed {
        reason: String,
        source: ServiceError
    },
    #[error("{reason}")]
    DeleteFailed {
        id: TransactionId,
        reason: String,
        source: ServiceError
    },
    #[error("No user is signed in")]
    NoUser,
    #[error(transparent)]
    Invalid(#[from] ValidationError)
}

impl SyncError {
    pub fn load_failed(transactions: Option<ServiceError>, summary: Option<ServiceError>) -> Self {
        Self::LoadFailed { transactions, summary }
    }

    /// Uses the reason the service gave, if any.
    pub fn create_failed(source: ServiceError) -> Self {
        let reason = source.server_message().unwrap_or(CREATE_FAILED_MESSAGE).to_string();
        Self::CreateFailed { reason, source }
    }

    pub fn delete_failed(id: &TransactionId, source: ServiceError) -> Self {
        Self::DeleteFailed {
            id: id.clone(),
            reason: DELETE_FAILED_MESSAGE.to_string(),
            source
        }
    }
}

fn failed_slices(transactions: &Option<ServiceError>, summary: &Option<ServiceError>) -> &'static str {
    match (transactions, summary) {
        (Some(_), Some(_)) => "transactions and summary",
        (Some(_), None) => "transactions",
        (None, Some(_)) => "summary",
        (None, None) => "nothing"
    }
}
