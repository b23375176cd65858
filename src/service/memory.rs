use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use rust_decimal::Decimal;

use crate::models::{Category, NewTransaction, Summary, Transaction};
use crate::service::{ServiceError, TransactionService};
use crate::types::{TransactionId, UserId};

/// How many times each operation has been called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceCalls {
    pub list: usize,
    pub summary: usize,
    pub create: usize,
    pub delete: usize
}

#[derive(Debug, Default)]
struct PendingFailures {
    list: bool,
    summary: bool,
    create: Option<Option<String>>,
    delete: bool
}

#[derive(Debug, Default)]
struct MemoryState {
    transactions: HashMap<UserId, Vec<Transaction>>,
    next_id: u64,
    calls: ServiceCalls,
    failures: PendingFailures
}

/// Process-local implementation of the service contract.
///
/// Keeps each user's transactions newest first and derives summaries from
/// them. The `fail_next_*` switches make exactly one subsequent call fail.
#[derive(Debug, Default)]
pub struct InMemoryTransactionService {
    state: Mutex<MemoryState>
}

impl InMemoryTransactionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a transaction directly, bypassing validation.
    pub fn seed(&self, user_id: &UserId, title: &str, amount: Decimal, category: Category) -> Transaction {
        let mut state = self.lock();
        state.insert(user_id.clone(), title.to_string(), amount, category)
    }

    pub fn calls(&self) -> ServiceCalls {
        self.lock().calls
    }

    pub fn fail_next_list(&self) {
        self.lock().failures.list = true;
    }

    pub fn fail_next_summary(&self) {
        self.lock().failures.summary = true;
    }

    /// Rejects the next create, optionally with a reason in the error body.
    pub fn fail_next_create(&self, message: Option<&str>) {
        self.lock().failures.create = Some(message.map(str::to_string));
    }

    pub fn fail_next_delete(&self) {
        self.lock().failures.delete = true;
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MemoryState {
    fn insert(&mut self, user_id: UserId, title: String, amount: Decimal, category: Category) -> Transaction {
        self.next_id += 1;

        let transaction = Transaction {
            id: TransactionId::from(self.next_id),
            user_id: user_id.clone(),
            title,
            amount,
            category,
            created_at: Utc::now()
        };

        self.transactions.entry(user_id).or_default().insert(0, transaction.clone());

        transaction
    }
}

impl TransactionService for InMemoryTransactionService {
    async fn list_transactions(&self, user_id: &UserId) -> Result<Vec<Transaction>, ServiceError> {
        let mut state = self.lock();
        state.calls.list += 1;

        if std::mem::take(&mut state.failures.list) {
            return Err(ServiceError::status(500, Some("Internal server error")));
        }

        Ok(state.transactions.get(user_id).cloned().unwrap_or_default())
    }

    async fn get_summary(&self, user_id: &UserId) -> Result<Summary, ServiceError> {
        let mut state = self.lock();
        state.calls.summary += 1;

        if std::mem::take(&mut state.failures.summary) {
            return Err(ServiceError::status(500, Some("Internal server error")));
        }

        Ok(state.transactions.get(user_id)
            .map(|transactions| Summary::from_transactions(transactions))
            .unwrap_or_default())
    }

    async fn create_transaction(&self, request: &NewTransaction) -> Result<Option<Transaction>, ServiceError> {
        let mut state = self.lock();
        state.calls.create += 1;

        if let Some(message) = state.failures.create.take() {
            return Err(ServiceError::status(400, message.as_deref()));
        }

        let transaction = state.insert(
            request.user_id().clone(),
            request.title().to_string(),
            request.amount(),
            request.category()
        );

        Ok(Some(transaction))
    }

    async fn delete_transaction(&self, id: &TransactionId) -> Result<(), ServiceError> {
        let mut state = self.lock();
        state.calls.delete += 1;

        if std::mem::take(&mut state.failures.delete) {
            return Err(ServiceError::status(500, None));
        }

        for transactions in state.transactions.values_mut() {
            if let Some(position) = transactions.iter().position(|transaction| &transaction.id == id) {
                transactions.remove(position);
                return Ok(());
            }
        }

        Err(ServiceError::status(404, Some("Transaction not found")))
    }
}
