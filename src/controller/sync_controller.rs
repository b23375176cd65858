use tracing::{debug, error};

use crate::controller::SyncError;
use crate::models::{NewTransaction, Summary, Transaction};
use crate::service::{ServiceError, TransactionService};
use crate::store::TransactionStore;
use crate::types::{TransactionId, UserId};
use crate::validation::{validate, TransactionDraft};

/// How the two halves of a load cycle reach the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Each slice is replaced as soon as its own request succeeded.
    #[default]
    Independent,
    /// Both slices are replaced together, and only if both requests succeeded.
    Atomic
}

/// What happens to the store after a successful create or delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MutationMode {
    /// Reconcile only by fetching everything again.
    #[default]
    Refetch,
    /// Patch the store locally as soon as the service acknowledges, then reconcile as usual.
    Optimistic
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No user yet, nothing was requested.
    Skipped,
    Loaded,
    /// At least one request failed. Whatever did succeed was still applied
    /// according to the load policy and the failure is also recorded in the store.
    Failed(SyncError)
}

/// Keeps one user's [`TransactionStore`] in step with the remote service.
///
/// Owns the store for the lifetime of a session; presentation code reads it
/// through [`store`](Self::store) and never writes to it.
pub struct SyncController<S> {
    service: S,
    store: TransactionStore,
    user_id: Option<UserId>,
    load_policy: LoadPolicy,
    mutation_mode: MutationMode
}

impl<S: TransactionService> SyncController<S> {
    pub fn new(service: S, user_id: Option<UserId>) -> Self {
        Self {
            service,
            store: TransactionStore::new(),
            user_id,
            load_policy: LoadPolicy::default(),
            mutation_mode: MutationMode::default()
        }
    }

    pub fn with_load_policy(mut self, load_policy: LoadPolicy) -> Self {
        self.load_policy = load_policy;
        self
    }

    pub fn with_mutation_mode(mut self, mutation_mode: MutationMode) -> Self {
        self.mutation_mode = mutation_mode;
        self
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Switches the session to another user (or none), starting from an empty store.
    pub fn set_user(&mut self, user_id: Option<UserId>) {
        if self.user_id != user_id {
            self.store.reset();
            self.user_id = user_id;
        }
    }

    /// Fetches the transaction list and the summary concurrently and writes them to the store.
    ///
    /// Both requests are always awaited. The loading flag is set for the whole
    /// cycle and cleared however it ends. Failures never propagate: stale data
    /// stays visible and the failure is logged and recorded in the store.
    pub async fn load_all(&self) -> LoadOutcome {
        let Some(user_id) = self.user_id.as_ref() else {
            debug!("No user yet, skipping load");
            return LoadOutcome::Skipped;
        };

        let guard = self.store.begin_load();
        let generation = guard.generation();

        let (transactions, summary) = tokio::join!(
            self.service.list_transactions(user_id),
            self.service.get_summary(user_id)
        );

        let outcome = self.apply_load(user_id, generation, transactions, summary);
        drop(guard);

        outcome
    }

    /// Deletes a transaction, then reloads everything for the current user.
    ///
    /// # Errors
    /// Returns [`SyncError::DeleteFailed`] if the service rejects the request; the store is left untouched.
    pub async fn delete_transaction(&self, id: &TransactionId) -> Result<(), SyncError> {
        if let Err(error) = self.service.delete_transaction(id).await {
            error!("Error deleting transaction [{id}]: {error}");
            return Err(SyncError::delete_failed(id, error));
        }

        debug!("Transaction [{id}] deleted");

        if self.mutation_mode == MutationMode::Optimistic {
            self.store.remove_transaction(id);
        }

        self.load_all().await;

        Ok(())
    }

    /// Submits a validated request. What the caller does next (usually leaving
    /// the create screen) is up to the caller.
    ///
    /// # Errors
    /// Returns [`SyncError::CreateFailed`] with the service's reason when it has one.
    pub async fn create_transaction(&self, request: &NewTransaction) -> Result<Option<Transaction>, SyncError> {
        let created = match self.service.create_transaction(request).await {
            Ok(created) => created,
            Err(error) => {
                error!("Error creating transaction for user [{}]: {error}", request.user_id());
                return Err(SyncError::create_failed(error));
            }
        };

        debug!("Transaction created for user [{}]", request.user_id());

        if self.mutation_mode == MutationMode::Optimistic {
            if let Some(transaction) = created.as_ref().filter(|transaction| self.user_id.as_ref() == Some(&transaction.user_id)) {
                if !self.store.prepend_transaction(transaction.clone()) {
                    debug!("Transaction [{}] already loaded, not prepending", transaction.id);
                }
            }
        }

        Ok(created)
    }

    /// Validates a draft for the current user and submits it.
    ///
    /// # Errors
    /// [`SyncError::NoUser`] without a user, [`SyncError::Invalid`] if validation
    /// fails (nothing is sent), otherwise as [`create_transaction`](Self::create_transaction).
    pub async fn submit(&self, draft: &TransactionDraft) -> Result<Option<Transaction>, SyncError> {
        let user_id = self.user_id.as_ref().ok_or(SyncError::NoUser)?;
        let request = validate(draft, user_id)?;

        self.create_transaction(&request).await
    }

    fn apply_load(
        &self,
        user_id: &UserId,
        generation: u64,
        transactions: Result<Vec<Transaction>, ServiceError>,
        summary: Result<Summary, ServiceError>
    ) -> LoadOutcome {
        let (transactions, transactions_error) = split(transactions);
        let (summary, summary_error) = split(summary);

        if let Some(summary) = summary.as_ref().filter(|summary| !summary.is_balanced()) {
            debug!("Summary for user [{user_id}] does not add up: {summary:?}");
        }

        match self.load_policy {
            LoadPolicy::Independent => {
                if let Some(transactions) = transactions {
                    self.store.replace_transactions(generation, transactions);
                }
                if let Some(summary) = summary {
                    self.store.replace_summary(generation, summary);
                }
            }
            LoadPolicy::Atomic => {
                if let (Some(transactions), Some(summary)) = (transactions, summary) {
                    self.store.replace_all(generation, transactions, summary);
                }
            }
        }

        if let Some(error) = &transactions_error {
            error!("Error fetching transactions for user [{user_id}]: {error}");
        }

        if let Some(error) = &summary_error {
            error!("Error fetching summary for user [{user_id}]: {error}");
        }

        if transactions_error.is_none() && summary_error.is_none() {
            self.store.record_error(generation, None);
            debug!("Load [{generation}] for user [{user_id}] complete");
            return LoadOutcome::Loaded;
        }

        let failure = SyncError::load_failed(transactions_error, summary_error);
        self.store.record_error(generation, Some(failure.to_string()));

        LoadOutcome::Failed(failure)
    }
}

fn split<T>(result: Result<T, ServiceError>) -> (Option<T>, Option<ServiceError>) {
    match result {
        Ok(value) => (Some(value), None),
        Err(error) => (None, Some(error))
    }
}
