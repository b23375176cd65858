use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::warn;

use crate::models::{Summary, Transaction};
use crate::types::TransactionId;

/// What the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncState {
    /// In the order the service returned them.
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
    /// True while at least one load cycle is in flight.
    pub loading: bool,
    /// Why the most recent load cycle did not fully succeed.
    pub last_error: Option<String>
}

#[derive(Debug, Default)]
struct Generations {
    issued: u64,
    in_flight: usize,
    transactions: u64,
    summary: u64,
    error: u64
}

impl Generations {
    /// Every load issued so far counts as already applied.
    fn supersede_loads(&mut self) {
        self.transactions = self.issued;
        self.summary = self.issued;
    }
}

/// Client-side snapshot of one user's transactions and summary.
///
/// Readers take a [`snapshot`](Self::snapshot) or [`subscribe`](Self::subscribe)
/// to changes; only the sync controller writes.
///
/// Every load cycle is numbered when it starts. A result is applied only if no
/// later cycle has already written the same slice, so a slow response can never
/// overwrite a newer one.
#[derive(Debug)]
pub struct TransactionStore {
    state: watch::Sender<SyncState>,
    generations: Mutex<Generations>
}

/// Marks one load cycle as in flight. Dropping it, on any path, releases the loading flag.
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    store: &'a TransactionStore,
    generation: u64
}

impl LoadingGuard<'_> {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut generations = self.store.generations();
        generations.in_flight = generations.in_flight.saturating_sub(1);
        self.store.set_loading(generations.in_flight > 0);
    }
}

impl TransactionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SyncState::default());

        Self {
            state,
            generations: Mutex::new(Generations::default())
        }
    }

    pub fn snapshot(&self) -> SyncState {
        self.state.borrow().clone()
    }

    /// A receiver that is notified after every change.
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub(crate) fn begin_load(&self) -> LoadingGuard<'_> {
        let mut generations = self.generations();
        generations.issued += 1;
        generations.in_flight += 1;
        self.set_loading(true);

        LoadingGuard {
            store: self,
            generation: generations.issued
        }
    }

    pub(crate) fn set_loading(&self, loading: bool) {
        self.state.send_if_modified(|state| {
            let changed = state.loading != loading;
            state.loading = loading;
            changed
        });
    }

    /// Returns `false` when the list was discarded as stale.
    pub(crate) fn replace_transactions(&self, generation: u64, transactions: Vec<Transaction>) -> bool {
        let mut generations = self.generations();

        if generation <= generations.transactions {
            warn!("Discarding transactions from load [{generation}], load [{}] already applied", generations.transactions);
            return false;
        }

        generations.transactions = generation;
        self.state.send_modify(|state| state.transactions = transactions);

        true
    }

    /// Returns `false` when the summary was discarded as stale.
    pub(crate) fn replace_summary(&self, generation: u64, summary: Summary) -> bool {
        let mut generations = self.generations();

        if generation <= generations.summary {
            warn!("Discarding summary from load [{generation}], load [{}] already applied", generations.summary);
            return false;
        }

        generations.summary = generation;
        self.state.send_modify(|state| state.summary = summary);

        true
    }

    /// Replaces both slices together, or neither if either is stale.
    pub(crate) fn replace_all(&self, generation: u64, transactions: Vec<Transaction>, summary: Summary) -> bool {
        let mut generations = self.generations();

        if generation <= generations.transactions || generation <= generations.summary {
            warn!("Discarding load [{generation}], a newer load was already applied");
            return false;
        }

        generations.transactions = generation;
        generations.summary = generation;
        self.state.send_modify(|state| {
            state.transactions = transactions;
            state.summary = summary;
        });

        true
    }

    pub(crate) fn record_error(&self, generation: u64, error: Option<String>) {
        let mut generations = self.generations();

        if generation <= generations.error {
            return;
        }

        generations.error = generation;
        self.state.send_if_modified(|state| {
            let changed = state.last_error != error;
            state.last_error = error;
            changed
        });
    }

    /// Drops a transaction locally and takes its amount out of the summary.
    ///
    /// Loads issued before the patch are discarded when they land.
    pub(crate) fn remove_transaction(&self, id: &TransactionId) -> Option<Transaction> {
        let mut generations = self.generations();
        generations.supersede_loads();

        let mut removed = None;

        self.state.send_if_modified(|state| {
            let Some(position) = state.transactions.iter().position(|transaction| &transaction.id == id) else {
                return false;
            };

            let transaction = state.transactions.remove(position);
            state.summary.exclude(transaction.amount);
            removed = Some(transaction);

            true
        });

        removed
    }

    /// Puts a newly created transaction at the top and adds its amount to the summary.
    ///
    /// Returns `false` if a load already brought the transaction in. Loads issued
    /// before the patch are discarded when they land.
    pub(crate) fn prepend_transaction(&self, transaction: Transaction) -> bool {
        let mut generations = self.generations();
        generations.supersede_loads();

        self.state.send_if_modified(|state| {
            if state.transactions.iter().any(|existing| existing.id == transaction.id) {
                return false;
            }

            state.summary.include(transaction.amount);
            state.transactions.insert(0, transaction);

            true
        })
    }

    /// Back to the empty, zeroed state used when the owning user changes.
    pub(crate) fn reset(&self) {
        let mut generations = self.generations();

        // Loads issued for the previous user must not land.
        generations.supersede_loads();
        generations.error = generations.issued;

        let loading = generations.in_flight > 0;
        self.state.send_replace(SyncState { loading, ..SyncState::default() });
    }

    fn generations(&self) -> MutexGuard<'_, Generations> {
        self.generations.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}
