//! The state of one ledger session.

use crate::{
    Error,
    api::LedgerApi,
    category::Category,
    ledger::{FilterState, LedgerCache, PendingBulkDelete, PropagationPlan, SortConfig, SortField},
    transaction::Transaction,
};

/// Everything the ledger engine remembers between user actions.
///
/// A context belongs to one session and is passed into every ledger
/// operation. Operations take `&mut self`, so two of them never run on the
/// same context at once.
#[derive(Debug, Clone, Default)]
pub struct LedgerContext {
    pub(super) cache: LedgerCache,
    pub(super) sort_config: SortConfig,
    pub(super) filter_state: FilterState,
    pub(super) categories: Vec<Category>,
    pub(super) pending_bulk_delete: Option<PendingBulkDelete>,
    pub(super) pending_propagation: Option<PropagationPlan>,
}

impl LedgerContext {
    /// Create a context with an empty cache, the default sort and no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached transactions.
    pub fn cache(&self) -> &LedgerCache {
        &self.cache
    }

    /// The active sort.
    pub fn sort_config(&self) -> SortConfig {
        self.sort_config
    }

    /// The active filters.
    pub fn filter_state(&self) -> &FilterState {
        &self.filter_state
    }

    /// The categories from the most recent successful [LedgerContext::load_categories].
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Reload the cache with the active filters.
    ///
    /// # Errors
    /// Returns the API error if the request fails, the cache keeps its
    /// previous transactions.
    pub async fn reload<A: LedgerApi>(&mut self, api: &A) -> Result<(), Error> {
        self.cache.load(api, &self.filter_state).await
    }

    /// Reload after a change that has already been saved.
    ///
    /// The change stands even if the reload fails, so the failure is only logged.
    pub(super) async fn reload_after_change<A: LedgerApi>(&mut self, api: &A) {
        if let Err(error) = self.reload(api).await {
            tracing::error!("Could not reload transactions after a change: {error}");
        }
    }

    /// The transactions to display, searched and sorted.
    pub fn view(&self) -> Vec<Transaction> {
        self.cache
            .current_view(&self.sort_config, &self.filter_state)
    }

    /// Sort by `field`, flipping the direction if it is already the sort field.
    ///
    /// Returns the new sort.
    pub fn sort_by(&mut self, field: SortField) -> SortConfig {
        self.sort_config.toggle(field);
        self.sort_config
    }

    /// Replace the sort, e.g. with [SortConfig::default] when the page is
    /// loaded again.
    pub fn set_sort(&mut self, sort_config: SortConfig) {
        self.sort_config = sort_config;
    }

    /// Replace the filters. The cache is not reloaded.
    pub fn set_filter(&mut self, filter_state: FilterState) {
        self.filter_state = filter_state;
    }

    /// Change only the search term, which does not need a reload.
    pub fn set_search(&mut self, search: &str) {
        self.filter_state.search = search.to_owned();
    }

    /// Forget the state that must not outlive the page the user was on.
    ///
    /// Releases any bulk delete that was previewed but not confirmed, and any
    /// category change that was offered but not applied.
    pub fn navigate_away(&mut self) {
        if self.pending_bulk_delete.take().is_some() {
            tracing::debug!("Discarded the pending bulk delete");
        }

        if self.decline_propagation().is_some() {
            tracing::debug!("Discarded the pending category change");
        }
    }
}
