//! The local copy of the transactions matching the current filters.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    api::{LedgerApi, TransactionQuery},
    database_id::{CategoryId, TransactionId},
    ledger::{SortConfig, filter, sort},
    transaction::{Transaction, TransactionType},
};

/// Filter transactions on whether they count towards totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Only transactions that count towards totals.
    Included,
    /// Only transactions that are left out of totals.
    Excluded,
}

impl StatusFilter {
    fn matches(self, transaction: &Transaction) -> bool {
        match self {
            StatusFilter::Included => !transaction.is_excluded,
            StatusFilter::Excluded => transaction.is_excluded,
        }
    }
}

/// The filters the user has picked for the transactions view.
///
/// Everything except the search term is applied when the ledger is loaded.
/// The search term is applied to the cached transactions each time the view
/// is rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Only show income or only show expenses.
    #[serde(rename = "type", default)]
    pub transaction_type: Option<TransactionType>,
    /// Only show transactions in this category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Only show included or only show excluded transactions.
    #[serde(default)]
    pub status: Option<StatusFilter>,
    /// Only show transactions on or after this date.
    #[serde(default)]
    pub start_date: Option<Date>,
    /// Only show transactions on or before this date.
    #[serde(default)]
    pub end_date: Option<Date>,
    /// Only show transactions whose description or category contains this text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search: String,
}

impl FilterState {
    /// The query that fetches the transactions for these filters.
    ///
    /// Excluded transactions are always requested, the status filter is
    /// applied to the response instead.
    pub fn to_query(&self) -> TransactionQuery {
        TransactionQuery {
            transaction_type: self.transaction_type,
            category_id: self.category_id,
            include_excluded: true,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// The transactions from the most recent successful load.
///
/// The cache is only ever replaced as a whole. A failed load keeps the
/// previous transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerCache {
    transactions: Vec<Transaction>,
}

impl LedgerCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the transactions matching `filter_state` and replace the cache
    /// with them.
    ///
    /// # Errors
    /// Returns the API error if the request fails, in which case the cache is
    /// left as it was.
    pub async fn load<A: LedgerApi>(
        &mut self,
        api: &A,
        filter_state: &FilterState,
    ) -> Result<(), Error> {
        let transactions = api.list_transactions(&filter_state.to_query()).await?;

        let transactions = match filter_state.status {
            Some(status) => transactions
                .into_iter()
                .filter(|transaction| status.matches(transaction))
                .collect(),
            None => transactions,
        };

        tracing::debug!("Loaded {} transactions", transactions.len());
        self.replace(transactions);

        Ok(())
    }

    /// Replace every cached transaction.
    pub fn replace(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    /// The cached transactions in the order the API returned them.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Get the cached transaction with `id`.
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    /// The number of cached transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the cache has no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The transactions to display: those matching the search term, in the
    /// order given by `sort_config`.
    pub fn current_view(&self, sort_config: &SortConfig, filter_state: &FilterState) -> Vec<Transaction> {
        let matching = filter(&self.transactions, &filter_state.search);

        sort(matching, sort_config.field, sort_config.direction)
    }
}
