//! Offering a category change to other transactions from the same merchant.
//!
//! When the user moves a transaction to another category, the cached
//! transactions with the same merchant token are likely to belong there too.
//! The user is asked once, and every candidate is moved with one bulk update.
//! This is best effort: the edited transaction is already saved by the time
//! the bulk update is sent, and a failed bulk update does not undo it.

use crate::{
    Error,
    api::LedgerApi,
    database_id::{CategoryId, TransactionId},
    ledger::{LedgerCache, LedgerContext, extract_merchant_token},
    transaction::Transaction,
};

/// Find the transactions in `transactions` from the same merchant as
/// `description` that are not already in `category_id`.
///
/// The transaction with `exclude_id`, i.e. the one being edited, is never returned.
pub fn find_similar_transactions<'a>(
    transactions: &'a [Transaction],
    description: &str,
    exclude_id: TransactionId,
    category_id: CategoryId,
) -> Vec<&'a Transaction> {
    let token = extract_merchant_token(description);

    if token.is_empty() {
        return Vec::new();
    }

    transactions
        .iter()
        .filter(|transaction| transaction.id != exclude_id)
        .filter(|transaction| transaction.category_id != category_id)
        .filter(|transaction| extract_merchant_token(&transaction.description) == token)
        .collect()
}

/// A bulk category update waiting for the user's approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationPlan {
    /// The transactions to move.
    pub transaction_ids: Vec<TransactionId>,
    /// The category to move them to.
    pub category_id: CategoryId,
}

impl PropagationPlan {
    /// The question to ask the user before applying the plan.
    pub fn prompt(&self) -> String {
        format!(
            "Found {} similar transaction(s) with the same merchant. \
            Would you like to apply this category to all of them?",
            self.len()
        )
    }

    /// The number of transactions the plan would move.
    pub fn len(&self) -> usize {
        self.transaction_ids.len()
    }

    /// Whether the plan would not move anything.
    pub fn is_empty(&self) -> bool {
        self.transaction_ids.is_empty()
    }
}

/// Work out which cached transactions should follow an edit into
/// `category_id`.
///
/// Returns `None` when no cached transaction qualifies.
pub fn plan_propagation(
    cache: &LedgerCache,
    edited_id: TransactionId,
    description: &str,
    category_id: CategoryId,
) -> Option<PropagationPlan> {
    let transaction_ids: Vec<_> =
        find_similar_transactions(cache.transactions(), description, edited_id, category_id)
            .into_iter()
            .map(|transaction| transaction.id)
            .collect();

    if transaction_ids.is_empty() {
        None
    } else {
        Some(PropagationPlan {
            transaction_ids,
            category_id,
        })
    }
}

/// A bulk category update that failed after the edit itself was saved.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("could not move {candidates} similar transaction(s) to the new category: {source}")]
pub struct PropagationError {
    /// How many transactions the update would have moved.
    pub candidates: usize,
    /// Why the update failed.
    pub source: Error,
}

/// What happened to the other transactions after a category edit.
#[derive(Debug, Clone, PartialEq)]
pub enum PropagationOutcome {
    /// The category did not change, so nothing else was considered.
    NotRequested,
    /// No cached transaction from the same merchant needed moving.
    NoCandidates,
    /// The user chose not to move the candidates.
    Declined {
        /// How many transactions were offered.
        candidates: usize,
    },
    /// The candidates were moved.
    Applied {
        /// How many transactions were moved.
        updated: usize,
    },
    /// The bulk update failed. The edit itself was still saved.
    Failed(PropagationError),
}

/// Send the bulk update for an approved `plan`.
///
/// Failures are logged and returned as [PropagationOutcome::Failed], never
/// as an error, since the edit that triggered the plan has already been saved.
pub async fn apply_propagation<A: LedgerApi>(api: &A, plan: &PropagationPlan) -> PropagationOutcome {
    if plan.is_empty() {
        return PropagationOutcome::NoCandidates;
    }

    match api
        .bulk_update_category(&plan.transaction_ids, plan.category_id)
        .await
    {
        Ok(()) => {
            tracing::info!(
                "Moved {} similar transaction(s) to category {}",
                plan.len(),
                plan.category_id
            );
            PropagationOutcome::Applied {
                updated: plan.len(),
            }
        }
        Err(source) => {
            let error = PropagationError {
                candidates: plan.len(),
                source,
            };
            tracing::error!("{error}");
            PropagationOutcome::Failed(error)
        }
    }
}

impl LedgerContext {
    /// The category change offered by the most recent edit, if the user has
    /// not answered it yet.
    pub fn pending_propagation(&self) -> Option<&PropagationPlan> {
        self.pending_propagation.as_ref()
    }

    /// Apply the category change offered by the most recent edit, then
    /// reload the cache.
    ///
    /// Only the plan worked out by [LedgerContext::save_edit] is ever sent.
    /// The plan is released whatever the outcome, and a failed bulk update
    /// is reported in the outcome since the edit itself is already saved.
    ///
    /// # Errors
    /// Returns [Error::NoPendingPropagation] if no category change is waiting
    /// for the user.
    pub async fn confirm_propagation<A: LedgerApi>(
        &mut self,
        api: &A,
    ) -> Result<PropagationOutcome, Error> {
        let plan = self
            .pending_propagation
            .take()
            .ok_or(Error::NoPendingPropagation)?;

        let outcome = apply_propagation(api, &plan).await;
        self.reload_after_change(api).await;

        Ok(outcome)
    }

    /// Keep the edit to one transaction and drop the offered category change.
    pub fn decline_propagation(&mut self) -> Option<PropagationPlan> {
        self.pending_propagation.take()
    }
}
