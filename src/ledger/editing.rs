//! Creating, editing and deleting single transactions.

use crate::{
    Error,
    api::LedgerApi,
    category::Category,
    database_id::TransactionId,
    ledger::{
        Confirm, LedgerContext, PropagationOutcome, PropagationPlan, apply_propagation,
        plan_propagation,
    },
    transaction::{NewTransaction, Transaction, TransactionUpdate},
};

/// A saved edit and the category change it may be offered to.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedEdit {
    /// The transaction as returned by the API.
    pub transaction: Transaction,
    /// Whether the edit moved the transaction to another category.
    pub category_changed: bool,
    /// The similar transactions that could follow it, if any.
    pub plan: Option<PropagationPlan>,
}

/// The result of [LedgerContext::submit_edit].
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    /// The transaction as returned by the API.
    pub transaction: Transaction,
    /// What happened to similar transactions.
    pub propagation: PropagationOutcome,
}

impl LedgerContext {
    /// Save the user's changes to the cached transaction `id`, and work out
    /// which similar transactions could follow a category change.
    ///
    /// The candidates come from the cache as it was before the edit. The plan
    /// is kept until [LedgerContext::confirm_propagation] or
    /// [LedgerContext::decline_propagation], replacing any earlier one. The
    /// cache is not reloaded.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::NotInCache] if `id` is not a cached transaction,
    /// - [Error::Validation] if `form` is invalid, in which case nothing is sent,
    /// - or the API error if the update fails.
    pub async fn save_edit<A: LedgerApi>(
        &mut self,
        api: &A,
        id: TransactionId,
        form: &NewTransaction,
    ) -> Result<SavedEdit, Error> {
        self.pending_propagation = None;

        let previous_category_id = self
            .cache
            .get(id)
            .ok_or(Error::NotInCache(id))?
            .category_id;

        form.validate(&self.categories)?;

        let transaction = api
            .update_transaction(id, &TransactionUpdate::from(form))
            .await
            .inspect_err(|error| tracing::error!("Could not update transaction {id}: {error}"))?;

        let category_changed = previous_category_id != form.category_id;
        let plan = if category_changed {
            plan_propagation(&self.cache, id, &form.description, form.category_id)
        } else {
            None
        };
        self.pending_propagation = plan.clone();

        Ok(SavedEdit {
            transaction,
            category_changed,
            plan,
        })
    }

    /// Save an edit, offer a category change to similar transactions, then
    /// reload the cache.
    ///
    /// The user is only asked when the category changed and there are
    /// candidates. A failed bulk update is reported in the outcome and does
    /// not undo the edit. A failed reload is logged.
    ///
    /// # Errors
    /// Returns the same errors as [LedgerContext::save_edit]. Nothing after
    /// the update runs if it fails.
    pub async fn submit_edit<A: LedgerApi>(
        &mut self,
        api: &A,
        id: TransactionId,
        form: &NewTransaction,
        confirm: &mut impl Confirm,
    ) -> Result<EditOutcome, Error> {
        let saved = self.save_edit(api, id, form).await?;
        let plan = self.pending_propagation.take();

        let propagation = match (saved.category_changed, plan) {
            (false, _) => PropagationOutcome::NotRequested,
            (true, None) => PropagationOutcome::NoCandidates,
            (true, Some(plan)) => {
                if confirm.confirm(&plan.prompt()) {
                    apply_propagation(api, &plan).await
                } else {
                    PropagationOutcome::Declined {
                        candidates: plan.len(),
                    }
                }
            }
        };

        self.reload_after_change(api).await;

        Ok(EditOutcome {
            transaction: saved.transaction,
            propagation,
        })
    }

    /// Validate and create a new transaction, then reload the cache.
    ///
    /// # Errors
    /// Returns [Error::Validation] if `form` is invalid, in which case nothing
    /// is sent, or the API error if the request fails.
    pub async fn submit_new<A: LedgerApi>(
        &mut self,
        api: &A,
        form: &NewTransaction,
    ) -> Result<Transaction, Error> {
        form.validate(&self.categories)?;

        let transaction = api
            .create_transaction(form)
            .await
            .inspect_err(|error| tracing::error!("Could not create transaction: {error}"))?;

        tracing::info!("Created transaction {}", transaction.id);
        self.reload_after_change(api).await;

        Ok(transaction)
    }

    /// Delete transaction `id` after the user confirms, then reload the cache.
    ///
    /// Returns `false` if the user declined.
    ///
    /// # Errors
    /// Returns the API error if the request fails.
    pub async fn delete_transaction<A: LedgerApi>(
        &mut self,
        api: &A,
        id: TransactionId,
        confirm: &mut impl Confirm,
    ) -> Result<bool, Error> {
        if !confirm.confirm("Are you sure you want to delete this transaction?") {
            return Ok(false);
        }

        api.delete_transaction(id)
            .await
            .inspect_err(|error| tracing::error!("Could not delete transaction {id}: {error}"))?;

        tracing::info!("Deleted transaction {id}");
        self.reload_after_change(api).await;

        Ok(true)
    }

    /// Include or exclude transaction `id` from totals, then reload the cache.
    ///
    /// Only the status is sent, every other field is left as it is.
    ///
    /// # Errors
    /// Returns the API error if the request fails.
    pub async fn set_excluded<A: LedgerApi>(
        &mut self,
        api: &A,
        id: TransactionId,
        is_excluded: bool,
    ) -> Result<Transaction, Error> {
        let transaction = api
            .update_transaction(id, &TransactionUpdate::excluded(is_excluded))
            .await
            .inspect_err(|error| {
                tracing::error!("Could not update the status of transaction {id}: {error}")
            })?;

        self.reload_after_change(api).await;

        Ok(transaction)
    }

    /// Fetch the categories used to check and fill in transaction forms.
    ///
    /// # Errors
    /// Returns the API error if the request fails, the previous categories
    /// are kept.
    pub async fn load_categories<A: LedgerApi>(&mut self, api: &A) -> Result<&[Category], Error> {
        self.categories = api.list_categories().await?;

        Ok(&self.categories)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error, ValidationError,
        api::LedgerApi,
        category::Category,
        ledger::{LedgerContext, PropagationOutcome},
        test_utils::{FakeLedgerApi, Operation, transaction},
        transaction::{NewTransaction, Transaction, TransactionType},
    };

    fn api() -> FakeLedgerApi {
        FakeLedgerApi::new(vec![
            transaction(1, "DEBIT WALMART SUPERCENTER #1234", 1),
            transaction(2, "POS WALMART SUPERCENTER #88", 1),
            transaction(3, "Walmart Grocery", 1),
            transaction(4, "Countdown", 1),
        ])
        .with_categories(vec![
            Category::new(1, "Shopping", TransactionType::Expense),
            Category::new(2, "Groceries", TransactionType::Expense),
            Category::new(3, "Salary", TransactionType::Income),
        ])
    }

    async fn loaded(api: &FakeLedgerApi) -> LedgerContext {
        let mut ledger = LedgerContext::new();
        ledger.load_categories(api).await.unwrap();
        ledger.reload(api).await.unwrap();
        ledger
    }

    fn edit_of(transaction: &Transaction, category_id: i64) -> NewTransaction {
        NewTransaction {
            category_id,
            ..NewTransaction::from_transaction(transaction)
        }
    }

    #[tokio::test]
    async fn category_change_offers_similar_transactions() {
        let api = api();
        let mut ledger = loaded(&api).await;
        let form = edit_of(ledger.cache().get(1).unwrap(), 2);
        let mut prompts = Vec::new();

        let outcome = ledger
            .submit_edit(&api, 1, &form, &mut |prompt: &str| {
                prompts.push(prompt.to_owned());
                true
            })
            .await
            .unwrap();

        assert_eq!(outcome.transaction.category_id, 2);
        assert_eq!(outcome.propagation, PropagationOutcome::Applied { updated: 2 });
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Found 2 similar transaction(s)"));
        let in_groceries: Vec<_> = ledger
            .cache()
            .transactions()
            .iter()
            .filter(|t| t.category_id == 2)
            .map(|t| t.id)
            .collect();
        assert_eq!(in_groceries, [1, 2, 3]);
    }

    #[tokio::test]
    async fn unchanged_category_does_not_ask() {
        let api = api();
        let mut ledger = loaded(&api).await;
        let form = NewTransaction {
            amount: 99.0,
            ..edit_of(ledger.cache().get(1).unwrap(), 1)
        };

        let outcome = ledger
            .submit_edit(&api, 1, &form, &mut |_: &str| -> bool {
                panic!("should not ask when the category is unchanged")
            })
            .await
            .unwrap();

        assert_eq!(outcome.propagation, PropagationOutcome::NotRequested);
        assert_eq!(api.call_count(Operation::BulkUpdateCategory), 0);
    }

    #[tokio::test]
    async fn declined_propagation_keeps_the_edit_only() {
        let api = api();
        let mut ledger = loaded(&api).await;
        let form = edit_of(ledger.cache().get(1).unwrap(), 2);

        let outcome = ledger
            .submit_edit(&api, 1, &form, &mut |_: &str| false)
            .await
            .unwrap();

        assert_eq!(outcome.propagation, PropagationOutcome::Declined { candidates: 2 });
        assert_eq!(api.call_count(Operation::BulkUpdateCategory), 0);
        assert_eq!(ledger.cache().get(2).unwrap().category_id, 1);
    }

    #[tokio::test]
    async fn saved_edit_keeps_plan_until_confirmed() {
        let api = api();
        let mut ledger = loaded(&api).await;
        let form = edit_of(ledger.cache().get(1).unwrap(), 2);

        let saved = ledger.save_edit(&api, 1, &form).await.unwrap();
        assert_eq!(ledger.pending_propagation(), saved.plan.as_ref());
        assert_eq!(
            ledger.pending_propagation().map(|plan| plan.transaction_ids.clone()),
            Some(vec![2, 3])
        );

        let outcome = ledger.confirm_propagation(&api).await.unwrap();

        assert_eq!(outcome, PropagationOutcome::Applied { updated: 2 });
        assert!(ledger.pending_propagation().is_none());
        assert_eq!(ledger.cache().get(3).unwrap().category_id, 2);
        assert_eq!(
            ledger.confirm_propagation(&api).await,
            Err(Error::NoPendingPropagation)
        );
    }

    #[tokio::test]
    async fn failed_confirmation_still_reloads() {
        let api = api();
        let mut ledger = loaded(&api).await;
        let form = edit_of(ledger.cache().get(1).unwrap(), 2);
        ledger.save_edit(&api, 1, &form).await.unwrap();
        api.fail(Operation::BulkUpdateCategory);
        let reloads = api.call_count(Operation::ListTransactions);

        let outcome = ledger.confirm_propagation(&api).await.unwrap();

        assert!(matches!(outcome, PropagationOutcome::Failed(_)));
        assert_eq!(api.call_count(Operation::ListTransactions), reloads + 1);
        assert_eq!(ledger.cache().get(1).unwrap().category_id, 2);
        assert_eq!(ledger.cache().get(2).unwrap().category_id, 1);
        assert!(ledger.pending_propagation().is_none());
    }

    #[tokio::test]
    async fn unchanged_edit_or_leaving_drops_plan() {
        let api = api();
        let mut ledger = loaded(&api).await;
        let form = edit_of(ledger.cache().get(1).unwrap(), 2);
        ledger.save_edit(&api, 1, &form).await.unwrap();

        ledger.navigate_away();
        assert!(ledger.pending_propagation().is_none());

        ledger.save_edit(&api, 1, &form).await.unwrap();
        let declined = ledger.decline_propagation();
        assert_eq!(declined.map(|plan| plan.category_id), Some(2));
        assert!(ledger.pending_propagation().is_none());

        ledger.save_edit(&api, 1, &form).await.unwrap();
        let unchanged = edit_of(ledger.cache().get(4).unwrap(), 1);
        ledger.save_edit(&api, 4, &unchanged).await.unwrap();
        assert!(ledger.pending_propagation().is_none());
    }

    #[tokio::test]
    async fn no_candidates_does_not_ask() {
        let api = api();
        let mut ledger = loaded(&api).await;
        let form = edit_of(ledger.cache().get(4).unwrap(), 2);

        let outcome = ledger
            .submit_edit(&api, 4, &form, &mut |_: &str| -> bool {
                panic!("should not ask without candidates")
            })
            .await
            .unwrap();

        assert_eq!(outcome.propagation, PropagationOutcome::NoCandidates);
    }

    #[tokio::test]
    async fn failed_bulk_update_keeps_the_edit() {
        let api = api();
        let mut ledger = loaded(&api).await;
        let form = edit_of(ledger.cache().get(1).unwrap(), 2);
        api.fail(Operation::BulkUpdateCategory);

        let outcome = ledger
            .submit_edit(&api, 1, &form, &mut |_: &str| true)
            .await
            .expect("a failed bulk update must not fail the edit");

        assert!(matches!(outcome.propagation, PropagationOutcome::Failed(_)));
        let persisted = api.get_transaction(1).await.expect("edited transaction is gone");
        assert_eq!(persisted.category_id, 2);
        assert_eq!(api.get_transaction(2).await.unwrap().category_id, 1);
    }

    #[tokio::test]
    async fn failed_update_runs_nothing_else() {
        let api = api();
        let mut ledger = loaded(&api).await;
        let form = edit_of(ledger.cache().get(1).unwrap(), 2);
        api.fail(Operation::UpdateTransaction);
        let calls_before = api.calls().len();

        let result = ledger
            .submit_edit(&api, 1, &form, &mut |_: &str| -> bool {
                panic!("should not ask after a failed update")
            })
            .await;

        assert!(matches!(result, Err(Error::Transport(_))));
        assert_eq!(api.calls().len(), calls_before + 1);
    }

    #[tokio::test]
    async fn invalid_edit_is_not_sent() {
        let api = api();
        let mut ledger = loaded(&api).await;
        let form = edit_of(ledger.cache().get(1).unwrap(), 3);

        let result = ledger
            .submit_edit(&api, 1, &form, &mut |_: &str| true)
            .await;

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::CategoryTypeMismatch { .. }))
        ));
        assert_eq!(api.call_count(Operation::UpdateTransaction), 0);
    }

    #[tokio::test]
    async fn editing_an_uncached_transaction_is_an_error() {
        let api = api();
        let mut ledger = LedgerContext::new();
        let form = NewTransaction::build(1.0, date!(2025 - 01 - 01), "Countdown", 1);

        let result = ledger
            .submit_edit(&api, 1, &form, &mut |_: &str| true)
            .await;

        assert_eq!(result, Err(Error::NotInCache(1)));
    }

    #[tokio::test]
    async fn submit_new_creates_and_reloads() {
        let api = api();
        let mut ledger = loaded(&api).await;
        let form = NewTransaction::build(8.5, date!(2025 - 02 - 03), "Coffee Supreme", 2);

        let created = ledger.submit_new(&api, &form).await.unwrap();

        assert_eq!(created.description, "Coffee Supreme");
        assert_eq!(created.category_name(), "Groceries");
        assert!(ledger.cache().get(created.id).is_some());
    }

    #[tokio::test]
    async fn submit_new_rejects_blank_description() {
        let api = api();
        let mut ledger = loaded(&api).await;
        let form = NewTransaction::build(8.5, date!(2025 - 02 - 03), "", 2);

        let result = ledger.submit_new(&api, &form).await;

        assert_eq!(
            result,
            Err(Error::Validation(ValidationError::EmptyDescription))
        );
        assert_eq!(api.call_count(Operation::CreateTransaction), 0);
    }

    #[tokio::test]
    async fn delete_transaction_asks_first() {
        let api = api();
        let mut ledger = loaded(&api).await;

        let declined = ledger
            .delete_transaction(&api, 4, &mut |_: &str| false)
            .await
            .unwrap();
        let deleted = ledger
            .delete_transaction(&api, 4, &mut |_: &str| true)
            .await
            .unwrap();

        assert!(!declined);
        assert!(deleted);
        assert_eq!(api.call_count(Operation::DeleteTransaction), 1);
        assert!(ledger.cache().get(4).is_none());
    }

    #[tokio::test]
    async fn set_excluded_only_changes_status() {
        let api = api();
        let mut ledger = loaded(&api).await;
        let before = api.get_transaction(3).await.unwrap();

        let updated = ledger.set_excluded(&api, 3, true).await.unwrap();

        assert_eq!(
            updated,
            Transaction {
                is_excluded: true,
                ..before
            }
        );
        assert!(ledger.cache().get(3).unwrap().is_excluded);
    }

    #[tokio::test]
    async fn failed_category_load_keeps_previous_categories() {
        let api = api();
        let mut ledger = loaded(&api).await;
        api.fail(Operation::ListCategories);

        let result = ledger.load_categories(&api).await;

        assert!(result.is_err());
        assert_eq!(ledger.categories().len(), 3);
    }
}
