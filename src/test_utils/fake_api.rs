use std::{
    collections::HashSet,
    sync::{Mutex, MutexGuard},
};

use crate::{
    Error,
    api::{LedgerApi, StatementFile, TransactionQuery},
    category::Category,
    database_id::{CategoryId, TransactionId},
    transaction::{NewTransaction, Transaction, TransactionUpdate},
};

/// The calls a [FakeLedgerApi] records and can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Operation {
    ListTransactions,
    GetTransaction,
    CreateTransaction,
    UpdateTransaction,
    DeleteTransaction,
    BulkUpdateCategory,
    BulkDelete,
    PreviewBulkDelete,
    BulkDeleteByFile,
    ListCategories,
}

#[derive(Debug, Default)]
struct FakeState {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    failing: HashSet<Operation>,
    calls: Vec<Operation>,
}

/// An in-memory ledger API.
///
/// Statement files are resolved by reading one transaction ID per line, and
/// the IDs that exist are matched in file order.
#[derive(Debug, Default)]
pub(crate) struct FakeLedgerApi {
    state: Mutex<FakeState>,
}

impl FakeLedgerApi {
    pub(crate) fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                transactions,
                ..Default::default()
            }),
        }
    }

    pub(crate) fn with_categories(self, categories: Vec<Category>) -> Self {
        self.lock().categories = categories;
        self
    }

    /// Make every later call of `operation` fail with a transport error.
    pub(crate) fn fail(&self, operation: Operation) {
        self.lock().failing.insert(operation);
    }

    pub(crate) fn calls(&self) -> Vec<Operation> {
        self.lock().calls.clone()
    }

    pub(crate) fn call_count(&self, operation: Operation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| **call == operation)
            .count()
    }

    /// The transactions currently stored on the fake server.
    pub(crate) fn transactions(&self) -> Vec<Transaction> {
        self.lock().transactions.clone()
    }

    /// Delete a transaction behind the client's back.
    pub(crate) fn remove(&self, id: TransactionId) {
        self.lock().transactions.retain(|transaction| transaction.id != id);
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake API lock poisoned")
    }

    fn begin(&self, operation: Operation) -> Result<MutexGuard<'_, FakeState>, Error> {
        let mut state = self.lock();
        state.calls.push(operation);

        if state.failing.contains(&operation) {
            return Err(Error::Transport(format!(
                "simulated failure of {operation:?}"
            )));
        }

        Ok(state)
    }
}

impl FakeState {
    fn category_name(&self, category_id: CategoryId) -> Option<String> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
            .map(|category| category.name.clone())
    }

    fn find_mut(&mut self, id: TransactionId) -> Result<&mut Transaction, Error> {
        self.transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
            .ok_or_else(not_found)
    }

    fn resolve(&self, file: &StatementFile) -> Vec<Transaction> {
        String::from_utf8_lossy(&file.bytes)
            .lines()
            .filter_map(|line| line.trim().parse::<TransactionId>().ok())
            .filter_map(|id| {
                self.transactions
                    .iter()
                    .find(|transaction| transaction.id == id)
                    .cloned()
            })
            .collect()
    }
}

fn not_found() -> Error {
    Error::Rejected {
        status: 404,
        message: "Transaction not found".to_owned(),
    }
}

impl LedgerApi for FakeLedgerApi {
    async fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let state = self.begin(Operation::ListTransactions)?;

        Ok(state
            .transactions
            .iter()
            .filter(|t| query.include_excluded || !t.is_excluded)
            .filter(|t| query.transaction_type.is_none_or(|kind| t.transaction_type == kind))
            .filter(|t| query.category_id.is_none_or(|id| t.category_id == id))
            .filter(|t| query.start_date.is_none_or(|date| t.date >= date))
            .filter(|t| query.end_date.is_none_or(|date| t.date <= date))
            .cloned()
            .collect())
    }

    async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, Error> {
        let mut state = self.begin(Operation::GetTransaction)?;

        state.find_mut(id).map(|transaction| transaction.clone())
    }

    async fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction, Error> {
        let mut state = self.begin(Operation::CreateTransaction)?;

        let id = state
            .transactions
            .iter()
            .map(|transaction| transaction.id)
            .max()
            .unwrap_or_default()
            + 1;
        let transaction = Transaction {
            id,
            date: new.date,
            description: new.description.clone(),
            transaction_type: new.transaction_type,
            category_id: new.category_id,
            category_name: state.category_name(new.category_id),
            amount: new.amount,
            notes: new.notes.clone(),
            is_excluded: new.is_excluded,
            source: Some("manual".to_owned()),
            created_at: None,
        };
        state.transactions.push(transaction.clone());

        Ok(transaction)
    }

    async fn update_transaction(
        &self,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let mut state = self.begin(Operation::UpdateTransaction)?;
        let category_name = update
            .category_id
            .map(|category_id| state.category_name(category_id));
        let transaction = state.find_mut(id)?;

        if let Some(date) = update.date {
            transaction.date = date;
        }
        if let Some(description) = &update.description {
            transaction.description = description.clone();
        }
        if let Some(transaction_type) = update.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(category_id) = update.category_id {
            transaction.category_id = category_id;
        }
        if let Some(category_name) = category_name {
            transaction.category_name = category_name;
        }
        if let Some(amount) = update.amount {
            transaction.amount = amount;
        }
        if let Some(notes) = &update.notes {
            transaction.notes = Some(notes.clone());
        }
        if let Some(is_excluded) = update.is_excluded {
            transaction.is_excluded = is_excluded;
        }

        Ok(transaction.clone())
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<(), Error> {
        let mut state = self.begin(Operation::DeleteTransaction)?;
        state.find_mut(id)?;
        state.transactions.retain(|transaction| transaction.id != id);

        Ok(())
    }

    async fn bulk_update_category(
        &self,
        transaction_ids: &[TransactionId],
        category_id: CategoryId,
    ) -> Result<(), Error> {
        let mut state = self.begin(Operation::BulkUpdateCategory)?;
        let category_name = state.category_name(category_id);

        for transaction in state
            .transactions
            .iter_mut()
            .filter(|transaction| transaction_ids.contains(&transaction.id))
        {
            transaction.category_id = category_id;
            transaction.category_name = category_name.clone();
        }

        Ok(())
    }

    async fn bulk_delete(&self, transaction_ids: &[TransactionId]) -> Result<(), Error> {
        let mut state = self.begin(Operation::BulkDelete)?;
        state
            .transactions
            .retain(|transaction| !transaction_ids.contains(&transaction.id));

        Ok(())
    }

    async fn preview_bulk_delete(&self, file: &StatementFile) -> Result<Vec<Transaction>, Error> {
        let state = self.begin(Operation::PreviewBulkDelete)?;

        Ok(state.resolve(file))
    }

    async fn bulk_delete_by_file(&self, file: &StatementFile) -> Result<u64, Error> {
        let mut state = self.begin(Operation::BulkDeleteByFile)?;
        let ids: Vec<_> = state
            .resolve(file)
            .into_iter()
            .map(|transaction| transaction.id)
            .collect();
        state
            .transactions
            .retain(|transaction| !ids.contains(&transaction.id));

        Ok(ids.len() as u64)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        let state = self.begin(Operation::ListCategories)?;

        Ok(state.categories.clone())
    }
}
