//! View-model structs for the transactions page.

use time::Date;

use crate::{
    database_id::TransactionId,
    endpoints::{self, format_endpoint},
    html::truncate_graphemes,
    transaction::{Transaction, TransactionType},
};

/// The max number of graphemes to display in the transaction table rows before
/// truncating and displaying ellipses.
pub(crate) const MAX_DESCRIPTION_GRAPHEMES: usize = 32;

/// Renders a transaction as a table row.
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct TransactionTableRow {
    pub(crate) id: TransactionId,
    pub(crate) date: Date,
    /// The description cut down to [MAX_DESCRIPTION_GRAPHEMES].
    pub(crate) description: String,
    /// The full description, shown as a tooltip when it was truncated.
    pub(crate) tooltip: Option<String>,
    pub(crate) category_name: String,
    pub(crate) transaction_type: TransactionType,
    /// Negative for expenses, positive for income.
    pub(crate) signed_amount: f64,
    pub(crate) is_excluded: bool,
    /// The day the transaction was imported, `None` if it was entered by hand.
    pub(crate) upload_date: Option<Date>,
    /// The page to edit this transaction.
    pub(crate) edit_url: String,
    /// The API path to delete this transaction.
    pub(crate) delete_url: String,
    /// The API path to include or exclude this transaction.
    pub(crate) status_url: String,
}

impl TransactionTableRow {
    pub(crate) fn new_from_transaction(transaction: &Transaction) -> Self {
        let description = truncate_graphemes(&transaction.description, MAX_DESCRIPTION_GRAPHEMES);
        let tooltip =
            (description != transaction.description).then(|| transaction.description.clone());

        Self {
            id: transaction.id,
            date: transaction.date,
            description,
            tooltip,
            category_name: transaction
                .category_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_owned()),
            transaction_type: transaction.transaction_type,
            signed_amount: signed_amount(transaction.transaction_type, transaction.amount),
            is_excluded: transaction.is_excluded,
            upload_date: transaction
                .uploaded_at()
                .map(|uploaded_at| uploaded_at.date()),
            edit_url: format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id),
            delete_url: format_endpoint(endpoints::TRANSACTION, transaction.id),
            status_url: format_endpoint(endpoints::TRANSACTION_STATUS, transaction.id),
        }
    }
}

/// Amounts are stored as positive numbers, expenses are shown below zero.
pub(crate) fn signed_amount(transaction_type: TransactionType, amount: f64) -> f64 {
    match transaction_type {
        TransactionType::Income => amount,
        TransactionType::Expense => -amount,
    }
}
