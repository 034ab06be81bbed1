//! Ordering and searching of the transactions shown to the user.
//!
//! Both functions are pure: they take the cached transactions and return a
//! new sequence for display.

use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Serialize};
use time::{PrimitiveDateTime, macros::datetime};

use crate::transaction::Transaction;

/// Where transactions that were not uploaded sort by upload date.
const NOT_UPLOADED: PrimitiveDateTime = datetime!(1970-01-01 0:00);

/// A column the transactions table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// The calendar date.
    #[default]
    Date,
    /// The description, ignoring case.
    Description,
    /// The category name, ignoring case.
    Category,
    /// Income or expense.
    Type,
    /// The amount.
    Amount,
    /// Whether the transaction is excluded, excluded ranks above included.
    Status,
    /// When the transaction was imported from a statement file. Transactions
    /// entered by hand sort as if uploaded at the Unix epoch.
    UploadDate,
}

impl SortField {
    /// Every field in table column order.
    pub const ALL: [SortField; 7] = [
        SortField::Date,
        SortField::Description,
        SortField::Category,
        SortField::Type,
        SortField::Amount,
        SortField::Status,
        SortField::UploadDate,
    ];

    /// The name used in URLs, e.g. "date".
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Description => "description",
            SortField::Category => "category",
            SortField::Type => "type",
            SortField::Amount => "amount",
            SortField::Status => "status",
            SortField::UploadDate => "upload_date",
        }
    }

    /// The column heading.
    pub fn label(self) -> &'static str {
        match self {
            SortField::Date => "Date",
            SortField::Description => "Description",
            SortField::Category => "Category",
            SortField::Type => "Type",
            SortField::Amount => "Amount",
            SortField::Status => "Status",
            SortField::UploadDate => "Uploaded",
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The order of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The column and direction the transactions table is sorted by.
///
/// A new session starts with the most recent transactions first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// The column to sort by.
    pub field: SortField,
    /// The order to sort in.
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            field: SortField::Date,
            direction: SortDirection::Descending,
        }
    }
}

impl SortConfig {
    /// Apply a click on the header of `field`.
    ///
    /// Clicking the active column flips the direction, clicking any other
    /// column sorts by it in ascending order.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flip();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Sort `transactions` by `field`.
///
/// The sort is stable in both directions: transactions with equal keys keep
/// their relative order.
pub fn sort(
    mut transactions: Vec<Transaction>,
    field: SortField,
    direction: SortDirection,
) -> Vec<Transaction> {
    match direction {
        SortDirection::Ascending => transactions.sort_by(|a, b| compare(a, b, field)),
        SortDirection::Descending => transactions.sort_by(|a, b| compare(b, a, field)),
    }

    transactions
}

/// Keep the transactions whose description or category name contains
/// `search_term`, ignoring case. Whitespace in the term is matched as typed.
///
/// An empty search term keeps every transaction.
pub fn filter(transactions: &[Transaction], search_term: &str) -> Vec<Transaction> {
    let term = search_term.to_lowercase();

    if term.is_empty() {
        return transactions.to_vec();
    }

    transactions
        .iter()
        .filter(|transaction| {
            transaction.description.to_lowercase().contains(&term)
                || transaction.category_name().to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

fn compare(a: &Transaction, b: &Transaction, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Description => compare_ignoring_case(&a.description, &b.description),
        SortField::Category => compare_ignoring_case(a.category_name(), b.category_name()),
        SortField::Type => compare_ignoring_case(
            a.transaction_type.as_str(),
            b.transaction_type.as_str(),
        ),
        SortField::Amount => a.amount.total_cmp(&b.amount),
        SortField::Status => a.is_excluded.cmp(&b.is_excluded),
        SortField::UploadDate => upload_key(a).cmp(&upload_key(b)),
    }
}

fn upload_key(transaction: &Transaction) -> PrimitiveDateTime {
    transaction.uploaded_at().unwrap_or(NOT_UPLOADED)
}

fn compare_ignoring_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
