//! Defines the core data models for transactions and the checks run on them
//! before anything is sent to the ledger API.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime, format_description::well_known::Iso8601};

use crate::{
    ValidationError,
    category::Category,
    database_id::{CategoryId, TransactionId},
};

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    Expense,
}

impl TransactionType {
    /// The wire name of the transaction type, e.g. "income".
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are owned by the ledger API. The client only ever holds
/// copies of them in the [crate::ledger::LedgerCache].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The ID of the category the transaction belongs to.
    pub category_id: CategoryId,
    /// The name of the category, denormalized by the API.
    #[serde(default)]
    pub category_name: Option<String>,
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
    /// Free-form notes attached by the user.
    #[serde(default)]
    pub notes: Option<String>,
    /// Whether the transaction is left out of reports and totals.
    #[serde(default)]
    pub is_excluded: bool,
    /// How the transaction got into the ledger, e.g. "manual" or "upload".
    #[serde(default)]
    pub source: Option<String>,
    /// When the API stored the transaction, as an ISO 8601 date and time
    /// without an offset.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The [Transaction::source] of transactions imported from a statement file.
pub const UPLOAD_SOURCE: &str = "upload";

impl Transaction {
    /// When the transaction was imported from a statement file.
    ///
    /// Returns `None` for transactions entered by hand and for timestamps
    /// that are not valid ISO 8601.
    pub fn uploaded_at(&self) -> Option<PrimitiveDateTime> {
        if self.source.as_deref() != Some(UPLOAD_SOURCE) {
            return None;
        }

        let created_at = self.created_at.as_deref()?;

        match PrimitiveDateTime::parse(created_at, &Iso8601::DEFAULT) {
            Ok(uploaded_at) => Some(uploaded_at),
            Err(error) => {
                tracing::warn!(
                    "Could not parse the upload time {created_at:?} of transaction {}: {error}",
                    self.id
                );
                None
            }
        }
    }

    /// The category name, or an empty string if the API did not send one.
    pub fn category_name(&self) -> &str {
        self.category_name.as_deref().unwrap_or_default()
    }
}

/// The fields of a transaction as submitted by the user, used both to create
/// a transaction and as the full set of changes when editing one.
///
/// To create a new `NewTransaction`, use [NewTransaction::build].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The ID of the category the transaction belongs to.
    pub category_id: CategoryId,
    /// The amount of money spent or earned, must be positive.
    pub amount: f64,
    /// Free-form notes attached by the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Whether the transaction is left out of reports and totals.
    pub is_excluded: bool,
}

impl NewTransaction {
    /// Start building an expense with the required fields.
    ///
    /// Shortcut for struct construction with sensible defaults: the
    /// transaction is an included expense without notes.
    pub fn build(
        amount: f64,
        date: Date,
        description: &str,
        category_id: CategoryId,
    ) -> NewTransaction {
        NewTransaction {
            date,
            description: description.to_owned(),
            transaction_type: TransactionType::Expense,
            category_id,
            amount,
            notes: None,
            is_excluded: false,
        }
    }

    /// Set the transaction type.
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = transaction_type;
        self
    }

    /// Set the notes.
    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Set whether the transaction is excluded.
    pub fn is_excluded(mut self, is_excluded: bool) -> Self {
        self.is_excluded = is_excluded;
        self
    }

    /// Copy the editable fields of an existing transaction.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            date: transaction.date,
            description: transaction.description.clone(),
            transaction_type: transaction.transaction_type,
            category_id: transaction.category_id,
            amount: transaction.amount,
            notes: transaction.notes.clone(),
            is_excluded: transaction.is_excluded,
        }
    }

    /// Check the fields before they are sent to the API.
    ///
    /// `categories` is the list of categories known to the client. When it is
    /// empty the category cannot be checked locally and is left to the API.
    ///
    /// # Errors
    /// This function will return a:
    /// - [ValidationError::EmptyDescription] if the description is blank,
    /// - [ValidationError::NonPositiveAmount] if the amount is not a positive number,
    /// - [ValidationError::UnknownCategory] if the category is not in `categories`,
    /// - or [ValidationError::CategoryTypeMismatch] if the category is for the
    ///   other transaction type.
    pub fn validate(&self, categories: &[Category]) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }

        if categories.is_empty() {
            return Ok(());
        }

        let category = categories
            .iter()
            .find(|category| category.id == self.category_id)
            .ok_or(ValidationError::UnknownCategory(self.category_id))?;

        if category.category_type != self.transaction_type {
            return Err(ValidationError::CategoryTypeMismatch {
                category: category.name.clone(),
                category_type: category.category_type,
                transaction_type: self.transaction_type,
            });
        }

        Ok(())
    }
}

/// A partial update of a transaction. Fields set to `None` are left as they
/// are by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionUpdate {
    /// When the transaction happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    /// A text description of what the transaction was for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    /// The ID of the category the transaction belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// The amount of money spent or earned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Free-form notes attached by the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Whether the transaction is left out of reports and totals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_excluded: Option<bool>,
}

impl TransactionUpdate {
    /// An update that only changes whether the transaction is excluded.
    pub fn excluded(is_excluded: bool) -> Self {
        Self {
            is_excluded: Some(is_excluded),
            ..Default::default()
        }
    }
}

impl From<&NewTransaction> for TransactionUpdate {
    fn from(form: &NewTransaction) -> Self {
        Self {
            date: Some(form.date),
            description: Some(form.description.clone()),
            transaction_type: Some(form.transaction_type),
            category_id: Some(form.category_id),
            amount: Some(form.amount),
            // An empty string clears the notes, matching a blank form field.
            notes: Some(form.notes.clone().unwrap_or_default()),
            is_excluded: Some(form.is_excluded),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
