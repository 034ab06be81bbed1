//! ID types for the records served by the ledger API.

/// The ID of a transaction, as assigned by the ledger API.
pub type TransactionId = i64;

/// The ID of a category, as assigned by the ledger API.
pub type CategoryId = i64;
