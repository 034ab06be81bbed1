//! The client-side transaction ledger engine.
//!
//! Everything here works on a [LedgerContext] that is passed into each
//! operation, and on a [LedgerApi](crate::api::LedgerApi) for the network.
//! Nothing in this module renders HTML.

mod bulk_delete;
mod cache;
mod confirm;
mod context;
mod editing;
mod merchant;
mod propagation;
mod sort;

pub use bulk_delete::{BulkDeleteOutcome, PendingBulkDelete};
pub use cache::{FilterState, LedgerCache, StatusFilter};
pub use confirm::Confirm;
pub use context::LedgerContext;
pub use editing::{EditOutcome, SavedEdit};
pub use merchant::{extract_merchant_token, same_merchant};
pub use propagation::{
    PropagationError, PropagationOutcome, PropagationPlan, apply_propagation,
    find_similar_transactions, plan_propagation,
};
pub use sort::{SortConfig, SortDirection, SortField, filter, sort};
