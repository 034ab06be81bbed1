//! This file defines the `Category` type as served by the ledger API.
//! A category groups transactions, and a transaction may only have one category.

use serde::{Deserialize, Serialize};

use crate::{database_id::CategoryId, transaction::TransactionType};

/// A category that transactions can be assigned to.
///
/// Income and expense transactions draw from separate sets of categories,
/// which is why every category carries a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The display name of the category, e.g. "Groceries".
    pub name: String,
    /// The type of transaction that may use this category.
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

impl Category {
    /// Create a category.
    pub fn new(id: CategoryId, name: &str, category_type: TransactionType) -> Self {
        Self {
            id,
            name: name.to_owned(),
            category_type,
        }
    }
}
