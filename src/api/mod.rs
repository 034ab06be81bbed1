//! The REST contracts of the ledger API that the client consumes.
//!
//! The ledger engine only talks to the API through the [LedgerApi] trait, so
//! the engine can be driven by [HttpLedgerApi] in production and by an
//! in-memory implementation in tests.

mod http;

pub use http::HttpLedgerApi;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::Category,
    database_id::{CategoryId, TransactionId},
    transaction::{NewTransaction, Transaction, TransactionType, TransactionUpdate},
};

/// The query parameters for listing transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionQuery {
    /// Only list transactions of this type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    /// Only list transactions in this category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// Whether excluded transactions should be listed too.
    pub include_excluded: bool,
    /// Only list transactions on or after this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    /// Only list transactions on or before this date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
}

/// A user-supplied file, e.g. an exported bank statement, that identifies
/// transactions on the server.
///
/// The client never parses the file, it is forwarded to the API as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFile {
    /// The original file name, which the API uses to pick a parser.
    pub file_name: String,
    /// The raw file contents.
    pub bytes: Vec<u8>,
}

impl StatementFile {
    /// Create a statement file from its name and contents.
    pub fn new(file_name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.to_owned(),
            bytes: bytes.into(),
        }
    }
}

/// The body of a bulk category update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkUpdateRequest {
    /// The transactions to update.
    pub transaction_ids: Vec<TransactionId>,
    /// The category to move the transactions to.
    pub category_id: CategoryId,
}

/// The body of a bulk delete by ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    /// The transactions to delete.
    pub transaction_ids: Vec<TransactionId>,
}

/// The response to a bulk delete preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDeletePreviewResponse {
    /// The transactions the server currently matches against the file.
    pub transactions: Vec<Transaction>,
}

/// The response to a bulk delete by file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDeleteByFileResponse {
    /// How many transactions were deleted.
    pub deleted_count: u64,
}

/// The body the API sends along with a non-success status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A message intended for the user.
    #[serde(default)]
    pub error: Option<String>,
}

/// The operations the ledger API offers to the client.
///
/// Any non-success response must be reported as an [Error::Rejected] carrying
/// the server's error message, and any request that did not complete as an
/// [Error::Transport]. Implementations must not retry.
pub trait LedgerApi: Send + Sync {
    /// `GET /transactions/`
    fn list_transactions(
        &self,
        query: &TransactionQuery,
    ) -> impl Future<Output = Result<Vec<Transaction>, Error>> + Send;

    /// `GET /transactions/{id}`
    fn get_transaction(
        &self,
        id: TransactionId,
    ) -> impl Future<Output = Result<Transaction, Error>> + Send;

    /// `POST /transactions/`
    fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> impl Future<Output = Result<Transaction, Error>> + Send;

    /// `PUT /transactions/{id}`
    fn update_transaction(
        &self,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> impl Future<Output = Result<Transaction, Error>> + Send;

    /// `DELETE /transactions/{id}`
    fn delete_transaction(
        &self,
        id: TransactionId,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    /// `PUT /transactions/bulk-update/`
    fn bulk_update_category(
        &self,
        transaction_ids: &[TransactionId],
        category_id: CategoryId,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    /// `DELETE /transactions/bulk-delete/`
    fn bulk_delete(
        &self,
        transaction_ids: &[TransactionId],
    ) -> impl Future<Output = Result<(), Error>> + Send;

    /// `POST /transactions/bulk-delete-preview/`
    fn preview_bulk_delete(
        &self,
        file: &StatementFile,
    ) -> impl Future<Output = Result<Vec<Transaction>, Error>> + Send;

    /// `POST /transactions/bulk-delete-by-file/`, returns the deleted count.
    fn bulk_delete_by_file(
        &self,
        file: &StatementFile,
    ) -> impl Future<Output = Result<u64, Error>> + Send;

    /// `GET /categories/`
    fn list_categories(&self) -> impl Future<Output = Result<Vec<Category>, Error>> + Send;
}
