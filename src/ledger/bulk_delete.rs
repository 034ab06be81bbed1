//! Deleting many transactions at once.
//!
//! Deleting by statement file takes two round trips. The preview asks the API
//! which transactions the file matches and remembers the file. The
//! confirmation sends the same file again and the API deletes whatever it
//! matches at that moment, which may not be exactly what was previewed.

use crate::{
    Error, ValidationError,
    api::{LedgerApi, StatementFile},
    database_id::TransactionId,
    ledger::{Confirm, LedgerContext},
    transaction::Transaction,
};

/// A statement file that has been previewed and is waiting for the user to
/// confirm the deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBulkDelete {
    file: StatementFile,
    preview: Vec<Transaction>,
}

impl PendingBulkDelete {
    /// The file that will be sent again on confirmation.
    pub fn file(&self) -> &StatementFile {
        &self.file
    }

    /// The transactions the file matched when it was previewed.
    pub fn preview(&self) -> &[Transaction] {
        &self.preview
    }

    /// The number of previewed transactions.
    pub fn len(&self) -> usize {
        self.preview.len()
    }

    /// Whether the file matched nothing.
    pub fn is_empty(&self) -> bool {
        self.preview.is_empty()
    }

    /// The question to ask the user before deleting.
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to permanently delete {} transaction(s)? This cannot be undone.",
            self.len()
        )
    }
}

/// The result of confirming a bulk delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkDeleteOutcome {
    /// The user backed out. The pending delete is kept.
    Declined {
        /// How many transactions were previewed.
        previewed: usize,
    },
    /// The API deleted the transactions the file matched at confirmation.
    Deleted {
        /// How many transactions were previewed.
        previewed: usize,
        /// How many transactions the API actually deleted.
        deleted: u64,
    },
}

impl LedgerContext {
    /// Ask the API which transactions `file` matches and keep the file until
    /// the deletion is confirmed or cancelled.
    ///
    /// Any earlier pending delete is discarded first, so a failed preview
    /// leaves nothing pending. The cache is not changed.
    ///
    /// # Errors
    /// Returns the API error if the preview request fails.
    pub async fn preview_bulk_delete<A: LedgerApi>(
        &mut self,
        api: &A,
        file: StatementFile,
    ) -> Result<&PendingBulkDelete, Error> {
        self.pending_bulk_delete = None;

        let preview = api.preview_bulk_delete(&file).await.inspect_err(|error| {
            tracing::error!("Could not preview bulk delete for {}: {error}", file.file_name);
        })?;

        tracing::info!(
            "{} matches {} transaction(s) for deletion",
            file.file_name,
            preview.len()
        );

        Ok(self
            .pending_bulk_delete
            .insert(PendingBulkDelete { file, preview }))
    }

    /// The bulk delete waiting for confirmation, if any.
    pub fn pending_bulk_delete(&self) -> Option<&PendingBulkDelete> {
        self.pending_bulk_delete.as_ref()
    }

    /// Drop the pending bulk delete without deleting anything.
    ///
    /// Returns the delete that was pending, if any.
    pub fn cancel_bulk_delete(&mut self) -> Option<PendingBulkDelete> {
        self.pending_bulk_delete.take()
    }

    /// Ask the user to confirm the pending bulk delete and, if they agree,
    /// send the stored file to be deleted.
    ///
    /// The prompt names the number of previewed transactions. Declining
    /// keeps the pending delete. Once the delete request has been sent the
    /// pending delete is released whether the request succeeded or not. On
    /// success the cache is reloaded.
    ///
    /// # Errors
    /// Returns [Error::NoPendingBulkDelete] if nothing was previewed, or the
    /// API error if the delete request fails.
    pub async fn confirm_bulk_delete<A: LedgerApi>(
        &mut self,
        api: &A,
        confirm: &mut impl Confirm,
    ) -> Result<BulkDeleteOutcome, Error> {
        let pending = self
            .pending_bulk_delete
            .as_ref()
            .ok_or(Error::NoPendingBulkDelete)?;
        let previewed = pending.len();

        if !confirm.confirm(&pending.prompt()) {
            return Ok(BulkDeleteOutcome::Declined { previewed });
        }

        let pending = self
            .pending_bulk_delete
            .take()
            .ok_or(Error::NoPendingBulkDelete)?;

        let deleted = api
            .bulk_delete_by_file(&pending.file)
            .await
            .inspect_err(|error| {
                tracing::error!(
                    "Could not delete transactions from {}: {error}",
                    pending.file.file_name
                );
            })?;

        if deleted != previewed as u64 {
            tracing::warn!(
                "Previewed {previewed} transaction(s) for deletion but {deleted} were deleted"
            );
        } else {
            tracing::info!("Deleted {deleted} transaction(s) from {}", pending.file.file_name);
        }

        self.reload_after_change(api).await;

        Ok(BulkDeleteOutcome::Deleted { previewed, deleted })
    }

    /// Delete the selected transactions after the user confirms.
    ///
    /// Returns `false` if the user declined. On success the cache is reloaded.
    ///
    /// # Errors
    /// Returns [ValidationError::EmptySelection] if `transaction_ids` is
    /// empty, or the API error if the request fails.
    pub async fn delete_selected<A: LedgerApi>(
        &mut self,
        api: &A,
        transaction_ids: &[TransactionId],
        confirm: &mut impl Confirm,
    ) -> Result<bool, Error> {
        if transaction_ids.is_empty() {
            return Err(ValidationError::EmptySelection.into());
        }

        let prompt = format!(
            "Are you sure you want to delete {} transaction(s)? This cannot be undone.",
            transaction_ids.len()
        );

        if !confirm.confirm(&prompt) {
            return Ok(false);
        }

        api.bulk_delete(transaction_ids).await.inspect_err(|error| {
            tracing::error!("Could not delete {} transaction(s): {error}", transaction_ids.len());
        })?;

        tracing::info!("Deleted {} selected transaction(s)", transaction_ids.len());
        self.reload_after_change(api).await;

        Ok(true)
    }
}
