//! Defines the endpoints for deleting the transactions listed in a statement
//! file: preview, then confirm or cancel.

use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    AppState, Error, ValidationError,
    alert::Alert,
    api::{LedgerApi, StatementFile},
    ledger::BulkDeleteOutcome,
    transaction::{transactions_page::render_table, view::bulk_delete_preview_view},
};

/// The name of the form field holding the statement file.
const FILE_FIELD: &str = "file";

fn unreadable_upload(error: MultipartError) -> Error {
    tracing::warn!("Could not read the uploaded statement file: {error}");

    Error::UnreadableUpload {
        status: error.status().as_u16(),
        message: error.body_text(),
    }
}

async fn read_statement_file(mut multipart: Multipart) -> Result<StatementFile, Error> {
    while let Some(field) = multipart.next_field().await.map_err(unreadable_upload)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_owned();
        let bytes = field.bytes().await.map_err(unreadable_upload)?;

        // Browsers send an empty part when no file was picked.
        if file_name.is_empty() && bytes.is_empty() {
            break;
        }

        return Ok(StatementFile::new(&file_name, bytes.to_vec()));
    }

    Err(ValidationError::MissingFile.into())
}

/// Ask the API which transactions the uploaded file would delete and show
/// them for confirmation.
pub(crate) async fn preview_bulk_delete_endpoint<A: LedgerApi>(
    State(state): State<AppState<A>>,
    multipart: Multipart,
) -> Response {
    let file = match read_statement_file(multipart).await {
        Ok(file) => file,
        Err(error) => return error.into_alert_response(),
    };

    let mut ledger = state.ledger.lock().await;

    match ledger.preview_bulk_delete(state.api.as_ref(), file).await {
        Ok(pending) => bulk_delete_preview_view(pending).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// Delete the transactions in the previewed file.
///
/// The browser asks the user before sending the request. Responds with an
/// empty preview, the refreshed table and an alert with the number of
/// transactions the API deleted.
pub(crate) async fn confirm_bulk_delete_endpoint<A: LedgerApi>(
    State(state): State<AppState<A>>,
) -> Response {
    let mut ledger = state.ledger.lock().await;

    match ledger
        .confirm_bulk_delete(state.api.as_ref(), &mut |_: &str| true)
        .await
    {
        Ok(BulkDeleteOutcome::Deleted { previewed, deleted }) => {
            let message = format!("Successfully deleted {deleted} transaction(s) from file");
            let alert = if deleted == previewed as u64 {
                Alert::SuccessSimple { message }
            } else {
                Alert::Success {
                    message,
                    details: format!(
                        "{previewed} transaction(s) were previewed. \
                        The ledger changed between the preview and the deletion."
                    ),
                }
            };

            html! {
                (render_table(&ledger, true))
                (alert)
            }
            .into_response()
        }
        Ok(BulkDeleteOutcome::Declined { .. }) => html! {
            @if let Some(pending) = ledger.pending_bulk_delete() {
                (bulk_delete_preview_view(pending))
            }
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// Drop the previewed file without deleting anything and clear the preview.
pub(crate) async fn cancel_bulk_delete_endpoint<A: LedgerApi>(
    State(state): State<AppState<A>>,
) -> Response {
    let mut ledger = state.ledger.lock().await;

    if let Some(pending) = ledger.cancel_bulk_delete() {
        tracing::info!(
            "Cancelled the bulk delete of {} transaction(s) from {}",
            pending.len(),
            pending.file().file_name
        );
    }

    html! {}.into_response()
}
