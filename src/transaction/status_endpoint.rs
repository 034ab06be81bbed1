//! Defines the endpoint for including or excluding a transaction from totals.

use axum::{
    extract::{Path, State},
    response::Response,
};
use axum_extra::extract::Form;
use serde::Deserialize;

use crate::{
    AppState, api::LedgerApi, database_id::TransactionId,
    transaction::transactions_page::table_response,
};

#[derive(Debug, Deserialize)]
pub(crate) struct StatusForm {
    is_excluded: bool,
}

/// Set whether a transaction counts towards totals, responds with the
/// refreshed table.
pub(crate) async fn update_status_endpoint<A: LedgerApi>(
    State(state): State<AppState<A>>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<StatusForm>,
) -> Response {
    let mut ledger = state.ledger.lock().await;

    match ledger
        .set_excluded(state.api.as_ref(), transaction_id, form.is_excluded)
        .await
    {
        Ok(_) => table_response(&ledger, None),
        Err(error) => error.into_alert_response(),
    }
}
