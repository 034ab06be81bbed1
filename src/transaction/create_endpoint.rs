//! Defines the endpoint for creating a new transaction.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    api::LedgerApi,
    transaction::{NewTransaction, form::TransactionForm, transactions_page::return_url},
};

/// A route handler for creating a new transaction, redirects to the
/// transactions view on success.
pub(crate) async fn create_transaction_endpoint<A: LedgerApi>(
    State(state): State<AppState<A>>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let mut ledger = state.ledger.lock().await;

    match ledger
        .submit_new(state.api.as_ref(), &NewTransaction::from(form))
        .await
    {
        Ok(_) => (HxRedirect(return_url(&ledger)), StatusCode::SEE_OTHER).into_response(),
        Err(error) => error.into_alert_response(),
    }
}
