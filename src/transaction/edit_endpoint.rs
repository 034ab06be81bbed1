//! Defines the endpoints for saving an edited transaction and for moving
//! similar transactions to its new category.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    AppState,
    api::LedgerApi,
    database_id::TransactionId,
    ledger::PropagationOutcome,
    transaction::{
        NewTransaction, form::TransactionForm, transactions_page::return_url,
        view::propagation_prompt_view,
    },
};

/// Save an edited transaction.
///
/// If the category changed and other loaded transactions come from the same
/// merchant, responds with a prompt offering to move them too. Otherwise
/// redirects to the transactions page.
pub(crate) async fn edit_transaction_endpoint<A: LedgerApi>(
    State(state): State<AppState<A>>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let mut ledger = state.ledger.lock().await;

    let saved = match ledger
        .save_edit(state.api.as_ref(), transaction_id, &NewTransaction::from(form))
        .await
    {
        Ok(saved) => saved,
        Err(error) => return error.into_alert_response(),
    };

    let redirect_url = return_url(&ledger);

    match saved.plan {
        Some(plan) => propagation_prompt_view(&plan, &redirect_url).into_response(),
        None => (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response(),
    }
}

/// Move the transactions offered by the last edit into its new category,
/// then go back to the transactions page.
///
/// The edit that led here has already been saved, so a failed update is
/// logged and the page is shown as it now is.
pub(crate) async fn propagate_category_endpoint<A: LedgerApi>(
    State(state): State<AppState<A>>,
) -> Response {
    let mut ledger = state.ledger.lock().await;

    match ledger.confirm_propagation(state.api.as_ref()).await {
        Ok(outcome) => {
            if let PropagationOutcome::Failed(error) = outcome {
                tracing::warn!("Kept the edit without updating similar transactions: {error}");
            }

            (HxRedirect(return_url(&ledger)), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}
