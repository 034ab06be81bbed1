//! Defines the route handler for the page for creating a new transaction.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use time::OffsetDateTime;

use crate::{
    AppState,
    api::LedgerApi,
    transaction::{TransactionType, form::TransactionFormDefaults, view::new_transaction_view},
};

/// Renders the page for creating a transaction.
pub(crate) async fn get_new_transaction_page<A: LedgerApi>(
    State(state): State<AppState<A>>,
) -> Response {
    let mut ledger = state.ledger.lock().await;
    ledger.navigate_away();

    let categories = match ledger.load_categories(state.api.as_ref()).await {
        Ok(categories) => categories,
        Err(error) => return error.into_response(),
    };

    let defaults = TransactionFormDefaults {
        transaction_type: TransactionType::Expense,
        amount: None,
        date: OffsetDateTime::now_utc().date(),
        description: None,
        category_id: None,
        notes: None,
        is_excluded: None,
    };

    new_transaction_view(&defaults, categories).into_response()
}
