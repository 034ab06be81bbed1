//! Defines the route handler for the page for editing a transaction.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, api::LedgerApi, database_id::TransactionId,
    transaction::view::edit_transaction_view,
};

/// Renders the page for editing a transaction in the loaded ledger.
///
/// The ledger is fetched again if the transaction is not loaded, e.g. when
/// the page was opened from a bookmark.
pub(crate) async fn get_edit_transaction_page<A: LedgerApi>(
    State(state): State<AppState<A>>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let mut ledger = state.ledger.lock().await;
    ledger.navigate_away();

    if let Err(error) = ledger.load_categories(state.api.as_ref()).await {
        return error.into_response();
    }

    if ledger.cache().get(transaction_id).is_none() {
        if let Err(error) = ledger.reload(state.api.as_ref()).await {
            return error.into_response();
        }
    }

    match ledger.cache().get(transaction_id) {
        Some(transaction) => edit_transaction_view(transaction, ledger.categories()).into_response(),
        None => Error::NotInCache(transaction_id).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };

    use crate::{
        AppState,
        category::Category,
        test_utils::{
            FakeLedgerApi, Operation, assert_form_input_with_value, assert_hx_endpoint,
            assert_status_ok, assert_valid_html, must_get_form, parse_html_document, transaction,
        },
        transaction::{TransactionType, edit_page::get_edit_transaction_page},
    };

    fn test_state() -> AppState<FakeLedgerApi> {
        AppState::new(
            FakeLedgerApi::new(vec![transaction(1, "Coffee", 2)])
                .with_categories(vec![Category::new(2, "Eating Out", TransactionType::Expense)]),
        )
    }

    #[tokio::test]
    async fn renders_form_filled_with_transaction() {
        let state = test_state();

        let response = get_edit_transaction_page(State(state.clone()), Path(1)).await;

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, "/api/transactions/1", "hx-put");
        assert_form_input_with_value(&form, "amount", "number", "10.00");
        assert_form_input_with_value(&form, "date", "date", "2025-01-01");
        assert_form_input_with_value(&form, "description", "text", "Coffee");
    }

    #[tokio::test]
    async fn uses_cache_when_transaction_is_loaded() {
        let state = test_state();
        state.ledger.lock().await.reload(state.api.as_ref()).await.unwrap();

        let response = get_edit_transaction_page(State(state.clone()), Path(1)).await;

        assert_status_ok(&response);
        assert_eq!(state.api.call_count(Operation::ListTransactions), 1);
        assert_eq!(state.api.call_count(Operation::GetTransaction), 0);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let state = test_state();

        let response = get_edit_transaction_page(State(state), Path(42)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
