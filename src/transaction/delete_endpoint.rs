//! Defines the endpoints for deleting one transaction or the selected
//! transactions.

use axum::{
    extract::{Path, State},
    response::Response,
};
use axum_extra::extract::Form;
use serde::Deserialize;

use crate::{
    AppState,
    alert::Alert,
    api::LedgerApi,
    database_id::TransactionId,
    transaction::transactions_page::table_response,
};

/// A route handler for deleting a transaction, responds with the refreshed
/// table and an alert.
///
/// The browser asks the user before sending the request.
pub(crate) async fn delete_transaction_endpoint<A: LedgerApi>(
    State(state): State<AppState<A>>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let mut ledger = state.ledger.lock().await;

    match ledger
        .delete_transaction(state.api.as_ref(), transaction_id, &mut |_: &str| true)
        .await
    {
        Ok(_) => table_response(
            &ledger,
            Some(Alert::SuccessSimple {
                message: "Transaction deleted".to_owned(),
            }),
        ),
        Err(error) => error.into_alert_response(),
    }
}

/// The checked rows of the transactions table.
#[derive(Debug, Deserialize)]
pub(crate) struct SelectedTransactions {
    #[serde(default)]
    transaction_ids: Vec<TransactionId>,
}

/// A route handler for deleting the checked transactions, responds with the
/// refreshed table and an alert.
pub(crate) async fn delete_selected_endpoint<A: LedgerApi>(
    State(state): State<AppState<A>>,
    Form(selected): Form<SelectedTransactions>,
) -> Response {
    let mut ledger = state.ledger.lock().await;

    match ledger
        .delete_selected(
            state.api.as_ref(),
            &selected.transaction_ids,
            &mut |_: &str| true,
        )
        .await
    {
        Ok(_) => table_response(
            &ledger,
            Some(Alert::SuccessSimple {
                message: format!(
                    "Successfully deleted {} transaction(s)",
                    selected.transaction_ids.len()
                ),
            }),
        ),
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use scraper::{Html, Selector};

    use crate::{
        AppState, build_router,
        test_utils::{FakeLedgerApi, Operation, transaction},
    };

    fn test_state() -> AppState<FakeLedgerApi> {
        AppState::new(FakeLedgerApi::new(vec![
            transaction(1, "Coffee", 2),
            transaction(2, "Rent", 3),
            transaction(3, "Groceries", 4),
        ]))
    }

    fn row_count(text: &str) -> usize {
        let html = Html::parse_fragment(text);
        let selector = Selector::parse("tr[data-transaction-id]").unwrap();
        html.select(&selector).count()
    }

    #[tokio::test]
    async fn deletes_transaction_and_returns_table() {
        let state = test_state();
        let server = TestServer::new(build_router(state.clone())).unwrap();
        server.get("/transactions").await.assert_status_ok();

        let response = server.delete("/api/transactions/2").await;

        response.assert_status_ok();
        assert_eq!(row_count(&response.text()), 2);
        assert!(response.text().contains("Transaction deleted"));
        assert_eq!(state.api.transactions().len(), 2);
    }

    #[tokio::test]
    async fn deleting_missing_transaction_shows_api_message() {
        let state = test_state();
        let server = TestServer::new(build_router(state)).unwrap();

        let response = server.delete("/api/transactions/99").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("Transaction not found"));
    }

    #[tokio::test]
    async fn deletes_selected_transactions() {
        let state = test_state();
        let server = TestServer::new(build_router(state.clone())).unwrap();
        server.get("/transactions").await.assert_status_ok();

        let response = server
            .post("/api/transactions/bulk-delete")
            .form(&[("transaction_ids", "1"), ("transaction_ids", "3")])
            .await;

        response.assert_status_ok();
        assert_eq!(row_count(&response.text()), 1);
        assert!(response.text().contains("Successfully deleted 2 transaction(s)"));
        assert_eq!(state.api.transactions()[0].id, 2);
    }

    #[tokio::test]
    async fn empty_selection_is_rejected() {
        let state = test_state();
        let server = TestServer::new(build_router(state.clone())).unwrap();

        let response = server
            .post("/api/transactions/bulk-delete")
            .content_type("application/x-www-form-urlencoded")
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.text().contains("no transactions were selected"));
        assert_eq!(state.api.call_count(Operation::BulkDelete), 0);
    }
}
