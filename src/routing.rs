//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post, put},
};

use crate::{
    AppState,
    api::LedgerApi,
    endpoints,
    html::error_view,
    transaction::{
        cancel_bulk_delete_endpoint, confirm_bulk_delete_endpoint, create_transaction_endpoint,
        delete_selected_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_edit_transaction_page, get_new_transaction_page, get_transactions_page,
        get_transactions_table, preview_bulk_delete_endpoint, propagate_category_endpoint,
        sort_transactions_endpoint, update_status_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router<A: LedgerApi + 'static>(state: AppState<A>) -> Router {
    let pages = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page::<A>))
        .route(endpoints::TRANSACTIONS_TABLE, get(get_transactions_table::<A>))
        .route(
            endpoints::SORT_TRANSACTIONS,
            post(sort_transactions_endpoint::<A>),
        )
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page::<A>),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page::<A>),
        );

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint::<A>),
        )
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint::<A>).delete(delete_transaction_endpoint::<A>),
        )
        .route(
            endpoints::TRANSACTION_STATUS,
            put(update_status_endpoint::<A>),
        )
        .route(
            endpoints::PROPAGATE_CATEGORY,
            post(propagate_category_endpoint::<A>),
        )
        .route(
            endpoints::BULK_DELETE_SELECTED,
            post(delete_selected_endpoint::<A>),
        )
        .route(
            endpoints::BULK_DELETE_PREVIEW,
            post(preview_bulk_delete_endpoint::<A>),
        )
        .route(
            endpoints::BULK_DELETE_CONFIRM,
            post(confirm_bulk_delete_endpoint::<A>),
        )
        .route(
            endpoints::BULK_DELETE_CANCEL,
            post(cancel_bulk_delete_endpoint::<A>),
        );

    pages
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the transactions page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::TRANSACTIONS_VIEW)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Not Found",
            "404",
            "Page not found",
            "Check the address or go back to your transactions.",
        ),
    )
        .into_response()
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use axum_test::TestServer;

    use crate::{
        AppState, build_router, endpoints, routing::get_index_page, test_utils::FakeLedgerApi,
    };

    #[tokio::test]
    async fn root_redirects_to_transactions() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::TRANSACTIONS_VIEW);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server =
            TestServer::new(build_router(AppState::new(FakeLedgerApi::new(vec![])))).unwrap();

        let response = server.get("/budgets").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("Page not found"));
    }
}
