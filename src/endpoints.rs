//! The URIs of the web front end.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}/edit', use [format_endpoint].

use std::fmt::Display;

/// The root route which redirects to the transactions page.
pub const ROOT: &str = "/";
/// The page for displaying the ledger.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The searched and sorted transactions table, without the rest of the page.
pub const TRANSACTIONS_TABLE: &str = "/transactions/table";
/// The route for clicking a column header of the transactions table.
pub const SORT_TRANSACTIONS: &str = "/transactions/sort/{field}";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";

/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to include or exclude a transaction from totals.
pub const TRANSACTION_STATUS: &str = "/api/transactions/{transaction_id}/status";
/// The route to move similar transactions to a new category.
pub const PROPAGATE_CATEGORY: &str = "/api/transactions/propagate";
/// The route to delete the selected transactions.
pub const BULK_DELETE_SELECTED: &str = "/api/transactions/bulk-delete";
/// The route to upload a statement file and preview what it would delete.
pub const BULK_DELETE_PREVIEW: &str = "/api/transactions/bulk-delete/preview";
/// The route to delete the transactions in the previewed statement file.
pub const BULK_DELETE_CONFIRM: &str = "/api/transactions/bulk-delete/confirm";
/// The route to drop the previewed statement file.
pub const BULK_DELETE_CANCEL: &str = "/api/transactions/bulk-delete/cancel";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/transactions/{transaction_id}', '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::{endpoints, ledger::SortField};

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_TABLE);
        assert_endpoint_is_valid_uri(endpoints::SORT_TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::NEW_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_TRANSACTION_VIEW);

        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION_STATUS);
        assert_endpoint_is_valid_uri(endpoints::PROPAGATE_CATEGORY);
        assert_endpoint_is_valid_uri(endpoints::BULK_DELETE_SELECTED);
        assert_endpoint_is_valid_uri(endpoints::BULK_DELETE_PREVIEW);
        assert_endpoint_is_valid_uri(endpoints::BULK_DELETE_CONFIRM);
        assert_endpoint_is_valid_uri(endpoints::BULK_DELETE_CANCEL);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint(endpoints::TRANSACTION_STATUS, 12);

        assert_eq!(formatted_path, "/api/transactions/12/status");
    }

    #[test]
    fn accepts_non_numeric_parameters() {
        let formatted_path = format_endpoint(endpoints::SORT_TRANSACTIONS, SortField::Amount);

        assert_eq!(formatted_path, "/transactions/sort/amount");
    }
}
