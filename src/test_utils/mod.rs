#![allow(missing_docs)]

pub(crate) mod fake_api;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

use time::macros::date;

use crate::{
    database_id::{CategoryId, TransactionId},
    transaction::{Transaction, TransactionType},
};

pub(crate) use fake_api::{FakeLedgerApi, Operation};
pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document};
pub(crate) use http::assert_status_ok;

/// An included $10 expense on 2025-01-01 in category `category_id`, which is
/// named "Category {category_id}".
pub(crate) fn transaction(
    id: TransactionId,
    description: &str,
    category_id: CategoryId,
) -> Transaction {
    Transaction {
        id,
        date: date!(2025 - 01 - 01),
        description: description.to_owned(),
        transaction_type: TransactionType::Expense,
        category_id,
        category_name: Some(format!("Category {category_id}")),
        amount: 10.0,
        notes: None,
        is_excluded: false,
        source: Some("manual".to_owned()),
        created_at: None,
    }
}
