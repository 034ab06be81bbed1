//! Transactions and the web pages for managing them.
//!
//! This module contains:
//! - The [Transaction] model and the [NewTransaction] and [TransactionUpdate]
//!   payloads sent to the ledger API
//! - The route handlers for the transactions page, the transaction forms and
//!   the bulk delete protocol

mod bulk_delete_endpoint;
mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
mod form;
mod models;
mod status_endpoint;
mod transactions_page;
mod view;

pub use core::{NewTransaction, Transaction, TransactionType, TransactionUpdate, UPLOAD_SOURCE};

pub(crate) use bulk_delete_endpoint::{
    cancel_bulk_delete_endpoint, confirm_bulk_delete_endpoint, preview_bulk_delete_endpoint,
};
pub(crate) use create_endpoint::create_transaction_endpoint;
pub(crate) use create_page::get_new_transaction_page;
pub(crate) use delete_endpoint::{delete_selected_endpoint, delete_transaction_endpoint};
pub(crate) use edit_endpoint::{edit_transaction_endpoint, propagate_category_endpoint};
pub(crate) use edit_page::get_edit_transaction_page;
pub(crate) use status_endpoint::update_status_endpoint;
pub(crate) use transactions_page::{
    get_transactions_page, get_transactions_table, sort_transactions_endpoint,
};
