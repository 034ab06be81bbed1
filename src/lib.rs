//! The client-side transaction ledger of a personal finance tracker.
//!
//! The ledger API owns every transaction. This library keeps a local copy of
//! the current filtered result set, sorts and searches it without going back
//! to the API, offers to re-categorize similar transactions when the user
//! changes a transaction's category, and runs the two-phase preview/confirm
//! protocol for deleting transactions listed in a statement file.
//!
//! The engine lives in [ledger] and only talks to the API through
//! [api::LedgerApi]. A small web front end built with axum, maud and htmx
//! drives the engine from the browser.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
pub mod api;
mod app_state;
pub mod category;
mod config;
pub mod database_id;
mod endpoints;
mod html;
pub mod ledger;
mod logging;
mod routing;
pub mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::ClientConfig;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{
    alert::Alert,
    database_id::{CategoryId, TransactionId},
    transaction::TransactionType,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request never produced an HTTP response, e.g. the API is down, or
    /// the response body could not be decoded.
    #[error("could not reach the ledger API: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    ///
    /// `message` is the API's own error message when it sent one, and is
    /// meant to be shown to the user as is.
    #[error("{message}")]
    Rejected {
        /// The HTTP status code of the response.
        status: u16,
        /// The error message to show to the user.
        message: String,
    },

    /// The user's input was rejected before anything was sent to the API.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A bulk delete was confirmed or cancelled without a preview first.
    #[error("there is no bulk delete waiting for confirmation")]
    NoPendingBulkDelete,

    /// A category change was applied to similar transactions without an edit
    /// offering it first.
    #[error("there is no category change waiting for confirmation")]
    NoPendingPropagation,

    /// The uploaded form could not be read, e.g. the body was cut off.
    #[error("could not read the uploaded file: {message}")]
    UnreadableUpload {
        /// The HTTP status code the multipart parser chose for the failure.
        status: u16,
        /// Why the upload could not be read.
        message: String,
    },

    /// The transaction is not part of the currently loaded ledger.
    #[error("transaction {0} is not in the loaded ledger")]
    NotInCache(TransactionId),

    /// The configured API URL could not be used.
    ///
    /// Holds the URL and the reason it was rejected.
    #[error("invalid API URL \"{0}\": {1}")]
    InvalidApiUrl(String, String),
}

impl Error {
    /// Whether the error came from the network rather than from the API or
    /// the user.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::Transport(_) => StatusCode::BAD_GATEWAY,
            Error::Rejected { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NoPendingBulkDelete | Error::NoPendingPropagation => StatusCode::CONFLICT,
            Error::UnreadableUpload { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
            }
            Error::NotInCache(_) => StatusCode::NOT_FOUND,
            Error::InvalidApiUrl(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_alert_response(self) -> Response {
        let status_code = self.status_code();

        let alert = match self {
            Error::Transport(_) => Alert::Error {
                message: "Could not reach the server".to_owned(),
                details: "Check that the ledger API is running and try again.".to_owned(),
            },
            Error::Rejected { message, .. } => Alert::ErrorSimple { message },
            Error::Validation(error) => Alert::Error {
                message: "Invalid transaction".to_owned(),
                details: error.to_string(),
            },
            Error::NoPendingBulkDelete => Alert::Error {
                message: "Nothing to delete".to_owned(),
                details: "Upload the statement file again to preview which transactions will be deleted."
                    .to_owned(),
            },
            Error::NoPendingPropagation => Alert::Error {
                message: "Nothing to update".to_owned(),
                details: "Edit the transaction again to update similar transactions.".to_owned(),
            },
            Error::UnreadableUpload { message, .. } => Alert::Error {
                message: "Could not read the uploaded file".to_owned(),
                details: message,
            },
            Error::NotInCache(id) => Alert::Error {
                message: "Transaction not found".to_owned(),
                details: format!(
                    "Transaction {id} is not in the current view. \
                    Try refreshing the page to see if it has been deleted."
                ),
            },
            Error::InvalidApiUrl(..) => Alert::Error {
                message: "Something went wrong".to_owned(),
                details: "An unexpected error occurred, check the server logs for more details."
                    .to_owned(),
            },
        };

        (status_code, alert).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if !matches!(self, Error::Rejected { .. } | Error::Validation(_)) {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        let status_code = self.status_code();

        let (description, fix) = match &self {
            Error::Transport(_) => (
                "Could not reach the server".to_owned(),
                "Check that the ledger API is running and try again.".to_owned(),
            ),
            Error::NotInCache(_) => (
                "Transaction not found".to_owned(),
                "The transaction may have been deleted. Go back to the transactions page and try again."
                    .to_owned(),
            ),
            error => ("Something went wrong".to_owned(), error.to_string()),
        };

        (
            status_code,
            html::error_view(
                "Error",
                &status_code.as_u16().to_string(),
                &description,
                &fix,
            ),
        )
            .into_response()
    }
}

/// The reasons user input is rejected before it is sent to the API.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// The description was empty or only whitespace.
    #[error("the description cannot be empty")]
    EmptyDescription,

    /// The amount was zero, negative or not a number.
    #[error("the amount must be a positive number, got {0}")]
    NonPositiveAmount(f64),

    /// The category ID did not match a known category.
    #[error("category {0} does not exist")]
    UnknownCategory(CategoryId),

    /// The category is for the other transaction type, e.g. an income
    /// category on an expense.
    #[error("the category \"{category}\" is for {category_type} transactions, not {transaction_type}")]
    CategoryTypeMismatch {
        /// The name of the chosen category.
        category: String,
        /// The type of transaction the category is for.
        category_type: TransactionType,
        /// The type of the transaction being saved.
        transaction_type: TransactionType,
    },

    /// A bulk operation was requested without any transactions.
    #[error("no transactions were selected")]
    EmptySelection,

    /// A statement upload did not include a file.
    #[error("no file was uploaded")]
    MissingFile,
}

