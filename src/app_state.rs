//! Implements a struct that holds the state of the web front end.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{api::LedgerApi, ledger::LedgerContext};

/// The state of the web front end.
///
/// The ledger context is shared by every request. Each handler holds the lock
/// for the whole operation, including the API calls it makes, so operations
/// on the ledger never interleave.
#[derive(Debug)]
pub struct AppState<A> {
    /// The client for the ledger API.
    pub api: Arc<A>,

    /// The ledger session of the front end.
    pub ledger: Arc<Mutex<LedgerContext>>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            ledger: self.ledger.clone(),
        }
    }
}

impl<A: LedgerApi> AppState<A> {
    /// Create a new [AppState] with an empty ledger.
    pub fn new(api: A) -> Self {
        Self {
            api: Arc::new(api),
            ledger: Arc::new(Mutex::new(LedgerContext::new())),
        }
    }
}
