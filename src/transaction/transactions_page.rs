//! The transactions page and the table fragments it swaps in for search and
//! sort.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    alert::Alert,
    api::LedgerApi,
    endpoints,
    ledger::{FilterState, LedgerContext, SortConfig, SortDirection, SortField},
    transaction::{
        models::TransactionTableRow,
        view::{transactions_table, transactions_view},
    },
};

/// The sort in the query string of the transactions page.
///
/// The page starts with the default sort unless the URL names one.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct SortQuery {
    #[serde(default)]
    sort: Option<SortField>,
    #[serde(default)]
    dir: Option<SortDirection>,
}

impl SortQuery {
    fn sort_config(&self) -> SortConfig {
        match self.sort {
            Some(field) => SortConfig {
                field,
                direction: self.dir.unwrap_or(SortDirection::Ascending),
            },
            None => SortConfig::default(),
        }
    }
}

impl From<SortConfig> for SortQuery {
    fn from(sort_config: SortConfig) -> Self {
        if sort_config == SortConfig::default() {
            return Self::default();
        }

        Self {
            sort: Some(sort_config.field),
            dir: Some(sort_config.direction),
        }
    }
}

/// The URL of the transactions page with `filter_state` and `sort_config` in
/// the query string, so redirects keep the user's filters and sort.
pub(crate) fn transactions_url(filter_state: &FilterState, sort_config: SortConfig) -> String {
    let query = serde_urlencoded::to_string(filter_state).and_then(|filters| {
        let sort = serde_urlencoded::to_string(SortQuery::from(sort_config))?;

        Ok([filters, sort]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("&"))
    });

    match query {
        Ok(query) if !query.is_empty() => format!("{}?{query}", endpoints::TRANSACTIONS_VIEW),
        Ok(_) => endpoints::TRANSACTIONS_VIEW.to_owned(),
        Err(error) => {
            tracing::warn!("Could not encode filters {filter_state:?}: {error}");
            endpoints::TRANSACTIONS_VIEW.to_owned()
        }
    }
}

/// The URL to send the user back to after a change, keeping the page as it was.
pub(crate) fn return_url(ledger: &LedgerContext) -> String {
    transactions_url(ledger.filter_state(), ledger.sort_config())
}

fn table_rows(ledger: &LedgerContext) -> Vec<TransactionTableRow> {
    ledger
        .view()
        .iter()
        .map(TransactionTableRow::new_from_transaction)
        .collect()
}

/// The current view of the ledger as a table.
pub(crate) fn render_table(ledger: &LedgerContext, swap_oob: bool) -> Markup {
    transactions_table(&table_rows(ledger), ledger.sort_config(), swap_oob)
}

/// Respond with the refreshed table and an optional alert.
pub(crate) fn table_response(ledger: &LedgerContext, alert: Option<Alert>) -> Response {
    html! {
        (render_table(ledger, false))

        @if let Some(alert) = alert {
            (alert)
        }
    }
    .into_response()
}

/// Renders the transactions page with the filters and sort in the query
/// string.
///
/// Loading the page starts a new visit: a bulk delete or category change
/// left waiting for confirmation is dropped, the sort goes back to the one in the URL (or the
/// default) and the ledger is fetched again.
pub(crate) async fn get_transactions_page<A: LedgerApi>(
    State(state): State<AppState<A>>,
    Query(filter_state): Query<FilterState>,
    Query(sort_query): Query<SortQuery>,
) -> Response {
    let mut ledger = state.ledger.lock().await;
    ledger.navigate_away();
    ledger.set_filter(filter_state);
    ledger.set_sort(sort_query.sort_config());

    if let Err(error) = ledger.load_categories(state.api.as_ref()).await {
        tracing::error!("Could not load categories for the transactions page: {error}");
    }

    if let Err(error) = ledger.reload(state.api.as_ref()).await {
        return error.into_response();
    }

    transactions_view(
        &table_rows(&ledger),
        ledger.sort_config(),
        ledger.filter_state(),
        ledger.categories(),
    )
    .into_response()
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    search: String,
}

/// Search the loaded transactions without going back to the API.
pub(crate) async fn get_transactions_table<A: LedgerApi>(
    State(state): State<AppState<A>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let mut ledger = state.ledger.lock().await;
    ledger.set_search(&query.search);

    render_table(&ledger, false).into_response()
}

/// Sort by the clicked column, flipping the direction on a second click.
pub(crate) async fn sort_transactions_endpoint<A: LedgerApi>(
    State(state): State<AppState<A>>,
    Path(field): Path<SortField>,
) -> Response {
    let mut ledger = state.ledger.lock().await;
    let sort_config = ledger.sort_by(field);
    tracing::debug!("Sorting transactions by {sort_config:?}");

    render_table(&ledger, false).into_response()
}
