//! HTML rendering for the transactions pages.

use maud::{Markup, html};

use crate::{
    category::Category,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CATEGORY_BADGE_STYLE,
        FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        dollar_input_styles, format_currency, link, loading_spinner,
    },
    ledger::{
        FilterState, PendingBulkDelete, PropagationPlan, SortConfig, SortDirection, SortField,
        StatusFilter,
    },
    transaction::{
        Transaction, TransactionType,
        form::{TransactionFormDefaults, transaction_form_fields},
        models::{TransactionTableRow, signed_amount},
    },
};

pub(crate) const TABLE_ID: &str = "transactions-table";
pub(crate) const BULK_DELETE_PREVIEW_ID: &str = "bulk-delete-preview";
pub(crate) const PROPAGATION_PROMPT_ID: &str = "propagation-prompt";
const SELECTED_FORM_ID: &str = "bulk-delete-selected-form";

fn amount_class(amount: f64) -> &'static str {
    if amount < 0.0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    }
}

pub(crate) fn type_label(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Income => "Income",
        TransactionType::Expense => "Expense",
    }
}

pub(crate) fn transactions_view(
    rows: &[TransactionTableRow],
    sort_config: SortConfig,
    filter_state: &FilterState,
    categories: &[Category],
) -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Create Transaction"
                    }
                }

                (filter_form(filter_state, categories))

                (bulk_delete_controls())

                div id=(BULK_DELETE_PREVIEW_ID) {}

                (transactions_table(rows, sort_config, false))
            }
        }
    };

    base("Transactions", &[], &content)
}

fn filter_form(filter_state: &FilterState, categories: &[Category]) -> Markup {
    let start_date = filter_state.start_date.map(|date| date.to_string());
    let end_date = filter_state.end_date.map(|date| date.to_string());

    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            data-filter-form="true"
            class="grid grid-cols-2 lg:grid-cols-5 gap-3 items-end"
        {
            div class="col-span-2 lg:col-span-5"
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search" }

                input
                    name="search"
                    id="search"
                    type="search"
                    placeholder="Search descriptions and categories"
                    value=(filter_state.search)
                    hx-get=(endpoints::TRANSACTIONS_TABLE)
                    hx-trigger="input changed delay:300ms, search"
                    hx-target={ "#" (TABLE_ID) }
                    hx-swap="outerHTML"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="filter-type" class=(FORM_LABEL_STYLE) { "Type" }

                select name="type" id="filter-type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "All types" }

                    @for transaction_type in [TransactionType::Income, TransactionType::Expense] {
                        option
                            value=(transaction_type)
                            selected[filter_state.transaction_type == Some(transaction_type)]
                        {
                            (type_label(transaction_type))
                        }
                    }
                }
            }

            div
            {
                label for="filter-category" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category_id" id="filter-category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "All categories" }

                    @for category in categories {
                        option
                            value=(category.id)
                            selected[filter_state.category_id == Some(category.id)]
                        {
                            (category.name)
                        }
                    }
                }
            }

            div
            {
                label for="filter-status" class=(FORM_LABEL_STYLE) { "Status" }

                select name="status" id="filter-status" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "All" }
                    option
                        value="included"
                        selected[filter_state.status == Some(StatusFilter::Included)]
                    { "Included" }
                    option
                        value="excluded"
                        selected[filter_state.status == Some(StatusFilter::Excluded)]
                    { "Excluded" }
                }
            }

            div
            {
                label for="start_date" class=(FORM_LABEL_STYLE) { "From" }

                input
                    name="start_date"
                    id="start_date"
                    type="date"
                    value=[start_date]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="end_date" class=(FORM_LABEL_STYLE) { "To" }

                input
                    name="end_date"
                    id="end_date"
                    type="date"
                    value=[end_date]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="col-span-2 lg:col-span-5 flex gap-4 items-center"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply Filters" }

                (link(endpoints::TRANSACTIONS_VIEW, "Clear"))
            }
        }
    }
}

fn bulk_delete_controls() -> Markup {
    html! {
        section class="flex flex-wrap gap-4 items-end justify-between"
        {
            form
                id=(SELECTED_FORM_ID)
                hx-post=(endpoints::BULK_DELETE_SELECTED)
                hx-target={ "#" (TABLE_ID) }
                hx-swap="outerHTML"
                hx-confirm="Are you sure you want to delete the selected transactions? This cannot be undone."
            {
                button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete Selected" }
            }

            form
                hx-post=(endpoints::BULK_DELETE_PREVIEW)
                hx-encoding="multipart/form-data"
                hx-target={ "#" (BULK_DELETE_PREVIEW_ID) }
                hx-swap="innerHTML"
                class="flex gap-2 items-end"
            {
                div
                {
                    label for="statement-file" class=(FORM_LABEL_STYLE)
                    {
                        "Delete transactions from a statement file"
                    }

                    input
                        name="file"
                        id="statement-file"
                        type="file"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="w-32"
                {
                    button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Preview" }
                }
            }
        }
    }
}

/// The transactions table, swapped in place on search, sort and changes.
///
/// Set `swap_oob` when the table is not the target of the response.
pub(crate) fn transactions_table(
    rows: &[TransactionTableRow],
    sort_config: SortConfig,
    swap_oob: bool,
) -> Markup {
    html! {
        div
            id=(TABLE_ID)
            hx-swap-oob=[swap_oob.then_some("true")]
            class="overflow-x-auto rounded bg-gray-50 dark:bg-gray-800"
        {
            table class="w-full my-2 text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class="px-6 py-3"
                        {
                            span class="sr-only" { "Select" }
                        }

                        @for field in SortField::ALL {
                            (sort_header(field, sort_config))
                        }

                        th scope="col" class="px-6 py-3"
                        {
                            "Actions"
                        }
                    }
                }

                tbody
                {
                    @for row in rows {
                        (transaction_row_view(row))
                    }

                    @if rows.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="9" class="px-6 py-4 text-center" data-empty-state="true"
                            {
                                "No transactions found."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn sort_header(field: SortField, sort_config: SortConfig) -> Markup {
    let (aria_sort, indicator) = if field == sort_config.field {
        match sort_config.direction {
            SortDirection::Ascending => (Some("ascending"), "▲"),
            SortDirection::Descending => (Some("descending"), "▼"),
        }
    } else {
        (None, "")
    };

    html! {
        th scope="col" class="px-6 py-3" aria-sort=[aria_sort] data-sort-field=(field)
        {
            button
                type="button"
                hx-post=(format_endpoint(endpoints::SORT_TRANSACTIONS, field))
                hx-target={ "#" (TABLE_ID) }
                hx-swap="outerHTML"
                class="flex gap-1 items-center uppercase"
            {
                (field.label())
                span aria-hidden="true" { (indicator) }
            }
        }
    }
}

fn transaction_row_view(row: &TransactionTableRow) -> Markup {
    let status_vals = format!(r#"{{"is_excluded": {}}}"#, !row.is_excluded);
    let status_label = if row.is_excluded { "Excluded" } else { "Included" };

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(row.id)
        {
            td class=(TABLE_CELL_STYLE)
            {
                input
                    type="checkbox"
                    name="transaction_ids"
                    value=(row.id)
                    form=(SELECTED_FORM_ID)
                    aria-label="Select transaction";
            }
            td class=(TABLE_CELL_STYLE) { time datetime=(row.date) { (row.date) } }
            td class=(TABLE_CELL_STYLE) title=[row.tooltip.as_deref()] { (row.description) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (row.category_name) }
            }
            td class=(TABLE_CELL_STYLE) { (type_label(row.transaction_type)) }
            td class={ "px-6 py-4 text-right " (amount_class(row.signed_amount)) }
            {
                (format_currency(row.signed_amount))
            }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-put=(row.status_url)
                    hx-vals=(status_vals)
                    hx-target={ "#" (TABLE_ID) }
                    hx-swap="outerHTML"
                    data-excluded=(row.is_excluded)
                    class=(LINK_STYLE)
                {
                    (status_label)
                }
            }
            td class=(TABLE_CELL_STYLE)
            {
                @match row.upload_date {
                    Some(upload_date) => {
                        time datetime=(upload_date) { (upload_date) }
                    }
                    None => { "\u{2014}" }
                }
            }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    a href=(row.edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        type="button"
                        hx-delete=(row.delete_url)
                        hx-confirm="Are you sure you want to delete this transaction?"
                        hx-target={ "#" (TABLE_ID) }
                        hx-swap="outerHTML"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

/// The transactions a statement file would delete, with buttons to confirm
/// or cancel.
pub(crate) fn bulk_delete_preview_view(pending: &PendingBulkDelete) -> Markup {
    html! {
        section
            data-bulk-delete-preview="true"
            class="rounded border border-red-300 dark:border-red-800 p-4 space-y-3"
        {
            h2 class="font-semibold" { (pending.len()) " transaction(s) will be deleted:" }

            ul class="divide-y divide-gray-200 dark:divide-gray-700"
            {
                @for transaction in pending.preview() {
                    (preview_item(transaction))
                }
            }

            div class="flex gap-4 items-center"
            {
                button
                    type="button"
                    hx-post=(endpoints::BULK_DELETE_CONFIRM)
                    hx-confirm=(pending.prompt())
                    hx-target={ "#" (BULK_DELETE_PREVIEW_ID) }
                    hx-swap="innerHTML"
                    disabled[pending.is_empty()]
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete " (pending.len()) " Transaction(s)"
                }

                button
                    type="button"
                    hx-post=(endpoints::BULK_DELETE_CANCEL)
                    hx-target={ "#" (BULK_DELETE_PREVIEW_ID) }
                    hx-swap="innerHTML"
                    class=(LINK_STYLE)
                {
                    "Cancel"
                }
            }
        }
    }
}

fn preview_item(transaction: &Transaction) -> Markup {
    let amount = signed_amount(transaction.transaction_type, transaction.amount);
    let sign = match transaction.transaction_type {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };

    html! {
        li class="flex justify-between items-center py-2" data-transaction-id=(transaction.id)
        {
            div class="flex-1"
            {
                div class="font-semibold" { (transaction.description) }
                div class="text-xs text-gray-500 dark:text-gray-400"
                {
                    (transaction.date) " • " (transaction.category_name())
                }
            }

            div class={ "text-right font-semibold " (amount_class(amount)) }
            {
                (sign) (format_currency(transaction.amount.abs()))
            }
        }
    }
}

/// Offers to move the transactions in `plan` to the category the user just
/// picked. Declining leaves for `skip_url`.
pub(crate) fn propagation_prompt_view(plan: &PropagationPlan, skip_url: &str) -> Markup {
    html! {
        div
            role="dialog"
            data-propagation-prompt="true"
            class="rounded border border-blue-300 dark:border-blue-800 p-4 space-y-3"
        {
            p { (plan.prompt()) }

            form hx-post=(endpoints::PROPAGATE_CATEGORY) class="flex gap-4 items-center"
            {
                div class="w-40"
                {
                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply to All" }
                }

                (link(skip_url, "No, only this one"))
            }
        }
    }
}

fn submit_button(text: &str) -> Markup {
    html! {
        button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
        {
            span class="htmx-indicator" { (loading_spinner()) }
            (text)
        }
    }
}

pub(crate) fn new_transaction_view(
    defaults: &TransactionFormDefaults<'_>,
    categories: &[Category],
) -> Markup {
    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold my-4" { "Create Transaction" }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-indicator="#indicator"
                hx-disabled-elt="#indicator"
                class="w-full space-y-4 md:space-y-6"
            {
                (transaction_form_fields(defaults, categories))
                (submit_button("Create Transaction"))
            }
        }
    };

    base("Create Transaction", &[dollar_input_styles()], &content)
}

pub(crate) fn edit_transaction_view(transaction: &Transaction, categories: &[Category]) -> Markup {
    let defaults = TransactionFormDefaults::from_transaction(transaction);

    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold my-4" { "Edit Transaction" }

            form
                hx-put=(format_endpoint(endpoints::TRANSACTION, transaction.id))
                hx-target={ "#" (PROPAGATION_PROMPT_ID) }
                hx-swap="innerHTML"
                hx-indicator="#indicator"
                hx-disabled-elt="#indicator"
                class="w-full space-y-4 md:space-y-6"
            {
                (transaction_form_fields(&defaults, categories))
                (submit_button("Save Transaction"))
            }

            div id=(PROPAGATION_PROMPT_ID) class="w-full mt-4" {}

            (link(endpoints::TRANSACTIONS_VIEW, "Back to Transactions"))
        }
    };

    base("Edit Transaction", &[dollar_input_styles()], &content)
}
