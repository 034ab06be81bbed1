//! The fields shared by the new and edit transaction forms.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    category::Category,
    database_id::CategoryId,
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::{NewTransaction, Transaction, TransactionType},
};

/// The form data submitted when creating or editing a transaction.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TransactionForm {
    #[serde(rename = "type")]
    pub(crate) transaction_type: TransactionType,
    pub(crate) amount: f64,
    pub(crate) date: Date,
    pub(crate) description: String,
    pub(crate) category_id: CategoryId,
    pub(crate) notes: Option<String>,
    /// Checkboxes are only sent when checked.
    #[serde(default)]
    pub(crate) is_excluded: bool,
}

impl From<TransactionForm> for NewTransaction {
    fn from(form: TransactionForm) -> Self {
        NewTransaction::build(form.amount, form.date, form.description.trim(), form.category_id)
            .transaction_type(form.transaction_type)
            .notes(form.notes.filter(|notes| !notes.trim().is_empty()))
            .is_excluded(form.is_excluded)
    }
}

pub(crate) struct TransactionFormDefaults<'a> {
    pub(crate) transaction_type: TransactionType,
    pub(crate) amount: Option<f64>,
    pub(crate) date: Date,
    pub(crate) description: Option<&'a str>,
    pub(crate) category_id: Option<CategoryId>,
    pub(crate) notes: Option<&'a str>,
    /// `None` hides the status checkbox, new transactions are always included.
    pub(crate) is_excluded: Option<bool>,
}

impl<'a> TransactionFormDefaults<'a> {
    /// Defaults for editing `transaction`.
    pub(crate) fn from_transaction(transaction: &'a Transaction) -> Self {
        Self {
            transaction_type: transaction.transaction_type,
            amount: Some(transaction.amount),
            date: transaction.date,
            description: Some(&transaction.description),
            category_id: Some(transaction.category_id),
            notes: transaction.notes.as_deref(),
            is_excluded: Some(transaction.is_excluded),
        }
    }
}

pub(crate) fn transaction_form_fields(
    defaults: &TransactionFormDefaults<'_>,
    categories: &[Category],
) -> Markup {
    let is_expense = matches!(defaults.transaction_type, TransactionType::Expense);
    let amount_str = defaults.amount.map(|amount| format!("{:.2}", amount.abs()));

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Transaction type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                (type_radio(TransactionType::Expense, is_expense))
                (type_radio(TransactionType::Income, !is_expense))
            }
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder="0.01"
                    min="0.01"
                    required
                    value=[amount_str.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                value=[defaults.description]
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

            select
                name="category_id"
                id="category_id"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select a category" }

                @for (label, category_type) in [("Expense", TransactionType::Expense), ("Income", TransactionType::Income)] {
                    optgroup label=(label)
                    {
                        @for category in categories.iter().filter(|category| category.category_type == category_type) {
                            option
                                value=(category.id)
                                selected[Some(category.id) == defaults.category_id]
                            {
                                (category.name)
                            }
                        }
                    }
                }
            }
        }

        div
        {
            label for="notes" class=(FORM_LABEL_STYLE) { "Notes" }

            textarea
                name="notes"
                id="notes"
                rows="2"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                (defaults.notes.unwrap_or_default())
            }
        }

        @if let Some(is_excluded) = defaults.is_excluded {
            div class="flex items-center gap-3"
            {
                input
                    name="is_excluded"
                    id="is_excluded"
                    type="checkbox"
                    value="true"
                    checked[is_excluded]
                    class="h-4 w-4";

                label for="is_excluded" class="text-sm" { "Exclude from totals" }
            }
        }
    }
}

fn type_radio(transaction_type: TransactionType, checked: bool) -> Markup {
    let id = format!("transaction-type-{transaction_type}");
    let label = match transaction_type {
        TransactionType::Expense => "Expense",
        TransactionType::Income => "Income",
    };

    html! {
        div class="flex items-center gap-3"
        {
            input
                name="type"
                id=(id)
                type="radio"
                value=(transaction_type)
                checked[checked]
                required
                tabindex="0"
                class=(FORM_RADIO_INPUT_STYLE);

            label for=(id) class=(FORM_RADIO_LABEL_STYLE) { (label) }
        }
    }
}
