//! Alert system for displaying success and error messages to users.
//!
//! Alerts are swapped out-of-band into the alert container that every page
//! has, so any htmx response can carry one.

use axum::response::{IntoResponse, Response};
use maud::{Markup, Render, html};

/// A dismissible message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// A success message.
    SuccessSimple {
        /// The headline.
        message: String,
    },
    /// A success message with more detail underneath.
    Success {
        /// The headline.
        message: String,
        /// The text under the headline.
        details: String,
    },
    /// An error message.
    ErrorSimple {
        /// The headline.
        message: String,
    },
    /// An error message with more detail underneath.
    Error {
        /// The headline.
        message: String,
        /// The text under the headline, e.g. how to fix the error.
        details: String,
    },
}

impl Alert {
    fn parts(&self) -> (bool, &str, Option<&str>) {
        match self {
            Alert::SuccessSimple { message } => (true, message, None),
            Alert::Success { message, details } => (true, message, Some(details)),
            Alert::ErrorSimple { message } => (false, message, None),
            Alert::Error { message, details } => (false, message, Some(details)),
        }
    }
}

impl Render for Alert {
    fn render(&self) -> Markup {
        let (is_success, message, details) = self.parts();

        let style = if is_success {
            "flex items-start p-4 mb-4 rounded border text-green-800 bg-green-50 \
            border-green-300 dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        } else {
            "flex items-start p-4 mb-4 rounded border text-red-800 bg-red-50 \
            border-red-300 dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        };

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    role="alert"
                    data-alert-kind=(if is_success { "success" } else { "error" })
                    class=(style)
                {
                    div class="flex-1"
                    {
                        p class="font-medium" { (message) }

                        @if let Some(details) = details {
                            p class="mt-1 text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="ms-3 text-lg leading-none"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.render().into_response()
    }
}
