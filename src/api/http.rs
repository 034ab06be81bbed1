//! A [LedgerApi] implementation that talks to the ledger API over HTTP.

use reqwest::{
    Client, RequestBuilder, Response,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;

use crate::{
    Error,
    api::{
        BulkDeleteByFileResponse, BulkDeletePreviewResponse, BulkDeleteRequest, BulkUpdateRequest,
        ErrorResponse, LedgerApi, StatementFile, TransactionQuery,
    },
    category::Category,
    database_id::{CategoryId, TransactionId},
    transaction::{NewTransaction, Transaction, TransactionUpdate},
};

/// Sends requests to the ledger API at a base URL, e.g. `http://localhost:5000/api`.
#[derive(Debug, Clone)]
pub struct HttpLedgerApi {
    client: Client,
    base_url: String,
}

impl HttpLedgerApi {
    /// Create a client for the API at `base_url`.
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl LedgerApi for HttpLedgerApi {
    async fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let request = self.client.get(self.url("/transactions/")).query(query);

        decode(send(request).await?).await
    }

    async fn get_transaction(&self, id: TransactionId) -> Result<Transaction, Error> {
        let request = self.client.get(self.url(&format!("/transactions/{id}")));

        decode(send(request).await?).await
    }

    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction, Error> {
        let request = self
            .client
            .post(self.url("/transactions/"))
            .json(transaction);

        decode(send(request).await?).await
    }

    async fn update_transaction(
        &self,
        id: TransactionId,
        update: &TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let request = self
            .client
            .put(self.url(&format!("/transactions/{id}")))
            .json(update);

        decode(send(request).await?).await
    }

    async fn delete_transaction(&self, id: TransactionId) -> Result<(), Error> {
        let request = self
            .client
            .delete(self.url(&format!("/transactions/{id}")));

        send(request).await.map(|_| ())
    }

    async fn bulk_update_category(
        &self,
        transaction_ids: &[TransactionId],
        category_id: CategoryId,
    ) -> Result<(), Error> {
        let request = self
            .client
            .put(self.url("/transactions/bulk-update/"))
            .json(&BulkUpdateRequest {
                transaction_ids: transaction_ids.to_vec(),
                category_id,
            });

        send(request).await.map(|_| ())
    }

    async fn bulk_delete(&self, transaction_ids: &[TransactionId]) -> Result<(), Error> {
        let request = self
            .client
            .delete(self.url("/transactions/bulk-delete/"))
            .json(&BulkDeleteRequest {
                transaction_ids: transaction_ids.to_vec(),
            });

        send(request).await.map(|_| ())
    }

    async fn preview_bulk_delete(&self, file: &StatementFile) -> Result<Vec<Transaction>, Error> {
        let request = self
            .client
            .post(self.url("/transactions/bulk-delete-preview/"))
            .multipart(statement_form(file));

        let preview: BulkDeletePreviewResponse = decode(send(request).await?).await?;

        Ok(preview.transactions)
    }

    async fn bulk_delete_by_file(&self, file: &StatementFile) -> Result<u64, Error> {
        let request = self
            .client
            .post(self.url("/transactions/bulk-delete-by-file/"))
            .multipart(statement_form(file));

        let result: BulkDeleteByFileResponse = decode(send(request).await?).await?;

        Ok(result.deleted_count)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, Error> {
        let request = self.client.get(self.url("/categories/"));

        decode(send(request).await?).await
    }
}

/// Build a fresh multipart form for `file`.
///
/// A form is consumed by sending it, so the preview and the confirmation each
/// get their own copy of the same bytes.
fn statement_form(file: &StatementFile) -> Form {
    let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());

    Form::new().part("file", part)
}

async fn send(request: RequestBuilder) -> Result<Response, Error> {
    let response = request
        .send()
        .await
        .map_err(|error| Error::Transport(error.to_string()))?;

    check_status(response).await
}

async fn check_status(response: Response) -> Result<Response, Error> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.error)
        .unwrap_or_else(|| format!("the server responded with {status}"));

    Err(Error::Rejected {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    response
        .json::<T>()
        .await
        .map_err(|error| Error::Transport(format!("could not decode the response: {error}")))
}
