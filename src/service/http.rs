use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::models::{NewTransaction, Summary, Transaction};
use crate::service::{ServiceError, TransactionService};
use crate::types::{TransactionId, UserId};

/// JSON over HTTP implementation of [`TransactionService`].
///
/// Endpoints, relative to the base URL:
/// - `GET transactions/{user_id}`
/// - `GET transactions/summary/{user_id}`
/// - `POST transactions`
/// - `DELETE transactions/{id}`
#[derive(Debug, Clone)]
pub struct HttpTransactionService {
    client: Client,
    base_url: Url
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>
}

impl HttpTransactionService {
    /// Builds a client for the service at `base_url`. Every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let base_url = Url::parse(base_url)
            .map_err(|error| ServiceError::transport(base_url, format!("invalid base URL: {error}")))?;

        if base_url.cannot_be_a_base() {
            return Err(ServiceError::transport(base_url, "base URL cannot carry a path"));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ServiceError::transport(&base_url, error))?;

        Ok(Self { client, base_url })
    }

    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| ServiceError::transport(&self.base_url, "base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn send(&self, url: &Url, request: reqwest::RequestBuilder) -> Result<Response, ServiceError> {
        let response = request.send().await.map_err(|error| {
            if error.is_timeout() {
                ServiceError::transport(url, "timed out")
            } else {
                ServiceError::transport(url, error)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = response.json::<ErrorBody>().await.ok().and_then(|body| body.error);

        Err(ServiceError::status(status.as_u16(), message.as_deref()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ServiceError> {
        let response = self.send(&url, self.client.get(url.clone())).await?;

        response.json::<T>().await.map_err(|error| ServiceError::decode(&url, error))
    }
}

impl TransactionService for HttpTransactionService {
    async fn list_transactions(&self, user_id: &UserId) -> Result<Vec<Transaction>, ServiceError> {
        let url = self.endpoint(&["transactions", user_id.as_str()])?;
        self.get_json(url).await
    }

    async fn get_summary(&self, user_id: &UserId) -> Result<Summary, ServiceError> {
        let url = self.endpoint(&["transactions", "summary", user_id.as_str()])?;
        self.get_json(url).await
    }

    async fn create_transaction(&self, request: &NewTransaction) -> Result<Option<Transaction>, ServiceError> {
        let url = self.endpoint(&["transactions"])?;
        let response = self.send(&url, self.client.post(url.clone()).json(request)).await?;

        let body = response.bytes().await.map_err(|error| ServiceError::decode(&url, error))?;

        match serde_json::from_slice::<Transaction>(&body) {
            Ok(transaction) => Ok(Some(transaction)),
            Err(error) => {
                debug!("Create acknowledged without a transaction body: {error}");
                Ok(None)
            }
        }
    }

    async fn delete_transaction(&self, id: &TransactionId) -> Result<(), ServiceError> {
        let url = self.endpoint(&["transactions", id.as_str()])?;
        self.send(&url, self.client.delete(url.clone())).await?;

        Ok(())
    }
}
