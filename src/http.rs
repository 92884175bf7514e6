//! [`RestClient`] over `reqwest`, exchanging JSON bodies.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};

use crate::client::{Model, RestClient};
use crate::error::{RestError, Result};

/// JSON REST client rooted at a base URL.
#[derive(Clone)]
pub struct HttpRestClient {
    client: Client,
    base_url: String,
}

impl HttpRestClient {
    /// Creates a client sending requests through `client`.
    ///
    /// Relative URLs passed to the operations are joined to `base_url`;
    /// `delete(id)` targets `{base_url}/{id}`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }

    /// Decodes a JSON response; an empty body yields `T::default()`.
    async fn read<T: Model>(response: Response) -> Result<T> {
        let response = response.error_for_status()?;
        // A body cut short is a transport failure, not a malformed payload.
        let body = response
            .text()
            .await
            .map_err(|e| RestError::network(e.to_string()))?;

        if body.trim().is_empty() {
            return Ok(T::default());
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RestClient for HttpRestClient {
    #[tracing::instrument(skip(self))]
    async fn get<T: Model>(&self, url: &str) -> Result<T> {
        let url = self.resolve(url);
        debug!("GET {}...", url);

        let response = self.client.get(&url).send().await?;
        Self::read(response).await
    }

    #[tracing::instrument(skip(self, model))]
    async fn put<T: Model>(&self, url: &str, model: &T) -> Result<T> {
        let url = self.resolve(url);
        debug!("PUT {}...", url);

        let response = self.client.put(&url).json(model).send().await?;
        Self::read(response).await
    }

    #[tracing::instrument(skip(self, model))]
    async fn post<T: Model>(&self, url: &str, model: &T) -> Result<T> {
        let url = self.resolve(url);
        debug!("POST {}...", url);

        let response = self.client.post(&url).json(model).send().await?;
        Self::read(response).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete<T: Model>(&self, id: i64) -> Result<T> {
        let url = format!("{}/{}", self.base_url, id);
        debug!("DELETE {}...", url);

        let response = self.client.delete(&url).send().await?;
        Self::read(response).await
    }
}
