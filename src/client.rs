//! The REST client capability shared by transports and decorators.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::error::Result;

/// Types that can travel through a [`RestClient`].
///
/// `Default` is required because an exhausted retry may hand back the type's
/// default value instead of an error.
pub trait Model: Serialize + DeserializeOwned + Default + Send + Sync + 'static {}

impl<T> Model for T where T: Serialize + DeserializeOwned + Default + Send + Sync + 'static {}

/// Typed GET/PUT/POST/DELETE operations against a REST endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestClient: Send + Sync {
    async fn get<T: Model>(&self, url: &str) -> Result<T>;

    async fn put<T: Model>(&self, url: &str, model: &T) -> Result<T>;

    async fn post<T: Model>(&self, url: &str, model: &T) -> Result<T>;

    async fn delete<T: Model>(&self, id: i64) -> Result<T>;
}

#[async_trait]
impl<C: RestClient> RestClient for Arc<C> {
    async fn get<T: Model>(&self, url: &str) -> Result<T> {
        (**self).get(url).await
    }

    async fn put<T: Model>(&self, url: &str, model: &T) -> Result<T> {
        (**self).put(url, model).await
    }

    async fn post<T: Model>(&self, url: &str, model: &T) -> Result<T> {
        (**self).post(url, model).await
    }

    async fn delete<T: Model>(&self, id: i64) -> Result<T> {
        (**self).delete(id).await
    }
}
