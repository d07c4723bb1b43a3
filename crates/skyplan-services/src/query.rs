//! Cache-first reads

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use skyplan_cache::QueryStore;
use skyplan_core::{ApiResult, QueryKey};

use crate::client::ApiClient;
use crate::resource::Resource;

/// Reads a resource's lists, entities and derived data through the query
/// store. A fresh cached value is returned without a request; a missing or
/// stale one is fetched and written back.
pub struct ResourceQuery<R: Resource> {
    client: ApiClient,
    store: Arc<dyn QueryStore>,
    resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceQuery<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            store: self.store.clone(),
            resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceQuery<R> {
    pub fn new(client: ApiClient, store: Arc<dyn QueryStore>) -> Self {
        Self {
            client,
            store,
            resource: PhantomData,
        }
    }

    #[tracing::instrument(skip(self), fields(resource = R::PATH))]
    pub async fn list(&self) -> ApiResult<Vec<R::Entity>> {
        self.cached_or_fetch(&R::list_key(), R::PATH).await
    }

    #[tracing::instrument(skip(self), fields(resource = R::PATH))]
    pub async fn get(&self, id: i64) -> ApiResult<R::Entity> {
        self.cached_or_fetch(&R::entity_key(id), &R::entity_path(id))
            .await
    }

    /// Data computed by the backend for entity `id`, e.g. `weight-balance`
    /// under `flights/{id}`
    #[tracing::instrument(skip(self), fields(resource = R::PATH))]
    pub async fn derived<T: DeserializeOwned>(&self, id: i64, name: &str) -> ApiResult<T> {
        let key = R::entity_key(id).with(name);
        let path = format!("{}/{}", R::entity_path(id), name);
        self.cached_or_fetch(&key, &path).await
    }

    /// Fetch the list regardless of what is cached
    #[tracing::instrument(skip(self), fields(resource = R::PATH))]
    pub async fn refetch_list(&self) -> ApiResult<Vec<R::Entity>> {
        self.fetch(&R::list_key(), R::PATH).await
    }

    async fn cached_or_fetch<T: DeserializeOwned>(
        &self,
        key: &QueryKey,
        path: &str,
    ) -> ApiResult<T> {
        if let Some(value) = self.store.get_fresh(key) {
            match serde_json::from_value(value) {
                Ok(cached) => return Ok(cached),
                Err(e) => {
                    tracing::debug!(key = %key, error = %e, "cached value unreadable, refetching")
                }
            }
        }
        self.fetch(key, path).await
    }

    async fn fetch<T: DeserializeOwned>(&self, key: &QueryKey, path: &str) -> ApiResult<T> {
        let value: Value = self.client.get(path).await?;
        let decoded = serde_json::from_value(value.clone())?;
        self.store.set(key, value);
        Ok(decoded)
    }
}
