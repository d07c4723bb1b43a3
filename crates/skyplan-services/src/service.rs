use std::sync::Arc;

use skyplan_cache::{MutationRunner, QueryStore};
use skyplan_core::{ApiResult, Notifier};

use crate::client::ApiClient;
use crate::mutations::{CreateEntity, DeleteEntity, UpdateEntity};
use crate::query::ResourceQuery;
use crate::resource::Resource;

/// Entry point for reading and editing one resource
pub struct ResourceService<R: Resource> {
    client: ApiClient,
    runner: MutationRunner,
    query: ResourceQuery<R>,
}

impl<R: Resource> ResourceService<R> {
    pub fn new(client: ApiClient, store: Arc<dyn QueryStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            query: ResourceQuery::new(client.clone(), store.clone()),
            runner: MutationRunner::new(store, notifier),
            client,
        }
    }

    pub fn query(&self) -> &ResourceQuery<R> {
        &self.query
    }

    pub async fn list(&self) -> ApiResult<Vec<R::Entity>> {
        self.query.list().await
    }

    pub async fn get(&self, id: i64) -> ApiResult<R::Entity> {
        self.query.get(id).await
    }

    #[tracing::instrument(skip(self, draft), fields(resource = R::PATH))]
    pub async fn create(&self, draft: R::Draft) -> ApiResult<R::Entity> {
        let mutation = CreateEntity::<R>::new(self.client.clone(), draft)?;
        self.runner.run(&mutation).await
    }

    #[tracing::instrument(skip(self, draft), fields(resource = R::PATH))]
    pub async fn update(&self, id: i64, draft: R::Draft) -> ApiResult<R::Entity> {
        let mutation = UpdateEntity::<R>::new(self.client.clone(), id, draft)?;
        self.runner.run(&mutation).await
    }

    #[tracing::instrument(skip(self), fields(resource = R::PATH))]
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.runner.run(&DeleteEntity::<R>::new(self.client.clone(), id)).await
    }
}
