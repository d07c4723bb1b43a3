//! Create, update and delete for any [`Resource`]

use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;
use skyplan_cache::collection;
use skyplan_cache::{CacheWrite, Mutation, MutationKind};
use skyplan_core::{ApiResult, Entity, QueryKey, PLACEHOLDER_ID};
use uuid::Uuid;

use crate::client::ApiClient;
use crate::resource::Resource;

fn to_json<E: Entity>(entity: &E) -> Option<Value> {
    serde_json::to_value(entity).ok()
}

/// Create an entity. The list shows a provisional entry with the
/// placeholder id until the server answers.
///
/// Concurrent creates all use the placeholder id, so each provisional entry
/// is also tagged with a marker unique to its mutation.
pub struct CreateEntity<R: Resource> {
    client: ApiClient,
    draft: R::Draft,
    marker: String,
    provisional: Value,
}

impl<R: Resource> CreateEntity<R> {
    pub fn new(client: ApiClient, draft: R::Draft) -> ApiResult<Self> {
        let marker = Uuid::new_v4().to_string();
        let mut provisional = R::provisional(&draft, PLACEHOLDER_ID)?;
        collection::mark_provisional(&mut provisional, &marker);
        Ok(Self {
            client,
            draft,
            marker,
            provisional,
        })
    }
}

#[async_trait]
impl<R: Resource> Mutation for CreateEntity<R> {
    type Output = R::Entity;

    fn kind(&self) -> MutationKind {
        MutationKind::Create
    }

    fn target(&self) -> String {
        R::PATH.to_string()
    }

    fn snapshot_keys(&self) -> Vec<QueryKey> {
        vec![R::list_key()]
    }

    fn optimistic_update(&self, _key: &QueryKey, current: Option<&Value>) -> CacheWrite {
        // An uncached list stays uncached; a one-entry list would pass for the full one
        current
            .and_then(|list| collection::insert(list, self.provisional.clone()))
            .into()
    }

    async fn request(&self) -> ApiResult<R::Entity> {
        self.client.post(R::PATH, &self.draft).await
    }

    fn reconcile(
        &self,
        _key: &QueryKey,
        current: Option<&Value>,
        output: &R::Entity,
    ) -> CacheWrite {
        current
            .zip(to_json(output))
            .and_then(|(list, created)| {
                collection::replace_provisional(list, &self.marker, created)
            })
            .into()
    }

    fn invalidates(&self, output: &R::Entity) -> Vec<QueryKey> {
        R::dependents(output.id())
    }

    fn success_message(&self) -> String {
        format!("{} created", R::LABEL)
    }
}

/// Update entity `id` with the fields of a draft
pub struct UpdateEntity<R: Resource> {
    client: ApiClient,
    id: i64,
    draft: R::Draft,
    patch: Value,
}

impl<R: Resource> UpdateEntity<R> {
    pub fn new(client: ApiClient, id: i64, draft: R::Draft) -> ApiResult<Self> {
        let patch = serde_json::to_value(&draft)?;
        Ok(Self {
            client,
            id,
            draft,
            patch,
        })
    }
}

#[async_trait]
impl<R: Resource> Mutation for UpdateEntity<R> {
    type Output = R::Entity;

    fn kind(&self) -> MutationKind {
        MutationKind::Update
    }

    fn target(&self) -> String {
        R::entity_key(self.id).to_string()
    }

    fn snapshot_keys(&self) -> Vec<QueryKey> {
        vec![R::list_key(), R::entity_key(self.id)]
    }

    fn optimistic_update(&self, key: &QueryKey, current: Option<&Value>) -> CacheWrite {
        let Some(current) = current else {
            return CacheWrite::Keep;
        };
        if *key == R::list_key() {
            collection::update_by_id(current, self.id, |entity| {
                collection::merge(entity, &self.patch)
            })
            .into()
        } else {
            CacheWrite::Set(collection::merge(current, &self.patch))
        }
    }

    async fn request(&self) -> ApiResult<R::Entity> {
        self.client.put(&R::entity_path(self.id), &self.draft).await
    }

    fn reconcile(&self, key: &QueryKey, current: Option<&Value>, output: &R::Entity) -> CacheWrite {
        let Some(updated) = to_json(output) else {
            return CacheWrite::Keep;
        };
        if *key == R::list_key() {
            current
                .and_then(|list| collection::replace_by_id(list, self.id, updated))
                .into()
        } else {
            CacheWrite::Set(updated)
        }
    }

    fn invalidates(&self, _output: &R::Entity) -> Vec<QueryKey> {
        R::dependents(self.id)
    }

    fn success_message(&self) -> String {
        format!("{} updated", R::LABEL)
    }
}

/// Delete entity `id`
pub struct DeleteEntity<R: Resource> {
    client: ApiClient,
    id: i64,
    resource: PhantomData<fn() -> R>,
}

impl<R: Resource> DeleteEntity<R> {
    pub fn new(client: ApiClient, id: i64) -> Self {
        Self {
            client,
            id,
            resource: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Resource> Mutation for DeleteEntity<R> {
    type Output = ();

    fn kind(&self) -> MutationKind {
        MutationKind::Delete
    }

    fn target(&self) -> String {
        R::entity_key(self.id).to_string()
    }

    fn snapshot_keys(&self) -> Vec<QueryKey> {
        vec![R::list_key(), R::entity_key(self.id)]
    }

    fn optimistic_update(&self, key: &QueryKey, current: Option<&Value>) -> CacheWrite {
        match current {
            None => CacheWrite::Keep,
            Some(list) if *key == R::list_key() => collection::remove_by_id(list, self.id).into(),
            Some(_) => CacheWrite::Remove,
        }
    }

    async fn request(&self) -> ApiResult<()> {
        self.client.delete(&R::entity_path(self.id)).await
    }

    fn reconcile(&self, key: &QueryKey, current: Option<&Value>, _output: &()) -> CacheWrite {
        // A refetch may have landed while the request was in flight
        match current {
            None => CacheWrite::Keep,
            Some(list) if *key == R::list_key() => collection::remove_by_id(list, self.id).into(),
            Some(_) => CacheWrite::Remove,
        }
    }

    fn invalidates(&self, _output: &()) -> Vec<QueryKey> {
        R::dependents(self.id)
    }

    fn success_message(&self) -> String {
        format!("{} deleted", R::LABEL)
    }
}
