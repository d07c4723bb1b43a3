//! The mutation seam

use async_trait::async_trait;
use serde_json::Value;
use skyplan_core::{ApiResult, QueryKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// What a mutation does to one cached key
#[derive(Debug, Clone, PartialEq)]
pub enum CacheWrite {
    /// Leave the entry as it is
    Keep,
    Set(Value),
    Remove,
}

impl From<Option<Value>> for CacheWrite {
    fn from(value: Option<Value>) -> Self {
        value.map_or(CacheWrite::Keep, CacheWrite::Set)
    }
}

/// A create/update/delete request together with its cache effects.
///
/// [`MutationRunner`](crate::MutationRunner) drives the protocol; an
/// implementation only describes which keys it touches and how.
#[async_trait]
pub trait Mutation: Send + Sync {
    /// The server's answer on success
    type Output: Send;

    fn kind(&self) -> MutationKind;

    /// Short description for logs, e.g. `passengers/5`
    fn target(&self) -> String;

    /// Every key the mutation writes. Each is snapshotted before the
    /// optimistic write.
    fn snapshot_keys(&self) -> Vec<QueryKey>;

    /// Provisional value for `key`, given its current value
    fn optimistic_update(&self, key: &QueryKey, current: Option<&Value>) -> CacheWrite;

    async fn request(&self) -> ApiResult<Self::Output>;

    /// Confirmed value for `key` once the request succeeded
    fn reconcile(&self, key: &QueryKey, current: Option<&Value>, output: &Self::Output)
        -> CacheWrite;

    /// Keys whose derived data is out of date after the mutation
    fn invalidates(&self, _output: &Self::Output) -> Vec<QueryKey> {
        Vec::new()
    }

    fn success_message(&self) -> String;
}
