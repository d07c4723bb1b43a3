//! Drives a [`Mutation`] against a [`QueryStore`]

use std::sync::Arc;

use skyplan_core::{ApiResult, Notification, Notifier, QueryKey};

use crate::mutation::{CacheWrite, Mutation};
use crate::store::{QueryStore, Snapshot};

/// Runs mutations with optimistic cache writes and rollback on failure
#[derive(Clone)]
pub struct MutationRunner {
    store: Arc<dyn QueryStore>,
    notifier: Arc<dyn Notifier>,
}

impl MutationRunner {
    pub fn new(store: Arc<dyn QueryStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &Arc<dyn QueryStore> {
        &self.store
    }

    /// Run `mutation`:
    ///
    /// 1. snapshot every key it addresses
    /// 2. write the provisional values
    /// 3. await the request
    /// 4. on success, write the reconciled values, invalidate dependent keys
    ///    and notify
    /// 5. on failure, restore every snapshot, notify and return the error
    ///
    /// The provisional values are in the store before the request future is
    /// first polled.
    pub async fn run<M>(&self, mutation: &M) -> ApiResult<M::Output>
    where
        M: Mutation + ?Sized,
    {
        let kind = mutation.kind();
        let target = mutation.target();
        let snapshots: Vec<Snapshot> = mutation
            .snapshot_keys()
            .iter()
            .map(|key| Snapshot::take(self.store.as_ref(), key))
            .collect();

        for snapshot in &snapshots {
            let write = mutation.optimistic_update(&snapshot.key, snapshot.value());
            self.apply(&snapshot.key, write);
        }
        tracing::debug!(
            kind = kind.label(),
            target = %target,
            keys = snapshots.len(),
            "optimistic write applied"
        );

        match mutation.request().await {
            Ok(output) => {
                for snapshot in &snapshots {
                    let current = self.store.get(&snapshot.key);
                    let write = mutation.reconcile(&snapshot.key, current.as_ref(), &output);
                    self.apply(&snapshot.key, write);
                }
                for key in mutation.invalidates(&output) {
                    self.store.invalidate(&key);
                }
                tracing::info!(kind = kind.label(), target = %target, "mutation succeeded");
                self.notifier
                    .notify(Notification::success(mutation.success_message()));
                Ok(output)
            }
            Err(error) => {
                for snapshot in snapshots.iter().rev() {
                    snapshot.restore(self.store.as_ref());
                }
                tracing::warn!(
                    kind = kind.label(),
                    target = %target,
                    error = %error,
                    "mutation failed, cache rolled back"
                );
                self.notifier.notify(Notification::error(error.user_message()));
                Err(error)
            }
        }
    }

    fn apply(&self, key: &QueryKey, write: CacheWrite) {
        match write {
            CacheWrite::Keep => {}
            CacheWrite::Set(value) => self.store.set(key, value),
            CacheWrite::Remove => {
                self.store.remove(key);
            }
        }
    }
}
