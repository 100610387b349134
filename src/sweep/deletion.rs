//! Best-effort per-entity deletion
//!
//! Every entity is handled independently: a skipped or failed deletion never
//! stops the rest. Deletions run one at a time unless a higher concurrency is
//! configured, in which case at most that many are in flight.

use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};
use serde::Serialize;

use crate::client::EndorApi;
use crate::client::models::{Entity, QueryKind};

/// Aggregate result of a deletion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    /// Delete requests issued
    pub attempted: usize,
    pub deleted: usize,
    pub failed: usize,
    /// Entities missing a UUID or tenant
    pub skipped: usize,
    /// UUIDs whose deletion failed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_uuids: Vec<String>,
}

impl DeletionReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, outcome: DeletionOutcome) {
        match outcome {
            DeletionOutcome::Deleted => {
                self.attempted += 1;
                self.deleted += 1;
            }
            DeletionOutcome::Failed(uuid) => {
                self.attempted += 1;
                self.failed += 1;
                self.failed_uuids.push(uuid);
            }
            DeletionOutcome::Skipped => self.skipped += 1,
        }
    }
}

#[derive(Debug)]
enum DeletionOutcome {
    Deleted,
    Failed(String),
    Skipped,
}

/// Deletes accumulated entities one DELETE request at a time.
pub struct DeletionRunner<'a, C: EndorApi + ?Sized> {
    client: &'a C,
    concurrency: usize,
}

impl<'a, C: EndorApi + ?Sized> DeletionRunner<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            concurrency: 1,
        }
    }

    /// Maximum deletions in flight at once (minimum 1).
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn run(&self, kind: QueryKind, entities: &[Entity]) -> DeletionReport {
        info!("Attempting to delete {}...", kind.plural());
        debug!(
            "Deleting {} {} with max {} concurrent",
            entities.len(),
            kind.plural(),
            self.concurrency
        );

        let outcomes: Vec<DeletionOutcome> = stream::iter(entities)
            .map(|entity| self.delete_one(kind, entity))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut report = DeletionReport::default();
        for outcome in outcomes {
            report.record(outcome);
        }
        report
    }

    async fn delete_one(&self, kind: QueryKind, entity: &Entity) -> DeletionOutcome {
        let Some((tenant, uuid)) = entity.deletion_target() else {
            warn!(
                "Skipping {}: Missing UUID or tenant name. Details: {}",
                kind.noun(),
                entity.details()
            );
            return DeletionOutcome::Skipped;
        };

        info!("Deleting {} with UUID: {}", kind.noun(), uuid);
        match self.client.delete_entity(kind, tenant, uuid).await {
            Ok(()) => {
                info!("Successfully deleted {} with UUID: {}", kind.noun(), uuid);
                DeletionOutcome::Deleted
            }
            Err(err) => {
                error!(
                    "Failed to delete {} with UUID: {}. {}",
                    kind.noun(),
                    uuid,
                    err
                );
                DeletionOutcome::Failed(uuid.to_string())
            }
        }
    }
}
