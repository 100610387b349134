//! Query-then-delete pipeline for one entity kind

use log::{error, info, warn};
use serde::Serialize;

use super::deletion::{DeletionReport, DeletionRunner};
use super::query::{QueryRunner, StopReason};
use crate::client::EndorApi;
use crate::client::models::{QueryKind, QuerySpec};
use crate::client::pagination::MAX_PAGES;

/// Runtime options shared by every pipeline in a run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Report only; never issue DELETE requests
    pub dry_run: bool,
    /// Maximum deletions in flight
    pub concurrency: usize,
    pub max_pages: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            dry_run: true,
            concurrency: 1,
            max_pages: MAX_PAGES,
        }
    }
}

/// What happened to one entity kind
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub kind: QueryKind,
    /// Entities found by the query (0 when the query failed)
    pub found: usize,
    pub pages: usize,
    /// `None` when the query failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<StopReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_error: Option<String>,
    pub dry_run: bool,
    /// `None` in dry-run mode or when the query failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion: Option<DeletionReport>,
}

impl PipelineSummary {
    pub fn is_success(&self) -> bool {
        self.query_error.is_none()
            && self
                .deletion
                .as_ref()
                .map(DeletionReport::is_success)
                .unwrap_or(true)
    }

    pub fn is_partial(&self) -> bool {
        self.stop.map(|s| s.is_partial()).unwrap_or(false)
    }
}

/// Query every entity matching `spec` in `namespace`, then delete them unless dry-running.
///
/// A failed query is reported in the summary and never triggers deletion.
pub async fn run_pipeline<C: EndorApi + ?Sized>(
    client: &C,
    namespace: &str,
    spec: &QuerySpec,
    options: &PipelineOptions,
) -> PipelineSummary {
    let kind = spec.kind;
    let plural = kind.plural();

    let outcome = match QueryRunner::new(client, namespace)
        .max_pages(options.max_pages)
        .run(spec)
        .await
    {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("Failed to fetch {}: {}", plural, err);
            return PipelineSummary {
                kind,
                found: 0,
                pages: 0,
                stop: None,
                query_error: Some(err.to_string()),
                dry_run: options.dry_run,
                deletion: None,
            };
        }
    };

    info!("Found {} {}.", outcome.entities.len(), plural);
    if outcome.stop.is_partial() {
        warn!(
            "Result for {} is partial ({:?}); continuing with what was fetched.",
            plural, outcome.stop
        );
    }

    let deletion = if options.dry_run {
        info!("Dry run mode: No {} will be deleted.", plural);
        None
    } else {
        let report = DeletionRunner::new(client)
            .concurrency(options.concurrency)
            .run(kind, &outcome.entities)
            .await;
        info!(
            "Deleted {} of {} {} ({} failed, {} skipped).",
            report.deleted,
            outcome.entities.len(),
            plural,
            report.failed,
            report.skipped
        );
        Some(report)
    };

    PipelineSummary {
        kind,
        found: outcome.entities.len(),
        pages: outcome.pages,
        stop: Some(outcome.stop),
        query_error: None,
        dry_run: options.dry_run,
        deletion,
    }
}
