//! Query and cleanup pipelines
//!
//! - [`query`] - paginated accumulation with stuck-token and page-ceiling guards
//! - [`deletion`] - independent per-entity deletion
//! - [`pipeline`] - one query-then-delete run per entity kind
//! - [`catalog`] - the built-in GitHub Actions queries

use serde::Serialize;

pub mod catalog;
pub mod deletion;
pub mod pipeline;
pub mod query;

pub use deletion::DeletionReport;
pub use pipeline::{PipelineOptions, PipelineSummary, run_pipeline};
pub use query::StopReason;

/// Results of every pipeline in one run
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub namespace: String,
    pub dry_run: bool,
    pub pipelines: Vec<PipelineSummary>,
}

impl SweepReport {
    pub fn is_success(&self) -> bool {
        self.pipelines.iter().all(PipelineSummary::is_success)
    }

    pub fn total_found(&self) -> usize {
        self.pipelines.iter().map(|p| p.found).sum()
    }
}
