//! Paginated query runner
//!
//! Follows `next_page_token` until the backend stops returning one, accumulating
//! every object in fetch order. A failed page fails the whole query so callers
//! never act on an undercounted result set.

use log::{debug, info, warn};
use serde::Serialize;

use crate::client::EndorApi;
use crate::client::models::{
    Entity, QueryKind, QueryRequest, QuerySpec, SUMMARY_PREVIEW_CHARS, summary_preview,
};
use crate::client::pagination::{MAX_PAGES, StuckTokenDetector};
use crate::error::Result;

/// Why pagination stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The backend returned no next page token
    Exhausted,
    /// The page ceiling was reached; results are partial
    PageLimit,
    /// The same token kept coming back; results are partial
    StuckToken,
}

impl StopReason {
    /// Whether the accumulated result may be missing entities
    pub fn is_partial(&self) -> bool {
        !matches!(self, StopReason::Exhausted)
    }
}

/// Accumulated result of one query run
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub entities: Vec<Entity>,
    pub pages: usize,
    pub stop: StopReason,
}

/// Runs one list query to completion against a namespace.
pub struct QueryRunner<'a, C: EndorApi + ?Sized> {
    client: &'a C,
    namespace: &'a str,
    max_pages: usize,
}

impl<'a, C: EndorApi + ?Sized> QueryRunner<'a, C> {
    pub fn new(client: &'a C, namespace: &'a str) -> Self {
        Self {
            client,
            namespace,
            max_pages: MAX_PAGES,
        }
    }

    /// Override the page ceiling (defaults to [`MAX_PAGES`]).
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Fetch every page of `spec`.
    ///
    /// Any failed page discards what was gathered so far and returns the error.
    pub async fn run(&self, spec: &QuerySpec) -> Result<QueryOutcome> {
        info!("Fetching {}...", spec.name);
        info!("POST query to namespace: {}", self.namespace);
        info!("Using filter: {}", spec.filter);

        let mut request = QueryRequest::new(spec);
        let mut detector = StuckTokenDetector::new();
        let mut entities = Vec::new();
        let mut pages = 0;

        let stop = loop {
            info!("Fetching page {}...", pages + 1);
            let page = self.client.query_page(self.namespace, &request).await?;
            pages += 1;

            info!(
                "Found {} {} on page {}",
                page.objects.len(),
                spec.kind.plural(),
                pages
            );
            for entity in page.objects {
                log_entity(spec.kind, &entity);
                entities.push(entity);
            }

            let next = page.next_page_token;
            debug!("Next page token: {:?}", next);
            let stuck = detector.observe(next.as_deref());

            let Some(token) = next else {
                info!("No more pages to fetch.");
                break StopReason::Exhausted;
            };

            if pages >= self.max_pages {
                warn!(
                    "Reached maximum page limit ({}). Stopping to prevent infinite loop.",
                    self.max_pages
                );
                break StopReason::PageLimit;
            }

            if stuck {
                warn!(
                    "Detected API pagination bug: same token '{}' returned {} times in a row. Stopping.",
                    token,
                    detector.repeats()
                );
                break StopReason::StuckToken;
            }

            request.set_page_token(token);
        };

        Ok(QueryOutcome {
            entities,
            pages,
            stop,
        })
    }
}

fn log_entity(kind: QueryKind, entity: &Entity) {
    let uuid = entity.uuid().unwrap_or("-");
    let tenant = entity.namespace().unwrap_or("-");
    let project = entity.project_uuid().unwrap_or("-");

    match kind {
        QueryKind::PackageVersion => info!(
            "Found {}: {}, tenant-name: {}, project-uuid: {}, relative_path: {}",
            kind.noun(),
            uuid,
            tenant,
            project,
            entity.relative_path().unwrap_or("-")
        ),
        QueryKind::Finding => {
            info!(
                "Found {}: {}, tenant-name: {}, project-uuid: {}",
                kind.noun(),
                uuid,
                tenant,
                project
            );
            info!(
                "  Summary: {}",
                entity
                    .summary()
                    .map(|s| summary_preview(s, SUMMARY_PREVIEW_CHARS))
                    .unwrap_or_else(|| "No summary available".to_string())
            );
        }
    }
}
