//! Endor Labs API client

use async_trait::async_trait;

use crate::error::Result;
use models::{Credential, QueryKind, QueryPage, QueryRequest, SessionToken};

pub mod endor;
#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use endor::EndorClient;
#[cfg(test)]
pub use mock::MockEndorClient;

/// Endor Labs API operations used by the sweep
#[async_trait]
pub trait EndorApi: Send + Sync {
    /// Exchange an API key/secret pair for a session token
    async fn authenticate(&self, credential: &Credential) -> Result<SessionToken>;

    /// Fetch one page of a list query in `namespace`
    async fn query_page(&self, namespace: &str, request: &QueryRequest) -> Result<QueryPage>;

    /// Delete a single entity from the tenant it lives in
    async fn delete_entity(&self, kind: QueryKind, tenant: &str, uuid: &str) -> Result<()>;
}
