//! Mock Endor Labs API client for testing
//!
//! Provides a mock implementation of [`EndorApi`] for unit testing
//! without making real API calls.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::EndorApi;
use super::fixtures::EntityBuilder;
use super::models::{Credential, QueryKind, QueryPage, QueryRequest, SessionToken};
use crate::error::{ApiError, Error, Result};

/// Mock API client for testing.
///
/// Script query pages via builder methods, then hand the mock to the code under test.
///
/// # Example
/// ```ignore
/// let mock = MockEndorClient::new()
///     .with_pages(vec![page("a", 2, Some("t1")), page("b", 1, None)])
///     .await;
///
/// let outcome = QueryRunner::new(&mock, "acme").run(&spec).await?;
/// assert_eq!(outcome.entities.len(), 3);
/// ```
#[derive(Default)]
pub struct MockEndorClient {
    /// Token to return from authenticate
    token: Arc<Mutex<Option<SessionToken>>>,
    /// Error to return from authenticate (consumed on first use)
    auth_error: Arc<Mutex<Option<ApiError>>>,
    /// Scripted query responses, served in order
    pages: Arc<Mutex<VecDeque<std::result::Result<QueryPage, ApiError>>>>,
    /// Once scripted pages run out, keep serving pages with fresh tokens
    endless: Arc<Mutex<bool>>,
    /// UUIDs whose deletion fails with a 404
    failing_deletes: Arc<Mutex<HashSet<String>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured query requests for test assertions
    captured_queries: Arc<Mutex<Vec<CapturedQuery>>>,
    /// Captured delete calls for test assertions
    captured_deletes: Arc<Mutex<Vec<CapturedDelete>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub authenticate: usize,
    pub query_page: usize,
    pub delete_entity: usize,
}

/// A captured query request.
#[derive(Debug, Clone)]
pub struct CapturedQuery {
    pub namespace: String,
    pub kind: QueryKind,
    pub page_token: Option<String>,
    /// Request body as sent
    pub body: serde_json::Value,
}

/// A captured delete call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedDelete {
    pub kind: QueryKind,
    pub tenant: String,
    pub uuid: String,
}

impl MockEndorClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the token returned from authenticate.
    pub async fn with_token(self, token: &str) -> Self {
        *self.token.lock().await = Some(SessionToken::new(token));
        self
    }

    /// Make the next authenticate call fail.
    pub async fn with_auth_error(self, error: ApiError) -> Self {
        *self.auth_error.lock().await = Some(error);
        self
    }

    /// Configure the pages returned by successive query calls.
    pub async fn with_pages(self, pages: Vec<QueryPage>) -> Self {
        self.pages.lock().await.extend(pages.into_iter().map(Ok));
        self
    }

    /// Append a failing query response after any scripted pages.
    pub async fn with_query_error(self, error: ApiError) -> Self {
        self.pages.lock().await.push_back(Err(error));
        self
    }

    /// After scripted pages, return one entity per page with a never-repeating token.
    pub async fn with_endless_pages(self) -> Self {
        *self.endless.lock().await = true;
        self
    }

    /// Make deletes of the given UUIDs fail.
    pub async fn with_failing_deletes(self, uuids: &[&str]) -> Self {
        self.failing_deletes
            .lock()
            .await
            .extend(uuids.iter().map(|u| u.to_string()));
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    pub async fn captured_queries(&self) -> Vec<CapturedQuery> {
        self.captured_queries.lock().await.clone()
    }

    pub async fn captured_deletes(&self) -> Vec<CapturedDelete> {
        self.captured_deletes.lock().await.clone()
    }
}

#[async_trait]
impl EndorApi for MockEndorClient {
    async fn authenticate(&self, _credential: &Credential) -> Result<SessionToken> {
        self.call_count.lock().await.authenticate += 1;

        if let Some(error) = self.auth_error.lock().await.take() {
            return Err(error.into());
        }

        let token = self.token.lock().await;
        Ok(token
            .clone()
            .unwrap_or_else(|| SessionToken::new("mock-token")))
    }

    async fn query_page(&self, namespace: &str, request: &QueryRequest) -> Result<QueryPage> {
        let call = {
            let mut counts = self.call_count.lock().await;
            counts.query_page += 1;
            counts.query_page
        };

        self.captured_queries.lock().await.push(CapturedQuery {
            namespace: namespace.to_string(),
            kind: request.kind(),
            page_token: request.page_token().map(str::to_string),
            body: serde_json::to_value(request).unwrap_or_default(),
        });

        if let Some(scripted) = self.pages.lock().await.pop_front() {
            return scripted.map_err(Error::from);
        }

        if *self.endless.lock().await {
            let entity = EntityBuilder::new(format!("endless-{}", call)).build();
            let token = format!("tok-{}", call);
            return Ok(QueryPage::new(vec![entity], Some(&token)));
        }

        Ok(QueryPage::default())
    }

    async fn delete_entity(&self, kind: QueryKind, tenant: &str, uuid: &str) -> Result<()> {
        self.call_count.lock().await.delete_entity += 1;

        self.captured_deletes.lock().await.push(CapturedDelete {
            kind,
            tenant: tenant.to_string(),
            uuid: uuid.to_string(),
        });

        if self.failing_deletes.lock().await.contains(uuid) {
            return Err(ApiError::DeleteFailed {
                status: 404,
                body: format!("{} not found", uuid),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{page, spec};

    #[tokio::test]
    async fn test_mock_serves_scripted_pages_then_empty() {
        let mock = MockEndorClient::new()
            .with_pages(vec![page("a", 2, Some("t1"))])
            .await;
        let request = QueryRequest::new(&spec(QueryKind::Finding));

        let first = mock.query_page("acme", &request).await.unwrap();
        assert_eq!(first.objects.len(), 2);

        let second = mock.query_page("acme", &request).await.unwrap();
        assert_eq!(second, QueryPage::default());

        assert_eq!(mock.call_counts().await.query_page, 2);
    }

    #[tokio::test]
    async fn test_mock_auth_error_is_consumed() {
        let mock = MockEndorClient::new()
            .with_auth_error(ApiError::MissingToken)
            .await;
        let credential = Credential::new("k", "s");

        assert!(mock.authenticate(&credential).await.is_err());
        let token = mock.authenticate(&credential).await.unwrap();
        assert_eq!(token.as_str(), "mock-token");
    }

    #[tokio::test]
    async fn test_mock_configured_token() {
        let mock = MockEndorClient::new().with_token("scripted").await;

        let token = mock.authenticate(&Credential::new("k", "s")).await.unwrap();
        assert_eq!(token.as_str(), "scripted");
        assert_eq!(mock.call_counts().await.authenticate, 1);
    }

    #[tokio::test]
    async fn test_mock_failing_delete() {
        let mock = MockEndorClient::new().with_failing_deletes(&["bad"]).await;

        assert!(
            mock.delete_entity(QueryKind::Finding, "acme", "good")
                .await
                .is_ok()
        );
        assert!(
            mock.delete_entity(QueryKind::Finding, "acme", "bad")
                .await
                .is_err()
        );
        assert_eq!(mock.captured_deletes().await.len(), 2);
    }
}
