//! Request and response models for the Endor Labs API

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Longest summary printed per finding before it is cut with `...`
pub const SUMMARY_PREVIEW_CHARS: usize = 100;

/// API key/secret pair exchanged for a session token
#[derive(Clone, Serialize)]
pub struct Credential {
    pub key: String,
    pub secret: String,
}

impl Credential {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Bearer token returned by the auth exchange
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Entity kinds the queries endpoint can list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKind {
    PackageVersion,
    Finding,
}

impl QueryKind {
    /// Path segment of the per-entity delete endpoint
    pub fn resource_path(&self) -> &'static str {
        match self {
            QueryKind::PackageVersion => "package-versions",
            QueryKind::Finding => "findings",
        }
    }

    /// Singular noun used in log lines
    pub fn noun(&self) -> &'static str {
        match self {
            QueryKind::PackageVersion => "package",
            QueryKind::Finding => "finding",
        }
    }

    /// Plural noun used in log lines and summaries
    pub fn plural(&self) -> &'static str {
        match self {
            QueryKind::PackageVersion => "packages",
            QueryKind::Finding => "findings",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::PackageVersion => f.write_str("PackageVersion"),
            QueryKind::Finding => f.write_str("Finding"),
        }
    }
}

/// One list query against the queries endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// Human-readable name sent as `meta.name`
    pub name: String,
    pub kind: QueryKind,
    /// Backend filter expression
    pub filter: String,
    /// Comma-separated field projection
    pub mask: String,
    /// Include entities from child namespaces
    pub traverse: bool,
}

/// Tenant scope, both in query bodies and echoed back per entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantMeta {
    #[serde(default)]
    pub namespace: Option<String>,
}

// ============================================================================
// Query request
// ============================================================================

/// Body of `POST /v1/namespaces/{namespace}/queries`
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    tenant_meta: TenantMeta,
    meta: QueryMeta,
    spec: QueryRequestSpec,
}

#[derive(Debug, Clone, Serialize)]
struct QueryMeta {
    name: String,
}

#[derive(Debug, Clone, Serialize)]
struct QueryRequestSpec {
    query_spec: QueryBody,
}

#[derive(Debug, Clone, Serialize)]
struct QueryBody {
    kind: QueryKind,
    list_parameters: ListParameters,
}

#[derive(Debug, Clone, Serialize)]
struct ListParameters {
    filter: String,
    mask: String,
    traverse: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_token: Option<String>,
}

impl QueryRequest {
    /// Build the first-page request for a query.
    pub fn new(spec: &QuerySpec) -> Self {
        Self {
            tenant_meta: TenantMeta {
                namespace: Some(String::new()),
            },
            meta: QueryMeta {
                name: spec.name.clone(),
            },
            spec: QueryRequestSpec {
                query_spec: QueryBody {
                    kind: spec.kind,
                    list_parameters: ListParameters {
                        filter: spec.filter.clone(),
                        mask: spec.mask.clone(),
                        traverse: spec.traverse,
                        page_token: None,
                    },
                },
            },
        }
    }

    /// Continue from the given page token on the next request.
    pub fn set_page_token(&mut self, token: impl Into<String>) {
        self.spec.query_spec.list_parameters.page_token = Some(token.into());
    }

    pub fn page_token(&self) -> Option<&str> {
        self.spec.query_spec.list_parameters.page_token.as_deref()
    }

    pub fn kind(&self) -> QueryKind {
        self.spec.query_spec.kind
    }
}

// ============================================================================
// Query response
// ============================================================================

/// Raw queries endpoint response.
///
/// Every level is optional so a sparse or `null`-laden body still yields an
/// empty page instead of a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    spec: Option<QueryResponseSpec>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryResponseSpec {
    #[serde(default)]
    query_response: Option<QueryResponseBody>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryResponseBody {
    #[serde(default)]
    list: Option<ListResult>,
}

#[derive(Debug, Default, Deserialize)]
struct ListResult {
    #[serde(default)]
    objects: Option<Vec<Entity>>,
    #[serde(default)]
    response: Option<ListResponseMeta>,
}

#[derive(Debug, Default, Deserialize)]
struct ListResponseMeta {
    #[serde(default)]
    next_page_token: Option<String>,
}

/// One page of query results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryPage {
    pub objects: Vec<Entity>,
    /// Continuation cursor; `None` when absent or empty
    pub next_page_token: Option<String>,
}

impl QueryPage {
    pub fn new(objects: Vec<Entity>, next_page_token: Option<&str>) -> Self {
        Self {
            objects,
            next_page_token: next_page_token
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        }
    }
}

impl From<QueryResponse> for QueryPage {
    fn from(response: QueryResponse) -> Self {
        let list = response
            .spec
            .and_then(|s| s.query_response)
            .and_then(|q| q.list)
            .unwrap_or_default();

        let token = list.response.and_then(|r| r.next_page_token);
        QueryPage::new(list.objects.unwrap_or_default(), token.as_deref())
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A package version or finding as returned by the queries endpoint.
///
/// Only the fields the sweep relies on are typed; everything else the backend
/// sends is retained in `extra` for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_meta: Option<TenantMeta>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<EntitySpec>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `spec` block of an entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl Entity {
    pub fn uuid(&self) -> Option<&str> {
        non_empty(self.uuid.as_ref())
    }

    /// Tenant the entity lives in (`tenant_meta.namespace`)
    pub fn namespace(&self) -> Option<&str> {
        non_empty(self.tenant_meta.as_ref().and_then(|t| t.namespace.as_ref()))
    }

    pub fn project_uuid(&self) -> Option<&str> {
        non_empty(self.spec.as_ref().and_then(|s| s.project_uuid.as_ref()))
    }

    pub fn relative_path(&self) -> Option<&str> {
        non_empty(self.spec.as_ref().and_then(|s| s.relative_path.as_ref()))
    }

    pub fn summary(&self) -> Option<&str> {
        non_empty(self.spec.as_ref().and_then(|s| s.summary.as_ref()))
    }

    /// `(tenant, uuid)` when both identity fields are present.
    pub fn deletion_target(&self) -> Option<(&str, &str)> {
        Some((self.namespace()?, self.uuid()?))
    }

    /// Compact JSON rendering for skip diagnostics.
    pub fn details(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

/// Cut a summary to `max_chars` characters, marking the cut with `...`.
pub fn summary_preview(summary: &str, max_chars: usize) -> String {
    let mut chars = summary.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
