//! Test fixtures and builders for API model types
//!
//! Import via `use crate::client::fixtures::*` in test modules.

use super::models::{Entity, EntitySpec, QueryKind, QueryPage, QuerySpec, TenantMeta};

// ============================================================================
// EntityBuilder
// ============================================================================

/// Builder for creating test Entity instances.
///
/// # Example
/// ```ignore
/// let finding = EntityBuilder::new("f-1")
///     .namespace("acme.child")
///     .summary("Unpinned third-party action")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntityBuilder {
    uuid: Option<String>,
    namespace: Option<String>,
    project_uuid: Option<String>,
    relative_path: Option<String>,
    summary: Option<String>,
}

impl EntityBuilder {
    /// Create a new builder with the given UUID in the `acme` namespace.
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            namespace: Some("acme".to_string()),
            ..Self::default()
        }
    }

    /// Create a builder with no identity fields at all.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn without_uuid(mut self) -> Self {
        self.uuid = None;
        self
    }

    pub fn without_namespace(mut self) -> Self {
        self.namespace = None;
        self
    }

    pub fn project_uuid(mut self, project_uuid: impl Into<String>) -> Self {
        self.project_uuid = Some(project_uuid.into());
        self
    }

    pub fn relative_path(mut self, path: impl Into<String>) -> Self {
        self.relative_path = Some(path.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn build(self) -> Entity {
        let has_spec =
            self.project_uuid.is_some() || self.relative_path.is_some() || self.summary.is_some();

        Entity {
            uuid: self.uuid,
            tenant_meta: self.namespace.map(|namespace| TenantMeta {
                namespace: Some(namespace),
            }),
            spec: has_spec.then(|| EntitySpec {
                project_uuid: self.project_uuid,
                relative_path: self.relative_path,
                summary: self.summary,
                ..EntitySpec::default()
            }),
            ..Entity::default()
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// `count` entities with UUIDs `{prefix}-0`, `{prefix}-1`, ...
pub fn entities(prefix: &str, count: usize) -> Vec<Entity> {
    (0..count)
        .map(|i| EntityBuilder::new(format!("{}-{}", prefix, i)).build())
        .collect()
}

/// A page of `count` entities continuing with `next` (if any).
pub fn page(prefix: &str, count: usize, next: Option<&str>) -> QueryPage {
    QueryPage::new(entities(prefix, count), next)
}

pub fn spec(kind: QueryKind) -> QuerySpec {
    QuerySpec {
        name: format!("test {} query", kind.noun()),
        kind,
        filter: "spec.test==true".to_string(),
        mask: "uuid,tenant_meta".to_string(),
        traverse: true,
    }
}
