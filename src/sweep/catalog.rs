//! Built-in GitHub Actions queries

use crate::client::models::{QueryKind, QuerySpec};

pub const PACKAGE_FILTER: &str = "spec.ecosystem==ECOSYSTEM_GITHUB_ACTION";
pub const PACKAGE_MASK: &str = "uuid,spec.project_uuid,tenant_meta";

pub const FINDING_FILTER: &str = "spec.finding_categories contains 'FINDING_CATEGORY_GHACTIONS'";
pub const FINDING_MASK: &str = "uuid,spec.project_uuid,spec.summary,tenant_meta";

/// Every GitHub Actions package version, across child namespaces.
pub fn github_actions_packages(filter: Option<&str>) -> QuerySpec {
    QuerySpec {
        name: "Get all GitHub Actions packages".to_string(),
        kind: QueryKind::PackageVersion,
        filter: filter.unwrap_or(PACKAGE_FILTER).to_string(),
        mask: PACKAGE_MASK.to_string(),
        traverse: true,
    }
}

/// Every GitHub Actions finding, across child namespaces.
pub fn github_actions_findings(filter: Option<&str>) -> QuerySpec {
    QuerySpec {
        name: "Get all GitHub Actions findings".to_string(),
        kind: QueryKind::Finding,
        filter: filter.unwrap_or(FINDING_FILTER).to_string(),
        mask: FINDING_MASK.to_string(),
        traverse: true,
    }
}
