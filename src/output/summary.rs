//! End-of-run summary rendering

use colored::Colorize;
use tabled::Tabled;

use super::Formattable;
use super::json::format_json;
use super::table::format_table;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::sweep::{DeletionReport, PipelineSummary, StopReason, SweepReport};

/// One table row per pipeline
#[derive(Debug, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "KIND")]
    pub kind: String,
    #[tabled(rename = "FOUND")]
    pub found: usize,
    #[tabled(rename = "PAGES")]
    pub pages: usize,
    #[tabled(rename = "STATUS")]
    pub status: String,
    #[tabled(rename = "DELETED")]
    pub deleted: String,
    #[tabled(rename = "FAILED")]
    pub failed: String,
    #[tabled(rename = "SKIPPED")]
    pub skipped: String,
}

fn status_label(summary: &PipelineSummary) -> &'static str {
    match (&summary.query_error, summary.stop) {
        (Some(_), _) => "query failed",
        (None, Some(StopReason::PageLimit)) => "partial (page limit)",
        (None, Some(StopReason::StuckToken)) => "partial (stuck token)",
        _ => "complete",
    }
}

impl From<&PipelineSummary> for SummaryRow {
    fn from(summary: &PipelineSummary) -> Self {
        let count = |f: fn(&DeletionReport) -> usize| {
            summary
                .deletion
                .as_ref()
                .map(|d| f(d).to_string())
                .unwrap_or_else(|| "-".to_string())
        };

        Self {
            kind: summary.kind.plural().to_string(),
            found: summary.found,
            pages: summary.pages,
            status: status_label(summary).to_string(),
            deleted: count(|d| d.deleted),
            failed: count(|d| d.failed),
            skipped: count(|d| d.skipped),
        }
    }
}

fn format_pretty(report: &SweepReport) -> String {
    let mut lines = Vec::new();

    let mode = if report.dry_run {
        "DRY RUN".yellow().to_string()
    } else {
        "LIVE".red().bold().to_string()
    };
    lines.push(format!(
        "{} namespace {} ({})",
        "Summary for".bold(),
        report.namespace.bold(),
        mode
    ));

    for summary in &report.pipelines {
        let plural = summary.kind.plural();
        if let Some(err) = &summary.query_error {
            lines.push(format!("  {} {}: query failed: {}", "✗".red(), plural, err));
            continue;
        }

        let marker = if summary.is_partial() {
            "⚠".yellow()
        } else {
            "✓".green()
        };
        lines.push(format!(
            "  {} {}: {} found across {} page(s), {}",
            marker,
            plural,
            summary.found,
            summary.pages,
            status_label(summary)
        ));

        if let Some(deletion) = &summary.deletion {
            lines.push(format!(
                "      deleted {}, failed {}, skipped {}",
                deletion.deleted, deletion.failed, deletion.skipped
            ));
            for uuid in &deletion.failed_uuids {
                lines.push(format!("      {} {}", "✗".red(), uuid));
            }
        }
    }

    if report.dry_run {
        lines.push(format!(
            "Dry run mode: No packages or findings were deleted ({} found). \
             To delete them, run again with the --no-dry-run flag.",
            report.total_found()
        ));
    }

    lines.join("\n")
}

impl Formattable for SweepReport {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(format_pretty(self)),
            OutputFormat::Table => {
                let rows: Vec<SummaryRow> = self.pipelines.iter().map(SummaryRow::from).collect();
                Ok(format_table(&rows))
            }
            OutputFormat::Json => Ok(format_json(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::QueryKind;

    fn summary(kind: QueryKind, found: usize) -> PipelineSummary {
        PipelineSummary {
            kind,
            found,
            pages: 2,
            stop: Some(StopReason::Exhausted),
            query_error: None,
            dry_run: false,
            deletion: None,
        }
    }

    fn report(dry_run: bool, pipelines: Vec<PipelineSummary>) -> SweepReport {
        SweepReport {
            namespace: "acme".to_string(),
            dry_run,
            pipelines,
        }
    }

    #[test]
    fn test_row_for_dry_run_has_no_deletion_counts() {
        let row = SummaryRow::from(&summary(QueryKind::PackageVersion, 4));
        assert_eq!(row.kind, "packages");
        assert_eq!(row.deleted, "-");
        assert_eq!(row.status, "complete");
    }

    #[test]
    fn test_row_reports_failures_and_partial_results() {
        let mut s = summary(QueryKind::Finding, 3);
        s.stop = Some(StopReason::StuckToken);
        s.deletion = Some(DeletionReport {
            attempted: 3,
            deleted: 2,
            failed: 1,
            skipped: 0,
            failed_uuids: vec!["f2".to_string()],
        });

        let row = SummaryRow::from(&s);
        assert_eq!(row.status, "partial (stuck token)");
        assert_eq!(row.deleted, "2");
        assert_eq!(row.failed, "1");
    }

    #[test]
    fn test_pretty_dry_run_mentions_flag() {
        let out = report(true, vec![summary(QueryKind::PackageVersion, 4)])
            .format(OutputFormat::Pretty)
            .unwrap();

        assert!(out.contains("acme"));
        assert!(out.contains("--no-dry-run"));
        assert!(out.contains("4 found"));
    }

    #[test]
    fn test_pretty_shows_query_failure() {
        let mut failed = summary(QueryKind::Finding, 0);
        failed.query_error = Some("Query failed. Status Code: 500".to_string());

        let out = report(false, vec![failed])
            .format(OutputFormat::Pretty)
            .unwrap();
        assert!(out.contains("query failed"));
        assert!(out.contains("500"));
    }

    #[test]
    fn test_json_summary() {
        let out = report(false, vec![summary(QueryKind::Finding, 7)])
            .format(OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["data"]["namespace"], "acme");
        assert_eq!(value["data"]["pipelines"][0]["kind"], "Finding");
        assert_eq!(value["data"]["pipelines"][0]["found"], 7);
        assert_eq!(value["data"]["pipelines"][0]["stop"], "exhausted");
    }

    #[test]
    fn test_table_summary() {
        let out = report(true, vec![summary(QueryKind::PackageVersion, 1)])
            .format(OutputFormat::Table)
            .unwrap();
        assert!(out.contains("KIND"));
        assert!(out.contains("packages"));
    }
}
