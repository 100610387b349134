//! Sweep command handler

use log::info;

use crate::cli::{Cli, CommandContext};
use crate::client::EndorApi;
use crate::error::Result;
use crate::output;
use crate::sweep::{PipelineOptions, SweepReport, catalog, run_pipeline};

/// Authenticate, run the selected pipelines and print the summary.
///
/// Only configuration and authentication errors are returned; query and deletion
/// problems are reported in the returned [`SweepReport`].
pub async fn run(cli: &Cli) -> Result<SweepReport> {
    let ctx = CommandContext::new(cli.config.as_deref()).await?;
    let report = sweep(&ctx.client, &ctx.namespace, cli).await;

    output::print(&report, cli.format)?;
    Ok(report)
}

/// Run the pipelines selected by `cli`, packages before findings.
pub async fn sweep<C: EndorApi + ?Sized>(client: &C, namespace: &str, cli: &Cli) -> SweepReport {
    let options = PipelineOptions {
        dry_run: cli.dry_run(),
        concurrency: usize::from(cli.concurrency),
        ..PipelineOptions::default()
    };

    let mut specs = Vec::new();
    if cli.process_packages() {
        specs.push(catalog::github_actions_packages(cli.package_filter.as_deref()));
    }
    if cli.process_findings() {
        specs.push(catalog::github_actions_findings(cli.finding_filter.as_deref()));
    }

    let mut pipelines = Vec::with_capacity(specs.len());
    for spec in &specs {
        pipelines.push(run_pipeline(client, namespace, spec, &options).await);
    }

    if options.dry_run {
        info!(
            "Dry run mode: No packages or findings will be deleted. To delete all identified \
             GitHub Actions packages and findings, run with the --no-dry-run flag."
        );
    }

    SweepReport {
        namespace: namespace.to_string(),
        dry_run: options.dry_run,
        pipelines,
    }
}
