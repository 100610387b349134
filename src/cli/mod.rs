//! CLI definition and handlers

use clap::Parser;

pub mod args;
pub mod context;
pub mod sweep;

pub use args::OutputFormat;
pub use context::CommandContext;

/// Fetch and potentially delete GitHub Actions packages and findings in Endor Labs.
///
/// Runs in dry-run mode unless `--no-dry-run` is given.
#[derive(Parser, Debug)]
#[command(name = "endor-sweep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Delete every GitHub Actions package and finding that is found
    #[arg(long)]
    pub no_dry_run: bool,

    /// Only process GitHub Actions packages (default: packages and findings)
    #[arg(long, conflicts_with = "findings_only")]
    pub packages_only: bool,

    /// Only process GitHub Actions findings (default: packages and findings)
    #[arg(long)]
    pub findings_only: bool,

    /// Maximum deletions in flight at once
    #[arg(
        long,
        env = "ENDOR_SWEEP_CONCURRENCY",
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..=64),
        hide_env = true
    )]
    pub concurrency: u16,

    /// Override the package query filter
    #[arg(long, value_name = "FILTER")]
    pub package_filter: Option<String>,

    /// Override the finding query filter
    #[arg(long, value_name = "FILTER")]
    pub finding_filter: Option<String>,

    /// Summary format (pretty, table, json)
    #[arg(
        long,
        env = "ENDOR_SWEEP_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, env = "ENDOR_SWEEP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, env = "ENDOR_SWEEP_DEBUG", hide_env = true)]
    pub debug: bool,
}

impl Cli {
    pub fn dry_run(&self) -> bool {
        !self.no_dry_run
    }

    pub fn process_packages(&self) -> bool {
        !self.findings_only
    }

    pub fn process_findings(&self) -> bool {
        !self.packages_only
    }
}
