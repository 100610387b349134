//! Common CLI types

/// Output format for the end-of-run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting
    #[default]
    Pretty,
    /// Table format - one row per entity kind
    Table,
    /// JSON format - structured for scripts
    Json,
}
