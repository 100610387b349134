//! endor-sweep - find and clean up GitHub Actions packages and findings in Endor Labs

use clap::Parser;
use log::LevelFilter;

mod cli;
mod client;
mod config;
mod error;
mod output;
mod sweep;

use cli::Cli;

/// Exit code when the run completed but a query or a deletion failed
const EXIT_PARTIAL_FAILURE: i32 = 2;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli::sweep::run(&cli).await {
        Ok(report) if report.is_success() => {}
        Ok(_) => std::process::exit(EXIT_PARTIAL_FAILURE),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}

/// Progress lines go to stdout; `RUST_LOG` overrides the level picked here.
fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_module("endor_sweep", level)
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
