use std::process::ExitCode;

use clap::Parser;
use promalert::cli::Opts;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "promalert starting");

    match promalert::run::run_from_file(&opts.config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(path = %opts.config.display(), error = %e, "failed to load config");
            ExitCode::FAILURE
        }
    }
}
