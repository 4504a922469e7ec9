use std::process::ExitCode;

use clap::Parser;
use scenario_config::{run, telemetry, Cli};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init(cli.log_format);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "generate-config failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
