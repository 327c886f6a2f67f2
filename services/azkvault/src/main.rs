//! Command-line entry point: loads settings, installs logging and runs one fetch.

use std::process::ExitCode;

use azkv_blob_upload::AzureBlobUploader;
use azkvault::{Args, Settings, USAGE_EXIT_CODE, Workflow};
use clap::Parser;
use rust_common::{TracingConfig, init_tracing};
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let settings = match Settings::load(args.config_path()) {
        Ok(settings) => settings.with_verbose(args.verbose),
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::from(USAGE_EXIT_CODE));
        }
    };

    let tracing_config = TracingConfig::default()
        .with_verbose(settings.verbose)
        .with_json_output(args.log_json);
    init_tracing(&tracing_config)?;
    settings.warn_ignored();
    debug!(config = %args.config_path().display(), "Loaded configuration");

    let workflow = Workflow::new(settings, AzureBlobUploader::new());
    let mut stdout = std::io::stdout();
    match workflow.run(&args.invocation(), &mut stdout).await {
        Ok(completion) => Ok(ExitCode::from(completion.exit_code())),
        Err(e) => {
            eprintln!("Error: {e}");
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
