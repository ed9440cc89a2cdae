// src/main.rs

use clap::Parser;
use feishu_backup::callback::CallbackServer;
use feishu_backup::config::{BackupConfig, CommandLineInput};
use feishu_backup::logging::setup_logging;
use feishu_backup::pipeline::{log_failure, BackupPipeline};
use feishu_backup::{AppError, ExportSummary};
use std::process::ExitCode;
use std::sync::Arc;

/// Logs in through the browser and runs one backup.
async fn execute_backup(config: &BackupConfig) -> Result<ExportSummary, AppError> {
    let pipeline = Arc::new(BackupPipeline::prepare(config).await?);

    let server = CallbackServer::bind(config.port).await?;
    let login_url = pipeline.authorization_url(&server.redirect_uri()?)?;
    println!("Open this URL in a browser to authorize the backup:");
    println!("{}", login_url);

    server
        .serve(move |code| {
            let pipeline = Arc::clone(&pipeline);
            async move { pipeline.run_with_code(&code).await }
        })
        .await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Failed to set up logging: {}", e);
        return ExitCode::FAILURE;
    }

    let result = match BackupConfig::resolve(cli) {
        Ok(config) => execute_backup(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(summary) => {
            println!("✓ Backup complete");
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_failure(&e);
            if matches!(&e, AppError::Api { kind, .. } if kind.needs_login()) {
                eprintln!("The access token was rejected. Run the backup again to log in anew.");
            }
            ExitCode::FAILURE
        }
    }
}
