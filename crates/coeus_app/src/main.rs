use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use coeus_app::{initialize_logging, render, Cli, FlowDriver, RonSessionStore, Severity};
use coeus_client::{ClientSettings, EngineHandle, ReqwestApi};
use coeus_logging::coeus_info;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    initialize_logging(cli.log, cli.log_level, cli.log_file.as_deref());

    let mut settings = ClientSettings::with_base_url(&cli.api_url)
        .with_context(|| format!("invalid --api-url {}", cli.api_url))?;
    settings.connect_timeout = Duration::from_secs(cli.connect_timeout_secs);
    settings.request_timeout = Duration::from_secs(cli.request_timeout_secs);
    settings.ingest_timeout = Duration::from_secs(cli.ingest_timeout_secs);

    let api = ReqwestApi::new(settings).context("failed to build HTTP client")?;
    let engine = EngineHandle::new(Arc::new(api)).context("failed to start engine thread")?;
    let store = RonSessionStore::new(cli.session_file.clone());
    coeus_info!("session file {:?}", store.path());

    let mut driver = FlowDriver::new(engine, Box::new(store));
    cli.command.execute(&mut driver);

    let view = driver.view();
    let mut failed = false;
    for line in render(&view) {
        match line.severity {
            Severity::Error => {
                failed = true;
                eprintln!("error: {}", line.text);
            }
            Severity::Information | Severity::Success => println!("{}", line.text),
        }
    }
    if failed {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
