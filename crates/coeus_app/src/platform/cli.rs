use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use coeus_core::{Msg, Stage};
use log::LevelFilter;

use super::app::FlowDriver;
use super::logging::LogDestination;
use super::media::pdf_file_from_path;
use super::persistence::DEFAULT_SESSION_FILE;

#[derive(Parser, Debug)]
#[command(
    name = "coeus",
    about = "Register, upload a PDF and run ingestion against the Coeus backend"
)]
pub struct Cli {
    /// Backend base URL; routes live under /api/v1
    #[arg(long, env = "COEUS_API_URL", default_value = "http://127.0.0.1:8000")]
    pub api_url: String,

    /// File the session is kept in between runs
    #[arg(long, env = "COEUS_SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    pub session_file: PathBuf,

    /// Seconds to wait for a TCP connection
    #[arg(long, env = "COEUS_CONNECT_TIMEOUT", default_value_t = 10)]
    pub connect_timeout_secs: u64,

    /// Seconds to wait for registration and upload answers
    #[arg(long, env = "COEUS_REQUEST_TIMEOUT", default_value_t = 60)]
    pub request_timeout_secs: u64,

    /// Seconds to wait for the ingestion pipeline to finish
    #[arg(long, env = "COEUS_INGEST_TIMEOUT", default_value_t = 600)]
    pub ingest_timeout_secs: u64,

    /// Where log lines go
    #[arg(long, env = "COEUS_LOG", value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "COEUS_LOG_LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,

    /// Log file path when logging to a file
    #[arg(long, env = "COEUS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a display name with the backend
    Start {
        /// What should Coeus call you?
        name: String,
    },
    /// Upload a PDF for the registered user
    Upload {
        file: PathBuf,
        /// Hand the file over as a drag-and-drop instead of a picker selection
        #[arg(long)]
        drop: bool,
    },
    /// Run ingestion for the uploaded PDF
    Ingest,
    /// Forget the uploaded PDF so a different one can be sent
    Reset,
    /// Leave the upload page for the home page
    Back,
    /// Register (if a name is given), upload and ingest in one go.
    /// Replaces any PDF uploaded earlier in this session.
    Run {
        file: PathBuf,
        /// Display name to register first; needed when no user is registered yet
        #[arg(long)]
        name: Option<String>,
    },
    /// Show where the flow stands
    Status,
    /// Forget the whole session, identity included
    Logout,
}

impl Command {
    /// Feeds the user actions this command stands for into the driver.
    pub fn execute(&self, driver: &mut FlowDriver) {
        match self {
            Command::Start { name } => register(driver, name),
            Command::Upload { file, drop } => upload(driver, file, *drop),
            Command::Ingest => driver.dispatch_and_settle(Msg::IngestClicked),
            Command::Reset => driver.dispatch(Msg::ResetClicked),
            Command::Back => driver.dispatch(Msg::BackClicked),
            Command::Run { file, name } => {
                if let Some(name) = name {
                    register(driver, name);
                    if driver.state().error().is_some() {
                        return;
                    }
                }
                // A run always sends a fresh PDF.
                if driver.state().stage() == Stage::Uploaded {
                    driver.dispatch(Msg::ResetClicked);
                }
                upload(driver, file, false);
                if driver.state().stage() != Stage::Uploaded {
                    return;
                }
                driver.dispatch_and_settle(Msg::IngestClicked);
            }
            Command::Status => driver.dispatch(Msg::NoOp),
            Command::Logout => driver.dispatch(Msg::SessionReset),
        }
    }
}

fn register(driver: &mut FlowDriver, name: &str) {
    driver.dispatch(Msg::NameChanged(name.to_string()));
    driver.dispatch_and_settle(Msg::StartClicked);
}

fn upload(driver: &mut FlowDriver, path: &Path, drop: bool) {
    let file = pdf_file_from_path(path);
    if drop {
        driver.dispatch(Msg::DragEntered);
        driver.dispatch(Msg::FileDropped(file));
    } else {
        driver.dispatch(Msg::FileSelected(file));
    }
    if driver.state().error().is_some() {
        return;
    }
    driver.dispatch_and_settle(Msg::UploadClicked);
}
