//! Coeus terminal client: drives registration, upload and ingestion against the backend.
mod platform;

pub use platform::app::FlowDriver;
pub use platform::cli::{Cli, Command};
pub use platform::effects::{map_api_error, EffectRunner};
pub use platform::logging::{initialize as initialize_logging, LogDestination};
pub use platform::media::{media_type_for, pdf_file_from_path};
pub use platform::persistence::{PersistError, RonSessionStore};
pub use platform::render::{render, Line, Severity};
