use crate::{IngestionResult, Route, Stage};

/// Everything a front end needs to draw the current page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub route: Route,
    pub stage: Stage,
    /// Registered display name, once known.
    pub display_name: Option<String>,
    /// Normalized form of the name input.
    pub clean_name: String,
    /// `len/24` counter shown next to the name input.
    pub name_counter: String,
    pub start_enabled: bool,
    pub picker_enabled: bool,
    pub upload_enabled: bool,
    pub ingest_enabled: bool,
    pub reset_visible: bool,
    pub dragging: bool,
    pub busy_label: Option<&'static str>,
    /// "Ready to upload: x" or "Uploaded x".
    pub file_line: Option<String>,
    pub ingestion: Option<IngestionResult>,
    pub error: Option<String>,
}
