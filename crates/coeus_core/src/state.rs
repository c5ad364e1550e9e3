use std::path::PathBuf;

use crate::view_model::AppViewModel;
use crate::{normalize_display_name, FlowError, Route, SessionSnapshot, MAX_NAME_LEN, MIN_NAME_LEN};

/// The only media type the picker and the drop zone accept.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

const FALLBACK_DISPLAY_NAME: &str = "User";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    Uploading,
    Uploaded,
    Ingesting,
    Done,
}

/// A file reference produced by the picker or a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFile {
    pub name: String,
    pub media_type: String,
    pub path: PathBuf,
}

impl PdfFile {
    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub display_name: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub job_id: String,
    pub file_name: String,
}

/// What a successful upload call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub job_id: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestionResult {
    pub vectors_stored: u64,
    pub docs_indexed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    route: Route,
    name_input: String,
    touched: bool,
    registering: bool,
    identity: Option<UserIdentity>,
    file: Option<PdfFile>,
    stage: Stage,
    job: Option<UploadJob>,
    ingestion: Option<IngestionResult>,
    error: Option<FlowError>,
    dragging: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let clean_name = normalize_display_name(&self.name_input);
        let name_len = clean_name.chars().count();
        let can_start = name_len >= MIN_NAME_LEN;
        let uploading = self.stage == Stage::Uploading;
        let ingesting = self.stage == Stage::Ingesting;
        let uploaded = matches!(self.stage, Stage::Uploaded | Stage::Ingesting | Stage::Done);

        let busy_label = if self.registering {
            Some("Joining...")
        } else if uploading {
            Some("Uploading...")
        } else if ingesting {
            Some("Running ingestion...")
        } else {
            None
        };

        let error = match &self.error {
            Some(err) => Some(err.to_string()),
            None if self.touched && !can_start => Some(crate::ValidationError::NameTooShort.to_string()),
            None => None,
        };

        let file_line = if self.error.is_some() {
            None
        } else if uploaded {
            self.job
                .as_ref()
                .map(|job| format!("Uploaded {}", job.file_name))
        } else {
            match (&self.file, self.stage) {
                (Some(file), Stage::Idle) => Some(format!("Ready to upload: {}", file.name)),
                _ => None,
            }
        };

        AppViewModel {
            route: self.route,
            stage: self.stage,
            display_name: self.identity.as_ref().map(|id| id.display_name.clone()),
            clean_name,
            name_counter: format!("{name_len}/{MAX_NAME_LEN}"),
            start_enabled: can_start && !self.registering,
            picker_enabled: self.stage == Stage::Idle,
            upload_enabled: self.file.is_some() && self.stage == Stage::Idle,
            ingest_enabled: uploaded && !ingesting && self.stage != Stage::Done,
            reset_visible: self.stage == Stage::Uploaded,
            dragging: self.dragging,
            busy_label,
            file_line,
            ingestion: self.ingestion,
            error,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    pub fn file(&self) -> Option<&PdfFile> {
        self.file.as_ref()
    }

    pub fn job(&self) -> Option<&UploadJob> {
        self.job.as_ref()
    }

    pub fn ingestion(&self) -> Option<IngestionResult> {
        self.ingestion
    }

    pub fn error(&self) -> Option<&FlowError> {
        self.error.as_ref()
    }

    pub fn is_registering(&self) -> bool {
        self.registering
    }

    /// True while a network call issued by this state machine is outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.registering || matches!(self.stage, Stage::Uploading | Stage::Ingesting)
    }

    pub(crate) fn restore(&mut self, snapshot: SessionSnapshot) {
        if let Some(name) = &snapshot.display_name {
            self.name_input = name.clone();
        }
        if let Some(user_id) = snapshot.user_id.filter(|id| !id.is_empty()) {
            let display_name = snapshot
                .display_name
                .map(|name| normalize_display_name(&name))
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string());
            self.identity = Some(UserIdentity {
                display_name,
                user_id,
            });
            self.route = Route::Upload;
        }
        if let Some(job_id) = snapshot.job_id.filter(|id| !id.is_empty()) {
            self.job = Some(UploadJob {
                job_id,
                file_name: snapshot.file_name.unwrap_or_default(),
            });
            self.stage = Stage::Uploaded;
        }
        if snapshot.vectors_stored.is_some() || snapshot.docs_indexed.is_some() {
            self.ingestion = Some(IngestionResult {
                vectors_stored: snapshot.vectors_stored.unwrap_or(0),
                docs_indexed: snapshot.docs_indexed.unwrap_or(0),
            });
        }
    }

    pub(crate) fn set_name_input(&mut self, raw: String) {
        self.name_input = raw;
    }

    pub(crate) fn clean_name(&self) -> String {
        normalize_display_name(&self.name_input)
    }

    pub(crate) fn touch(&mut self) {
        self.touched = true;
    }

    pub(crate) fn set_registering(&mut self, registering: bool) {
        self.registering = registering;
    }

    pub(crate) fn set_identity(&mut self, identity: UserIdentity) {
        self.identity = Some(identity);
    }

    /// Display name sent alongside upload and ingestion calls.
    pub(crate) fn display_name(&self) -> String {
        self.identity
            .as_ref()
            .map(|id| id.display_name.clone())
            .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string())
    }

    pub(crate) fn user_id(&self) -> Option<String> {
        self.identity.as_ref().map(|id| id.user_id.clone())
    }

    pub(crate) fn set_file(&mut self, file: Option<PdfFile>) {
        self.file = file;
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    pub(crate) fn set_job(&mut self, job: Option<UploadJob>) {
        self.job = job;
    }

    pub(crate) fn set_ingestion(&mut self, result: IngestionResult) {
        self.ingestion = Some(result);
    }

    pub(crate) fn set_error(&mut self, error: FlowError) {
        self.error = Some(error);
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    pub(crate) fn set_route(&mut self, route: Route) {
        self.route = route;
    }
}
