use crate::{FlowError, IngestionResult, PdfFile, SessionSnapshot, UploadReceipt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Persisted session read back at startup.
    Restore(SessionSnapshot),
    /// User edited the display name input.
    NameChanged(String),
    /// User clicked Start on the home page.
    StartClicked,
    /// Backend answered the registration call.
    RegistrationDone(Result<String, FlowError>),
    /// User picked a file through the file picker.
    FileSelected(PdfFile),
    /// A dragged file entered the drop zone.
    DragEntered,
    /// A dragged file left the drop zone without being dropped.
    DragLeft,
    /// User dropped a file on the drop zone.
    FileDropped(PdfFile),
    /// User clicked Upload PDF.
    UploadClicked,
    /// Backend answered the upload call.
    UploadDone(Result<UploadReceipt, FlowError>),
    /// User clicked Run ingestion.
    IngestClicked,
    /// Backend answered the ingestion call.
    IngestionDone(Result<IngestionResult, FlowError>),
    /// User clicked "Upload a different PDF".
    ResetClicked,
    /// User clicked Back on the upload page.
    BackClicked,
    /// User asked to forget the whole session.
    SessionReset,
    /// Changes nothing; `coeus status` sends it to redraw the current page.
    NoOp,
}

impl Msg {
    /// Short label used to tag log lines.
    pub fn step(&self) -> &'static str {
        match self {
            Msg::Restore(_) => "restore",
            Msg::NameChanged(_) | Msg::StartClicked | Msg::RegistrationDone(_) => "register",
            Msg::FileSelected(_) | Msg::DragEntered | Msg::DragLeft | Msg::FileDropped(_) => {
                "select"
            }
            Msg::UploadClicked | Msg::UploadDone(_) => "upload",
            Msg::IngestClicked | Msg::IngestionDone(_) => "ingest",
            Msg::ResetClicked | Msg::SessionReset => "reset",
            Msg::BackClicked => "navigate",
            Msg::NoOp => "noop",
        }
    }
}
