use thiserror::Error;

/// A client-side precondition that was not met. Raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter at least 2 characters.")]
    NameTooShort,
    #[error("Please select a PDF file only.")]
    NotPdf { media_type: String },
    #[error("Please select a PDF first.")]
    NoFileSelected,
    #[error("Session expired. Please restart from home.")]
    SessionExpired,
    #[error("Upload a PDF before running ingestion.")]
    NotUploaded,
    #[error("Missing job_id. Please upload again.")]
    MissingJobId,
    #[error("{0}")]
    UnreadableFile(String),
    #[error("A PDF is already uploaded. Reset before sending another one.")]
    AlreadyUploaded,
}

/// Every failure the controller can surface. One human-readable message each.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Network(String),
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("{0}")]
    MalformedResponse(String),
}
