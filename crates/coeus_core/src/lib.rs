//! Coeus core: pure upload/ingestion state machine, session model and view-model helpers.
mod effect;
mod error;
mod msg;
mod name;
mod session;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Route};
pub use error::{FlowError, ValidationError};
pub use msg::Msg;
pub use name::{normalize_display_name, MAX_NAME_LEN, MIN_NAME_LEN};
pub use session::{MemorySessionStore, SessionKey, SessionSnapshot, SessionStore};
pub use state::{
    AppState, IngestionResult, PdfFile, Stage, UploadJob, UploadReceipt, UserIdentity,
    PDF_MEDIA_TYPE,
};
pub use update::update;
pub use view_model::AppViewModel;
