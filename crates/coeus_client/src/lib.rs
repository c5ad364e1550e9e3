//! Coeus client: HTTP calls against the ingestion backend and the engine that runs them.
mod api;
mod engine;
mod types;
mod wire;

pub use api::{ClientSettings, CoeusApi, ReqwestApi};
pub use engine::EngineHandle;
pub use types::{
    ApiError, EngineEvent, FailureKind, IngestionCounts, RegisteredUser, UploadReceipt,
    UploadRequest,
};
pub use wire::backend_message;
