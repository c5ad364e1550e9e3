use std::path::PathBuf;
use std::sync::Once;

use coeus_core::{
    update, AppState, Effect, FlowError, IngestionResult, Msg, PdfFile, Route, SessionSnapshot,
    Stage, UploadReceipt, ValidationError,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(coeus_logging::initialize_for_tests);
}

fn uploaded() -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::Restore(SessionSnapshot {
            display_name: Some("Ada Lovelace".to_string()),
            user_id: Some("u-1".to_string()),
            ..SessionSnapshot::default()
        }),
    );
    let (state, _) = update(
        state,
        Msg::FileSelected(PdfFile {
            name: "notes.pdf".to_string(),
            media_type: "application/pdf".to_string(),
            path: PathBuf::from("notes.pdf"),
        }),
    );
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, _) = update(
        state,
        Msg::UploadDone(Ok(UploadReceipt {
            job_id: "job-42".to_string(),
            file_name: Some("notes.pdf".to_string()),
        })),
    );
    assert_eq!(state.stage(), Stage::Uploaded);
    state
}

#[test]
fn ingestion_without_upload_is_rejected_locally() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::IngestClicked);
    assert!(effects.is_empty());
    assert_eq!(state.stage(), Stage::Idle);
    assert_eq!(
        state.error(),
        Some(&FlowError::Validation(ValidationError::NotUploaded))
    );
}

#[test]
fn restored_job_without_identity_reports_expired_session() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::Restore(SessionSnapshot {
            job_id: Some("job-42".to_string()),
            ..SessionSnapshot::default()
        }),
    );
    let (state, effects) = update(state, Msg::IngestClicked);
    assert!(effects.is_empty());
    assert_eq!(state.stage(), Stage::Uploaded);
    assert_eq!(
        state.error(),
        Some(&FlowError::Validation(ValidationError::SessionExpired))
    );
}

#[test]
fn successful_ingestion_records_counters_and_moves_to_chat() {
    init_logging();
    let (state, effects) = update(uploaded(), Msg::IngestClicked);
    assert_eq!(state.stage(), Stage::Ingesting);
    assert_eq!(
        effects,
        vec![Effect::RunIngestion {
            job_id: "job-42".to_string(),
            user_id: "u-1".to_string(),
            display_name: "Ada Lovelace".to_string(),
        }]
    );
    assert_eq!(state.view().busy_label, Some("Running ingestion..."));
    assert!(!state.view().ingest_enabled);

    let counts = IngestionResult {
        vectors_stored: 120,
        docs_indexed: 8,
    };
    let (state, effects) = update(state, Msg::IngestionDone(Ok(counts)));
    assert_eq!(state.stage(), Stage::Done);
    assert_eq!(state.route(), Route::Chat);
    assert_eq!(state.ingestion(), Some(counts));
    assert_eq!(
        effects,
        vec![
            Effect::SaveSession(SessionSnapshot {
                vectors_stored: Some(120),
                docs_indexed: Some(8),
                ..SessionSnapshot::default()
            }),
            Effect::Navigate(Route::Chat),
        ]
    );
}

#[test]
fn failed_ingestion_returns_to_uploaded_and_allows_retry() {
    init_logging();
    let (state, _) = update(uploaded(), Msg::IngestClicked);
    let (state, effects) = update(
        state,
        Msg::IngestionDone(Err(FlowError::Network("connection refused".to_string()))),
    );
    assert!(effects.is_empty());
    assert_eq!(state.stage(), Stage::Uploaded);
    assert_eq!(state.view().error.as_deref(), Some("connection refused"));
    assert!(state.view().ingest_enabled);

    let (state, effects) = update(state, Msg::IngestClicked);
    assert_eq!(state.stage(), Stage::Ingesting);
    assert!(state.error().is_none());
    assert_eq!(effects.len(), 1);
}

#[test]
fn second_ingest_trigger_while_in_flight_is_ignored() {
    init_logging();
    let (state, _) = update(uploaded(), Msg::IngestClicked);
    let (state, effects) = update(state, Msg::IngestClicked);
    assert!(effects.is_empty());
    assert_eq!(state.stage(), Stage::Ingesting);
    assert!(state.error().is_none());
}

#[test]
fn back_is_blocked_while_ingesting() {
    init_logging();
    let (state, _) = update(uploaded(), Msg::IngestClicked);
    let (state, effects) = update(state, Msg::BackClicked);
    assert!(effects.is_empty());
    assert_eq!(state.route(), Route::Upload);

    let (state, _) = update(state, Msg::IngestionDone(Err(FlowError::Network("x".into()))));
    let (state, effects) = update(state, Msg::BackClicked);
    assert_eq!(effects, vec![Effect::Navigate(Route::Home)]);
    assert_eq!(state.route(), Route::Home);
    assert_eq!(state.view().error, None);
}

#[test]
fn finished_ingestion_refuses_a_new_file() {
    init_logging();
    let (state, _) = update(uploaded(), Msg::IngestClicked);
    let (state, _) = update(
        state,
        Msg::IngestionDone(Ok(IngestionResult {
            vectors_stored: 120,
            docs_indexed: 8,
        })),
    );
    assert_eq!(state.stage(), Stage::Done);

    let (state, effects) = update(
        state,
        Msg::FileDropped(PdfFile {
            name: "other.pdf".to_string(),
            media_type: "application/pdf".to_string(),
            path: PathBuf::from("other.pdf"),
        }),
    );
    assert!(effects.is_empty());
    assert!(!state.view().dragging);
    assert_eq!(state.stage(), Stage::Done);
    assert_eq!(
        state.error(),
        Some(&FlowError::Validation(ValidationError::AlreadyUploaded))
    );
}
