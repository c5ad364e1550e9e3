use crate::{
    AppState, Effect, FlowError, Msg, PdfFile, Route, SessionKey, SessionSnapshot, Stage,
    UploadJob, UserIdentity, ValidationError, MIN_NAME_LEN,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Restore(snapshot) => {
            state.restore(snapshot);
            Vec::new()
        }
        Msg::NameChanged(raw) => {
            // Input is locked while registering.
            if state.is_registering() {
                return (state, Vec::new());
            }
            state.set_name_input(raw);
            Vec::new()
        }
        Msg::StartClicked => start_registration(&mut state),
        Msg::RegistrationDone(result) => {
            if !state.is_registering() {
                return (state, Vec::new());
            }
            state.set_registering(false);
            match result {
                Ok(user_id) => {
                    let display_name = state.clean_name();
                    state.set_identity(UserIdentity {
                        display_name: display_name.clone(),
                        user_id: user_id.clone(),
                    });
                    state.set_route(Route::Upload);
                    // Identity must be stored before the upload page runs.
                    vec![
                        Effect::SaveSession(SessionSnapshot {
                            display_name: Some(display_name),
                            user_id: Some(user_id),
                            ..SessionSnapshot::default()
                        }),
                        Effect::Navigate(Route::Upload),
                    ]
                }
                Err(err) => {
                    state.set_error(err);
                    Vec::new()
                }
            }
        }
        Msg::FileSelected(file) => {
            attach_file(&mut state, file);
            Vec::new()
        }
        Msg::DragEntered => {
            state.set_dragging(true);
            Vec::new()
        }
        Msg::DragLeft => {
            state.set_dragging(false);
            Vec::new()
        }
        Msg::FileDropped(file) => {
            state.set_dragging(false);
            attach_file(&mut state, file);
            Vec::new()
        }
        Msg::UploadClicked => start_upload(&mut state),
        Msg::UploadDone(result) => {
            if state.stage() != Stage::Uploading {
                return (state, Vec::new());
            }
            match result {
                Ok(receipt) => {
                    let file_name = receipt
                        .file_name
                        .filter(|name| !name.is_empty())
                        .or_else(|| state.file().map(|file| file.name.clone()))
                        .unwrap_or_default();
                    state.set_job(Some(UploadJob {
                        job_id: receipt.job_id.clone(),
                        file_name: file_name.clone(),
                    }));
                    state.set_stage(Stage::Uploaded);
                    vec![Effect::SaveSession(SessionSnapshot {
                        job_id: Some(receipt.job_id),
                        file_name: Some(file_name),
                        ..SessionSnapshot::default()
                    })]
                }
                Err(err) => {
                    state.set_stage(Stage::Idle);
                    state.set_error(err);
                    Vec::new()
                }
            }
        }
        Msg::IngestClicked => start_ingestion(&mut state),
        Msg::IngestionDone(result) => {
            if state.stage() != Stage::Ingesting {
                return (state, Vec::new());
            }
            match result {
                Ok(counts) => {
                    state.set_ingestion(counts);
                    state.set_stage(Stage::Done);
                    state.set_route(Route::Chat);
                    vec![
                        Effect::SaveSession(SessionSnapshot {
                            vectors_stored: Some(counts.vectors_stored),
                            docs_indexed: Some(counts.docs_indexed),
                            ..SessionSnapshot::default()
                        }),
                        Effect::Navigate(Route::Chat),
                    ]
                }
                Err(err) => {
                    // Retry stays possible from Uploaded.
                    state.set_stage(Stage::Uploaded);
                    state.set_error(err);
                    Vec::new()
                }
            }
        }
        Msg::ResetClicked => {
            if state.stage() != Stage::Uploaded {
                return (state, Vec::new());
            }
            state.set_stage(Stage::Idle);
            state.set_file(None);
            state.set_job(None);
            state.clear_error();
            vec![Effect::ClearSession(vec![
                SessionKey::JobId,
                SessionKey::FileName,
            ])]
        }
        Msg::BackClicked => {
            if state.route() != Route::Upload || state.is_in_flight() {
                return (state, Vec::new());
            }
            state.clear_error();
            state.set_route(Route::Home);
            vec![Effect::Navigate(Route::Home)]
        }
        Msg::SessionReset => {
            if state.is_in_flight() {
                return (state, Vec::new());
            }
            return (
                AppState::new(),
                vec![
                    Effect::ClearSession(SessionKey::ALL.to_vec()),
                    Effect::Navigate(Route::Home),
                ],
            );
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start_registration(state: &mut AppState) -> Vec<Effect> {
    if state.is_registering() {
        return Vec::new();
    }
    state.touch();
    state.clear_error();

    let display_name = state.clean_name();
    if display_name.chars().count() < MIN_NAME_LEN {
        state.set_error(ValidationError::NameTooShort.into());
        return Vec::new();
    }

    state.set_registering(true);
    vec![Effect::Register { display_name }]
}

fn attach_file(state: &mut AppState, file: PdfFile) {
    if !picker_open(state) {
        return;
    }
    state.clear_error();
    if file.is_pdf() {
        state.set_file(Some(file));
    } else {
        state.set_file(None);
        state.set_error(FlowError::Validation(ValidationError::NotPdf {
            media_type: file.media_type,
        }));
    }
}

/// The picker only works in Idle. Once a PDF is uploaded the user is told to
/// reset first; while a call is in flight the action is dropped.
fn picker_open(state: &mut AppState) -> bool {
    match state.stage() {
        Stage::Idle => true,
        Stage::Uploading | Stage::Ingesting => false,
        Stage::Uploaded | Stage::Done => {
            state.set_error(ValidationError::AlreadyUploaded.into());
            false
        }
    }
}

fn start_upload(state: &mut AppState) -> Vec<Effect> {
    if !picker_open(state) {
        return Vec::new();
    }
    state.clear_error();

    let Some(file) = state.file().cloned() else {
        state.set_error(ValidationError::NoFileSelected.into());
        return Vec::new();
    };
    let Some(user_id) = state.user_id() else {
        state.set_error(ValidationError::SessionExpired.into());
        return Vec::new();
    };

    state.set_stage(Stage::Uploading);
    vec![Effect::Upload {
        file,
        user_id,
        display_name: state.display_name(),
    }]
}

fn start_ingestion(state: &mut AppState) -> Vec<Effect> {
    match state.stage() {
        Stage::Uploaded => {}
        // Call already in flight.
        Stage::Uploading | Stage::Ingesting => return Vec::new(),
        Stage::Idle | Stage::Done => {
            state.set_error(ValidationError::NotUploaded.into());
            return Vec::new();
        }
    }
    state.clear_error();

    let Some(job_id) = state.job().map(|job| job.job_id.clone()) else {
        state.set_error(ValidationError::MissingJobId.into());
        return Vec::new();
    };
    let Some(user_id) = state.user_id() else {
        state.set_error(ValidationError::SessionExpired.into());
        return Vec::new();
    };

    state.set_stage(Stage::Ingesting);
    vec![Effect::RunIngestion {
        job_id,
        user_id,
        display_name: state.display_name(),
    }]
}
