use coeus_client::{
    ApiError, EngineEvent, EngineHandle, FailureKind, IngestionCounts, UploadRequest,
};
use coeus_core::{
    Effect, FlowError, IngestionResult, Msg, SessionStore, UploadReceipt, ValidationError,
};
use coeus_logging::{coeus_info, coeus_warn};

/// Executes effects: backend calls go to the engine, session writes to the store.
pub struct EffectRunner {
    engine: EngineHandle,
    store: Box<dyn SessionStore>,
    in_flight: usize,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: Box<dyn SessionStore>) -> Self {
        Self {
            engine,
            store,
            in_flight: 0,
        }
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    /// Number of backend calls issued and not yet answered.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Register { display_name } => {
                    coeus_info!("Register name_len={}", display_name.chars().count());
                    self.in_flight += 1;
                    self.engine.register(display_name);
                }
                Effect::Upload {
                    file,
                    user_id,
                    display_name,
                } => {
                    coeus_info!("Upload file={} user_id={}", file.name, user_id);
                    self.in_flight += 1;
                    self.engine.upload(UploadRequest {
                        path: file.path,
                        file_name: file.name,
                        media_type: file.media_type,
                        user_id,
                        user_name: display_name,
                    });
                }
                Effect::RunIngestion {
                    job_id,
                    user_id,
                    display_name,
                } => {
                    coeus_info!("RunIngestion job_id={} user_id={}", job_id, user_id);
                    self.in_flight += 1;
                    self.engine.ingest(job_id, user_id, display_name);
                }
                Effect::SaveSession(patch) => self.store.save(&patch),
                Effect::ClearSession(keys) => self.store.clear(&keys),
                Effect::Navigate(route) => coeus_info!("Navigate to {:?}", route),
            }
        }
    }

    /// Blocks for the next backend answer and turns it into a message.
    /// Returns `None` when nothing is outstanding or the engine is gone.
    pub fn next_msg(&mut self) -> Option<Msg> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.engine.recv();
        self.in_flight -= 1;
        match event {
            Some(event) => Some(event_to_msg(event)),
            None => {
                coeus_warn!("engine stopped with {} call(s) outstanding", self.in_flight + 1);
                self.in_flight = 0;
                None
            }
        }
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Registered(result) => Msg::RegistrationDone(
            result
                .map(|user| user.user_id)
                .map_err(map_api_error),
        ),
        EngineEvent::Uploaded(result) => Msg::UploadDone(
            result
                .map(|receipt| UploadReceipt {
                    job_id: receipt.job_id,
                    file_name: receipt.file_name,
                })
                .map_err(map_api_error),
        ),
        EngineEvent::Ingested(result) => {
            Msg::IngestionDone(result.map(map_counts).map_err(map_api_error))
        }
    }
}

fn map_counts(counts: IngestionCounts) -> IngestionResult {
    IngestionResult {
        vectors_stored: counts.vectors_stored,
        docs_indexed: counts.docs_indexed,
    }
}

/// Sorts a client failure into the controller's error taxonomy.
pub fn map_api_error(err: ApiError) -> FlowError {
    coeus_warn!("call failed ({}): {}", err.kind, err.message);
    match err.kind {
        FailureKind::HttpStatus(status) => FlowError::Backend {
            status,
            message: err.message,
        },
        FailureKind::MalformedResponse => FlowError::MalformedResponse(err.message),
        FailureKind::UnreadableFile => {
            FlowError::Validation(ValidationError::UnreadableFile(err.message))
        }
        FailureKind::Timeout | FailureKind::Network | FailureKind::InvalidUrl => {
            FlowError::Network(err.message)
        }
    }
}
