use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use coeus_logging::{coeus_debug, coeus_warn};

use crate::{CoeusApi, EngineEvent, UploadRequest};

enum EngineCommand {
    Register {
        display_name: String,
    },
    Upload(UploadRequest),
    Ingest {
        job_id: String,
        user_id: String,
        user_name: String,
    },
}

impl EngineCommand {
    fn label(&self) -> &'static str {
        match self {
            EngineCommand::Register { .. } => "register",
            EngineCommand::Upload(_) => "upload",
            EngineCommand::Ingest { .. } => "ingest",
        }
    }
}

/// Runs backend calls on a background thread with its own async runtime.
///
/// Commands go in through `register`/`upload`/`ingest`; each produces exactly
/// one [`EngineEvent`] on the event channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn CoeusApi>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("coeus-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    coeus_logging::set_flow_step(command.label());
                    let event = runtime.block_on(handle_command(api.as_ref(), command));
                    if event_tx.send(event).is_err() {
                        coeus_warn!("event receiver dropped; engine stopping");
                        break;
                    }
                }
                coeus_debug!("engine thread exiting");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn register(&self, display_name: impl Into<String>) {
        self.send(EngineCommand::Register {
            display_name: display_name.into(),
        });
    }

    pub fn upload(&self, request: UploadRequest) {
        self.send(EngineCommand::Upload(request));
    }

    pub fn ingest(
        &self,
        job_id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
    ) {
        self.send(EngineCommand::Ingest {
            job_id: job_id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event arrives. `None` means the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    /// Blocks until the next event arrives, or the timeout elapses.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            coeus_warn!("engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(api: &dyn CoeusApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Register { display_name } => {
            EngineEvent::Registered(api.register(&display_name).await)
        }
        EngineCommand::Upload(request) => EngineEvent::Uploaded(api.upload_pdf(&request).await),
        EngineCommand::Ingest {
            job_id,
            user_id,
            user_name,
        } => EngineEvent::Ingested(api.run_ingestion(&job_id, &user_id, &user_name).await),
    }
}
