use crate::{PdfFile, SessionKey, SessionSnapshot};

/// Pages of the product flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Upload,
    Chat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Register {
        display_name: String,
    },
    Upload {
        file: PdfFile,
        user_id: String,
        display_name: String,
    },
    RunIngestion {
        job_id: String,
        user_id: String,
        display_name: String,
    },
    SaveSession(SessionSnapshot),
    ClearSession(Vec<SessionKey>),
    Navigate(Route),
}
