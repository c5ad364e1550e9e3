/// Partial session state: every field is optional, absent means "not stored".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub display_name: Option<String>,
    pub user_id: Option<String>,
    pub job_id: Option<String>,
    pub file_name: Option<String>,
    pub vectors_stored: Option<u64>,
    pub docs_indexed: Option<u64>,
}

impl SessionSnapshot {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Copies every field present in `patch` over `self`.
    pub fn merge(&mut self, patch: &SessionSnapshot) {
        if let Some(value) = &patch.display_name {
            self.display_name = Some(value.clone());
        }
        if let Some(value) = &patch.user_id {
            self.user_id = Some(value.clone());
        }
        if let Some(value) = &patch.job_id {
            self.job_id = Some(value.clone());
        }
        if let Some(value) = &patch.file_name {
            self.file_name = Some(value.clone());
        }
        if let Some(value) = patch.vectors_stored {
            self.vectors_stored = Some(value);
        }
        if let Some(value) = patch.docs_indexed {
            self.docs_indexed = Some(value);
        }
    }

    pub fn remove(&mut self, key: SessionKey) {
        match key {
            SessionKey::DisplayName => self.display_name = None,
            SessionKey::UserId => self.user_id = None,
            SessionKey::JobId => self.job_id = None,
            SessionKey::FileName => self.file_name = None,
            SessionKey::VectorsStored => self.vectors_stored = None,
            SessionKey::DocsIndexed => self.docs_indexed = None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    DisplayName,
    UserId,
    JobId,
    FileName,
    VectorsStored,
    DocsIndexed,
}

impl SessionKey {
    pub const ALL: [SessionKey; 6] = [
        SessionKey::DisplayName,
        SessionKey::UserId,
        SessionKey::JobId,
        SessionKey::FileName,
        SessionKey::VectorsStored,
        SessionKey::DocsIndexed,
    ];
}

/// Persistent key/value store the flow resumes from.
///
/// Implementations never fail outward: `load` returns whatever could be read
/// and writes are best-effort, last-write-wins.
pub trait SessionStore {
    fn load(&self) -> SessionSnapshot;
    fn save(&mut self, patch: &SessionSnapshot);
    fn clear(&mut self, keys: &[SessionKey]);
}

/// In-memory store, used by tests and as a throwaway session.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    current: SessionSnapshot,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: SessionSnapshot) -> Self {
        Self { current: snapshot }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> SessionSnapshot {
        self.current.clone()
    }

    fn save(&mut self, patch: &SessionSnapshot) {
        self.current.merge(patch);
    }

    fn clear(&mut self, keys: &[SessionKey]) {
        for key in keys {
            self.current.remove(*key);
        }
    }
}
