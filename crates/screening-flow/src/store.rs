use screening_spec::{AnswerRecord, RecordError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("draft store io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("draft snapshot is unreadable: {0}")]
    Corrupt(#[from] RecordError),
}

/// Key-value persistence surface for in-progress drafts. One snapshot,
/// overwritten wholesale on every save, deleted wholesale on clear.
///
/// Lifecycle: opened at session start, written through on every mutation,
/// cleared exactly once after a confirmed successful submission.
pub trait DraftStore {
    fn load(&self) -> Result<Option<AnswerRecord>, StoreError>;
    fn save(&mut self, record: &AnswerRecord) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-memory store, used by tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    snapshot: Option<AnswerRecord>,
    saves: usize,
    clears: usize,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(record: AnswerRecord) -> Self {
        Self {
            snapshot: Some(record),
            saves: 0,
            clears: 0,
        }
    }

    pub fn snapshot(&self) -> Option<&AnswerRecord> {
        self.snapshot.as_ref()
    }

    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Result<Option<AnswerRecord>, StoreError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, record: &AnswerRecord) -> Result<(), StoreError> {
        self.snapshot = Some(record.clone());
        self.saves += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.snapshot = None;
        self.clears += 1;
        Ok(())
    }
}
