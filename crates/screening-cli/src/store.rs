use std::fs;
use std::io;
use std::path::PathBuf;

use screening_flow::{DraftStore, StoreError};
use screening_spec::AnswerRecord;

/// Draft store backed by a single CBOR snapshot file, overwritten wholesale
/// on each save and deleted on clear.
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Result<Option<AnswerRecord>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(AnswerRecord::from_cbor(&bytes)?)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StoreError::Io(error)),
        }
    }

    fn save(&mut self, record: &AnswerRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, record.to_cbor()?)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StoreError::Io(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screening_spec::candidate_profile;

    #[test]
    fn save_load_clear_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileDraftStore::new(dir.path().join("draft.cbor"));

        assert!(store.load().expect("empty load").is_none());

        let registry = candidate_profile();
        let mut record = AnswerRecord::with_defaults(&registry);
        record.insert("full_name", "Ada Lovelace");
        store.save(&record).expect("save");

        let loaded = store.load().expect("load").expect("snapshot present");
        assert_eq!(loaded.text("full_name"), "Ada Lovelace");

        store.clear().expect("clear");
        assert!(store.load().expect("cleared load").is_none());
        // Clearing twice is harmless.
        store.clear().expect("second clear");
    }
}
