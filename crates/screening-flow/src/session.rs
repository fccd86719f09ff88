use std::collections::BTreeMap;

use screening_spec::{
    AnswerRecord, EMAIL_FIELD, ErrorMap, FieldValue, RecordError, Registry, first_invalid,
    validate_all, validate_section,
};
use thiserror::Error;

use crate::gateway::{
    DISPLAY_NAME_FIELD, GatewayError, NotifyRequest, SubmissionGateway, SubmissionPayload,
    SubmissionReceipt,
};
use crate::store::{DraftStore, StoreError};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    /// Between invoking persist and receiving its result; repeated submit
    /// attempts are rejected here.
    Submitting,
    /// Terminal; a fresh session is required to start over.
    Submitted,
}

/// Result of a forward transition. `Moved` doubles as the signal to scroll
/// the view back to the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved { to: u8 },
    Blocked,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored draft does not match the registry: {0}")]
    DraftMismatch(#[from] RecordError),
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("field '{name}' expects a {expected} answer")]
    KindMismatch { name: String, expected: &'static str },
    #[error("the session no longer accepts edits")]
    Closed,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submit is only available from the final section")]
    NotOnFinalSection,
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the form was already submitted")]
    AlreadySubmitted,
    #[error("please complete all required fields before submitting (section {first_invalid} is incomplete)")]
    Incomplete { first_invalid: u8 },
    #[error("submission rejected: {reason}")]
    Persist { reason: String },
}

/// Navigation state machine over one candidate's answer record.
///
/// Owns the draft-store handle: hydrates from it on open, writes through on
/// every edit, clears it once after a confirmed submission.
pub struct Session<S: DraftStore> {
    registry: Registry,
    record: AnswerRecord,
    pointer: u8,
    completed: Vec<bool>,
    errors: BTreeMap<u8, ErrorMap>,
    phase: Phase,
    store: S,
}

impl<S: DraftStore> Session<S> {
    /// Opens a session over `store`, resuming the stored draft when one
    /// exists and starting from defaults otherwise. A draft carrying fields
    /// the registry does not declare is rejected rather than silently
    /// truncated.
    pub fn open(registry: Registry, store: S) -> Result<Self, SessionError> {
        let record = match store.load()? {
            Some(draft) => {
                draft.check_against(&registry)?;
                draft
            }
            None => AnswerRecord::with_defaults(&registry),
        };
        let completed = vec![false; registry.section_count() as usize];
        Ok(Self {
            registry,
            record,
            pointer: 1,
            completed,
            errors: BTreeMap::new(),
            phase: Phase::InProgress,
            store,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record(&self) -> &AnswerRecord {
        &self.record
    }

    pub fn pointer(&self) -> u8 {
        self.pointer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn completed(&self) -> &[bool] {
        &self.completed
    }

    /// Cached error map from the most recent validation pass touching
    /// `section`, if any.
    pub fn section_errors(&self, section: u8) -> Option<&ErrorMap> {
        self.errors.get(&section)
    }

    /// All cached per-section maps composed into one view, for the
    /// submit-all summary.
    pub fn composed_errors(&self) -> ErrorMap {
        let mut composed = ErrorMap::new();
        for errors in self.errors.values() {
            for (field, message) in errors {
                composed.insert(field.clone(), message.clone());
            }
        }
        composed
    }

    /// Kind-checked mutation with write-through draft persistence.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), EditError> {
        if self.phase != Phase::InProgress {
            return Err(EditError::Closed);
        }
        let field = self
            .registry
            .field(name)
            .ok_or_else(|| EditError::UnknownField(name.to_string()))?;
        let value = value.into();
        if !value.matches_kind(field.kind) {
            return Err(EditError::KindMismatch {
                name: name.to_string(),
                expected: field.kind.as_str(),
            });
        }
        self.record.insert(name.to_string(), value);
        self.store.save(&self.record)?;
        Ok(())
    }

    /// Validates the current section. On success the section's completion
    /// flag is set and the pointer moves forward, capped at the final
    /// section; on failure the pointer stays put and the section's error
    /// cache reflects the failures.
    pub fn advance(&mut self) -> Advance {
        if self.phase != Phase::InProgress {
            return Advance::Blocked;
        }
        let section = self.pointer;
        let report = validate_section(&self.registry, section, &self.record);
        let valid = report.valid;
        self.errors.insert(section, report.errors);
        if !valid {
            return Advance::Blocked;
        }
        self.completed[usize::from(section - 1)] = true;
        self.pointer = (section + 1).min(self.registry.section_count());
        Advance::Moved { to: self.pointer }
    }

    /// Unconditional step back; never touches error caches or completion
    /// flags, and revisiting never re-validates automatically.
    pub fn retreat(&mut self) -> bool {
        if self.phase == Phase::InProgress && self.pointer > 1 {
            self.pointer -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to an earlier (or the current) section. The pointer only ever
    /// decreases through this path.
    pub fn rewind(&mut self, to: u8) -> bool {
        if self.phase == Phase::InProgress && to >= 1 && to <= self.pointer {
            self.pointer = to;
            true
        } else {
            false
        }
    }

    /// First half of the submit transition: guards the phase, validates
    /// every section, and freezes the record into the gateway payload.
    /// Entering `Submitting` here is what makes a double-click a no-op.
    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, SubmitError> {
        match self.phase {
            Phase::Submitting => return Err(SubmitError::InFlight),
            Phase::Submitted => return Err(SubmitError::AlreadySubmitted),
            Phase::InProgress => {}
        }
        if self.pointer != self.registry.section_count() {
            return Err(SubmitError::NotOnFinalSection);
        }

        let reports = validate_all(&self.registry, &self.record);
        for report in &reports {
            self.errors.insert(report.section, report.errors.clone());
        }
        if let Some(section) = first_invalid(&reports) {
            return Err(SubmitError::Incomplete {
                first_invalid: section,
            });
        }

        for done in &mut self.completed {
            *done = true;
        }
        self.phase = Phase::Submitting;
        tracing::debug!(form = %self.registry.id, "all sections valid; persisting submission");
        Ok(SubmissionPayload {
            form_id: self.registry.id.clone(),
            form_version: self.registry.version.clone(),
            record: self.record.clone(),
        })
    }

    /// Records a persist rejection: the busy guard drops, the record stays
    /// intact, and the caller may try again.
    pub fn fail_submit(&mut self, reason: impl Into<String>) -> SubmitError {
        debug_assert_eq!(self.phase, Phase::Submitting);
        self.phase = Phase::InProgress;
        let reason = reason.into();
        tracing::warn!(%reason, "submission persist rejected");
        SubmitError::Persist { reason }
    }

    /// Seals the session after a successful persist: terminal phase, draft
    /// cleared exactly once. A failed clear leaves a stale draft behind but
    /// never un-submits the session.
    pub fn finish_submit(&mut self, receipt: &SubmissionReceipt) {
        debug_assert_eq!(self.phase, Phase::Submitting);
        self.phase = Phase::Submitted;
        if let Err(error) = self.store.clear() {
            tracing::warn!(%error, "failed to clear draft after submission");
        }
        tracing::info!(reference = %receipt.reference_id, "submission accepted");
    }

    /// One-shot submit: validate, persist, notify, seal. Persist and notify
    /// are each attempted exactly once; notify failure is logged and
    /// tolerated.
    pub fn submit(
        &mut self,
        gateway: &mut dyn SubmissionGateway,
    ) -> Result<SubmissionReceipt, SubmitError> {
        let payload = self.begin_submit()?;
        let receipt = match gateway.persist(&payload) {
            Ok(receipt) => receipt,
            Err(GatewayError::Rejected(reason)) => return Err(self.fail_submit(reason)),
        };
        let request = NotifyRequest {
            email: self.record.text(EMAIL_FIELD).to_string(),
            display_name: self.record.text(DISPLAY_NAME_FIELD).to_string(),
        };
        if !gateway.notify(&request) {
            tracing::warn!(email = %request.email, "notification not delivered; submission stands");
        }
        self.finish_submit(&receipt);
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDraftStore;
    use screening_spec::candidate_profile;

    #[test]
    fn opens_with_defaults_when_store_is_empty() {
        let session = Session::open(candidate_profile(), MemoryDraftStore::new()).expect("open");
        assert_eq!(session.pointer(), 1);
        assert_eq!(session.phase(), Phase::InProgress);
        assert!(session.completed().iter().all(|done| !done));
    }

    #[test]
    fn resumes_a_stored_draft() {
        let registry = candidate_profile();
        let mut draft = AnswerRecord::with_defaults(&registry);
        draft.insert("full_name", "Resumed Candidate");
        let store = MemoryDraftStore::with_snapshot(draft);

        let session = Session::open(registry, store).expect("open");
        assert_eq!(session.record().text("full_name"), "Resumed Candidate");
    }

    #[test]
    fn rejects_a_draft_with_unknown_fields() {
        let registry = candidate_profile();
        let mut draft = AnswerRecord::with_defaults(&registry);
        draft.insert("not_a_field", "x");
        let store = MemoryDraftStore::with_snapshot(draft);

        assert!(matches!(
            Session::open(registry, store),
            Err(SessionError::DraftMismatch(_))
        ));
    }

    #[test]
    fn set_checks_field_kind() {
        let mut session =
            Session::open(candidate_profile(), MemoryDraftStore::new()).expect("open");
        assert!(matches!(
            session.set("role1_rating", "very good"),
            Err(EditError::KindMismatch { .. })
        ));
        assert!(matches!(
            session.set("no_such_field", "x"),
            Err(EditError::UnknownField(_))
        ));
        session.set("role1_rating", 7).expect("valid edit");
    }

    #[test]
    fn every_edit_writes_the_draft_through() {
        let mut session =
            Session::open(candidate_profile(), MemoryDraftStore::new()).expect("open");
        session.set("full_name", "Ada").expect("edit");
        session.set("email", "ada@example.com").expect("edit");
        assert_eq!(session.store.saves(), 2);
        assert_eq!(
            session.store.snapshot().map(|record| record.text("email")),
            Some("ada@example.com")
        );
    }
}
