use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use screening_flow::{
    GatewayError, NotifyRequest, SubmissionGateway, SubmissionPayload, SubmissionReceipt,
};
use screening_spec::{NotificationContext, TemplateEngine, TemplateError};

/// Submission gateway backed by a local data directory: one JSON document
/// per accepted submission, plus an append-only notification outbox. Stands
/// in for the remote datastore and webhook behind the same contract.
pub struct DirectoryGateway {
    submissions_dir: PathBuf,
    outbox_path: PathBuf,
    templates: TemplateEngine,
}

impl DirectoryGateway {
    pub fn new(data_dir: &Path) -> Result<Self, TemplateError> {
        Ok(Self {
            submissions_dir: data_dir.join("submissions"),
            outbox_path: data_dir.join("notifications.log"),
            templates: TemplateEngine::new()?,
        })
    }

    pub fn submissions_dir(&self) -> &PathBuf {
        &self.submissions_dir
    }
}

fn rejected(error: impl std::fmt::Display) -> GatewayError {
    GatewayError::Rejected(error.to_string())
}

impl SubmissionGateway for DirectoryGateway {
    fn persist(&mut self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, GatewayError> {
        let reference_id = Uuid::new_v4().to_string();

        // Flat row: every answer as a column, plus server-set metadata.
        let mut row = match payload.record.to_value().map_err(rejected)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        row.insert("id".into(), Value::String(reference_id.clone()));
        row.insert("form_id".into(), Value::String(payload.form_id.clone()));
        row.insert(
            "form_version".into(),
            Value::String(payload.form_version.clone()),
        );
        row.insert(
            "submission_date".into(),
            Value::String(Utc::now().to_rfc3339()),
        );

        fs::create_dir_all(&self.submissions_dir).map_err(rejected)?;
        let path = self.submissions_dir.join(format!("{reference_id}.json"));
        let body = serde_json::to_vec_pretty(&Value::Object(row)).map_err(rejected)?;
        fs::write(&path, body).map_err(rejected)?;

        tracing::info!(reference = %reference_id, "submission persisted");
        Ok(SubmissionReceipt { reference_id })
    }

    fn notify(&mut self, request: &NotifyRequest) -> bool {
        let line = match self.templates.render_notification(&NotificationContext {
            display_name: request.display_name.clone(),
            email: request.email.clone(),
            timestamp: Utc::now().to_rfc3339(),
        }) {
            Ok(line) => line,
            Err(error) => {
                tracing::warn!(%error, "notification render failed");
                return false;
            }
        };

        let appended = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.outbox_path)
            .and_then(|mut file| writeln!(file, "{line}"));
        match appended {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(%error, "notification append failed");
                false
            }
        }
    }
}
