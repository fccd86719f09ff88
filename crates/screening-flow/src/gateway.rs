use screening_spec::AnswerRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field whose value names the candidate in notifications.
pub const DISPLAY_NAME_FIELD: &str = "full_name";

/// Frozen copy of the record handed to the gateway at final submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub form_id: String,
    pub form_version: String,
    pub record: AnswerRecord,
}

/// Assigned identifier returned by a successful persist; shown to the
/// candidate as their reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub reference_id: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Minimal payload for the fire-and-forget notification hook. The gateway
/// stamps the delivery timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyRequest {
    pub email: String,
    pub display_name: String,
}

/// Remote datastore plus webhook, reduced to their success/failure
/// contract. Both calls are attempted exactly once per submit.
pub trait SubmissionGateway {
    /// Writes the full record as a single new row; the assigned identifier
    /// comes back as the user-facing reference.
    fn persist(&mut self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, GatewayError>;

    /// Fire-and-forget notification; reduced to delivered yes/no. A failed
    /// delivery never blocks the submission.
    fn notify(&mut self, request: &NotifyRequest) -> bool;
}
