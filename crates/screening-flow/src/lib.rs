#![allow(missing_docs)]

pub mod gateway;
pub mod session;
pub mod store;

pub use gateway::{
    DISPLAY_NAME_FIELD, GatewayError, NotifyRequest, SubmissionGateway, SubmissionPayload,
    SubmissionReceipt,
};
pub use session::{Advance, EditError, Phase, Session, SessionError, SubmitError};
pub use store::{DraftStore, MemoryDraftStore, StoreError};
