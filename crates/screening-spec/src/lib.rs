#![allow(missing_docs)]

pub mod example;
pub mod record;
pub mod registry;
pub mod render;
pub mod schema;
pub mod template;
pub mod validate;

pub use example::example_record;
pub use record::{AnswerRecord, FieldValue, RecordError};
pub use registry::{
    AllocationRule, FieldKind, FieldSpec, Registry, RegistryError, SectionSpec, candidate_profile,
};
pub use render::{
    RenderField, RenderProgress, SectionPayload, build_section_payload, render_json_ui, render_text,
};
pub use schema::{answers_schema, registry_schema};
pub use template::{
    NotificationContext, ReceiptContext, TemplateEngine, TemplateError,
};
pub use validate::{
    EMAIL_FIELD, ErrorMap, SectionReport, first_invalid, validate_all, validate_section, word_count,
};
