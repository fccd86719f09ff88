use serde_json::{Map, Value, json};

use crate::record::AnswerRecord;
use crate::registry::Registry;
use crate::validate::ErrorMap;

/// Progress counters exposed to renderers.
#[derive(Debug, Clone)]
pub struct RenderProgress {
    pub current: u8,
    pub completed: usize,
    pub total: usize,
}

/// Describes a single field for render outputs.
#[derive(Debug, Clone)]
pub struct RenderField {
    pub name: String,
    pub label: String,
    pub kind: &'static str,
    pub required: bool,
    pub value: String,
    pub error: Option<String>,
    pub choices: Option<Vec<String>>,
    pub word_limit: Option<usize>,
}

/// Collected payload used by both text and JSON renderers.
#[derive(Debug, Clone)]
pub struct SectionPayload {
    pub form_id: String,
    pub form_title: String,
    pub section: u8,
    pub section_title: String,
    pub progress: RenderProgress,
    pub fields: Vec<RenderField>,
}

/// Build the renderer payload for one section from the registry, the
/// current record, the section's error map, and the completion vector.
pub fn build_section_payload(
    registry: &Registry,
    section: u8,
    record: &AnswerRecord,
    errors: &ErrorMap,
    completed: &[bool],
) -> SectionPayload {
    let spec = registry.section(section);

    let fields = spec
        .map(|spec| {
            spec.fields
                .iter()
                .map(|field| RenderField {
                    name: field.name.clone(),
                    label: field.label.clone(),
                    kind: field.kind.as_str(),
                    required: field.required,
                    value: record
                        .get(&field.name)
                        .map(|value| value.display())
                        .unwrap_or_default(),
                    error: errors.get(&field.name).cloned(),
                    choices: field.choices.clone(),
                    word_limit: field.word_limit,
                })
                .collect()
        })
        .unwrap_or_default();

    SectionPayload {
        form_id: registry.id.clone(),
        form_title: registry.title.clone(),
        section,
        section_title: spec.map(|spec| spec.title.clone()).unwrap_or_default(),
        progress: RenderProgress {
            current: section,
            completed: completed.iter().filter(|done| **done).count(),
            total: registry.section_count() as usize,
        },
        fields,
    }
}

/// Render the payload as human-friendly text.
pub fn render_text(payload: &SectionPayload) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Form: {} ({})",
        payload.form_title, payload.form_id
    ));
    lines.push(format!(
        "Section {}/{}: {}",
        payload.section, payload.progress.total, payload.section_title
    ));
    lines.push(format!(
        "Progress: {}/{} sections complete",
        payload.progress.completed, payload.progress.total
    ));

    lines.push("Fields:".to_string());
    for field in &payload.fields {
        let mut entry = format!(" - {} ({})", field.name, field.label);
        if field.required {
            entry.push_str(" [required]");
        }
        if !field.value.is_empty() {
            entry.push_str(&format!(" = {}", field.value));
        }
        lines.push(entry);
        if let Some(choices) = &field.choices {
            lines.push(format!("   Choices: {}", choices.join(" / ")));
        }
        if let Some(limit) = field.word_limit {
            lines.push(format!("   Word limit: {limit}"));
        }
        if let Some(error) = &field.error {
            lines.push(format!("   ! {error}"));
        }
    }

    lines.join("\n")
}

/// Render the payload as a structured JSON-friendly value.
pub fn render_json_ui(payload: &SectionPayload) -> Value {
    let fields = payload
        .fields
        .iter()
        .map(|field| {
            let mut map = Map::new();
            map.insert("name".into(), Value::String(field.name.clone()));
            map.insert("label".into(), Value::String(field.label.clone()));
            map.insert("type".into(), Value::String(field.kind.to_string()));
            map.insert("required".into(), Value::Bool(field.required));
            map.insert("value".into(), Value::String(field.value.clone()));
            if let Some(error) = &field.error {
                map.insert("error".into(), Value::String(error.clone()));
            }
            if let Some(choices) = &field.choices {
                map.insert(
                    "choices".into(),
                    Value::Array(
                        choices
                            .iter()
                            .map(|choice| Value::String(choice.clone()))
                            .collect(),
                    ),
                );
            }
            if let Some(limit) = field.word_limit {
                map.insert("word_limit".into(), Value::Number(limit.into()));
            }
            Value::Object(map)
        })
        .collect::<Vec<_>>();

    json!({
        "form_id": payload.form_id,
        "form_title": payload.form_title,
        "section": payload.section,
        "section_title": payload.section_title,
        "progress": {
            "current": payload.progress.current,
            "completed": payload.progress.completed,
            "total": payload.progress.total,
        },
        "fields": fields,
    })
}
