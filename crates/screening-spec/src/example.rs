//! Example answer generation, used by the CLI `example` command and by
//! end-to-end tests that need a record passing every section.

use crate::record::{AnswerRecord, FieldValue};
use crate::registry::{FieldKind, Registry};
use crate::validate::EMAIL_FIELD;

/// A fully valid example record: every required field populated, ratings
/// mid-scale, allocations summing to their declared total, declarations
/// affirmed, word ceilings respected.
pub fn example_record(registry: &Registry) -> AnswerRecord {
    let mut record = AnswerRecord::with_defaults(registry);

    for field in registry.fields() {
        let value = match field.kind {
            FieldKind::Text if field.name == EMAIL_FIELD => {
                FieldValue::Text("candidate@example.com".into())
            }
            FieldKind::Text => FieldValue::Text(format!("Example {}", field.label)),
            FieldKind::LongText => {
                FieldValue::Text(format!("Concise example response for {}.", field.label))
            }
            FieldKind::Integer => FieldValue::Integer(3),
            FieldKind::Rating => FieldValue::Integer(6),
            FieldKind::Boolean | FieldKind::Declaration => FieldValue::Bool(true),
            FieldKind::Choice => FieldValue::Text(
                field
                    .choices
                    .as_ref()
                    .and_then(|choices| choices.first().cloned())
                    .unwrap_or_default(),
            ),
        };
        record.insert(field.name.clone(), value);
    }

    // Allocation fields get an even split, remainder on the first.
    for rule in &registry.allocations {
        if rule.fields.is_empty() {
            continue;
        }
        let share = rule.total / rule.fields.len() as i64;
        let remainder = rule.total - share * rule.fields.len() as i64;
        for (index, name) in rule.fields.iter().enumerate() {
            let value = if index == 0 { share + remainder } else { share };
            record.insert(name.clone(), FieldValue::Integer(value));
        }
    }

    record
}
