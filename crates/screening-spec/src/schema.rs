//! JSON Schema generation for answer records and the registry itself.

use serde_json::{Map, Value, json};

use crate::registry::{FieldKind, FieldSpec, Registry};

/// JSON Schema describing a complete answer object for `registry`:
/// one typed property per field, required lists drawn from every section.
pub fn answers_schema(registry: &Registry) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in registry.fields() {
        properties.insert(field.name.clone(), field_schema(field));
        if field.required {
            required.push(Value::String(field.name.clone()));
        }
    }

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": registry.title,
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

/// Schema of the registry document itself, derived from the spec types.
pub fn registry_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(Registry)).unwrap_or_default()
}

fn field_schema(field: &FieldSpec) -> Value {
    let mut schema = match field.kind {
        FieldKind::Text | FieldKind::LongText => json!({ "type": "string" }),
        FieldKind::Integer => json!({ "type": "integer" }),
        FieldKind::Rating => json!({ "type": "integer", "minimum": 0, "maximum": 10 }),
        FieldKind::Boolean | FieldKind::Declaration => json!({ "type": "boolean" }),
        FieldKind::Choice => json!({
            "type": "string",
            "enum": field.choices.clone().unwrap_or_default(),
        }),
    };

    if let Some(map) = schema.as_object_mut() {
        map.insert("title".into(), Value::String(field.label.clone()));
        if let Some(limit) = field.word_limit {
            map.insert(
                "description".into(),
                Value::String(format!("At most {limit} words.")),
            );
        }
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::candidate_profile;

    #[test]
    fn schema_contains_required_properties() {
        let registry = candidate_profile();
        let schema = answers_schema(&registry);
        let props = schema["properties"].as_object().expect("properties");
        assert!(props.contains_key("full_name"));
        assert!(props.contains_key("declaration_accurate"));
        let required = schema["required"].as_array().expect("required");
        assert!(required.iter().any(|value| value.as_str() == Some("email")));
        assert!(
            !required
                .iter()
                .any(|value| value.as_str() == Some("evidence_link1"))
        );
    }

    #[test]
    fn choice_fields_enumerate_their_options() {
        let registry = candidate_profile();
        let schema = answers_schema(&registry);
        let options = schema["properties"]["comp_alignment"]["enum"]
            .as_array()
            .expect("enum");
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn registry_schema_is_an_object_schema() {
        let schema = registry_schema();
        assert!(schema.get("properties").is_some() || schema.get("$defs").is_some());
    }
}
