use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;

use crate::record::AnswerRecord;
use crate::registry::{FieldKind, Registry, SectionSpec};

/// Field name (or aggregate key) to human-readable message.
pub type ErrorMap = BTreeMap<String, String>;

/// Outcome of validating one section. Pure data; an invalid section is a
/// normal return value, never a fault.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    pub section: u8,
    pub valid: bool,
    pub errors: ErrorMap,
}

pub const EMAIL_FIELD: &str = "email";

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const REQUIRED_MESSAGE: &str = "This field is required";
const EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Validates the fields owned by `section` plus the cross-cutting checks
/// (email shape, allocation sums for the owning section, word ceilings).
/// All checks accumulate; the caller sees every violation at once.
pub fn validate_section(registry: &Registry, section: u8, record: &AnswerRecord) -> SectionReport {
    let mut errors = ErrorMap::new();

    if let Some(spec) = registry.section(section) {
        check_required(spec, record, &mut errors);
        check_kinds(spec, record, &mut errors);
    }
    check_email(record, &mut errors);
    check_allocations(registry, section, record, &mut errors);
    check_word_limits(registry, record, &mut errors);

    SectionReport {
        section,
        valid: errors.is_empty(),
        errors,
    }
}

/// One report per section, in order. Overall success is the logical AND of
/// every report.
pub fn validate_all(registry: &Registry, record: &AnswerRecord) -> Vec<SectionReport> {
    (1..=registry.section_count())
        .map(|section| validate_section(registry, section, record))
        .collect()
}

/// Lowest-numbered failing section, if any.
pub fn first_invalid(reports: &[SectionReport]) -> Option<u8> {
    reports
        .iter()
        .find(|report| !report.valid)
        .map(|report| report.section)
}

/// Whitespace-token count used for word ceilings.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn check_required(spec: &SectionSpec, record: &AnswerRecord, errors: &mut ErrorMap) {
    for field in spec.required_fields() {
        let missing = match field.kind {
            FieldKind::Text | FieldKind::LongText | FieldKind::Choice => {
                record.text(&field.name).trim().is_empty()
            }
            // Zero is "unset" only on the rating scale; a plain integer
            // answer of zero is legal.
            FieldKind::Rating => record.integer(&field.name) == 0,
            FieldKind::Declaration => !record.flag(&field.name),
            FieldKind::Integer | FieldKind::Boolean => false,
        };
        if missing {
            errors.insert(field.name.clone(), REQUIRED_MESSAGE.to_string());
        }
    }
}

fn check_kinds(spec: &SectionSpec, record: &AnswerRecord, errors: &mut ErrorMap) {
    for field in &spec.fields {
        let Some(value) = record.get(&field.name) else {
            continue;
        };
        if !value.matches_kind(field.kind) {
            errors.insert(
                field.name.clone(),
                "Unexpected value for this field".to_string(),
            );
            continue;
        }
        match field.kind {
            FieldKind::Rating => {
                let rating = record.integer(&field.name);
                if rating != 0 && !(1..=10).contains(&rating) {
                    errors.insert(
                        field.name.clone(),
                        "Rating must be between 1 and 10".to_string(),
                    );
                }
            }
            FieldKind::Choice => {
                let text = record.text(&field.name);
                if !text.is_empty() && !field.has_choice(text) {
                    errors.insert(
                        field.name.clone(),
                        "Select one of the listed options".to_string(),
                    );
                }
            }
            _ => {}
        }
    }
}

fn check_email(record: &AnswerRecord, errors: &mut ErrorMap) {
    let email = record.text(EMAIL_FIELD);
    if !email.is_empty()
        && let Ok(regex) = Regex::new(EMAIL_PATTERN)
        && !regex.is_match(email)
    {
        errors.insert(EMAIL_FIELD.to_string(), EMAIL_MESSAGE.to_string());
    }
}

fn check_allocations(
    registry: &Registry,
    section: u8,
    record: &AnswerRecord,
    errors: &mut ErrorMap,
) {
    for rule in registry.allocations_for(section) {
        let sum: i64 = rule.fields.iter().map(|field| record.integer(field)).sum();
        if sum != rule.total {
            errors.insert(
                rule.key.clone(),
                format!(
                    "{} values must sum to exactly {} points",
                    rule.label, rule.total
                ),
            );
        }
    }
}

fn check_word_limits(registry: &Registry, record: &AnswerRecord, errors: &mut ErrorMap) {
    for field in registry.fields() {
        let Some(limit) = field.word_limit else {
            continue;
        };
        let text = record.text(&field.name);
        if !text.trim().is_empty() && word_count(text) > limit {
            errors.insert(field.name.clone(), format!("Must be {limit} words or less"));
        }
    }
}
