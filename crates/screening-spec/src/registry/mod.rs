pub mod field;
pub mod profile;
pub mod section;

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use field::{FieldKind, FieldSpec};
pub use profile::candidate_profile;
pub use section::SectionSpec;

/// Cross-field rule: a set of integer fields whose values must sum to a fixed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AllocationRule {
    /// Error-map key for the aggregate message.
    pub key: String,
    /// Human label used to phrase the aggregate message.
    pub label: String,
    pub fields: Vec<String>,
    pub total: i64,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("field '{0}' is declared by more than one section")]
    DuplicateField(String),
    #[error("allocation rule '{0}' references unknown field '{1}'")]
    UnknownAllocationField(String, String),
    #[error("section ordinals are not a contiguous 1..=N run")]
    BadOrdinals,
}

/// Static declaration of every field, its section membership, and the
/// cross-field rules that apply regardless of section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Registry {
    pub id: String,
    pub title: String,
    pub version: String,
    pub sections: Vec<SectionSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allocations: Vec<AllocationRule>,
}

impl Registry {
    pub fn section(&self, number: u8) -> Option<&SectionSpec> {
        self.sections
            .iter()
            .find(|section| section.number == number)
    }

    pub fn section_count(&self) -> u8 {
        self.sections.len() as u8
    }

    /// Every declared field, in section order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.sections.iter().flat_map(|section| &section.fields)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().find(|field| field.name == name)
    }

    /// The section that owns `name` for required-field purposes.
    pub fn owning_section(&self, name: &str) -> Option<u8> {
        self.sections
            .iter()
            .find(|section| section.field(name).is_some())
            .map(|section| section.number)
    }

    /// Allocation rules whose fields live in `number`.
    pub fn allocations_for(&self, number: u8) -> impl Iterator<Item = &AllocationRule> {
        self.allocations.iter().filter(move |rule| {
            rule.fields
                .first()
                .and_then(|field| self.owning_section(field))
                == Some(number)
        })
    }

    /// Checks the registry's own integrity: each field declared by exactly
    /// one section, allocation rules referencing declared fields, and
    /// section ordinals forming 1..=N.
    pub fn verify(&self) -> Result<(), RegistryError> {
        let mut seen = BTreeSet::new();
        for field in self.fields() {
            if !seen.insert(field.name.as_str()) {
                return Err(RegistryError::DuplicateField(field.name.clone()));
            }
        }
        for rule in &self.allocations {
            for field in &rule.fields {
                if !seen.contains(field.as_str()) {
                    return Err(RegistryError::UnknownAllocationField(
                        rule.key.clone(),
                        field.clone(),
                    ));
                }
            }
        }
        for (index, section) in self.sections.iter().enumerate() {
            if usize::from(section.number) != index + 1 {
                return Err(RegistryError::BadOrdinals);
            }
        }
        Ok(())
    }
}
