use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::registry::field::FieldSpec;

/// One ordered page of the form and the fields it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SectionSpec {
    /// 1-based ordinal position.
    pub number: u8,
    pub slug: String,
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

impl SectionSpec {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|field| field.required)
    }
}
