use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kinds of answers a field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// Multi-line free text, optionally word-capped.
    LongText,
    /// Whole number; zero is a legal answer.
    Integer,
    /// Self-assessment on a 1-10 scale; zero means not answered yet.
    Rating,
    /// Plain yes/no toggle.
    Boolean,
    /// Affirmation that must be true when the field is required.
    Declaration,
    /// One value from a fixed option list.
    Choice,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::LongText => "long_text",
            FieldKind::Integer => "integer",
            FieldKind::Rating => "rating",
            FieldKind::Boolean => "boolean",
            FieldKind::Declaration => "declaration",
            FieldKind::Choice => "choice",
        }
    }

    /// Kinds whose answers are carried as text.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::LongText | FieldKind::Choice
        )
    }
}

/// Declaration of a single form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            word_limit: None,
            choices: None,
        }
    }

    pub fn has_choice(&self, value: &str) -> bool {
        self.choices
            .as_ref()
            .is_some_and(|choices| choices.iter().any(|choice| choice == value))
    }
}
