use screening_spec::{ErrorMap, FieldKind, FieldSpec, FieldValue, SectionPayload, render_text};

/// Controls which bits of state the wizard prints.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Verbosity {
    /// Clean output: section header and prompts only.
    Clean,
    /// Verbose output: full section renders, cached error maps.
    Verbose,
}

impl Verbosity {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Clean
        }
    }

    pub fn is_verbose(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

/// Toolbar responsible for printing section state and prompts.
pub struct WizardPresenter {
    verbosity: Verbosity,
    header_printed: bool,
}

impl WizardPresenter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            header_printed: false,
        }
    }

    pub fn show_header(&mut self, form_title: &str, total_sections: u8) {
        if self.header_printed {
            return;
        }
        println!("Form: {form_title}");
        println!("Sections: {total_sections}. Blank keeps the current value; 'back' and 'exit' are always available.");
        self.header_printed = true;
    }

    pub fn show_section(&self, payload: &SectionPayload) {
        if self.verbosity.is_verbose() {
            println!("{}", render_text(payload));
        } else {
            println!();
            println!(
                "Section {}/{}: {}",
                payload.section, payload.progress.total, payload.section_title
            );
        }
    }

    pub fn show_errors(&self, errors: &ErrorMap) {
        if errors.is_empty() {
            return;
        }
        println!("Please fix the following before continuing:");
        for (field, message) in errors {
            println!("  {field} - {message}");
        }
    }

    pub fn show_prompt(&self, prompt: &PromptContext) {
        let mut line = format!("{}/{} {}", prompt.index, prompt.total, prompt.label);
        if prompt.required {
            line.push_str(" *");
        }
        if let Some(hint) = &prompt.hint {
            line.push(' ');
            line.push_str(hint);
        }
        println!("{line}");
        if !prompt.current.is_empty() {
            println!("  Current: {}", prompt.current);
        }
    }

    pub fn show_parse_error(&self, error: &AnswerParseError) {
        eprintln!("Invalid answer: {}", error.user_message);
        if self.verbosity.is_verbose()
            && let Some(debug) = &error.debug_message
        {
            eprintln!("  Expected: {debug}");
        }
    }

    pub fn show_receipt(&self, receipt: &str) {
        println!();
        println!("{receipt}");
    }
}

/// Context used to format a single field prompt.
pub struct PromptContext {
    pub index: usize,
    pub total: usize,
    pub label: String,
    pub required: bool,
    pub hint: Option<String>,
    pub current: String,
}

impl PromptContext {
    pub fn new(field: &FieldSpec, index: usize, total: usize, current: String) -> Self {
        Self {
            index,
            total,
            label: field.label.clone(),
            required: field.required,
            hint: kind_hint(field),
            current,
        }
    }
}

fn kind_hint(field: &FieldSpec) -> Option<String> {
    match field.kind {
        FieldKind::Boolean | FieldKind::Declaration => {
            Some("(yes/no, y/n, true/false)".to_string())
        }
        FieldKind::Integer => Some("(integer)".to_string()),
        FieldKind::Rating => Some("(1-10)".to_string()),
        FieldKind::Choice => field
            .choices
            .as_ref()
            .map(|choices| format!("({})", choices.join(" / "))),
        FieldKind::LongText => field
            .word_limit
            .map(|limit| format!("(at most {limit} words)")),
        FieldKind::Text => None,
    }
}

/// What the user asked for at a field prompt.
pub enum PromptOutcome {
    Value(FieldValue),
    Keep,
    Back,
    Exit,
}

/// Error produced when parsing answers from the user.
#[derive(Debug)]
pub struct AnswerParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl AnswerParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

/// Parse raw input for `field` according to its declared kind.
pub fn parse_answer(field: &FieldSpec, raw: &str) -> Result<FieldValue, AnswerParseError> {
    let trimmed = raw.trim();
    match field.kind {
        FieldKind::Text | FieldKind::LongText => Ok(FieldValue::Text(trimmed.to_string())),
        FieldKind::Integer | FieldKind::Rating => trimmed
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| {
                AnswerParseError::new(
                    "this answer must be a whole number",
                    Some("an integer such as 3".to_string()),
                )
            }),
        FieldKind::Boolean | FieldKind::Declaration => match trimmed.to_ascii_lowercase().as_str()
        {
            "yes" | "y" | "true" | "1" => Ok(FieldValue::Bool(true)),
            "no" | "n" | "false" | "0" => Ok(FieldValue::Bool(false)),
            _ => Err(AnswerParseError::new(
                "answer yes or no",
                Some("yes/no, y/n, true/false".to_string()),
            )),
        },
        FieldKind::Choice => {
            let choices = field.choices.as_deref().unwrap_or_default();
            if let Some(exact) = choices.iter().find(|choice| choice.as_str() == trimmed) {
                return Ok(FieldValue::Text(exact.clone()));
            }
            // A 1-based option number also works.
            if let Ok(index) = trimmed.parse::<usize>()
                && index >= 1
                && let Some(choice) = choices.get(index - 1)
            {
                return Ok(FieldValue::Text(choice.clone()));
            }
            Err(AnswerParseError::new(
                "pick one of the listed options",
                Some(choices.join(" / ")),
            ))
        }
    }
}
