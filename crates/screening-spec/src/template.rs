//! Handlebars templates for the confirmation receipt and the notification
//! summary line.

use handlebars::{Handlebars, no_escape};
use serde::Serialize;
use thiserror::Error;

const RECEIPT_TEMPLATE: &str = "\
Application submitted successfully.
Thank you, {{display_name}}. Your submission has been received and will be
processed within 3 working days.
Reference ID: {{reference_id}}
";

const NOTIFICATION_TEMPLATE: &str =
    "New submission from {{display_name}} <{{email}}> at {{timestamp}}";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template registration failed: {0}")]
    Register(#[from] handlebars::TemplateError),
    #[error("template render failed: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Data for the post-submission receipt.
#[derive(Debug, Serialize)]
pub struct ReceiptContext {
    pub display_name: String,
    pub reference_id: String,
}

/// Data for the notification summary.
#[derive(Debug, Serialize)]
pub struct NotificationContext {
    pub display_name: String,
    pub email: String,
    pub timestamp: String,
}

pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        // Plain-text output; HTML entities would mangle names like O'Brien.
        registry.register_escape_fn(no_escape);
        registry.register_template_string("receipt", RECEIPT_TEMPLATE)?;
        registry.register_template_string("notification", NOTIFICATION_TEMPLATE)?;
        Ok(Self { registry })
    }

    pub fn render_receipt(&self, ctx: &ReceiptContext) -> Result<String, TemplateError> {
        Ok(self.registry.render("receipt", ctx)?)
    }

    pub fn render_notification(&self, ctx: &NotificationContext) -> Result<String, TemplateError> {
        Ok(self.registry.render("notification", ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_mentions_reference_id() {
        let engine = TemplateEngine::new().expect("engine");
        let receipt = engine
            .render_receipt(&ReceiptContext {
                display_name: "Ada O'Brien".into(),
                reference_id: "ref-123".into(),
            })
            .expect("render");
        assert!(receipt.contains("Reference ID: ref-123"));
        assert!(receipt.contains("Ada O'Brien"));
    }

    #[test]
    fn notification_is_a_single_line() {
        let engine = TemplateEngine::new().expect("engine");
        let line = engine
            .render_notification(&NotificationContext {
                display_name: "Ada".into(),
                email: "ada@example.com".into(),
                timestamp: "2026-01-01T00:00:00Z".into(),
            })
            .expect("render");
        assert_eq!(
            line,
            "New submission from Ada <ada@example.com> at 2026-01-01T00:00:00Z"
        );
    }
}
