//! Prompt rendering.
//!
//! Prompts are minijinja templates rendered against a serializable context.
//! Undefined variables are an error rather than silently empty.

use crate::error::Result;
use minijinja::{Environment, UndefinedBehavior};
use once_cell::sync::Lazy;
use serde::Serialize;

static ENVIRONMENT: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env
});

/// Renders an inline template.
pub fn render<S: Serialize>(template: &str, context: S) -> Result<String> {
    Ok(ENVIRONMENT.render_str(template, context)?)
}

pub const CLASSIFY_TEMPLATE: &str = r#"You are a bank customer service bot.
Classify the bank inquiry into ONE category only:
{% for category in categories -%}
{{ category }}
{% endfor %}
Return ONLY the category text. No explanations.

Inquiry: {{ inquiry }}
Category:"#;

pub const ANSWER_TEMPLATE: &str = r#"You are a helpful bank support assistant.
Answer using ONLY the guidance below.
Keep it short and clear.

Guidance:
{{ guidance }}

Customer question:
{{ inquiry }}

Answer:"#;
