//! HTML components rendered from the `templates/` directory with minijinja.
//!
//! Templates are embedded at build time. Every name ends in `.html`, so the
//! environment auto-escapes all interpolated values; pre-rendered fragments are
//! passed in with [`Value::from_safe_string`].

use std::sync::OnceLock;

use minijinja::{Environment, Error, Value};
use serde::Serialize;
use tracing::error;

pub mod home;
pub mod upload_form;
pub mod question_form;
pub mod answer_list;
pub mod loader;
pub mod toast;

const TEMPLATES: &[(&str, &str)] = &[
    ("header.html", include_str!("../../templates/header.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("upload_form.html", include_str!("../../templates/upload_form.html")),
    ("question_form.html", include_str!("../../templates/question_form.html")),
    ("answer_list.html", include_str!("../../templates/answer_list.html")),
    ("loader.html", include_str!("../../templates/loader.html")),
    ("toasts.html", include_str!("../../templates/toasts.html")),
];

/// Shared template environment, built on first use.
pub fn environment() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            if let Err(e) = env.add_template(name, source) {
                error!(template = name, "Template failed to compile: {}", e);
            }
        }
        env
    })
}

pub(crate) fn render<S: Serialize>(name: &str, ctx: S) -> Result<String, Error> {
    environment().get_template(name)?.render(ctx)
}

/// Embed already-rendered HTML without escaping it again.
pub(crate) fn fragment(html: String) -> Value {
    Value::from_safe_string(html)
}
