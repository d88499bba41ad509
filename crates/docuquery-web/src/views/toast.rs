//! Toast stack.

use minijinja::{context, Error};

use super::render;
use crate::state::Toast;

pub fn render_toasts(toasts: &[Toast]) -> Result<String, Error> {
    render("toasts.html", context! { toasts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_toasts_renders_nothing() {
        assert!(render_toasts(&[]).unwrap().trim().is_empty());
    }

    #[test]
    fn test_destructive_toast_is_styled_and_escaped() {
        let html = render_toasts(&[
            Toast::info("Document Loaded", "ok"),
            Toast::error("Analysis Failed", "<script>"),
        ])
        .unwrap();
        assert!(html.contains(r#"class="toast" role="status""#));
        assert!(html.contains(r#"class="toast toast-destructive""#));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
