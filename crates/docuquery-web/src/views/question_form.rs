//! Query analysis card with sample questions and editable slots.
//!
//! The add and analyze buttons are only disabled while the form is locked (no
//! document, or a request in flight). Otherwise they stay clickable and are
//! marked `is-idle` when the list gives them nothing to do; `main.js` keeps that
//! mark current as the user types, and the handlers ignore idle submissions.

use minijinja::{context, Error};
use serde::Serialize;

use docuquery_client::{QuestionList, SAMPLE_QUESTIONS};
use docuquery_common::truncate_display;

use super::render;

#[derive(Serialize)]
struct Slot<'a> {
    text: &'a str,
    removable: bool,
}

pub fn render_question_form(questions: &QuestionList, is_loading: bool, document_loaded: bool) -> Result<String, Error> {
    let slots: Vec<Slot> = questions.slots().iter().enumerate()
        .map(|(i, text)| Slot { text, removable: questions.is_removable(i) })
        .collect();

    let pending: Vec<String> = questions.valid_questions().iter()
        .map(|q| truncate_display(q, 50))
        .collect();

    render("question_form.html", context! {
        slots,
        pending,
        is_loading,
        document_loaded,
        samples => SAMPLE_QUESTIONS,
        locked => !document_loaded || is_loading,
        can_add => questions.can_add(),
        can_submit => questions.can_submit(),
    })
}
