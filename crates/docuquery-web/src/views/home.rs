//! Home page shell.

use minijinja::{context, Error};

use docuquery_client::UploadPolicy;
use docuquery_common::truncate_display;

use super::answer_list::render_answer_list;
use super::loader::{render_loader, LoaderStage};
use super::question_form::render_question_form;
use super::toast::render_toasts;
use super::upload_form::render_upload_form;
use super::{fragment, render};
use crate::state::{Session, Toast};

pub fn render_home(session: &Session, toasts: &[Toast], policy: &UploadPolicy) -> Result<String, Error> {
    // Polls while the request runs; main.js reloads sooner on the SSE event.
    let results = if session.is_loading {
        render_loader(LoaderStage::Analysis, Some("Analyzing document with AI..."))?
    } else {
        render_answer_list(session.results.as_ref(), false)?
    };

    render("home.html", context! {
        is_loading => session.is_loading,
        document_name => session.document.as_ref().map(|doc| truncate_display(doc.display_name(), 50)),
        toasts => fragment(render_toasts(toasts)?),
        upload_form => fragment(render_upload_form(
            session.upload_mode,
            session.document.as_ref(),
            session.is_loading,
            policy,
        )?),
        question_form => fragment(render_question_form(
            &session.questions,
            session.is_loading,
            session.document_loaded(),
        )?),
        results => fragment(results),
    })
}
