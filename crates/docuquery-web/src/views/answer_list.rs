//! Analysis results card.

use minijinja::{context, Error};
use serde::Serialize;

use docuquery_common::{truncate_display, AnalysisResult};

use super::render;

#[derive(Serialize)]
struct Item<'a> {
    question: &'a str,
    answer: &'a str,
}

pub fn render_answer_list(results: Option<&AnalysisResult>, is_loading: bool) -> Result<String, Error> {
    let Some(results) = results.filter(|_| !is_loading) else {
        return render("answer_list.html", context! { is_loading, items => Vec::<Item>::new() });
    };

    let items: Vec<Item> = results.questions.iter().enumerate()
        .map(|(i, question)| Item { question, answer: results.answer_for(i) })
        .collect();

    render("answer_list.html", context! {
        is_loading,
        items,
        processing_time_ms => results.processing_time_ms.filter(|ms| *ms > 0),
        source => results.document.as_deref().map(|doc| truncate_display(doc, 60)),
        completed_at => results.completed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    })
}
