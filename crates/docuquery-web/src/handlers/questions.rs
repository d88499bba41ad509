//! Question form edits and sample questions. Also starts the analysis.

use axum::{extract::State, response::Redirect};
use axum_extra::extract::Form;
use serde::Deserialize;

use docuquery_client::SAMPLE_QUESTIONS;

use crate::handlers::analyze::start_analysis;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct QuestionsForm {
    /// Every slot of the list, in order. Repeated `questions` keys.
    #[serde(default)]
    pub questions: Vec<String>,
    /// `add` | `analyze` | `remove-<index>`
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, PartialEq, Eq)]
enum QuestionAction {
    Add,
    Remove(usize),
    Analyze,
    Save,
}

impl QuestionAction {
    fn parse(raw: &str) -> Self {
        match raw {
            "add" => QuestionAction::Add,
            "analyze" => QuestionAction::Analyze,
            other => other
                .strip_prefix("remove-")
                .and_then(|i| i.parse().ok())
                .map(QuestionAction::Remove)
                .unwrap_or(QuestionAction::Save),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SampleForm {
    pub index: usize,
}

pub async fn questions_submit(
    State(state): State<SharedState>,
    Form(form): Form<QuestionsForm>,
) -> Redirect {
    let analyze = {
        let mut session = state.session.write().await;
        if session.is_loading {
            return Redirect::to("/");
        }
        // Disabled inputs are not submitted; keep the list as it was.
        if !form.questions.is_empty() {
            session.questions.replace_all(form.questions);
        }
        match QuestionAction::parse(&form.action) {
            QuestionAction::Add => {
                session.questions.add();
                false
            }
            QuestionAction::Remove(i) => {
                session.questions.remove(i);
                false
            }
            QuestionAction::Analyze => true,
            QuestionAction::Save => false,
        }
    };

    if analyze {
        start_analysis(&state).await;
    }
    Redirect::to("/")
}

pub async fn questions_sample(
    State(state): State<SharedState>,
    axum::Form(form): axum::Form<SampleForm>,
) -> Redirect {
    let mut session = state.session.write().await;
    if session.document_loaded() && !session.is_loading {
        if let Some(question) = SAMPLE_QUESTIONS.get(form.index) {
            session.questions.add_sample(question);
        }
    }
    Redirect::to("/")
}
