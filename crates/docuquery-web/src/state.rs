//! Shared application state for the web server.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use docuquery_client::{AnalysisBackend, QuestionList, UploadPolicy};
use docuquery_common::{AnalysisRequest, AnalysisResult, DocumentSource};

/// Events pushed to connected clients via SSE.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A document URL or upload became the active document
    DocumentLoaded { name: String, upload: bool },
    /// An analysis request was sent
    AnalysisStarted { job_id: Uuid, questions: usize },
    /// Answers arrived
    AnalysisComplete { job_id: Uuid, answers: usize, processing_time_ms: u64 },
    /// The request failed
    AnalysisFailed { job_id: Uuid, message: String },
    /// Mirror of a toast shown on the page
    Notification { title: String, description: String, variant: ToastVariant },
}

impl AppEvent {
    /// SSE `event:` name, the same as the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            AppEvent::DocumentLoaded { .. } => "document_loaded",
            AppEvent::AnalysisStarted { .. } => "analysis_started",
            AppEvent::AnalysisComplete { .. } => "analysis_complete",
            AppEvent::AnalysisFailed { .. } => "analysis_failed",
            AppEvent::Notification { .. } => "notification",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// One-shot notification shown on the next page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: ToastVariant::Default }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: ToastVariant::Destructive }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    #[default]
    Url,
    File,
}

/// Transient UI state for the single local user.
#[derive(Debug, Default)]
pub struct Session {
    pub document: Option<DocumentSource>,
    pub upload_mode: UploadMode,
    pub questions: QuestionList,
    pub results: Option<AnalysisResult>,
    pub is_loading: bool,
    pub toasts: Vec<Toast>,
}

/// Outcome of asking the session to start an analysis.
#[derive(Debug)]
pub enum AnalysisStart {
    /// Nothing to submit, or a request is already in flight.
    Ignored,
    /// Questions present but no document loaded.
    NoDocument,
    Started(AnalysisJob),
}

/// Everything the background request needs.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub id: Uuid,
    pub request: AnalysisRequest,
    pub questions: Vec<String>,
    pub document_name: String,
}

impl Session {
    /// Make `source` the active document. Earlier results no longer apply.
    pub fn set_document(&mut self, source: DocumentSource) {
        self.document = Some(source);
        self.results = None;
    }

    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }

    pub fn document_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn begin_analysis(&mut self) -> AnalysisStart {
        let questions = self.questions.valid_questions();
        if questions.is_empty() || self.is_loading {
            return AnalysisStart::Ignored;
        }
        let Some(document) = &self.document else {
            return AnalysisStart::NoDocument;
        };

        self.is_loading = true;
        AnalysisStart::Started(AnalysisJob {
            id: Uuid::new_v4(),
            request: AnalysisRequest::for_source(document, questions.clone()),
            questions,
            document_name: document.display_name().to_string(),
        })
    }

    /// Record the outcome of a finished request and return the toast describing it.
    pub fn finish_analysis(
        &mut self,
        job: AnalysisJob,
        outcome: Result<Vec<String>, String>,
        processing_time_ms: u64,
    ) -> Toast {
        self.is_loading = false;
        let toast = match outcome {
            Ok(answers) => {
                let toast = Toast::info(
                    "Analysis Complete",
                    format!(
                        "Successfully analyzed {} questions in {}ms",
                        job.questions.len(),
                        processing_time_ms
                    ),
                );
                self.results = Some(AnalysisResult::new(
                    job.questions,
                    answers,
                    processing_time_ms,
                    job.document_name,
                ));
                toast
            }
            Err(message) => Toast::error("Analysis Failed", message),
        };
        self.push_toast(toast.clone());
        toast
    }
}

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub backend: Arc<dyn AnalysisBackend>,
    pub upload_policy: UploadPolicy,
    pub session: RwLock<Session>,
    /// Broadcast channel for SSE push events
    pub event_tx: broadcast::Sender<AppEvent>,
}

impl AppState {
    pub fn new(backend: Arc<dyn AnalysisBackend>, upload_policy: UploadPolicy) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            backend,
            upload_policy,
            session: RwLock::new(Session::default()),
            event_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_tx.subscribe()
    }

    /// Queue a toast for the page and mirror it to SSE subscribers.
    pub async fn notify(&self, toast: Toast) {
        self.broadcast_toast(&toast);
        self.session.write().await.push_toast(toast);
    }

    pub fn broadcast_toast(&self, toast: &Toast) {
        let _ = self.event_tx.send(AppEvent::Notification {
            title: toast.title.clone(),
            description: toast.description.clone(),
            variant: toast.variant,
        });
    }
}

pub type SharedState = Arc<AppState>;

#[cfg(test)]
mod tests {
    use super::*;
    use docuquery_common::models::MISSING_ANSWER;

    fn session_with_document() -> Session {
        let mut session = Session::default();
        session.set_document(DocumentSource::Url("https://example.com/p.pdf".into()));
        session
    }

    fn job(questions: &[&str]) -> AnalysisJob {
        AnalysisJob {
            id: Uuid::new_v4(),
            request: AnalysisRequest {
                documents: "https://example.com/p.pdf".into(),
                questions: questions.iter().map(|q| q.to_string()).collect(),
                checksum: None,
            },
            questions: questions.iter().map(|q| q.to_string()).collect(),
            document_name: "https://example.com/p.pdf".into(),
        }
    }

    #[test]
    fn test_event_kind_matches_type_tag() {
        let events = [
            AppEvent::DocumentLoaded { name: "p.pdf".into(), upload: true },
            AppEvent::AnalysisStarted { job_id: Uuid::new_v4(), questions: 2 },
            AppEvent::AnalysisComplete { job_id: Uuid::new_v4(), answers: 2, processing_time_ms: 10 },
            AppEvent::AnalysisFailed { job_id: Uuid::new_v4(), message: "down".into() },
            AppEvent::Notification {
                title: "t".into(),
                description: "d".into(),
                variant: ToastVariant::Default,
            },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.kind());
        }
    }

    #[test]
    fn test_empty_question_list_does_not_start() {
        let mut session = session_with_document();
        assert!(matches!(session.begin_analysis(), AnalysisStart::Ignored));
        assert!(!session.is_loading);
    }

    #[test]
    fn test_questions_without_document_is_no_document() {
        let mut session = Session::default();
        session.questions.update(0, "What is covered?");
        assert!(matches!(session.begin_analysis(), AnalysisStart::NoDocument));
        assert!(!session.is_loading);
    }

    #[test]
    fn test_begin_builds_request_and_sets_loading() {
        let mut session = session_with_document();
        session.questions.replace_all(vec!["  a ", "", "b"]);
        let AnalysisStart::Started(job) = session.begin_analysis() else {
            panic!("analysis should start");
        };
        assert!(session.is_loading);
        assert_eq!(job.request.questions, vec!["a", "b"]);
        assert_eq!(job.request.documents, "https://example.com/p.pdf");
        // a second submission while loading is ignored
        assert!(matches!(session.begin_analysis(), AnalysisStart::Ignored));
    }

    #[test]
    fn test_finish_success_stores_results() {
        let mut session = session_with_document();
        session.is_loading = true;
        let toast = session.finish_analysis(job(&["a", "b"]), Ok(vec!["A".into()]), 42);
        assert!(!session.is_loading);
        assert_eq!(toast.title, "Analysis Complete");
        assert_eq!(toast.description, "Successfully analyzed 2 questions in 42ms");
        let results = session.results.as_ref().unwrap();
        assert_eq!(results.processing_time_ms, Some(42));
        assert_eq!(results.answer_for(1), MISSING_ANSWER);
        assert_eq!(session.take_toasts().len(), 1);
        assert!(session.toasts.is_empty());
    }

    #[test]
    fn test_finish_failure_keeps_previous_state() {
        let mut session = session_with_document();
        session.is_loading = true;
        let toast = session.finish_analysis(job(&["a"]), Err("HTTP 500: Internal Server Error".into()), 5);
        assert_eq!(toast.variant, ToastVariant::Destructive);
        assert_eq!(toast.description, "HTTP 500: Internal Server Error");
        assert!(session.results.is_none());
        assert!(!session.is_loading);
    }

    #[test]
    fn test_new_document_clears_results() {
        let mut session = session_with_document();
        session.finish_analysis(job(&["a"]), Ok(vec!["A".into()]), 1);
        assert!(session.results.is_some());
        session.set_document(DocumentSource::Url("https://example.com/other.pdf".into()));
        assert!(session.results.is_none());
    }
}
