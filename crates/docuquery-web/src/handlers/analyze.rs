//! Analysis submission: forwards the document and questions to the API.

use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde_json::json;
use tracing::{error, info, warn};

use docuquery_common::{AnalysisRequest, DocuQueryError};

use crate::state::{AnalysisJob, AnalysisStart, AppEvent, SharedState, Toast};

pub async fn analyze_submit(State(state): State<SharedState>) -> Redirect {
    start_analysis(&state).await;
    Redirect::to("/")
}

/// Start an analysis for the current session, if there is anything to send.
/// The request runs in a background task; the page polls until it finishes.
pub async fn start_analysis(state: &SharedState) {
    let start = state.session.write().await.begin_analysis();
    match start {
        AnalysisStart::Ignored => {}
        AnalysisStart::NoDocument => {
            state.notify(Toast::error("No Document", "Please upload a document first.")).await;
        }
        AnalysisStart::Started(job) => {
            info!(job_id = %job.id, questions = job.questions.len(), "Starting analysis");
            let _ = state.event_tx.send(AppEvent::AnalysisStarted {
                job_id: job.id,
                questions: job.questions.len(),
            });
            let state = state.clone();
            tokio::spawn(async move {
                run_analysis(&state, job).await;
            });
        }
    }
}

/// Send one request and record its outcome in the session.
pub async fn run_analysis(state: &SharedState, job: AnalysisJob) {
    let started = Instant::now();
    let outcome = state.backend.analyze(&job.request).await;
    let processing_time_ms = started.elapsed().as_millis() as u64;
    let job_id = job.id;

    let outcome = match outcome {
        Ok(resp) => {
            info!(%job_id, answers = resp.answers.len(), processing_time_ms, "Analysis complete");
            let _ = state.event_tx.send(AppEvent::AnalysisComplete {
                job_id,
                answers: resp.answers.len(),
                processing_time_ms,
            });
            Ok(resp.answers)
        }
        Err(e) => {
            error!(%job_id, "Analysis failed: {}", e);
            let message = e.user_message();
            let _ = state.event_tx.send(AppEvent::AnalysisFailed { job_id, message: message.clone() });
            Err(message)
        }
    };

    let toast = state.session.write().await.finish_analysis(job, outcome, processing_time_ms);
    state.broadcast_toast(&toast);
}

/// JSON passthrough for scripts: `AnalysisRequest` in, `AnalysisResponse` out.
pub async fn api_analyze(
    State(state): State<SharedState>,
    Json(mut payload): Json<AnalysisRequest>,
) -> impl IntoResponse {
    payload.questions = payload.questions
        .iter()
        .map(|q| q.trim())
        .filter(|q| !q.is_empty())
        .map(String::from)
        .collect();

    if payload.documents.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "Please upload a document first."})))
            .into_response();
    }
    if payload.questions.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "At least one question is required."})))
            .into_response();
    }

    match state.backend.analyze(&payload).await {
        Ok(resp) => Json(resp).into_response(),
        Err(DocuQueryError::Http(e)) if e.is_connect() || e.is_timeout() => {
            warn!("Analysis API unreachable: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"message": "Analysis API unavailable"})))
                .into_response()
        }
        Err(e) => {
            warn!("Analysis API error: {}", e);
            (StatusCode::BAD_GATEWAY, Json(json!({"message": e.user_message()}))).into_response()
        }
    }
}
