//! Document submission by public URL or by direct file upload.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Redirect,
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};

use docuquery_client::upload::{self, UploadRejection};
use docuquery_common::DocumentSource;

use crate::state::{AppEvent, SharedState, Toast, UploadMode};

// ── Form input ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UrlForm {
    #[serde(default)]
    pub document_url: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

pub async fn document_url(
    State(state): State<SharedState>,
    Form(form): Form<UrlForm>,
) -> Redirect {
    let url = form.document_url.trim();
    if url.is_empty() || state.session.read().await.is_loading {
        return Redirect::to("/");
    }

    if !is_web_url(url) {
        state.notify(Toast::error("Invalid URL", "Please enter a valid http(s) document URL.")).await;
        return Redirect::to("/");
    }

    info!(url, "Document URL submitted");
    load_document(
        &state,
        DocumentSource::Url(url.to_string()),
        Toast::info(
            "Document Loaded",
            "Document URL has been set. You can now add questions for analysis.",
        ),
    )
    .await;
    Redirect::to("/")
}

pub async fn document_file(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Redirect {
    let back = "/?mode=file";
    if state.session.read().await.is_loading {
        return Redirect::to(back);
    }

    let (file_name, bytes) = match read_file_field(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return Redirect::to(back),
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            let rejection = UploadRejection::TooLarge {
                size: state.upload_policy.max_bytes + 1,
                limit: state.upload_policy.limit_label(),
            };
            state.notify(Toast::error(rejection.title(), rejection.to_string())).await;
            return Redirect::to(back);
        }
        Err(e) => {
            warn!("Error processing file: {}", e.body_text());
            state.notify(Toast::error("Error", "Could not process the file for upload.")).await;
            return Redirect::to(back);
        }
    };

    match upload::prepare(&file_name, &bytes, &state.upload_policy) {
        Ok(prepared) => {
            info!(file = %prepared.file_name, size = prepared.size, checksum = %prepared.checksum, "File ready");
            let toast = Toast::info(
                "File Ready",
                format!("{} is ready to be analyzed.", prepared.file_name),
            );
            load_document(&state, DocumentSource::Upload(prepared), toast).await;
        }
        Err(rejection) => {
            warn!(file = %file_name, "Upload rejected: {}", rejection);
            state.notify(Toast::error(rejection.title(), rejection.to_string())).await;
        }
    }
    Redirect::to(back)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

async fn load_document(state: &SharedState, source: DocumentSource, toast: Toast) {
    let event = AppEvent::DocumentLoaded {
        name: source.display_name().to_string(),
        upload: source.is_upload(),
    };
    {
        let mut session = state.session.write().await;
        if source.is_upload() {
            session.upload_mode = UploadMode::File;
        }
        session.set_document(source);
        session.push_toast(toast.clone());
    }
    let _ = state.event_tx.send(event);
    state.broadcast_toast(&toast);
}

/// First `file` field carrying a file name; `None` when nothing was chosen.
async fn read_file_field(
    multipart: &mut Multipart,
) -> Result<Option<(String, Vec<u8>)>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Ok(None),
        };
        let bytes = field.bytes().await?;
        return Ok(Some((file_name, bytes.to_vec())));
    }
    Ok(None)
}

fn is_web_url(raw: &str) -> bool {
    url::Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}
