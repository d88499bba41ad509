//! Thin wrapper around the document-analysis HTTP API.
//!
//! One endpoint is used: `POST {base_url}/hackrx/run` with
//! `{ "documents": ..., "questions": [...] }`, answered by `{ "answers": [...] }`.
//! Every request carries JSON content negotiation headers and, when
//! configured, a bearer token.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use docuquery_common::config::ApiConfig;
use docuquery_common::{AnalysisRequest, AnalysisResponse, DocuQueryError, Result};

pub const ANALYZE_ENDPOINT: &str = "/hackrx/run";

// ── Response ──────────────────────────────────────────────────────────────────

/// Successful response body, decoded according to its content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Anything that can answer questions about a document.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse>;
    fn endpoint(&self) -> String;
}

// ── Client ────────────────────────────────────────────────────────────────────

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        Self::with_timeout(base_url, token, Duration::from_secs(120))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            client,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::with_timeout(
            config.base_url.clone(),
            config.token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request against `endpoint` and decode the reply.
    #[instrument(skip(self, body), fields(base_url = %self.base_url))]
    pub async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut req = self.client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.body(serde_json::to_vec(body)?);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let text = match resp.text().await {
                Ok(text) => text,
                Err(e) => {
                    warn!(status = status.as_u16(), "Failed to read error body: {}", e);
                    String::new()
                }
            };
            let message = extract_error_message(status, &text);
            warn!(status = status.as_u16(), %message, "API request failed");
            return Err(DocuQueryError::Api { status: status.as_u16(), message });
        }

        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);

        if is_json {
            Ok(ApiResponse::Json(resp.json().await?))
        } else {
            Ok(ApiResponse::Text(resp.text().await?))
        }
    }

    /// Submit a document reference and its questions.
    pub async fn analyze_documents(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        debug!(questions = request.questions.len(), "Submitting analysis request");
        let body = serde_json::to_value(request)?;
        let resp = self.make_request(Method::POST, ANALYZE_ENDPOINT, Some(&body)).await?;
        let answers = match resp {
            ApiResponse::Json(json) => answers_from_json(&json),
            ApiResponse::Text(_) => Vec::new(),
        };
        debug!(answers = answers.len(), "Analysis response received");
        Ok(AnalysisResponse { answers })
    }
}

#[async_trait]
impl AnalysisBackend for ApiClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        self.analyze_documents(request).await
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_ENDPOINT)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Pick the most useful message out of an error body.
/// JSON `message`, then JSON `detail`, then the raw text, then the status line.
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    let status_line = format!(
        "HTTP {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    )
    .trim_end()
    .to_string();

    match serde_json::from_str::<Value>(body) {
        Ok(json) => non_empty_field(&json["message"])
            .or_else(|| non_empty_field(&json["detail"]))
            .unwrap_or(status_line),
        Err(_) if body.is_empty() => status_line,
        Err(_) => body.to_string(),
    }
}

fn non_empty_field(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn answers_from_json(json: &Value) -> Vec<String> {
    json["answers"]
        .as_array()
        .map(|items| {
            items.iter()
                .map(|a| match a {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_wins_over_detail() {
        let body = r#"{"message": "quota exceeded", "detail": "ignored"}"#;
        assert_eq!(extract_error_message(StatusCode::TOO_MANY_REQUESTS, body), "quota exceeded");
    }

    #[test]
    fn test_detail_used_when_no_message() {
        let body = r#"{"detail": "Invalid or missing Authorization token"}"#;
        assert_eq!(
            extract_error_message(StatusCode::FORBIDDEN, body),
            "Invalid or missing Authorization token"
        );
    }

    #[test]
    fn test_structured_detail_is_rendered_compactly() {
        let body = r#"{"detail": [{"loc": ["body", "documents"], "msg": "invalid url"}]}"#;
        let msg = extract_error_message(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert!(msg.contains("invalid url"));
        assert!(msg.starts_with('['));
    }

    #[test]
    fn test_json_without_known_fields_falls_back_to_status() {
        assert_eq!(
            extract_error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": "boom"}"#),
            "HTTP 500: Internal Server Error"
        );
        assert_eq!(
            extract_error_message(StatusCode::BAD_REQUEST, r#"{"message": ""}"#),
            "HTTP 400: Bad Request"
        );
    }

    #[test]
    fn test_plain_text_body_is_used_verbatim() {
        assert_eq!(
            extract_error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
    }

    #[test]
    fn test_empty_body_uses_status_line() {
        assert_eq!(extract_error_message(StatusCode::NOT_FOUND, ""), "HTTP 404: Not Found");
    }

    #[test]
    fn test_falsy_message_falls_through_to_detail() {
        let body = r#"{"message": 0, "detail": "Document could not be fetched"}"#;
        assert_eq!(
            extract_error_message(StatusCode::BAD_REQUEST, body),
            "Document could not be fetched"
        );
        let body = r#"{"message": false, "detail": ""}"#;
        assert_eq!(extract_error_message(StatusCode::BAD_REQUEST, body), "HTTP 400: Bad Request");
        let body = r#"{"message": 7}"#;
        assert_eq!(extract_error_message(StatusCode::BAD_REQUEST, body), "7");
    }

    #[test]
    fn test_answers_from_json() {
        let json = json!({"answers": ["30 days", 36, null]});
        assert_eq!(answers_from_json(&json), vec!["30 days", "36", "null"]);
        assert!(answers_from_json(&json!({"status": "ok"})).is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/api/v1/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(client.endpoint(), "http://localhost:8000/api/v1/hackrx/run");
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = ApiClient::new("http://localhost", Some("very-secret".into())).unwrap();
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("very-secret"));
        assert!(dbg.contains("<redacted>"));
    }
}
