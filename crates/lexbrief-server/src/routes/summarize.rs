//! Form page and the summarize endpoint.
//!
//! `POST /` accepts the form either as `multipart/form-data` (with an
//! optional `file` upload) or urlencoded. An uploaded document replaces the
//! pasted `text` whenever text can be extracted from it.

use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{Form, FromRequest, Multipart, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use lexbrief_core::SummaryMode;
use lexbrief_ingest::extract_text;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");
const SCRIPT_JS: &str = include_str!("../../static/script.js");

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index).post(summarize))
        .route("/static/script.js", get(script))
}

/// GET /: the upload form.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /static/script.js
async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        SCRIPT_JS,
    )
}

/// Urlencoded form fields.
#[derive(Debug, Deserialize)]
struct SummarizeForm {
    #[serde(default)]
    text: String,
    #[serde(default)]
    mode: Option<String>,
}

/// An uploaded document, held in memory for the request only.
struct Upload {
    filename: String,
    bytes: Vec<u8>,
}

/// Everything the client submitted, whichever encoding it used.
#[derive(Default)]
struct Submission {
    text: String,
    mode: Option<String>,
    upload: Option<Upload>,
}

/// POST /: summarize pasted text or an uploaded judgment.
async fn summarize(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let request_id = Uuid::new_v4();

    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |ct| ct.starts_with("multipart/form-data"));

    let submission = if is_multipart {
        match Multipart::from_request(request, &()).await {
            Ok(multipart) => match read_multipart(multipart).await {
                Ok(submission) => submission,
                Err(e) => return multipart_error(request_id, e),
            },
            Err(rejection) => return rejection.into_response(),
        }
    } else {
        match Form::<SummarizeForm>::from_request(request, &()).await {
            Ok(Form(form)) => Submission {
                text: form.text,
                mode: form.mode,
                upload: None,
            },
            Err(rejection) => return rejection.into_response(),
        }
    };

    let mode = resolve_mode(submission.mode.as_deref(), state.config.mode);
    let text = resolve_text(request_id, submission.text, submission.upload).await;

    info!("[{}] Summarizing in {} mode", request_id, mode);
    let result = state.pipeline.summarize(&text, mode).await;

    (StatusCode::OK, Json(result)).into_response()
}

async fn read_multipart(mut multipart: Multipart) -> Result<Submission, MultipartError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "text" => {
                submission.text = field.text().await?;
            }
            "mode" => {
                submission.mode = Some(field.text().await?);
            }
            "file" => {
                // Browsers send an empty part when no file was chosen
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if !filename.is_empty() {
                    submission.upload = Some(Upload {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}

fn resolve_mode(requested: Option<&str>, default: SummaryMode) -> SummaryMode {
    match requested.map(str::trim).filter(|m| !m.is_empty()) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("{}; using {}", e, default);
            default
        }),
        None => default,
    }
}

/// Text of the upload when it yields any, otherwise the pasted text.
async fn resolve_text(request_id: Uuid, text: String, upload: Option<Upload>) -> String {
    let Some(upload) = upload else {
        return text;
    };

    let filename = upload.filename.clone();
    let size = upload.bytes.len();
    let extracted =
        tokio::task::spawn_blocking(move || extract_text(&upload.filename, &upload.bytes)).await;

    match extracted {
        Ok(Ok(extracted)) if !extracted.trim().is_empty() => {
            info!(
                "[{}] Extracted {} chars from {} ({} bytes)",
                request_id,
                extracted.chars().count(),
                filename,
                size
            );
            extracted
        }
        Ok(Ok(_)) => {
            warn!("[{}] No text found in {}; using pasted text", request_id, filename);
            text
        }
        Ok(Err(e)) => {
            warn!("[{}] Could not read {}: {}; using pasted text", request_id, filename, e);
            text
        }
        Err(e) => {
            warn!("[{}] Extraction task failed for {}: {}", request_id, filename, e);
            text
        }
    }
}

/// Keeps the status multer assigns: 413 past the body limit, 400 otherwise.
fn multipart_error(request_id: Uuid, e: MultipartError) -> Response {
    let status = e.status();
    warn!("[{}] Rejected multipart body ({}): {}", request_id, status, e.body_text());
    (status, Json(serde_json::json!({ "error": e.body_text() }))).into_response()
}
