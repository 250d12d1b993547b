//! Router-level tests: requests go through the full axum stack with fake
//! scorer/rewriter backends, so no network access is needed.

use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use lexbrief_chat::{ChatMessage, LLMConfig, Rewriter, LLM_FALLBACK_TEXT};
use lexbrief_core::{Error, LexBriefConfig, Result};
use lexbrief_infer::NeutralScorer;
use lexbrief_runtime::Pipeline;
use lexbrief_server::{build_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "lexbrief-test-boundary";

/// Replies with a fixed string and keeps the last user prompt.
struct RecordingRewriter {
    reply: String,
    last_prompt: Mutex<String>,
}

#[async_trait]
impl Rewriter for RecordingRewriter {
    async fn rewrite(&self, messages: Vec<ChatMessage>) -> Result<String> {
        if let Some(last) = messages.last() {
            *self.last_prompt.lock().unwrap() = last.content.clone();
        }
        if self.reply.is_empty() {
            return Err(Error::Llm("empty completion".into()));
        }
        Ok(self.reply.clone())
    }

    fn is_available(&self) -> bool {
        true
    }
}

fn app_with(reply: &str, config: LexBriefConfig) -> (Router, Arc<RecordingRewriter>) {
    let rewriter = Arc::new(RecordingRewriter {
        reply: reply.to_string(),
        last_prompt: Mutex::new(String::new()),
    });
    let pipeline = Pipeline::new(
        Arc::new(NeutralScorer::new()),
        rewriter.clone(),
        config.max_section_sentences,
    );
    let state = AppState::with_pipeline(config, LLMConfig::default(), pipeline);
    (build_router(Arc::new(state)), rewriter)
}

fn app(reply: &str) -> (Router, Arc<RecordingRewriter>) {
    app_with(reply, LexBriefConfig::default())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// One multipart part; `filename` marks it as a file upload.
struct Part<'a> {
    name: &'a str,
    filename: Option<&'a str>,
    content: &'a [u8],
}

fn field<'a>(name: &'a str, value: &'a str) -> Part<'a> {
    Part {
        name,
        filename: None,
        content: value.as_bytes(),
    }
}

fn file<'a>(filename: &'a str, content: &'a [u8]) -> Part<'a> {
    Part {
        name: "file",
        filename: Some(filename),
        content,
    }
}

fn multipart_request(parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n",
                    part.name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                    .as_bytes(),
            ),
        }
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{}</w:body></w:document>",
        body
    );

    let mut buf = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buf);
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    buf.into_inner()
}

#[tokio::test]
async fn test_index_serves_form() {
    let (app, _) = app("unused");
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8_lossy(&bytes);
    assert!(html.contains("<form"));
    assert!(html.contains("name=\"text\""));
    assert!(html.contains("name=\"file\""));
    assert!(html.contains("<title>LexBrief: Judgment Summarizer</title>"));
}

#[tokio::test]
async fn test_script_served_as_javascript() {
    let (app, _) = app("unused");
    let response = app
        .oneshot(
            Request::builder()
                .uri("/static/script.js")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("application/javascript"));
}

#[tokio::test]
async fn test_empty_input_returns_no_input_message() {
    let (app, rewriter) = app("unused");
    let response = app.oneshot(form_request("text=")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "decision": "No input provided." })
    );
    assert!(rewriter.last_prompt.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_multipart_text_returns_no_input_message() {
    let (app, _) = app("unused");
    let response = app
        .oneshot(multipart_request(&[field("text", "  \n  "), file("", b"")]))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["decision"], "No input provided.");
}

#[tokio::test]
async fn test_direct_mode_form_post() {
    let (app, rewriter) = app("1. Facts of the Case\nThe appellant sued.");
    let response = app
        .oneshot(form_request(
            "text=The+appellant+sued+the+respondent+for+breach+of+contract.&mode=direct",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({ "decision": "1. Facts of the Case\nThe appellant sued." })
    );
    assert!(rewriter
        .last_prompt
        .lock()
        .unwrap()
        .contains("The appellant sued the respondent for breach of contract."));
}

#[tokio::test]
async fn test_hybrid_mode_returns_four_sections() {
    let reply = r#"```json
{"facts": "F", "issues": "I", "reasoning": "R", "decision": "D"}
```"#;
    let (app, _) = app(reply);
    let response = app
        .oneshot(form_request(
            "text=The+appellant+was+convicted+of+armed+robbery+at+trial.+The+appeal+is+allowed+in+its+entirety.",
        ))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["facts"], "F");
    assert_eq!(json["issues"], "I");
    assert_eq!(json["reasoning"], "R");
    assert_eq!(json["decision"], "D");
}

#[tokio::test]
async fn test_uploaded_text_file_overrides_pasted_text() {
    let (app, rewriter) = app(r#"{"decision": "Appeal dismissed."}"#);
    let response = app
        .oneshot(multipart_request(&[
            field("text", "Pasted text that should be ignored by the server."),
            file(
                "judgment.txt",
                b"The uploaded judgment concerns a disputed land title in Lagos.",
            ),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["decision"], "Appeal dismissed.");

    let prompt = rewriter.last_prompt.lock().unwrap().clone();
    assert!(prompt.contains("disputed land title"));
    assert!(!prompt.contains("should be ignored"));
}

#[tokio::test]
async fn test_docx_upload_is_extracted() {
    let docx = build_docx(&[
        "The plaintiff claimed damages for wrongful termination of employment.",
        "The trial court entered judgment for the plaintiff in the sum claimed.",
    ]);
    let (app, rewriter) = app("Judgment affirmed.");
    let response = app
        .oneshot(multipart_request(&[
            field("mode", "direct"),
            file("ruling.docx", &docx),
        ]))
        .await
        .unwrap();

    assert_eq!(body_json(response).await["decision"], "Judgment affirmed.");
    let prompt = rewriter.last_prompt.lock().unwrap().clone();
    assert!(prompt.contains("wrongful termination of employment."));
    assert!(prompt.contains("entered judgment for the plaintiff"));
}

#[tokio::test]
async fn test_unsupported_upload_falls_back_to_text() {
    let (app, rewriter) = app("Summary of pasted text.");
    let response = app
        .oneshot(multipart_request(&[
            field("text", "The pasted judgment text is used when uploads fail."),
            field("mode", "direct"),
            file("scan.png", b"\x89PNG\r\n\x1a\n"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["decision"], "Summary of pasted text.");
    assert!(rewriter
        .last_prompt
        .lock()
        .unwrap()
        .contains("used when uploads fail"));
}

#[tokio::test]
async fn test_empty_file_part_is_ignored() {
    let (app, rewriter) = app("Done.");
    let response = app
        .oneshot(multipart_request(&[
            field("text", "A judgment pasted alongside an empty file input."),
            field("mode", "direct"),
            file("", b""),
        ]))
        .await
        .unwrap();

    assert_eq!(body_json(response).await["decision"], "Done.");
    assert!(rewriter
        .last_prompt
        .lock()
        .unwrap()
        .contains("empty file input"));
}

#[tokio::test]
async fn test_llm_failure_maps_to_fallback_text() {
    // Empty reply makes the recording rewriter fail
    let (app, _) = app("");
    let response = app
        .oneshot(form_request(
            "text=The+respondent+was+found+liable+in+negligence+by+the+High+Court.",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    for key in ["facts", "issues", "reasoning", "decision"] {
        assert_eq!(json[key], LLM_FALLBACK_TEXT);
    }
}

#[tokio::test]
async fn test_unconfigured_llm_uses_fallback() {
    let state = AppState::new(LexBriefConfig::default(), LLMConfig::default()).unwrap();
    let app = build_router(Arc::new(state));
    let response = app
        .oneshot(form_request(
            "text=The+appellant+challenged+the+jurisdiction+of+the+trial+court.&mode=direct",
        ))
        .await
        .unwrap();

    assert_eq!(
        body_json(response).await,
        serde_json::json!({ "decision": LLM_FALLBACK_TEXT })
    );
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let config = LexBriefConfig {
        max_upload_bytes: 1024,
        ..LexBriefConfig::default()
    };
    let (app, _) = app_with("unused", config);
    let big = format!("text={}", "a".repeat(4096));
    let response = app.oneshot(form_request(&big)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_oversized_multipart_upload_rejected() {
    let config = LexBriefConfig {
        max_upload_bytes: 1024,
        ..LexBriefConfig::default()
    };
    let (app, rewriter) = app_with("unused", config);
    let upload = vec![b'a'; 8192];
    let response = app
        .oneshot(multipart_request(&[file("judgment.txt", &upload)]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body_json(response).await["error"].is_string());
    assert!(rewriter.last_prompt.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_multipart_is_bad_request() {
    let (app, _) = app("unused");
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(format!(
            "--{}\r\nContent-Disposition: form-data; name=\"text\"\r\n\r\nunterminated",
            BOUNDARY
        )))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_reports_configured_providers() {
    let llm_config = LLMConfig {
        anthropic_api_key: Some("sk-ant-secret".into()),
        groq_api_key: Some("gsk-secret".into()),
        ..LLMConfig::default()
    };
    let rewriter = Arc::new(RecordingRewriter {
        reply: "unused".into(),
        last_prompt: Mutex::new(String::new()),
    });
    let pipeline = Pipeline::new(Arc::new(NeutralScorer::new()), rewriter, 12);
    let state = AppState::with_pipeline(LexBriefConfig::default(), llm_config, pipeline);
    let response = build_router(Arc::new(state))
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["llmProvider"], "anthropic");
    assert_eq!(json["openaiConfigured"], false);
    assert_eq!(json["anthropicConfigured"], true);
    assert_eq!(json["groqConfigured"], true);
    assert!(!json.to_string().contains("secret"));
}

#[tokio::test]
async fn test_status_shape() {
    let (app, _) = app("unused");
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["llmAvailable"], true);
    assert!(json["llmProvider"].is_null());
    assert!(json["model"].is_null());
    assert_eq!(json["classifierAvailable"], false);
    assert_eq!(json["mode"], "hybrid");
    assert_eq!(json["openaiConfigured"], false);

    let raw = json.to_string();
    assert!(!raw.contains("apiKey"));
    assert!(!raw.contains("token"));
}
