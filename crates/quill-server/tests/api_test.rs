//! End-to-end tests of the HTTP surface with fake model and converter.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use docx_rs::{Docx, Paragraph, Run};
use quill_core::{
    Analyzer, GenerationOptions, Llm, LlmResponse, Message, QuillError, QuillResult,
};
use quill_extractors::ExtractionPipeline;
use quill_render::{DocumentEmitter, PdfConverter, RenderError, RenderResult};
use quill_server::{create_server, AppState};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "quill-test-boundary";

/// Replies with a fixed text and records every prompt it receives.
struct FakeLlm {
    reply: Option<String>,
    fail: bool,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            fail: false,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            fail: true,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Llm for FakeLlm {
    async fn generate(
        &self,
        messages: &[Message],
        _options: Option<GenerationOptions>,
    ) -> QuillResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(last) = messages.last() {
            self.prompts.lock().unwrap().push(last.content.clone());
        }
        if self.fail {
            return Err(QuillError::llm("connection reset by peer"));
        }
        Ok(LlmResponse {
            content: self.reply.clone(),
            usage: None,
        })
    }

    fn model_name(&self) -> String {
        "gpt-4o-mini".to_string()
    }
}

struct FailingConverter;

#[async_trait]
impl PdfConverter for FailingConverter {
    async fn convert(&self, _docx: &Path, _out_dir: &Path) -> RenderResult<PathBuf> {
        Err(RenderError::Conversion("soffice not installed".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct FakePdfConverter;

#[async_trait]
impl PdfConverter for FakePdfConverter {
    async fn convert(&self, _docx: &Path, out_dir: &Path) -> RenderResult<PathBuf> {
        let pdf = out_dir.join("corrected.pdf");
        tokio::fs::write(&pdf, b"%PDF-1.7\n%fake").await?;
        Ok(pdf)
    }

    fn name(&self) -> &str {
        "fake-pdf"
    }
}

fn app_with(llm: Arc<FakeLlm>, converter: Arc<dyn PdfConverter>) -> Router {
    let state = AppState::new(
        ExtractionPipeline::with_defaults(),
        llm,
        DocumentEmitter::new(converter),
    );
    create_server(state)
}

fn app(llm: Arc<FakeLlm>) -> Router {
    app_with(llm, Arc::new(FailingConverter))
}

fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });
    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();
    buf.into_inner()
}

fn multipart_body(field: &str, file_name: Option<&str>, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    match file_name {
        Some(name) => body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                field, name
            )
            .as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", field).as_bytes(),
        ),
    }
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const GOOD_REPLY: &str = "```json\n{\"summary\":\"ok\",\"grammar_score\":90,\"sentiment\":\"positive\",\"recommendations\":[],\"compliance_score\":\"95%\"}\n```";

#[tokio::test]
async fn test_health() {
    let response = app(FakeLlm::replying(""))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "gpt-4o-mini");
}

#[tokio::test]
async fn test_analyze_docx() {
    let llm = FakeLlm::replying(GOOD_REPLY);
    let body = multipart_body("file", Some("memo.docx"), &docx_bytes(&["Quarterly results are strong."]));

    let response = app(llm.clone()).oneshot(upload("/analyze_file", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["summary"], "ok");
    assert_eq!(body["grammar_score"], 90);
    assert!(body["grammar_score"].is_i64() || body["grammar_score"].is_u64());
    assert_eq!(body["sentiment"], "positive");
    assert_eq!(body["recommendations"], serde_json::json!([]));
    assert_eq!(body["compliance_score"], "95%");
    assert_eq!(body.as_object().unwrap().len(), 5);

    assert_eq!(llm.calls(), 1);
    assert!(llm.last_prompt().contains("Quarterly results are strong."));
}

#[tokio::test]
async fn test_analyze_unparseable_reply_is_sentinel() {
    let body = multipart_body("file", Some("memo.docx"), &docx_bytes(&["Hello"]));

    let response = app(FakeLlm::replying("not json at all"))
        .oneshot(upload("/analyze_file", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({
            "summary": "Error parsing AI response.",
            "grammar_score": 0,
            "sentiment": "unknown",
            "recommendations": [],
            "compliance_score": "N/A"
        })
    );
}

#[tokio::test]
async fn test_analyze_with_alternate_fallback_summary() {
    let llm = FakeLlm::replying("");
    let state = AppState::new(
        ExtractionPipeline::with_defaults(),
        llm.clone(),
        DocumentEmitter::new(Arc::new(FailingConverter)),
    )
    .with_analyzer(Analyzer::new(llm).with_fallback_summary("Parsing error"));
    let body = multipart_body("file", Some("memo.docx"), &docx_bytes(&["Hello"]));

    let response = create_server(state)
        .oneshot(upload("/analyze_file", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["summary"], "Parsing error");
}

#[tokio::test]
async fn test_unsupported_type_rejected_for_both_operations() {
    for uri in ["/analyze_file", "/correct_file"] {
        let llm = FakeLlm::replying(GOOD_REPLY);
        let body = multipart_body("file", Some("notes.txt"), b"plain text");

        let response = app(llm.clone()).oneshot(upload(uri, body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"detail": "Unsupported file type"})
        );
        assert_eq!(llm.calls(), 0);
    }
}

#[tokio::test]
async fn test_uppercase_suffix_accepted() {
    let llm = FakeLlm::replying(GOOD_REPLY);
    let body = multipart_body("file", Some("MEMO.DOCX"), &docx_bytes(&["Shouting file name"]));

    let response = app(llm.clone()).oneshot(upload("/analyze_file", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn test_unreadable_pdf_still_analyzed() {
    let llm = FakeLlm::replying(GOOD_REPLY);
    let body = multipart_body("file", Some("scan.pdf"), b"this is not really a pdf");

    let response = app(llm.clone()).oneshot(upload("/analyze_file", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(llm.last_prompt().contains("Error extracting text: "));
}

#[tokio::test]
async fn test_corrupt_docx_is_internal_error() {
    let llm = FakeLlm::replying(GOOD_REPLY);
    let body = multipart_body("file", Some("broken.docx"), b"not a zip archive");

    let response = app(llm.clone()).oneshot(upload("/analyze_file", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("Internal error: "));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn test_llm_failure_is_internal_error() {
    let body = multipart_body("file", Some("memo.docx"), &docx_bytes(&["Hello"]));

    let response = app(FakeLlm::failing())
        .oneshot(upload("/analyze_file", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await["detail"],
        "Internal error: LLM error: connection reset by peer"
    );
}

#[tokio::test]
async fn test_missing_file_field() {
    let body = multipart_body("comment", None, b"no attachment here");

    let response = app(FakeLlm::replying(GOOD_REPLY))
        .oneshot(upload("/analyze_file", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["detail"], "No file uploaded");
}

#[tokio::test]
async fn test_non_multipart_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/correct_file")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app(FakeLlm::replying("")).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_first_named_file_field_accepted() {
    let llm = FakeLlm::replying(GOOD_REPLY);
    let body = multipart_body("document", Some("memo.docx"), &docx_bytes(&["Other field name"]));

    let response = app(llm.clone()).oneshot(upload("/analyze_file", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(llm.last_prompt().contains("Other field name"));
}

#[tokio::test]
async fn test_correct_falls_back_to_docx() {
    let llm = FakeLlm::replying("  The corrected text.\nSecond line.  ");
    let body = multipart_body("file", Some("q3 report.docx"), &docx_bytes(&["Teh text."]));

    let response = app(llm.clone()).oneshot(upload("/correct_file", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"q3 report_corrected.docx\""
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(b"PK"));
    assert!(docx_rs::read_docx(&bytes).is_ok());
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn test_correct_returns_pdf_when_converted() {
    let body = multipart_body("file", Some("scan.pdf"), b"%PDF-garbage");

    let response = app_with(FakeLlm::replying("Fixed."), Arc::new(FakePdfConverter))
        .oneshot(upload("/correct_file", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"scan_corrected.pdf\""
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"%PDF-1.7\n%fake");
}

#[tokio::test]
async fn test_correct_empty_completion_is_internal_error() {
    let llm = Arc::new(FakeLlm {
        reply: None,
        fail: false,
        calls: AtomicUsize::new(0),
        prompts: Mutex::new(Vec::new()),
    });
    let body = multipart_body("file", Some("memo.docx"), &docx_bytes(&["Hello"]));

    let response = app(llm).oneshot(upload("/correct_file", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_upload_limit() {
    let state = AppState::new(
        ExtractionPipeline::with_defaults(),
        FakeLlm::replying(GOOD_REPLY),
        DocumentEmitter::new(Arc::new(FailingConverter)),
    )
    .with_upload_limit(1024);
    let body = multipart_body("file", Some("big.docx"), &vec![b'a'; 4096]);

    let response = create_server(state)
        .oneshot(upload("/analyze_file", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
