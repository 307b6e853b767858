//! HTTP endpoint integration tests.
//!
//! An in-process axum service stands in for the extraction service so the
//! real multipart encoding and response handling are exercised.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use tds_upload_core::{
    scan_directory, testing::fixtures, Config, EndpointConfig, EndpointError,
    ExtractionEndpoint, HttpExtractionEndpoint, OutcomeKind, UploadOrchestrator,
};

/// A part as the service received it.
#[derive(Debug, Clone)]
struct ReceivedPart {
    field: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

type Received = Arc<Mutex<Vec<ReceivedPart>>>;

async fn process_ok(State(received): State<Received>, mut multipart: Multipart) -> impl IntoResponse {
    let mut csv = String::from("file,bytes\n");
    while let Ok(Some(field)) = multipart.next_field().await {
        let part = ReceivedPart {
            field: field.name().unwrap_or("").to_string(),
            file_name: field.file_name().map(|s| s.to_string()),
            content_type: field.content_type().map(|s| s.to_string()),
            data: field.bytes().await.map(|b| b.to_vec()).unwrap_or_default(),
        };
        csv.push_str(&format!(
            "{},{}\n",
            part.file_name.clone().unwrap_or_default(),
            part.data.len()
        ));
        received.lock().await.push(part);
    }

    if received.lock().await.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No files uploaded" })),
        )
            .into_response();
    }

    ([(header::CONTENT_TYPE, "text/csv")], csv).into_response()
}

async fn process_bad_pdf() -> impl IntoResponse {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad pdf" })))
}

async fn process_empty_failure() -> impl IntoResponse {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn process_html_failure() -> impl IntoResponse {
    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, "text/html")],
        "<html><body>Bad Gateway</body></html>",
    )
}

async fn status_ok() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Serve `router` on an ephemeral port and return its base URL.
async fn spawn_service(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_recording_service() -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/process", post(process_ok))
        .route("/status", get(status_ok))
        .with_state(Arc::clone(&received));
    (spawn_service(router).await, received)
}

fn config_for(base_url: &str) -> Config {
    let mut config = fixtures::fast_config();
    config.endpoint = EndpointConfig {
        base_url: base_url.to_string(),
        timeout_secs: Some(10),
        ..Default::default()
    };
    config
}

fn orchestrator_for(config: &Config) -> UploadOrchestrator {
    let endpoint = HttpExtractionEndpoint::new(config.endpoint.clone()).unwrap();
    UploadOrchestrator::new(config, Arc::new(endpoint))
}

#[tokio::test]
async fn test_directory_upload_end_to_end() {
    let (base_url, received) = spawn_recording_service().await;

    let temp = TempDir::new().unwrap();
    let root = temp.path().join("certificates");
    std::fs::create_dir_all(root.join("fy2024")).unwrap();
    std::fs::write(root.join("form16a.pdf"), b"%PDF-1.4 a").unwrap();
    std::fs::write(root.join("fy2024").join("form16b.PDF"), b"%PDF-1.4 bb").unwrap();
    std::fs::write(root.join("index.txt"), b"not a pdf").unwrap();

    let config = config_for(&base_url);
    let mut orchestrator = orchestrator_for(&config);
    let candidates = scan_directory(&root).await.unwrap();
    assert_eq!(orchestrator.select_files(candidates), 2);

    let outcome = orchestrator.submit().await;
    assert!(outcome.is_success(), "unexpected outcome: {:?}", outcome);

    let parts = received.lock().await.clone();
    assert_eq!(parts.len(), 2);
    assert!(parts.iter().all(|p| p.field == "files"));
    assert!(parts
        .iter()
        .all(|p| p.content_type.as_deref() == Some("application/pdf")));
    let names: Vec<&str> = parts
        .iter()
        .map(|p| p.file_name.as_deref().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["certificates/form16a.pdf", "certificates/fy2024/form16b.PDF"]
    );
    assert_eq!(parts[1].data, b"%PDF-1.4 bb");

    let out_dir = TempDir::new().unwrap();
    let saved = orchestrator.download(Some(out_dir.path())).await.unwrap();
    assert_eq!(saved, out_dir.path().join("tds_data_output.csv"));
    let csv = std::fs::read_to_string(saved).unwrap();
    assert_eq!(
        csv,
        "file,bytes\ncertificates/form16a.pdf,10\ncertificates/fy2024/form16b.PDF,11\n"
    );
}

#[tokio::test]
async fn test_service_error_message_is_shown() {
    let router = Router::new().route("/process", post(process_bad_pdf));
    let base_url = spawn_service(router).await;

    let config = config_for(&base_url);
    let mut orchestrator = orchestrator_for(&config);
    orchestrator.select_files(vec![fixtures::pdf("a.pdf")]);

    let outcome = orchestrator.submit().await;
    assert_eq!(outcome.kind(), OutcomeKind::Failed);

    let view = orchestrator.view().await;
    assert_eq!(view.status.unwrap().text, "Error: bad pdf");
    assert_eq!(view.progress.percent, 0);
    assert!(!view.download_visible);
}

#[tokio::test]
async fn test_empty_error_body_uses_fallback() {
    let router = Router::new().route("/process", post(process_empty_failure));
    let base_url = spawn_service(router).await;

    let endpoint = HttpExtractionEndpoint::new(config_for(&base_url).endpoint).unwrap();
    let request = tds_upload_core::UploadRequest::from_selection(
        uuid::Uuid::new_v4(),
        &[fixtures::pdf("a.pdf")],
    )
    .await
    .unwrap();

    let err = endpoint.process(request).await.unwrap_err();
    assert!(matches!(
        err,
        EndpointError::Rejected {
            status: 500,
            message: None
        }
    ));
    assert_eq!(err.user_message(), "Failed to process files");
}

#[tokio::test]
async fn test_non_json_error_body_uses_fallback() {
    let router = Router::new().route("/process", post(process_html_failure));
    let base_url = spawn_service(router).await;

    let config = config_for(&base_url);
    let mut orchestrator = orchestrator_for(&config);
    orchestrator.select_files(vec![fixtures::pdf("a.pdf")]);
    orchestrator.submit().await;

    let view = orchestrator.view().await;
    assert_eq!(view.status.unwrap().text, "Error: Failed to process files");
}

/// Answer one upload with a 500 whose body is cut off mid-stream.
async fn spawn_truncating_service() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        // Multipart bodies end with "--\r\n", chunked ones with "0\r\n\r\n"
        while !(request.ends_with(b"--\r\n") || request.ends_with(b"0\r\n\r\n")) {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(
                b"HTTP/1.1 500 Internal Server Error\r\n\
                  Content-Type: application/json\r\n\
                  Content-Length: 200\r\n\r\n{\"err",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_unreadable_error_body_uses_fallback() {
    let base_url = spawn_truncating_service().await;

    let config = config_for(&base_url);
    let mut orchestrator = orchestrator_for(&config);
    orchestrator.select_files(vec![fixtures::pdf("a.pdf")]);

    let outcome = orchestrator.submit().await;
    assert_eq!(outcome.kind(), OutcomeKind::Failed);

    let view = orchestrator.view().await;
    assert_eq!(view.status.unwrap().text, "Error: Failed to process files");
}

#[tokio::test]
async fn test_unreachable_service_fails_cycle() {
    // Grab a free port, then close it
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = config_for(&format!("http://{}", addr));
    let mut orchestrator = orchestrator_for(&config);
    orchestrator.select_files(vec![fixtures::pdf("a.pdf")]);

    let outcome = orchestrator.submit().await;
    assert_eq!(outcome.kind(), OutcomeKind::Failed);

    let view = orchestrator.view().await;
    assert!(view.status.unwrap().text.starts_with("Error: "));
    assert!(view.selector_enabled);
    assert!(view.submit_enabled);
}

#[tokio::test]
async fn test_health_check() {
    let (base_url, _received) = spawn_recording_service().await;
    let endpoint = HttpExtractionEndpoint::new(config_for(&base_url).endpoint).unwrap();

    let health = endpoint.health().await.unwrap();
    assert!(health.is_ok());
}

#[tokio::test]
async fn test_health_check_missing_route() {
    let router = Router::new().route("/process", post(process_bad_pdf));
    let base_url = spawn_service(router).await;
    let endpoint = HttpExtractionEndpoint::new(config_for(&base_url).endpoint).unwrap();

    let err = endpoint.health().await.unwrap_err();
    assert!(matches!(err, EndpointError::Rejected { status: 404, .. }));
}
