//! Exercises the client against an in-process mock of the report service.

use axum::{
    body::{Body, Bytes},
    extract::{Multipart, Path},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures_util::{stream, StreamExt};
use serde_json::{json, Value};
use std::time::Duration;

use enhancer_api::{ApiClient, ApiError, ReportUpload};

const TOKEN: &str = "tok-123";
const PDF_BYTES: &[u8] = b"%PDF-1.4 mock";

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/v1/login", post(login))
        .route("/api/v1/register", post(register))
        .route("/api/v1/reports", get(list_reports))
        .route("/api/v1/report/{id}", get(report_detail))
        .route("/api/v1/report/{id}/summary", post(summary))
        .route("/api/v1/report/{id}/pdf", get(pdf))
        .route("/api/v1/reports/upload", post(upload));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer tok-123")
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "code": 401, "message": "未授权的访问" })),
    )
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "ada@example.com" && body["password"] == "correct-horse" {
        (
            StatusCode::OK,
            Json(json!({
                "code": 200,
                "message": "登录成功",
                "data": {
                    "token": TOKEN,
                    "user": { "user_id": "1", "name": "Ada", "email": "ada@example.com" }
                }
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "code": 401, "message": "认证失败", "data": "bad credentials" })),
        )
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({
            "code": 201,
            "message": "注册成功",
            "data": {
                "token": "fresh-token",
                "user": { "user_id": "2", "name": body["name"], "email": body["email"] }
            }
        })),
    )
}

async fn list_reports(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({
            "code": 200,
            "message": "获取成功",
            "data": [
                { "report_id": "42", "title": "Q1", "summary": "done" },
                { "report_id": "43", "title": "Q2" }
            ]
        })),
    )
}

async fn report_detail(headers: HeaderMap, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({
            "code": 200,
            "message": "获取成功",
            "data": { "report_id": id, "title": "Q1", "pdf_url": format!("http://localhost:8080/api/v1/report/{}.pdf", id) }
        })),
    )
}

async fn summary(headers: HeaderMap, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({ "code": 200, "message": "生成成功", "data": { "summary": format!("summary of {}", id) } })),
    )
}

async fn pdf(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if !authorized(&headers) {
        return unauthorized().into_response();
    }
    if id == "broken" {
        // First chunk arrives, then the connection dies mid-body.
        let body = stream::once(async { Ok::<_, std::io::Error>(Bytes::from_static(b"%PDF-1.4 partial")) })
            .chain(stream::once(async {
                tokio::time::sleep(Duration::from_millis(300)).await;
                Err(std::io::Error::other("backend died"))
            }));
        return (
            [(header::CONTENT_TYPE, "application/pdf")],
            Body::from_stream(body),
        )
            .into_response();
    }
    let disposition = format!("attachment; filename={}.pdf", id);
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        PDF_BYTES,
    )
        .into_response()
}

async fn upload(headers: HeaderMap, mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap();
            return (
                StatusCode::CREATED,
                Json(json!({
                    "code": 201,
                    "message": "上传成功",
                    "data": {
                        "report_id": "99",
                        "title": file_name,
                        "content": format!("{} bytes as {}", bytes.len(), content_type)
                    }
                })),
            );
        }
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "code": 400, "message": "未找到上传的文件" })),
    )
}

#[tokio::test]
async fn test_login_returns_token_and_user() {
    let base = spawn_backend().await;
    let client = ApiClient::new(&base).unwrap();

    let response = client
        .users()
        .login("ada@example.com", "correct-horse")
        .await
        .unwrap();

    assert_eq!(response.code, 200);
    let payload = response.into_data().unwrap();
    assert_eq!(payload.token, TOKEN);
    assert_eq!(payload.user.name, "Ada");
    assert!(client.authorization_header().is_none());
}

#[tokio::test]
async fn test_failed_login_surfaces_status() {
    let base = spawn_backend().await;
    let client = ApiClient::new(&base).unwrap();

    let err = client
        .users()
        .login("ada@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "认证失败");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_register_passes_fields_through() {
    let base = spawn_backend().await;
    let client = ApiClient::new(&base).unwrap();

    let payload = client
        .users()
        .register("Grace", "grace@example.com", "s3cret-pass")
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(payload.user.name, "Grace");
    assert_eq!(payload.user.email, "grace@example.com");
}

#[tokio::test]
async fn test_report_calls_require_bearer_token() {
    let base = spawn_backend().await;
    let client = ApiClient::new(&base).unwrap();
    let reports = client.reports();

    let err = reports.get_reports().await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    client.set_bearer_token(TOKEN);
    let list = reports.get_reports().await.unwrap().into_data().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list[0].has_summary());
    assert!(!list[1].has_summary());

    client.clear_bearer_token();
    assert!(reports.get_reports().await.unwrap_err().is_unauthorized());
}

#[tokio::test]
async fn test_detail_and_summary() {
    let base = spawn_backend().await;
    let client = ApiClient::new(&base).unwrap();
    client.set_bearer_token(TOKEN);
    let reports = client.reports();

    let detail = reports.get_report_by_id("42").await.unwrap().into_data().unwrap();
    assert_eq!(detail.report.report_id, "42");
    assert!(detail.pdf_url.ends_with("/42.pdf"));

    let summary = reports.generate_summary("42").await.unwrap().into_data().unwrap();
    assert_eq!(summary.summary, "summary of 42");
}

#[tokio::test]
async fn test_upload_sends_file_field() {
    let base = spawn_backend().await;
    let client = ApiClient::new(&base).unwrap();
    client.set_bearer_token(TOKEN);

    let upload = ReportUpload::new("q3.pdf", b"hello".to_vec());
    let report = client
        .reports()
        .upload_report(upload)
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(report.report_id, "99");
    assert_eq!(report.title, "q3.pdf");
    assert_eq!(report.content, "5 bytes as application/pdf");
}

#[tokio::test]
async fn test_upload_from_path() {
    let base = spawn_backend().await;
    let client = ApiClient::new(&base).unwrap();
    client.set_bearer_token(TOKEN);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"twelve bytes").unwrap();

    let upload = ReportUpload::from_path(&path).await.unwrap();
    let report = client
        .reports()
        .upload_report(upload)
        .await
        .unwrap()
        .into_data()
        .unwrap();

    assert_eq!(report.title, "notes.txt");
    assert_eq!(report.content, "12 bytes as text/plain");
}

#[tokio::test]
async fn test_download_pdf_writes_file() {
    let base = spawn_backend().await;
    let client = ApiClient::new(&base).unwrap();
    client.set_bearer_token(TOKEN);

    let dir = tempfile::tempdir().unwrap();
    let download = client
        .reports()
        .download_report_pdf("42", dir.path())
        .await
        .unwrap();

    assert_eq!(download.file_path, dir.path().join("42.pdf"));
    assert_eq!(download.bytes, PDF_BYTES.len() as u64);
    assert_eq!(download.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(download.sha256.len(), 64);
    assert_eq!(std::fs::read(&download.file_path).unwrap(), PDF_BYTES);
}

#[tokio::test]
async fn test_interrupted_download_keeps_previous_file() {
    let base = spawn_backend().await;
    let client = ApiClient::new(&base).unwrap();
    client.set_bearer_token(TOKEN);

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("broken.pdf");
    std::fs::write(&target, b"earlier copy").unwrap();

    let result = client
        .reports()
        .download_report_pdf("broken", dir.path())
        .await;

    assert!(matches!(result, Err(ApiError::Http(_))));
    assert_eq!(std::fs::read(&target).unwrap(), b"earlier copy");
    assert!(!dir.path().join("broken.pdf.part").exists());
}

#[tokio::test]
async fn test_interrupted_download_leaves_no_file() {
    let base = spawn_backend().await;
    let client = ApiClient::new(&base).unwrap();
    client.set_bearer_token(TOKEN);

    let dir = tempfile::tempdir().unwrap();
    assert!(client
        .reports()
        .download_report_pdf("broken", dir.path())
        .await
        .is_err());

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_network_errors_pass_through() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{}", addr)).unwrap();
    let err = client.reports().get_reports().await.unwrap_err();
    assert!(matches!(err, ApiError::Http(_)));
}
