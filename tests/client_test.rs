//! API 클라이언트 통합 테스트
//!
//! 로컬 포트에 가짜 서버(또는 실제 라우터)를 띄워 요청/응답 변환을 검증합니다.

mod common;

use std::sync::{Arc, Mutex};

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use common::TestApp;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use taskhub::client::{ApiClient, ClientError, NewSprint};
use taskhub::domain::project::entity::project::ProjectStatus;

/// 라우터를 임의 포트에 띄우고 base URL 반환
async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn envelope(result: Value) -> Json<Value> {
    Json(json!({
        "isSuccess": true,
        "code": "COMMON200",
        "message": "Success",
        "result": result
    }))
}

#[tokio::test]
async fn should_map_missing_project_to_friendly_message() {
    let base = spawn(Router::new().route(
        "/api/projects/:id",
        get(|| async { (StatusCode::NOT_FOUND, Json(json!({ "isSuccess": false }))) }),
    ))
    .await;

    let err = ApiClient::new(base).get_project(42).await.unwrap_err();

    assert!(matches!(err, ClientError::ProjectNotFound));
    assert_eq!(err.to_string(), "Project not found");
}

#[tokio::test]
async fn should_describe_other_failures_with_status() {
    let base = spawn(Router::new().route(
        "/api/projects/:id",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    ))
    .await;

    let err = ApiClient::new(base).get_project(1).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Request failed with status 500 Internal Server Error"
    );
}

#[tokio::test]
async fn should_fill_missing_fields_with_defaults() {
    let base = spawn(Router::new().route(
        "/api/projects/:id",
        get(|Path(id): Path<i64>| async move {
            envelope(json!({ "projectId": id, "workspaceId": 3, "name": "Website" }))
        }),
    ))
    .await;

    let project = ApiClient::new(base).get_project(7).await.unwrap();

    assert_eq!(project.project_id, 7);
    assert_eq!(project.status, ProjectStatus::Active);
    assert_eq!(project.progress, 0);
    assert!(project.start_date.is_none());
}

#[tokio::test]
async fn should_send_bearer_token() {
    let seen = Arc::new(Mutex::new(None::<String>));
    let captured = seen.clone();
    let base = spawn(Router::new().route(
        "/api/projects/:id",
        get(move |headers: HeaderMap| {
            let captured = captured.clone();
            async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                *captured.lock().unwrap() = auth;
                envelope(json!({ "projectId": 1, "workspaceId": 1, "name": "Website" }))
            }
        }),
    ))
    .await;

    ApiClient::new(base)
        .with_token("secret-token")
        .get_project(1)
        .await
        .unwrap();

    assert_eq!(seen.lock().unwrap().as_deref(), Some("Bearer secret-token"));
}

#[tokio::test]
async fn should_report_rejected_sprint_creation() {
    let base = spawn(Router::new().route(
        "/api/sprints/create",
        post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "isSuccess": false }))) }),
    ))
    .await;
    let sprint = NewSprint {
        project_id: 1,
        name: "Sprint 1".to_string(),
        goal: None,
        start_date: None,
        end_date: None,
        task_ids: Vec::new(),
    };

    let err = ApiClient::new(base).create_sprint(&sprint).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to create sprint");
}

#[tokio::test]
async fn should_report_unreachable_server_as_network_error() {
    // 바인딩 후 바로 닫은 포트
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = ApiClient::new(format!("http://{}", addr))
        .get_project(1)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
}

#[tokio::test]
async fn should_work_against_real_router() {
    // Arrange
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    let project_id = app.create_project(alice, workspace_id, "Website").await;
    let base = spawn(app.router.clone()).await;
    let client = ApiClient::new(format!("{}/", base)).with_token(app.token_for(alice));

    // Act
    let project = client.get_project(project_id).await.unwrap();
    let listed = client.list_workspace_projects("acme").await.unwrap();
    let sprint = client
        .create_sprint(&NewSprint {
            project_id,
            name: "Sprint 1".to_string(),
            goal: Some("Ship the landing page".to_string()),
            start_date: None,
            end_date: None,
            task_ids: Vec::new(),
        })
        .await
        .unwrap();

    // Assert
    assert_eq!(project.name, "Website");
    assert_eq!(project.status, ProjectStatus::Active);
    assert_eq!(listed.len(), 1);
    assert_eq!(sprint.project_id, project_id);
    assert_eq!(sprint.goal.as_deref(), Some("Ship the landing page"));
}
