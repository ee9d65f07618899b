//! 마일스톤/의존성 API 통합 테스트

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

async fn create_milestone(app: &TestApp, user_id: i64, project_id: i64, title: &str) -> i64 {
    let (status, body) = app
        .post(
            "/api/milestones",
            user_id,
            json!({ "projectId": project_id, "title": title }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "create milestone: {}", body);
    body["result"]["milestoneId"].as_i64().unwrap()
}

async fn depend(app: &TestApp, user_id: i64, milestone_id: i64, depends_on_id: i64) -> (StatusCode, Value) {
    app.post(
        &format!("/api/milestones/{}/dependencies", milestone_id),
        user_id,
        json!({ "dependsOnId": depends_on_id }),
    )
    .await
}

async fn setup() -> (TestApp, i64, i64, i64) {
    let app = TestApp::new().await;
    let admin = app.create_user("Alice").await;
    let workspace_id = app.create_workspace(admin, "acme").await;
    let project_id = app.create_project(admin, workspace_id, "Website").await;
    (app, admin, workspace_id, project_id)
}

#[tokio::test]
async fn should_create_milestone_with_upcoming_status() {
    let (app, admin, _, project_id) = setup().await;

    let (status, body) = app
        .post(
            "/api/milestones",
            admin,
            json!({ "projectId": project_id, "title": "Beta", "dueDate": "2026-06-30" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "upcoming");
    assert_eq!(body["result"]["dueDate"], "2026-06-30");
}

#[tokio::test]
async fn should_add_and_list_dependencies() {
    // Arrange
    let (app, admin, _, project_id) = setup().await;
    let alpha = create_milestone(&app, admin, project_id, "Alpha").await;
    let beta = create_milestone(&app, admin, project_id, "Beta").await;

    // Act
    let (status, body) = depend(&app, admin, beta, alpha).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"][0]["milestoneId"], alpha);

    let (_, listed) = app
        .get(&format!("/api/milestones/{}/dependencies", beta), admin)
        .await;
    assert_eq!(listed["result"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_self_dependency() {
    let (app, admin, _, project_id) = setup().await;
    let alpha = create_milestone(&app, admin, project_id, "Alpha").await;

    let (status, body) = depend(&app, admin, alpha, alpha).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MILESTONE4001");
}

#[tokio::test]
async fn should_reject_duplicate_dependency() {
    let (app, admin, _, project_id) = setup().await;
    let alpha = create_milestone(&app, admin, project_id, "Alpha").await;
    let beta = create_milestone(&app, admin, project_id, "Beta").await;
    depend(&app, admin, beta, alpha).await;

    let (status, _) = depend(&app, admin, beta, alpha).await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn should_reject_transitive_cycle() {
    let (app, admin, _, project_id) = setup().await;
    let alpha = create_milestone(&app, admin, project_id, "Alpha").await;
    let beta = create_milestone(&app, admin, project_id, "Beta").await;
    let gamma = create_milestone(&app, admin, project_id, "Gamma").await;
    depend(&app, admin, beta, alpha).await;
    depend(&app, admin, gamma, beta).await;

    let (status, body) = depend(&app, admin, alpha, gamma).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Adding this dependency would create a cycle.");
}

#[tokio::test]
async fn should_reject_cross_project_dependency() {
    let (app, admin, workspace_id, project_id) = setup().await;
    let other_project = app.create_project(admin, workspace_id, "Mobile").await;
    let alpha = create_milestone(&app, admin, project_id, "Alpha").await;
    let foreign = create_milestone(&app, admin, other_project, "Launch").await;

    let (status, _) = depend(&app, admin, alpha, foreign).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_remove_dependency_once() {
    let (app, admin, _, project_id) = setup().await;
    let alpha = create_milestone(&app, admin, project_id, "Alpha").await;
    let beta = create_milestone(&app, admin, project_id, "Beta").await;
    depend(&app, admin, beta, alpha).await;
    let uri = format!("/api/milestones/{}/dependencies/{}", beta, alpha);

    let (first, _) = app.delete(&uri, admin).await;
    let (second, body) = app.delete(&uri, admin).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Dependency not found");
}

#[tokio::test]
async fn should_drop_dependencies_when_milestone_is_deleted() {
    let (app, admin, _, project_id) = setup().await;
    let alpha = create_milestone(&app, admin, project_id, "Alpha").await;
    let beta = create_milestone(&app, admin, project_id, "Beta").await;
    depend(&app, admin, beta, alpha).await;

    let (status, _) = app.delete(&format!("/api/milestones/{}", alpha), admin).await;
    let (_, listed) = app
        .get(&format!("/api/milestones/{}/dependencies", beta), admin)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(listed["result"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_forbid_members_from_managing_milestones() {
    let (app, admin, workspace_id, project_id) = setup().await;
    let member = app.create_user("Bob").await;
    app.add_member(admin, workspace_id, member, "member").await;

    let (status, _) = app
        .post(
            "/api/milestones",
            member,
            json!({ "projectId": project_id, "title": "Beta" }),
        )
        .await;
    let (listed, _) = app
        .get(&format!("/api/projects/{}/milestones", project_id), member)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(listed, StatusCode::OK);
}
