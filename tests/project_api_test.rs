//! 프로젝트 API 통합 테스트

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn should_default_status_and_progress() {
    // Arrange
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let workspace_id = app.create_workspace(alice, "acme").await;

    // Act
    let (status, body) = app
        .post(
            "/api/projects",
            alice,
            json!({ "workspaceId": workspace_id, "name": "Website" }),
        )
        .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "active");
    assert_eq!(body["result"]["progress"], 0);
}

#[tokio::test]
async fn should_reject_progress_out_of_range() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let workspace_id = app.create_workspace(alice, "acme").await;

    let (status, body) = app
        .post(
            "/api/projects",
            alice,
            json!({ "workspaceId": workspace_id, "name": "Website", "progress": 150 }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "COMMON400");
}

#[tokio::test]
async fn should_reject_end_date_before_start_date() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let workspace_id = app.create_workspace(alice, "acme").await;

    let (status, _) = app
        .post(
            "/api/projects",
            alice,
            json!({
                "workspaceId": workspace_id,
                "name": "Website",
                "startDate": "2026-03-01",
                "endDate": "2026-02-01"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_return_project_not_found_for_missing_and_foreign_projects() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let mallory = app.create_user("Mallory").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    let project_id = app.create_project(alice, workspace_id, "Website").await;

    let (missing, missing_body) = app.get("/api/projects/9999", alice).await;
    let (foreign, foreign_body) = app.get(&format!("/api/projects/{}", project_id), mallory).await;

    assert_eq!(missing, StatusCode::NOT_FOUND);
    assert_eq!(missing_body["message"], "Project not found");
    assert_eq!(foreign, StatusCode::NOT_FOUND);
    assert_eq!(foreign_body["code"], "PROJECT4041");
}

#[tokio::test]
async fn should_list_projects_by_workspace_name() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    app.create_project(alice, workspace_id, "Website").await;
    app.create_project(alice, workspace_id, "Mobile").await;

    let (status, body) = app.get("/api/projects/workspace/acme", alice).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn should_forbid_members_from_creating_projects() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let bob = app.create_user("Bob").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    app.add_member(alice, workspace_id, bob, "member").await;

    let (status, _) = app
        .post(
            "/api/projects",
            bob,
            json!({ "workspaceId": workspace_id, "name": "Side project" }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_update_project_fields() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    let project_id = app.create_project(alice, workspace_id, "Website").await;

    let (status, body) = app
        .patch(
            &format!("/api/projects/{}", project_id),
            alice,
            json!({ "name": "Website v2", "status": "completed" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["name"], "Website v2");
    assert_eq!(body["result"]["status"], "completed");
}

#[tokio::test]
async fn should_clear_description_and_dates_with_null() {
    // Arrange
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    let (_, created) = app
        .post(
            "/api/projects",
            alice,
            json!({
                "workspaceId": workspace_id,
                "name": "Website",
                "description": "Marketing site",
                "startDate": "2026-01-01",
                "endDate": "2026-03-31"
            }),
        )
        .await;
    let uri = format!("/api/projects/{}", created["result"]["projectId"]);

    // Act
    let (omitted, kept) = app.patch(&uri, alice, json!({ "progress": 10 })).await;
    let (cleared, body) = app
        .patch(&uri, alice, json!({ "description": null, "endDate": null }))
        .await;

    // Assert
    assert_eq!(omitted, StatusCode::OK);
    assert_eq!(kept["result"]["description"], "Marketing site");
    assert_eq!(kept["result"]["endDate"], "2026-03-31");

    assert_eq!(cleared, StatusCode::OK);
    assert!(body["result"]["description"].is_null());
    assert!(body["result"]["endDate"].is_null());
    assert_eq!(body["result"]["startDate"], "2026-01-01");
}

#[tokio::test]
async fn should_reject_whitespace_only_project_name() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    let project_id = app.create_project(alice, workspace_id, "Website").await;

    let (created, _) = app
        .post(
            "/api/projects",
            alice,
            json!({ "workspaceId": workspace_id, "name": "   " }),
        )
        .await;
    let (renamed, _) = app
        .patch(&format!("/api/projects/{}", project_id), alice, json!({ "name": "  " }))
        .await;
    let (_, project) = app.get(&format!("/api/projects/{}", project_id), alice).await;

    assert_eq!(created, StatusCode::BAD_REQUEST);
    assert_eq!(renamed, StatusCode::BAD_REQUEST);
    assert_eq!(project["result"]["name"], "Website");
}

#[tokio::test]
async fn should_count_tasks_by_status() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    let project_id = app.create_project(alice, workspace_id, "Website").await;

    for (title, status) in [
        ("Design", "done"),
        ("Build", "in-progress"),
        ("Test", "todo"),
        ("Old spike", "archived"),
    ] {
        app.create_task(
            alice,
            json!({ "projectId": project_id, "title": title, "status": status }),
        )
        .await;
    }

    let (status, body) = app.get(&format!("/api/projects/{}/stats", project_id), alice).await;

    assert_eq!(status, StatusCode::OK);
    let stats = &body["result"];
    assert_eq!(stats["totalTasks"], 4);
    assert_eq!(stats["done"], 1);
    assert_eq!(stats["inProgress"], 1);
    assert_eq!(stats["archived"], 1);
    // archived 제외 1/3
    assert_eq!(stats["completionPercentage"], 33);
}

#[tokio::test]
async fn should_cascade_project_delete() {
    use sea_orm::{EntityTrait, PaginatorTrait};
    use taskhub::domain::{
        milestone::entity::milestone, sprint::entity::sprint, task::entity::task,
    };

    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    let project_id = app.create_project(alice, workspace_id, "Website").await;
    app.create_task(alice, json!({ "projectId": project_id, "title": "Design" }))
        .await;
    app.post(
        "/api/sprints/create",
        alice,
        json!({ "projectId": project_id, "name": "Sprint 1" }),
    )
    .await;
    app.post(
        "/api/milestones",
        alice,
        json!({ "projectId": project_id, "title": "Beta" }),
    )
    .await;

    let (status, _) = app.delete(&format!("/api/projects/{}", project_id), alice).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(task::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(sprint::Entity::find().count(&app.db).await.unwrap(), 0);
    assert_eq!(milestone::Entity::find().count(&app.db).await.unwrap(), 0);
}
