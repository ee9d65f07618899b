//! 워크스페이스/멤버 API 통합 테스트
//!
//! - 생성자 admin 등록, 이름 중복 409
//! - 비멤버 404, 멤버 중복 409, 마지막 admin 제거 불가
//! - 워크스페이스 삭제 시 프로젝트 CASCADE

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn should_register_creator_as_admin() {
    // Arrange
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;

    // Act
    let (status, body) = app
        .post("/api/workspaces", alice, json!({ "name": "acme", "description": "Acme Inc." }))
        .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isSuccess"], true);
    assert_eq!(body["result"]["myRole"], "admin");

    let workspace_id = body["result"]["workspaceId"].as_i64().unwrap();
    let (_, members) = app
        .get(&format!("/api/workspaces/{}/members", workspace_id), alice)
        .await;
    assert_eq!(members["result"].as_array().unwrap().len(), 1);
    assert_eq!(members["result"][0]["role"], "admin");
}

#[tokio::test]
async fn should_reject_duplicate_workspace_name() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let bob = app.create_user("Bob").await;
    app.create_workspace(alice, "acme").await;

    let (status, body) = app.post("/api/workspaces", bob, json!({ "name": "acme" })).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["isSuccess"], false);
    assert_eq!(body["code"], "COMMON409");
}

#[tokio::test]
async fn should_reject_workspace_name_with_slash() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;

    let (status, _) = app.post("/api/workspaces", alice, json!({ "name": "a/b" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_hide_workspace_from_non_members() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let mallory = app.create_user("Mallory").await;
    let workspace_id = app.create_workspace(alice, "acme").await;

    let (by_id, _) = app.get(&format!("/api/workspaces/{}", workspace_id), mallory).await;
    let (by_name, body) = app.get("/api/workspaces/by-name/acme", mallory).await;

    assert_eq!(by_id, StatusCode::NOT_FOUND);
    assert_eq!(by_name, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Workspace not found");
}

#[tokio::test]
async fn should_list_only_my_workspaces() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let bob = app.create_user("Bob").await;
    app.create_workspace(alice, "acme").await;
    app.create_workspace(bob, "globex").await;

    let (status, body) = app.get("/api/workspaces", alice).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["acme"]);
}

#[tokio::test]
async fn should_reject_duplicate_membership() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let bob = app.create_user("Bob").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    app.add_member(alice, workspace_id, bob, "member").await;

    let (status, _) = app
        .post(
            &format!("/api/workspaces/{}/members", workspace_id),
            alice,
            json!({ "userId": bob }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn should_forbid_members_from_adding_members() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let bob = app.create_user("Bob").await;
    let carol = app.create_user("Carol").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    app.add_member(alice, workspace_id, bob, "member").await;

    let (status, body) = app
        .post(
            &format!("/api/workspaces/{}/members", workspace_id),
            bob,
            json!({ "userId": carol }),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "WORKSPACE4031");
}

#[tokio::test]
async fn should_not_remove_last_admin() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let workspace_id = app.create_workspace(alice, "acme").await;

    let (status, _) = app
        .delete(&format!("/api/workspaces/{}/members/{}", workspace_id, alice), alice)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_keep_one_admin_when_admins_leave() {
    // Arrange
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let bob = app.create_user("Bob").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    app.add_member(alice, workspace_id, bob, "admin").await;
    let members_uri = format!("/api/workspaces/{}/members", workspace_id);

    // Act
    let (first, _) = app.delete(&format!("{}/{}", members_uri, alice), alice).await;
    let (second, body) = app.delete(&format!("{}/{}", members_uri, bob), bob).await;

    // Assert
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "The last admin cannot be removed from the workspace.");

    let (_, members) = app.get(&members_uri, bob).await;
    let members = members["result"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["userId"], bob);
    assert_eq!(members[0]["role"], "admin");
}

#[tokio::test]
async fn should_let_member_leave_workspace() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let bob = app.create_user("Bob").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    app.add_member(alice, workspace_id, bob, "member").await;

    let (status, _) = app
        .delete(&format!("/api/workspaces/{}/members/{}", workspace_id, bob), bob)
        .await;
    let (after, _) = app.get(&format!("/api/workspaces/{}", workspace_id), bob).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_cascade_workspace_delete_to_projects() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let workspace_id = app.create_workspace(alice, "acme").await;
    let project_id = app.create_project(alice, workspace_id, "Website").await;

    let (status, _) = app.delete(&format!("/api/workspaces/{}", workspace_id), alice).await;

    assert_eq!(status, StatusCode::OK);

    use sea_orm::EntityTrait;
    use taskhub::domain::project::entity::project;
    let remaining = project::Entity::find_by_id(project_id).one(&app.db).await.unwrap();
    assert!(remaining.is_none());
}

#[tokio::test]
async fn should_require_bearer_token() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(axum::http::Method::GET, "/api/workspaces", None, None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH4001");
}
