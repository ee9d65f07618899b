//! 사용자 API 통합 테스트
//!
//! - 이메일 중복, 내 정보, 없는 사용자
//! - 삭제된(존재하지 않는) 사용자의 토큰

mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn should_reject_duplicate_email_case_insensitively() {
    // Arrange
    let app = TestApp::new().await;
    let (first, created) = app
        .request(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "email": "Carol@Example.com", "name": "Carol" })),
        )
        .await;

    // Act
    let (second, body) = app
        .request(
            Method::POST,
            "/api/users",
            None,
            Some(json!({ "email": "carol@example.com", "name": "Carol 2" })),
        )
        .await;

    // Assert
    assert_eq!(first, StatusCode::OK);
    assert_eq!(created["result"]["email"], "carol@example.com");
    assert_eq!(created["result"]["role"], "member");
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["code"], "COMMON409");
    assert_eq!(body["message"], "A user with this email already exists.");
}

#[tokio::test]
async fn should_return_current_user() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;

    let (status, body) = app.get("/api/users/me", alice).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["userId"], alice);
    assert_eq!(body["result"]["email"], "alice@example.com");
    assert_eq!(body["result"]["name"], "Alice");
}

#[tokio::test]
async fn should_require_token_for_current_user() {
    let app = TestApp::new().await;

    let (status, body) = app.request(Method::GET, "/api/users/me", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["isSuccess"], false);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_user() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;

    let (status, body) = app.get("/api/users/424242", alice).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "USER4041");
}

#[tokio::test]
async fn should_reject_token_of_missing_user() {
    // Arrange
    let app = TestApp::new().await;
    let ghost = 999;

    // Act
    let (room, room_body) = app.post("/api/rooms", ghost, json!({ "name": "Lobby" })).await;
    let (workspace, _) = app
        .post("/api/workspaces", ghost, json!({ "name": "ghost-town" }))
        .await;
    let (me, _) = app.get("/api/users/me", ghost).await;

    // Assert
    assert_eq!(room, StatusCode::UNAUTHORIZED);
    assert_eq!(room_body["code"], "AUTH4001");
    assert_eq!(workspace, StatusCode::UNAUTHORIZED);
    assert_eq!(me, StatusCode::UNAUTHORIZED);

    let alice = app.create_user("Alice").await;
    let (_, rooms) = app.get("/api/rooms", alice).await;
    assert!(rooms["result"].as_array().unwrap().is_empty());
}
