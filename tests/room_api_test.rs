//! 협업 룸(채팅/화이트보드) API 통합 테스트

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

async fn create_room(app: &TestApp, owner_id: i64, name: &str) -> i64 {
    let (status, body) = app.post("/api/rooms", owner_id, json!({ "name": name })).await;
    assert_eq!(status, StatusCode::OK, "create room: {}", body);
    body["result"]["roomId"].as_i64().unwrap()
}

#[tokio::test]
async fn should_return_messages_in_order_after_cursor() {
    // Arrange
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let bob = app.create_user("Bob").await;
    let room_id = create_room(&app, alice, "Design sync").await;
    let uri = format!("/api/rooms/{}/messages", room_id);

    let mut ids = Vec::new();
    for (sender, content) in [(alice, "hi"), (bob, "hello"), (alice, "let's start")] {
        let (status, body) = app.post(&uri, sender, json!({ "content": content })).await;
        assert_eq!(status, StatusCode::OK);
        ids.push(body["result"]["chatMessageId"].as_i64().unwrap());
    }

    // Act
    let (_, all) = app.get(&uri, bob).await;
    let (_, after_first) = app.get(&format!("{}?after={}&limit=1", uri, ids[0]), bob).await;

    // Assert
    let contents: Vec<&str> = all["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["hi", "hello", "let's start"]);

    let page = after_first["result"].as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["chatMessageId"], ids[1]);
    assert_eq!(page[0]["senderId"], bob);
}

#[tokio::test]
async fn should_reject_blank_message() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let room_id = create_room(&app, alice, "Design sync").await;

    let (status, _) = app
        .post(&format!("/api/rooms/{}/messages", room_id), alice, json!({ "content": "   " }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_replace_whiteboard_state() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let room_id = create_room(&app, alice, "Design sync").await;
    let state = json!({ "shapes": [{ "kind": "rect", "x": 10, "y": 20 }] });

    let (status, body) = app
        .put(
            &format!("/api/rooms/{}/whiteboard", room_id),
            alice,
            json!({ "state": state }),
        )
        .await;
    let (_, room) = app.get(&format!("/api/rooms/{}", room_id), alice).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["whiteboard"], state);
    assert_eq!(room["result"]["whiteboard"], state);
}

#[tokio::test]
async fn should_reject_whiteboard_over_one_megabyte() {
    // Arrange
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let room_id = create_room(&app, alice, "Design sync").await;
    let uri = format!("/api/rooms/{}/whiteboard", room_id);
    let near_limit = json!({ "blob": "x".repeat(1024 * 1024 - 64) });
    let over_limit = json!({ "blob": "x".repeat(1024 * 1024) });

    // Act
    let (accepted, _) = app.put(&uri, alice, json!({ "state": near_limit })).await;
    let (rejected, body) = app.put(&uri, alice, json!({ "state": over_limit })).await;

    // Assert
    assert_eq!(accepted, StatusCode::OK);
    assert_eq!(rejected, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Whiteboard state must be at most 1MB.");

    let (_, room) = app.get(&format!("/api/rooms/{}", room_id), alice).await;
    assert_eq!(room["result"]["whiteboard"], near_limit);
}

#[tokio::test]
async fn should_only_let_owner_delete_room() {
    let app = TestApp::new().await;
    let alice = app.create_user("Alice").await;
    let bob = app.create_user("Bob").await;
    let room_id = create_room(&app, alice, "Design sync").await;
    app.post(
        &format!("/api/rooms/{}/messages", room_id),
        bob,
        json!({ "content": "hi" }),
    )
    .await;

    let (by_guest, _) = app.delete(&format!("/api/rooms/{}", room_id), bob).await;
    let (by_owner, _) = app.delete(&format!("/api/rooms/{}", room_id), alice).await;
    let (after, body) = app.get(&format!("/api/rooms/{}", room_id), alice).await;

    assert_eq!(by_guest, StatusCode::FORBIDDEN);
    assert_eq!(by_owner, StatusCode::OK);
    assert_eq!(after, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ROOM4041");

    use sea_orm::{EntityTrait, PaginatorTrait};
    use taskhub::domain::room::entity::chat_message;
    assert_eq!(chat_message::Entity::find().count(&app.db).await.unwrap(), 0);
}
