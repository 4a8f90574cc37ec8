//! HTTP API integration tests.
//!
//! Tests for the liveness string and the read-only room endpoints.

mod fixtures;
use fixtures::{TestServer, send_json};

#[tokio::test]
async fn test_liveness_endpoint() {
    // テスト項目: / エンドポイントが固定の稼働メッセージを返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::get(format!("{}/", server.base_url()))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.text().await.expect("Failed to read body"),
        "Sketchroom relay is running"
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::get(format!("{}/api/health", server.base_url()))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_rooms_list_endpoint() {
    // テスト項目: /api/rooms はメンバーがいるルームだけを返す
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    send_json(&mut alice, serde_json::json!({"event": "join-room", "data": "r1"})).await;
    send_json(&mut bob, serde_json::json!({"event": "join-room", "data": "r1"})).await;
    server.wait_for_members("r1", 2).await;

    // when (操作):
    let response = reqwest::get(format!("{}/api/rooms", server.base_url()))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let rooms = body.as_array().expect("Response should be an array");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0]["id"], "r1");
    assert_eq!(rooms[0]["member_count"], 2);
    let members = rooms[0]["members"].as_array().expect("members should be an array");
    assert_eq!(members.len(), 2);
    assert!(members.iter().all(|m| m.is_string()));
    assert!(rooms[0]["created_at"].is_string());
}

#[tokio::test]
async fn test_room_detail_endpoint_success() {
    // テスト項目: /api/rooms/{room_id} がメンバーの詳細を返す
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    send_json(&mut alice, serde_json::json!({"event": "join-room", "data": "r1"})).await;
    server.wait_for_members("r1", 1).await;

    // when (操作):
    let response = reqwest::get(format!("{}/api/rooms/r1", server.base_url()))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["id"], "r1");
    let members = body["members"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert!(members[0]["connection_id"].is_string());
    assert!(members[0]["joined_at"].is_string());
}

#[tokio::test]
async fn test_room_detail_endpoint_not_found_after_last_member_leaves() {
    // テスト項目: 最後のメンバーが切断したルームは 404 になる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    send_json(&mut alice, serde_json::json!({"event": "join-room", "data": "r1"})).await;
    server.wait_for_members("r1", 1).await;

    // when (操作):
    drop(alice);
    server.wait_for_members("r1", 0).await;
    let response = reqwest::get(format!("{}/api/rooms/r1", server.base_url()))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_room_detail_endpoint_not_found() {
    // テスト項目: 存在しないルームに対して 404 を返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::get(format!("{}/api/rooms/nonexistent", server.base_url()))
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 404);
}
