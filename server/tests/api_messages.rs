//! Integration tests per gli endpoints dei messaggi
//!
//! Test per:
//! - POST /room/messages (invio)
//! - GET /room/messages (storia completa, id crescenti)
//! - GET /room/messages/updates (delta fetch con cursore)

mod common;

#[cfg(test)]
mod message_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    // ============================================================
    // Test per POST /room/messages - send_message
    // ============================================================

    #[tokio::test]
    async fn test_send_and_list_message() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        // end-to-end: register -> login -> stanza -> messaggio -> lista
        let token = register_and_login(&server, "alice", "secret1").await;
        let room_id = create_room(&server, &token, "General").await;

        let sent = send_message(&server, &token, room_id, "hi").await;
        assert_eq!(sent["content"], "hi");
        assert_eq!(sent["sender"], "alice");
        assert_eq!(sent["roomId"].as_i64().unwrap(), room_id);
        // id e timestamp sono quelli assegnati dal server
        assert!(sent["messageId"].as_i64().is_some());
        assert!(sent["time"].as_i64().unwrap() > 0);

        let response = server
            .get("/room/messages")
            .add_query_param("roomId", room_id)
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let messages = body["data"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["sender"], "alice");
        assert_eq!(messages[0]["content"], "hi");
    }

    #[tokio::test]
    async fn test_sender_uses_nickname_when_present() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        server
            .post("/auth/register")
            .json(&json!({ "username": "alice", "password": "secret1", "nickname": "Ali" }))
            .await
            .assert_status_ok();
        let response = server
            .post("/auth/login")
            .json(&json!({ "username": "alice", "password": "secret1" }))
            .await;
        let body: Value = response.json();
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let room_id = create_room(&server, &token, "General").await;
        let sent = send_message(&server, &token, room_id, "hi").await;

        assert_eq!(sent["sender"], "Ali");
    }

    #[tokio::test]
    async fn test_send_message_requires_auth() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let response = server
            .post("/room/messages")
            .add_query_param("roomId", 1)
            .json(&json!({ "content": "hi" }))
            .await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_send_message_room_not_found() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let token = register_and_login(&server, "alice", "secret1").await;

        let response = server
            .post("/room/messages")
            .add_query_param("roomId", 999)
            .authorization_bearer(&token)
            .json(&json!({ "content": "hi" }))
            .await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_send_message_content_bounds() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let token = register_and_login(&server, "alice", "secret1").await;
        let room_id = create_room(&server, &token, "General").await;

        let response = server
            .post("/room/messages")
            .add_query_param("roomId", room_id)
            .authorization_bearer(&token)
            .json(&json!({ "content": "" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let too_long = "x".repeat(1001);
        let response = server
            .post("/room/messages")
            .add_query_param("roomId", room_id)
            .authorization_bearer(&token)
            .json(&json!({ "content": too_long }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    // ============================================================
    // Test per GET /room/messages - list_messages
    // ============================================================

    #[tokio::test]
    async fn test_messages_ordered_by_id_ascending() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let token = register_and_login(&server, "alice", "secret1").await;
        let room_id = create_room(&server, &token, "General").await;

        for content in ["m1", "m2", "m3"] {
            send_message(&server, &token, room_id, content).await;
        }

        let response = server
            .get("/room/messages")
            .add_query_param("roomId", room_id)
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let messages = body["data"].as_array().unwrap();
        assert_eq!(messages.len(), 3);

        let ids: Vec<i64> = messages
            .iter()
            .map(|m| m["messageId"].as_i64().unwrap())
            .collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert_eq!(messages[0]["content"], "m1");
        assert_eq!(messages[2]["content"], "m3");
    }

    // ============================================================
    // Test per GET /room/messages/updates - message_updates
    // ============================================================

    #[tokio::test]
    async fn test_message_updates_delta_semantics() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let token = register_and_login(&server, "alice", "secret1").await;
        let room_id = create_room(&server, &token, "General").await;

        let mut ids = Vec::new();
        for content in ["m1", "m2", "m3", "m4", "m5"] {
            let sent = send_message(&server, &token, room_id, content).await;
            ids.push(sent["messageId"].as_i64().unwrap());
        }

        // cursore = id(m3): il delta è esattamente [m4, m5]
        let response = server
            .get("/room/messages/updates")
            .add_query_param("roomId", room_id)
            .add_query_param("sinceMessageId", ids[2])
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let delta = body["data"].as_array().unwrap();
        assert_eq!(delta.len(), 2);
        assert_eq!(delta[0]["content"], "m4");
        assert_eq!(delta[1]["content"], "m5");

        // cursore = id(m5): delta vuoto
        let response = server
            .get("/room/messages/updates")
            .add_query_param("roomId", room_id)
            .add_query_param("sinceMessageId", ids[4])
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_message_updates_scoped_to_room() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let token = register_and_login(&server, "alice", "secret1").await;
        let room_a = create_room(&server, &token, "A").await;
        let room_b = create_room(&server, &token, "B").await;

        send_message(&server, &token, room_a, "in A").await;
        send_message(&server, &token, room_b, "in B").await;

        // il delta di A con cursore 0 non deve contenere messaggi di B
        let response = server
            .get("/room/messages/updates")
            .add_query_param("roomId", room_a)
            .add_query_param("sinceMessageId", 0)
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let delta = body["data"].as_array().unwrap();
        assert_eq!(delta.len(), 1);
        assert_eq!(delta[0]["content"], "in A");
    }

    #[tokio::test]
    async fn test_message_updates_room_not_found() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let token = register_and_login(&server, "alice", "secret1").await;

        let response = server
            .get("/room/messages/updates")
            .add_query_param("roomId", 999)
            .add_query_param("sinceMessageId", 0)
            .authorization_bearer(&token)
            .await;
        response.assert_status_not_found();
    }
}
