//! Integration tests per gli endpoints delle stanze
//!
//! Test per:
//! - POST /room (creazione)
//! - GET /room/list (lista ordinata per attività)
//! - DELETE /room (solo il creatore, cascata sui messaggi)

mod common;

#[cfg(test)]
mod room_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    // ============================================================
    // Test per POST /room - create_room
    // ============================================================

    #[tokio::test]
    async fn test_create_room_success() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let token = register_and_login(&server, "alice", "secret1").await;

        let response = server
            .post("/room")
            .authorization_bearer(&token)
            .json(&json!({ "roomName": "General" }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["roomName"], "General");
        assert_eq!(body["data"]["createdBy"], "alice");
        assert!(body["data"]["roomId"].as_i64().is_some());
    }

    #[tokio::test]
    async fn test_create_room_requires_auth() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let response = server.post("/room").json(&json!({ "roomName": "General" })).await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_create_room_invalid_name() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let token = register_and_login(&server, "alice", "secret1").await;

        let response = server
            .post("/room")
            .authorization_bearer(&token)
            .json(&json!({ "roomName": "" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let long_name = "x".repeat(51);
        let response = server
            .post("/room")
            .authorization_bearer(&token)
            .json(&json!({ "roomName": long_name }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    // ============================================================
    // Test per GET /room/list - list_rooms
    // ============================================================

    #[tokio::test]
    async fn test_list_rooms_ordered_by_recent_activity() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let token = register_and_login(&server, "alice", "secret1").await;

        let first = create_room(&server, &token, "First").await;
        let second = create_room(&server, &token, "Second").await;

        // un messaggio nella prima stanza la riporta in cima alla lista
        send_message(&server, &token, first, "hello").await;

        let response = server.get("/room/list").authorization_bearer(&token).await;
        response.assert_status_ok();

        let body: Value = response.json();
        let rooms = body["data"].as_array().unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0]["roomId"].as_i64().unwrap(), first);
        assert_eq!(rooms[1]["roomId"].as_i64().unwrap(), second);

        // anteprima: ultimo messaggio presente solo dove c'è attività
        assert_eq!(rooms[0]["lastMessage"]["content"], "hello");
        assert_eq!(rooms[1]["lastMessage"], Value::Null);
    }

    // ============================================================
    // Test per DELETE /room - delete_room
    // ============================================================

    #[tokio::test]
    async fn test_delete_room_by_creator_cascades_messages() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let token = register_and_login(&server, "alice", "secret1").await;
        let room_id = create_room(&server, &token, "Doomed").await;
        send_message(&server, &token, room_id, "soon gone").await;

        let response = server
            .delete("/room")
            .add_query_param("roomId", room_id)
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();

        // la stanza non esiste più: la storia messaggi risponde not found
        let response = server
            .get("/room/messages")
            .add_query_param("roomId", room_id)
            .authorization_bearer(&token)
            .await;
        response.assert_status_not_found();

        // e la lista non la contiene
        let response = server.get("/room/list").authorization_bearer(&token).await;
        let body: Value = response.json();
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_room_by_non_creator_forbidden() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let alice = register_and_login(&server, "alice", "secret1").await;
        let bob = register_and_login(&server, "bob", "secret2").await;

        let room_id = create_room(&server, &alice, "AliceOnly").await;
        send_message(&server, &alice, room_id, "keep me").await;

        let response = server
            .delete("/room")
            .add_query_param("roomId", room_id)
            .authorization_bearer(&bob)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        // stanza e messaggi intatti
        let response = server
            .get("/room/messages")
            .add_query_param("roomId", room_id)
            .authorization_bearer(&alice)
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_room_not_found() {
        let state = create_test_state(create_test_pool().await);
        let server = create_test_server(state);

        let token = register_and_login(&server, "alice", "secret1").await;

        let response = server
            .delete("/room")
            .add_query_param("roomId", 999)
            .authorization_bearer(&token)
            .await;
        response.assert_status_not_found();
    }
}
