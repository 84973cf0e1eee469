use axum_test::TestServer;
use serde_json::{Value, json};
use server::core::AppState;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

/// Crea un pool SQLite in memoria con le migrations applicate
///
/// max_connections(1): ogni connessione a :memory: è un database separato,
/// quindi il pool deve restare su una sola connessione.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    server::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Crea un AppState per i test
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    Arc::new(AppState::new(pool, TEST_JWT_SECRET.to_string()))
}

/// Crea un TestServer per i test
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Registra un utente e fa login, ritornando il token di sessione
#[allow(dead_code)]
pub async fn register_and_login(server: &TestServer, username: &str, password: &str) -> String {
    let register_body = json!({
        "username": username,
        "password": password
    });
    let response = server.post("/auth/register").json(&register_body).await;
    response.assert_status_ok();

    let login_body = json!({
        "username": username,
        "password": password
    });
    let response = server.post("/auth/login").json(&login_body).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["code"], 0);
    body["data"]["token"]
        .as_str()
        .expect("Login response should carry a token")
        .to_string()
}

/// Crea una stanza e ritorna il suo id
#[allow(dead_code)]
pub async fn create_room(server: &TestServer, token: &str, room_name: &str) -> i64 {
    let response = server
        .post("/room")
        .authorization_bearer(token)
        .json(&json!({ "roomName": room_name }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["code"], 0);
    body["data"]["roomId"]
        .as_i64()
        .expect("Room creation should return roomId")
}

/// Invia un messaggio e ritorna il MessageDTO della risposta
#[allow(dead_code)]
pub async fn send_message(server: &TestServer, token: &str, room_id: i64, content: &str) -> Value {
    let response = server
        .post("/room/messages")
        .add_query_param("roomId", room_id)
        .authorization_bearer(token)
        .json(&json!({ "content": content }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["code"], 0);
    body["data"].clone()
}
