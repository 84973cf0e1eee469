//! ApiClient - Client HTTP tipato per le API del server
//!
//! Ogni risposta arriva nella busta `{message, code, data}`: `code != 0` è
//! un fallimento a prescindere dallo status HTTP, e `data` è null. Il token
//! di sessione è stato esplicito del client, mai letto da uno store globale:
//! si ottiene dal login e si attacca come bearer ad ogni chiamata protetta.

use crate::error::ClientError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Busta comune di tutte le risposte del server
#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub message: String,
    pub code: u16,
    pub data: Option<T>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub nickname: String,
}

/// Risposta del login: utente + token di sessione (valido 7 giorni)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginData {
    pub user: UserInfo,
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    pub room_id: i64,
    pub room_name: String,
    pub created_by: String,
}

/// Voce della lista stanze, con anteprima dell'ultimo messaggio
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoomPreview {
    pub room_id: i64,
    pub room_name: String,
    pub created_by: String,
    pub last_message: Option<Message>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_id: i64,
    pub room_id: i64,
    pub sender: String,
    pub content: String,
    /// Millisecondi Unix assegnati dal server
    pub time: i64,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Imposta il token di sessione da usare per le chiamate protette
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        nickname: Option<&str>,
    ) -> Result<UserInfo, ClientError> {
        let response = self
            .http
            .post(format!("{}/auth/register", self.base_url))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
                "nickname": nickname,
            }))
            .send()
            .await?;
        unwrap_envelope(response).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginData, ClientError> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;
        unwrap_envelope(response).await
    }

    pub async fn list_rooms(&self) -> Result<Vec<RoomPreview>, ClientError> {
        let response = self
            .authorized(self.http.get(format!("{}/room/list", self.base_url)))
            .send()
            .await?;
        unwrap_envelope(response).await
    }

    pub async fn create_room(&self, room_name: &str) -> Result<RoomInfo, ClientError> {
        let response = self
            .authorized(self.http.post(format!("{}/room", self.base_url)))
            .json(&serde_json::json!({ "roomName": room_name }))
            .send()
            .await?;
        unwrap_envelope(response).await
    }

    pub async fn delete_room(&self, room_id: i64) -> Result<(), ClientError> {
        let response = self
            .authorized(self.http.delete(format!("{}/room", self.base_url)))
            .query(&[("roomId", room_id)])
            .send()
            .await?;
        unwrap_empty_envelope(response).await
    }

    /// Storia completa della stanza, id crescenti
    pub async fn room_messages(&self, room_id: i64) -> Result<Vec<Message>, ClientError> {
        let response = self
            .authorized(self.http.get(format!("{}/room/messages", self.base_url)))
            .query(&[("roomId", room_id)])
            .send()
            .await?;
        unwrap_envelope(response).await
    }

    /// Delta fetch: messaggi con id maggiore di `since_message_id`
    pub async fn message_updates(
        &self,
        room_id: i64,
        since_message_id: i64,
    ) -> Result<Vec<Message>, ClientError> {
        let response = self
            .authorized(
                self.http
                    .get(format!("{}/room/messages/updates", self.base_url)),
            )
            .query(&[("roomId", room_id), ("sinceMessageId", since_message_id)])
            .send()
            .await?;
        unwrap_envelope(response).await
    }

    pub async fn send_message(&self, room_id: i64, content: &str) -> Result<Message, ClientError> {
        let response = self
            .authorized(self.http.post(format!("{}/room/messages", self.base_url)))
            .query(&[("roomId", room_id)])
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;
        unwrap_envelope(response).await
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Apre la busta e ritorna il payload, o errore se `code != 0`
async fn unwrap_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let envelope: ApiResponse<T> = response.json().await?;
    if envelope.code != 0 {
        return Err(ClientError::Api {
            code: envelope.code,
            message: envelope.message,
        });
    }
    envelope.data.ok_or(ClientError::Api {
        code: 0,
        message: "response envelope is missing data".to_string(),
    })
}

/// Come sopra, per gli endpoint che rispondono con data null
async fn unwrap_empty_envelope(response: reqwest::Response) -> Result<(), ClientError> {
    let envelope: ApiResponse<serde_json::Value> = response.json().await?;
    if envelope.code != 0 {
        return Err(ClientError::Api {
            code: envelope.code,
            message: envelope.message,
        });
    }
    Ok(())
}
