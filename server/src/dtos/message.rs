//! Message DTOs - Data Transfer Objects per messaggi

use crate::entities::MessageWithSender;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Struct per gestire io col client
///
/// `time` è il timestamp di creazione in millisecondi Unix, assegnato dal
/// server: il client non deve mai fidarsi di un orario proprio.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MessageDTO {
    pub message_id: i64,
    pub room_id: i64,
    pub sender: String,
    pub content: String,
    pub time: i64,
}

impl From<MessageWithSender> for MessageDTO {
    fn from(value: MessageWithSender) -> Self {
        Self {
            message_id: value.message_id,
            room_id: value.room_id,
            sender: value.sender,
            content: value.content,
            time: value.created_at.timestamp_millis(),
        }
    }
}

/// DTO per inviare un nuovo messaggio (il mittente arriva dal token)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SendMessageDTO {
    #[validate(length(min = 1, max = 1000, message = "Message content must be between 1 and 1000 characters"))]
    pub content: String,
}

/// DTO interno per la creazione (mittente e timestamp risolti dal service)
#[derive(Debug, Clone)]
pub struct CreateMessageDTO {
    pub room_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
