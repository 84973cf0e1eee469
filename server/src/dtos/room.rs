//! Room DTOs - Data Transfer Objects per le stanze

use super::MessageDTO;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO per creare una nuova stanza (body della richiesta)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequestDTO {
    #[validate(length(min = 1, max = 50, message = "Room name must be between 1 and 50 characters"))]
    pub room_name: String,
}

/// DTO interno per la creazione (creatore e timestamp risolti dal service)
#[derive(Debug, Clone)]
pub struct CreateRoomDTO {
    pub room_name: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Struct per gestire io col client
///
/// `created_by` è lo username del creatore, non il suo id: il client lo
/// mostra così com'è.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RoomDTO {
    pub room_id: i64,
    pub room_name: String,
    pub created_by: String,
}

/// Voce della lista stanze: stanza + ultimo messaggio (se presente)
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RoomPreviewDTO {
    pub room_id: i64,
    pub room_name: String,
    pub created_by: String,
    pub last_message: Option<MessageDTO>,
}
