//! Query DTOs - Data Transfer Objects per query string

use serde::{Deserialize, Serialize};

/// Query parameter per gli endpoint che operano su una stanza
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RoomIdQuery {
    pub room_id: i64,
}

/// Query parameters per il delta fetch dei messaggi
///
/// `since_message_id` è il cursore del client: l'id più alto già visto.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MessageUpdatesQuery {
    pub room_id: i64,
    pub since_message_id: i64,
}
