//! Message entity - Entità messaggio

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Message {
    /// Assegnato dal database, monotono crescente anche tra stanze diverse.
    pub message_id: i64,
    pub room_id: i64,
    pub sender_id: i64,
    pub content: String,
    // il server si aspetta una stringa iso8601 che viene parsata in DateTime UTC,
    // la conversione la fa sqlx con la feature chrono
    pub created_at: DateTime<Utc>,
}

/// Messaggio arricchito con il nome del mittente (nickname, con fallback
/// sullo username) tramite join sulla tabella users. È la forma che esce
/// verso il client.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct MessageWithSender {
    pub message_id: i64,
    pub room_id: i64,
    pub sender: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
