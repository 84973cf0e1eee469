//! Room entity - Entità stanza

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Room {
    pub room_id: i64,
    pub room_name: String,
    /// user_id del creatore, immutabile. Solo lui può cancellare la stanza.
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    /// Aggiornato ad ogni nuovo messaggio: è la chiave di ordinamento
    /// della lista stanze (più recente prima).
    pub updated_at: DateTime<Utc>,
}
