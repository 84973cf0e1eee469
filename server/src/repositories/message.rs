//! MessageRepository - Repository per la gestione dei messaggi

use super::Create;
use crate::dtos::CreateMessageDTO;
use crate::entities::{Message, MessageWithSender};
use sqlx::{Error, SqlitePool};

// Il nome del mittente è il nickname, con fallback sullo username se vuoto:
// stessa regola su tutte le query che escono verso il client.
const SENDER_SELECT: &str = "SELECT m.message_id, m.room_id, \
     COALESCE(NULLIF(u.nickname, ''), u.username) AS sender, \
     m.content, m.created_at \
     FROM messages m JOIN users u ON u.user_id = m.sender_id";

// MESSAGE REPO
pub struct MessageRepository {
    connection_pool: SqlitePool,
}

impl MessageRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Storia completa di una stanza, ordinata per id crescente (id è
    /// l'ordine totale dei messaggi, mai riordinato altrove).
    pub async fn find_many_by_room_id(
        &self,
        room_id: &i64,
    ) -> Result<Vec<MessageWithSender>, Error> {
        let query = format!("{SENDER_SELECT} WHERE m.room_id = ? ORDER BY m.message_id ASC");
        let messages = sqlx::query_as::<_, MessageWithSender>(&query)
            .bind(room_id)
            .fetch_all(&self.connection_pool)
            .await?;

        Ok(messages)
    }

    /// Delta fetch: messaggi della stanza con id maggiore del cursore del
    /// client, ordine crescente. Cursore = id più alto già visto.
    pub async fn find_many_after(
        &self,
        room_id: &i64,
        since_message_id: &i64,
    ) -> Result<Vec<MessageWithSender>, Error> {
        let query = format!(
            "{SENDER_SELECT} WHERE m.room_id = ? AND m.message_id > ? ORDER BY m.message_id ASC"
        );
        let messages = sqlx::query_as::<_, MessageWithSender>(&query)
            .bind(room_id)
            .bind(since_message_id)
            .fetch_all(&self.connection_pool)
            .await?;

        Ok(messages)
    }

    /// Ultimo messaggio della stanza, per l'anteprima nella lista stanze
    pub async fn find_last_by_room_id(
        &self,
        room_id: &i64,
    ) -> Result<Option<MessageWithSender>, Error> {
        let query = format!("{SENDER_SELECT} WHERE m.room_id = ? ORDER BY m.message_id DESC LIMIT 1");
        let message = sqlx::query_as::<_, MessageWithSender>(&query)
            .bind(room_id)
            .fetch_optional(&self.connection_pool)
            .await?;

        Ok(message)
    }

    /// Rilegge un messaggio appena creato già arricchito del nome mittente
    pub async fn find_with_sender(
        &self,
        message_id: &i64,
    ) -> Result<Option<MessageWithSender>, Error> {
        let query = format!("{SENDER_SELECT} WHERE m.message_id = ?");
        let message = sqlx::query_as::<_, MessageWithSender>(&query)
            .bind(message_id)
            .fetch_optional(&self.connection_pool)
            .await?;

        Ok(message)
    }
}

impl Create<Message, CreateMessageDTO> for MessageRepository {
    async fn create(&self, data: &CreateMessageDTO) -> Result<Message, Error> {
        let result = sqlx::query(
            "INSERT INTO messages (room_id, sender_id, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(data.room_id)
        .bind(data.sender_id)
        .bind(&data.content)
        .bind(data.created_at)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();

        Ok(Message {
            message_id: new_id,
            room_id: data.room_id,
            sender_id: data.sender_id,
            content: data.content.clone(),
            created_at: data.created_at,
        })
    }
}
