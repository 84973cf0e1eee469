//! RoomRepository - Repository per la gestione delle stanze

use super::{Create, Delete, Read};
use crate::dtos::CreateRoomDTO;
use crate::entities::Room;
use chrono::{DateTime, Utc};
use sqlx::{Error, SqlitePool};

// ROOM REPO
pub struct RoomRepository {
    connection_pool: SqlitePool,
}

impl RoomRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Tutte le stanze, ordinate per attività più recente
    pub async fn find_all_by_recent_activity(&self) -> Result<Vec<Room>, Error> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT room_id, room_name, created_by, created_at, updated_at \
             FROM rooms ORDER BY updated_at DESC, room_id DESC",
        )
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(rooms)
    }

    /// Bump di updated_at, chiamato ad ogni nuovo messaggio nella stanza
    pub async fn touch(&self, room_id: &i64, at: &DateTime<Utc>) -> Result<(), Error> {
        sqlx::query("UPDATE rooms SET updated_at = ? WHERE room_id = ?")
            .bind(at)
            .bind(room_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }
}

impl Create<Room, CreateRoomDTO> for RoomRepository {
    async fn create(&self, data: &CreateRoomDTO) -> Result<Room, Error> {
        let result = sqlx::query(
            "INSERT INTO rooms (room_name, created_by, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&data.room_name)
        .bind(data.created_by)
        .bind(data.created_at)
        .bind(data.created_at)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();

        Ok(Room {
            room_id: new_id,
            room_name: data.room_name.clone(),
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.created_at,
        })
    }
}

impl Read<Room, i64> for RoomRepository {
    async fn read(&self, id: &i64) -> Result<Option<Room>, Error> {
        let room = sqlx::query_as::<_, Room>(
            "SELECT room_id, room_name, created_by, created_at, updated_at \
             FROM rooms WHERE room_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(room)
    }
}

impl Delete<i64> for RoomRepository {
    /// Cancella la stanza e tutti i suoi messaggi nella stessa transazione.
    /// La cascata è esplicita: lo schema non ha foreign key con ON DELETE,
    /// quindi l'invariante "nessun messaggio orfano" va mantenuta qui.
    async fn delete(&self, id: &i64) -> Result<(), Error> {
        let mut tx = self.connection_pool.begin().await?;

        sqlx::query("DELETE FROM messages WHERE room_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM rooms WHERE room_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}
