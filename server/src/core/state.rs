//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository e la configurazione condivisa necessaria
//! per gestire l'applicazione. Nessuno stato mutabile in-process: tutto
//! quello che cambia vive nel database.

use crate::repositories::{MessageRepository, RoomRepository, UserRepository};
use sqlx::SqlitePool;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti
    pub user: UserRepository,

    /// Repository per la gestione delle stanze
    pub room: RoomRepository,

    /// Repository per la gestione dei messaggi
    pub msg: MessageRepository,

    /// Secret key per JWT token
    pub jwt_secret: String,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito e la JWT secret.
    pub fn new(pool: SqlitePool, jwt_secret: String) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            room: RoomRepository::new(pool.clone()),
            msg: MessageRepository::new(pool),
            jwt_secret,
        }
    }
}
