//! Errori del client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Errore di trasporto: rete giù, connessione rifiutata, body illeggibile.
    /// Per il poller è transiente: si ritenta al giro successivo.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Il server ha risposto con la busta di errore (`code != 0`).
    /// Va trattato come fallimento anche se lo status di trasporto era 200.
    #[error("api error {code}: {message}")]
    Api { code: u16, message: String },
}
