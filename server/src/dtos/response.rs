//! Response envelope - Busta comune di tutte le risposte API
//!
//! Ogni endpoint risponde con `{message, code, data}`: `code` vale 0 in
//! caso di successo, altrimenti replica lo status HTTP e `data` è null.
//! Il client deve trattare `code != 0` come fallimento a prescindere
//! dallo status di trasporto.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub message: String,
    pub code: u16,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Busta di successo: code 0 e payload presente
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            message: message.to_string(),
            code: 0,
            data: Some(data),
        }
    }

    /// Busta di errore: code = status HTTP, data sempre null
    pub fn error(message: &str, code: u16) -> Self {
        Self {
            message: message.to_string(),
            code,
            data: None,
        }
    }
}
