//! User DTOs - Data Transfer Objects per utenti

use crate::entities::User;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
}

// struct per gestire io col client
#[derive(Serialize, Deserialize, Debug)]
pub struct UserDTO {
    pub id: i64,
    pub username: String,
    pub nickname: String,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.user_id,
            username: value.username,
            nickname: value.nickname,
            // la password hashata non esce mai dal server!!!
        }
    }
}

/// DTO per la registrazione di un nuovo utente
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct RegisterDTO {
    #[validate(
        length(min = 3, max = 20, message = "Username must be between 3 and 20 characters"),
        regex(path = *USERNAME_RE, message = "Username may contain only letters, digits and underscore")
    )]
    pub username: String,

    #[validate(length(min = 6, max = 100, message = "Password must be between 6 and 100 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 20, message = "Nickname must be between 1 and 20 characters"))]
    pub nickname: Option<String>,
}

/// DTO per il login (solo username e password)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginDTO {
    pub username: String,
    pub password: String,
}

/// Risposta del login: utente autenticato + token di sessione
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponseDTO {
    pub user: UserDTO,
    pub token: String,
}

/// DTO interno per la creazione (password già hashata, nickname risolto)
#[derive(Debug, Clone)]
pub struct CreateUserDTO {
    pub username: String,
    pub password: String,
    pub nickname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_dto_validation_bounds() {
        let ok = RegisterDTO {
            username: "alice".to_string(),
            password: "secret1".to_string(),
            nickname: None,
        };
        assert!(ok.validate().is_ok());

        let short_username = RegisterDTO {
            username: "al".to_string(),
            password: "secret1".to_string(),
            nickname: None,
        };
        assert!(short_username.validate().is_err());

        let bad_charset = RegisterDTO {
            username: "alice!".to_string(),
            password: "secret1".to_string(),
            nickname: None,
        };
        assert!(bad_charset.validate().is_err());

        let short_password = RegisterDTO {
            username: "alice".to_string(),
            password: "abc".to_string(),
            nickname: None,
        };
        assert!(short_password.validate().is_err());
    }
}
