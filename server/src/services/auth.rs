//! Auth services - Gestione autenticazione e registrazione utenti

use crate::core::{AppError, AppState, encode_jwt};
use crate::dtos::{ApiResponse, CreateUserDTO, LoginDTO, LoginResponseDTO, RegisterDTO, UserDTO};
use crate::entities::User;
use crate::repositories::Create;
use axum::extract::{Json, State};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterDTO>,
) -> Result<Json<ApiResponse<UserDTO>>, AppError> {
    debug!("Registering new user");
    // 1. Validare il DTO (lunghezze, charset username)
    // 2. Controllare se esiste già un utente con lo stesso username
    // 3. Generare l'hash bcrypt della password
    // 4. Risolvere il nickname (default: username)
    // 5. Salvare il nuovo utente e ritornare lo UserDTO nella busta

    body.validate()?;

    if state.user.find_by_username(&body.username).await?.is_some() {
        warn!("Registration attempted with existing username");
        return Err(AppError::conflict("Username already exists"));
    }

    let password_hash = User::hash_password(&body.password).map_err(|_| {
        AppError::internal_server_error("Failed to hash password")
    })?;

    let new_user = CreateUserDTO {
        nickname: body.nickname.unwrap_or_else(|| body.username.clone()),
        username: body.username,
        password: password_hash,
    };

    let created_user = state.user.create(&new_user).await?;

    info!(user_id = created_user.user_id, "User registered");
    Ok(Json(ApiResponse::ok(
        "Registration successful",
        UserDTO::from(created_user),
    )))
}

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginDTO>,
) -> Result<Json<ApiResponse<LoginResponseDTO>>, AppError> {
    debug!("Login attempt");
    // 1. Cercare l'utente per username
    // 2. Verificare la password contro l'hash memorizzato
    // 3. In entrambi i casi di fallimento rispondere con lo STESSO messaggio,
    //    per non rivelare quali username esistono
    // 4. Emettere il token di sessione (7 giorni) e ritornarlo con l'utente

    let user = match state.user.find_by_username(&body.username).await? {
        Some(user) => user,
        None => {
            warn!("Login attempted with unknown username");
            return Err(AppError::unauthorized("Username or password incorrect"));
        }
    };

    if !user.verify_password(&body.password) {
        warn!("Login attempted with wrong password");
        return Err(AppError::unauthorized("Username or password incorrect"));
    }

    let token = encode_jwt(user.username.clone(), user.user_id, &state.jwt_secret)?;

    info!(user_id = user.user_id, "User logged in");
    Ok(Json(ApiResponse::ok(
        "Login successful",
        LoginResponseDTO {
            user: UserDTO::from(user),
            token,
        },
    )))
}
