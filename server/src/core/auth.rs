//! Autenticazione - Token di sessione JWT e middleware di guardia
//!
//! Il token è stateless: nessuna sessione lato server, la validità dipende
//! solo da firma e scadenza. Vale 7 giorni dalla emissione, non rinnovabile
//! senza nuovo login e non revocabile (debolezza nota e accettata).

use crate::core::{AppError, AppState};
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Durata fissa del token: 7 giorni
const TOKEN_LIFETIME_DAYS: i64 = 7;

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub id: i64,
    pub username: String,
}

/// Identità autenticata, ricavata dal token verificato e valida per la
/// durata della singola richiesta. Non viene mai persistita: il gate la
/// inserisce nelle Extension e gli handler la leggono da lì.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

#[instrument(skip(secret), fields(username = %username, id = %id))]
pub fn encode_jwt(username: String, id: i64, secret: &str) -> Result<String, AppError> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let expire = Duration::days(TOKEN_LIFETIME_DAYS);
    let exp: usize = (now + expire).timestamp() as usize;
    let iat: usize = now.timestamp() as usize;
    let claim = Claims {
        iat,
        exp,
        username,
        id,
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| {
        warn!("Failed to encode JWT token: {:?}", e);
        AppError::internal_server_error("Error in encoding jwt token")
    })
}

/// Verifica firma e scadenza e restituisce i claims decodificati.
/// Qualsiasi fallimento (token malformato, firma errata, scadenza) collassa
/// nello stesso errore: il chiamante non sa mai quale controllo è fallito.
#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<TokenData<Claims>, AppError> {
    debug!("Decoding JWT token");
    decode(
        jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        AppError::unauthorized("Invalid or expired credential")
    })
}

/// Middleware di autenticazione: estrae il bearer token, lo verifica e
/// inserisce l'identità nelle Extension della richiesta.
///
/// Il gate NON tocca il database e NON fa controlli di ownership: quelli
/// restano ai singoli handler, che confrontano l'identità con il campo
/// owner della risorsa.
#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let auth_header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(header) => header.to_str().map_err(|_| {
            warn!("Authorization header is not valid UTF-8");
            AppError::unauthorized("Invalid authorization header")
        })?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::unauthorized("No credential presented"));
        }
    };

    let token = match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => token,
        _ => {
            warn!("Malformed authorization header");
            return Err(AppError::unauthorized("No credential presented"));
        }
    };

    let token_data = decode_jwt(token, &state.jwt_secret)?;

    debug!(username = %token_data.claims.username, "Request authenticated");
    req.extensions_mut().insert(AuthUser {
        user_id: token_data.claims.id,
        username: token_data.claims.username,
    });

    Ok(next.run(req).await)
}
