//! Room services - Gestione operazioni sulle stanze

use crate::core::{AppError, AppState, AuthUser};
use crate::dtos::{
    ApiResponse, CreateRoomDTO, CreateRoomRequestDTO, MessageDTO, RoomDTO, RoomIdQuery,
    RoomPreviewDTO,
};
use crate::repositories::{Create, Delete, Read};
use axum::{
    Extension,
    extract::{Json, Query, State},
};
use chrono::Utc;
use futures_util::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<AuthUser>, // ottenuto dall'autenticazione tramite token jwt
    Json(body): Json<CreateRoomRequestDTO>,
) -> Result<Json<ApiResponse<RoomDTO>>, AppError> {
    debug!("Creating new room");
    // 1. Validare il nome stanza (1-50 caratteri)
    // 2. Creare la stanza con created_by = utente autenticato
    // 3. Ritornare il RoomDTO con lo username del creatore

    body.validate()?;

    let new_room = CreateRoomDTO {
        room_name: body.room_name,
        created_by: current_user.user_id,
        created_at: Utc::now(),
    };

    let room = state.room.create(&new_room).await?;

    info!(room_id = room.room_id, "Room created");
    Ok(Json(ApiResponse::ok(
        "Room created",
        RoomDTO {
            room_id: room.room_id,
            room_name: room.room_name,
            created_by: current_user.username,
        },
    )))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<AuthUser>,
) -> Result<Json<ApiResponse<Vec<RoomPreviewDTO>>>, AppError> {
    debug!("Listing rooms");
    // 1. Recuperare tutte le stanze ordinate per attività più recente
    // 2. Per ogni stanza, in parallelo: creatore e ultimo messaggio
    // 3. Comporre le anteprime e ritornarle nella busta

    let rooms = state.room.find_all_by_recent_activity().await?;

    debug!("Found {} rooms", rooms.len());

    let previews: Vec<RoomPreviewDTO> = try_join_all(rooms.into_iter().map(|room| {
        let state = state.clone();
        async move {
            let creator = state.user.read(&room.created_by).await?;
            let last_message = state.msg.find_last_by_room_id(&room.room_id).await?;
            Ok::<_, AppError>(RoomPreviewDTO {
                room_id: room.room_id,
                room_name: room.room_name,
                created_by: creator
                    .map(|u| u.username)
                    .unwrap_or_else(|| "unknown".to_string()),
                last_message: last_message.map(MessageDTO::from),
            })
        }
    }))
    .await?;

    info!("Successfully retrieved {} rooms", previews.len());
    Ok(Json(ApiResponse::ok("Room list retrieved", previews)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, room_id = %params.room_id))]
pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<AuthUser>,
    Query(params): Query<RoomIdQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    debug!("Deleting room");
    // 1. Verificare che la stanza esista
    // 2. Ownership check: solo il creatore può cancellare (il gate di
    //    autenticazione NON fa questo controllo)
    // 3. Cancellare stanza e messaggi in cascata (transazione nella repo)

    let room = state
        .room
        .read(&params.room_id)
        .await?
        .ok_or_else(|| {
            warn!("Room not found");
            AppError::not_found("Room not found")
        })?;

    if room.created_by != current_user.user_id {
        warn!(created_by = room.created_by, "Non-creator attempted room deletion");
        return Err(AppError::forbidden("Only the room creator can delete it"));
    }

    state.room.delete(&params.room_id).await?;

    info!("Room deleted");
    Ok(Json(ApiResponse::ok("Room deleted", serde_json::Value::Null)))
}
