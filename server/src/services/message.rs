//! Message services - Storia, delta fetch e invio messaggi

use crate::core::{AppError, AppState, AuthUser};
use crate::dtos::{
    ApiResponse, CreateMessageDTO, MessageDTO, MessageUpdatesQuery, RoomIdQuery, SendMessageDTO,
};
use crate::repositories::{Create, Read};
use axum::{
    Extension,
    extract::{Json, Query, State},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state), fields(room_id = %params.room_id))]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RoomIdQuery>,
) -> Result<Json<ApiResponse<Vec<MessageDTO>>>, AppError> {
    debug!("Fetching room message history");
    // 1. Verificare che la stanza esista
    // 2. Recuperare tutti i messaggi ordinati per id crescente
    //    (l'id è l'ordine totale: il client non deve mai riordinare)

    ensure_room_exists(&state, &params.room_id).await?;

    let messages = state.msg.find_many_by_room_id(&params.room_id).await?;

    info!("Retrieved {} messages", messages.len());
    let messages_dto: Vec<MessageDTO> = messages.into_iter().map(MessageDTO::from).collect();

    Ok(Json(ApiResponse::ok("Message list retrieved", messages_dto)))
}

#[instrument(skip(state), fields(room_id = %params.room_id, since = %params.since_message_id))]
pub async fn message_updates(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MessageUpdatesQuery>,
) -> Result<Json<ApiResponse<Vec<MessageDTO>>>, AppError> {
    debug!("Fetching message updates");
    // Delta fetch: tutti i messaggi della stanza con id > cursore del
    // client, in ordine crescente. Con cursore = ultimo id la risposta
    // è vuota: è il caso normale tra un polling e l'altro.

    ensure_room_exists(&state, &params.room_id).await?;

    let messages = state
        .msg
        .find_many_after(&params.room_id, &params.since_message_id)
        .await?;

    debug!("Delta fetch returned {} messages", messages.len());
    let messages_dto: Vec<MessageDTO> = messages.into_iter().map(MessageDTO::from).collect();

    Ok(Json(ApiResponse::ok("Message updates retrieved", messages_dto)))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, room_id = %params.room_id))]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<AuthUser>,
    Query(params): Query<RoomIdQuery>,
    Json(body): Json<SendMessageDTO>,
) -> Result<Json<ApiResponse<MessageDTO>>, AppError> {
    debug!("Sending message");
    // 1. Validare il contenuto (1-1000 caratteri)
    // 2. Verificare che la stanza esista (nessuna foreign key: il check
    //    dell'invariante room_id -> stanza esistente avviene qui)
    // 3. Creare il messaggio con timestamp del server
    // 4. Bump di updated_at della stanza (chiave di ordinamento lista)
    // 5. Rileggere il messaggio con il nome mittente e ritornarlo: il
    //    client sostituisce la sua copia ottimistica con quella autorevole

    body.validate()?;

    ensure_room_exists(&state, &params.room_id).await?;

    let now = Utc::now();
    let new_message = CreateMessageDTO {
        room_id: params.room_id,
        sender_id: current_user.user_id,
        content: body.content,
        created_at: now,
    };

    let message = state.msg.create(&new_message).await?;

    state.room.touch(&params.room_id, &now).await?;

    let message_dto = state
        .msg
        .find_with_sender(&message.message_id)
        .await?
        .map(MessageDTO::from)
        .ok_or_else(|| AppError::internal_server_error("Created message not found"))?;

    info!(message_id = message_dto.message_id, "Message sent");
    Ok(Json(ApiResponse::ok("Message sent", message_dto)))
}

/// Invariante condivisa dagli endpoint messaggi: la stanza deve esistere
async fn ensure_room_exists(state: &Arc<AppState>, room_id: &i64) -> Result<(), AppError> {
    if state.room.read(room_id).await?.is_none() {
        warn!("Room not found");
        return Err(AppError::not_found("Room not found"));
    }
    Ok(())
}
