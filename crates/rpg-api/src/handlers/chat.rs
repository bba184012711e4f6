//! Chat handlers
//!
//! Rooms belong to a campaign; only its members may read or post.

use axum::{extract::State, Json};
use rpg_service::dto::{
    ChatMessageResponse, CreateRoomRequest, CreateRoomResponse, PostMessageRequest,
    RoomListResponse,
};
use rpg_service::ChatService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /campanhas/:id/salas
pub async fn create_room(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(campaign_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> ApiResult<Created<Json<CreateRoomResponse>>> {
    let response = ChatService::new(state.service_context())
        .create_room(auth.id(), campaign_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// GET /campanhas/:id/salas
pub async fn list_rooms(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(campaign_id): IdPath,
) -> ApiResult<Json<RoomListResponse>> {
    let response = ChatService::new(state.service_context())
        .list_rooms(auth.id(), campaign_id)
        .await?;
    Ok(Json(response))
}

/// POST /salas/:id/mensagens
pub async fn post_message(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(room_id): IdPath,
    ValidatedJson(request): ValidatedJson<PostMessageRequest>,
) -> ApiResult<Created<Json<ChatMessageResponse>>> {
    let response = ChatService::new(state.service_context())
        .post_message(auth.id(), room_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// GET /salas/:id/mensagens
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(room_id): IdPath,
) -> ApiResult<Json<Vec<ChatMessageResponse>>> {
    let response = ChatService::new(state.service_context())
        .list_messages(auth.id(), room_id)
        .await?;
    Ok(Json(response))
}
