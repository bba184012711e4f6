//! Notification handlers

use axum::{extract::State, Json};
use rpg_service::dto::{
    CreateNotificationRequest, CreateNotificationResponse, MessageResponse, NotificationResponse,
};
use rpg_service::NotificationService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /notificacoes
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let response = NotificationService::new(state.service_context())
        .list_for(auth.id())
        .await?;
    Ok(Json(response))
}

/// PATCH /notificacoes/:id/lida
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(notification_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    NotificationService::new(state.service_context())
        .mark_read(auth.id(), notification_id)
        .await?;
    Ok(Json(MessageResponse::new("Notificação marcada como lida")))
}

/// POST /criar-notificacoes
pub async fn create_notification(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateNotificationRequest>,
) -> ApiResult<Json<CreateNotificationResponse>> {
    let response = NotificationService::new(state.service_context())
        .create_manual(request)
        .await?;
    Ok(Json(response))
}
