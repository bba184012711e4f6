//! User handlers

use axum::{extract::State, Json};
use rpg_service::dto::{FindUserResponse, IdRequest, MessageResponse};
use rpg_service::UserService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// DELETE /deletar-conta
pub async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    UserService::new(state.service_context())
        .delete_account(auth.id())
        .await?;
    Ok(Json(MessageResponse::new("Conta deletada com sucesso")))
}

/// POST /procurar-usuario
pub async fn find_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<IdRequest>,
) -> ApiResult<Json<FindUserResponse>> {
    let response = UserService::new(state.service_context())
        .find(request.id)
        .await?;
    Ok(Json(response))
}
