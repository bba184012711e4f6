//! Membership handlers
//!
//! Join requests, acceptance and promotion. The caller always comes from the
//! access token; body user ids name the target.

use axum::{extract::State, Json};
use rpg_service::dto::{
    AcceptJoinRequest, AcceptJoinResponse, JoinCampaignRequest, JoinCampaignResponse,
    PromoteRequest, PromoteResponse,
};
use rpg_service::MembershipService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /campanhas/:id/entrar
pub async fn request_join(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(campaign_id): IdPath,
    ValidatedJson(request): ValidatedJson<JoinCampaignRequest>,
) -> ApiResult<Json<JoinCampaignResponse>> {
    let response = MembershipService::new(state.service_context())
        .request_join(auth.id(), campaign_id, request)
        .await?;
    Ok(Json(response))
}

/// POST /campanhas/:id/aceitar-pedido
pub async fn accept_join_request(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(campaign_id): IdPath,
    ValidatedJson(request): ValidatedJson<AcceptJoinRequest>,
) -> ApiResult<Json<AcceptJoinResponse>> {
    let response = MembershipService::new(state.service_context())
        .accept_join_request(auth.id(), campaign_id, request.user_id)
        .await?;
    Ok(Json(response))
}

/// PATCH /campanhas/:id/promover
pub async fn promote(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(campaign_id): IdPath,
    ValidatedJson(request): ValidatedJson<PromoteRequest>,
) -> ApiResult<Json<PromoteResponse>> {
    let response = MembershipService::new(state.service_context())
        .promote(auth.id(), campaign_id, request.user_id)
        .await?;
    Ok(Json(response))
}
