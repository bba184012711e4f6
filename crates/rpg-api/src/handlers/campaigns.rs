//! Campaign handlers
//!
//! Listing, detail, creation and metadata edits.

use axum::{extract::State, Json};
use rpg_service::dto::{
    CampaignDetailResponse, CampaignEnvelope, CampaignResponse, CampaignSummaryResponse,
    CampaignUserResponse, CreateCampaignRequest, CreateCampaignResponse, IdRequest,
    NextSessionRequest, OptionalIdRequest, RowsResponse, UpdateCampaignRequest,
    UserCampaignDetailsResponse,
};
use rpg_service::{CampaignService, MembershipService};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /campanhas
pub async fn list_campaigns(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CampaignSummaryResponse>>> {
    let response = CampaignService::new(state.service_context()).list().await?;
    Ok(Json(response))
}

/// POST /criar-campanha
pub async fn create_campaign(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCampaignRequest>,
) -> ApiResult<Created<Json<CreateCampaignResponse>>> {
    let response = MembershipService::new(state.service_context())
        .create_campaign(auth.id(), request)
        .await?;
    Ok(Created(Json(response)))
}

/// GET /campanha/:id
pub async fn get_campaign(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(campaign_id): IdPath,
) -> ApiResult<Json<CampaignEnvelope<CampaignDetailResponse>>> {
    let response = CampaignService::new(state.service_context())
        .detail(campaign_id)
        .await?;
    Ok(Json(response))
}

/// PATCH /campanha/:id
pub async fn update_campaign(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(campaign_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateCampaignRequest>,
) -> ApiResult<Json<CampaignEnvelope<CampaignResponse>>> {
    let response = MembershipService::new(state.service_context())
        .update_metadata(auth.id(), campaign_id, request)
        .await?;
    Ok(Json(response))
}

/// PATCH /campanha/:id/next-session
pub async fn update_next_session(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(campaign_id): IdPath,
    ValidatedJson(request): ValidatedJson<NextSessionRequest>,
) -> ApiResult<Json<CampaignEnvelope<CampaignResponse>>> {
    let response = MembershipService::new(state.service_context())
        .update_next_session(auth.id(), campaign_id, request)
        .await?;
    Ok(Json(response))
}

/// POST /usuarios-da-campanha
pub async fn campaign_users(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<IdRequest>,
) -> ApiResult<Json<RowsResponse<CampaignUserResponse>>> {
    let response = CampaignService::new(state.service_context())
        .users(request.id)
        .await?;
    Ok(Json(response))
}

/// POST /campanhas-do-usuario
pub async fn user_campaigns(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<IdRequest>,
) -> ApiResult<Json<RowsResponse<CampaignResponse>>> {
    let response = CampaignService::new(state.service_context())
        .user_campaigns(request.id)
        .await?;
    Ok(Json(response))
}

/// POST /campanhas-do-usuario-detalhe
///
/// Without an `id` the caller's own campaigns are returned.
pub async fn user_campaign_details(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<OptionalIdRequest>,
) -> ApiResult<Json<UserCampaignDetailsResponse>> {
    let user_id = request.id.unwrap_or_else(|| auth.id());
    let response = CampaignService::new(state.service_context())
        .user_campaign_details(user_id)
        .await?;
    Ok(Json(response))
}
