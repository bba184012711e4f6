//! Session handlers
//!
//! Signup, login, token refresh, logout and the profile probe.

use axum::{extract::State, Json};
use rpg_service::dto::{
    LoginRequest, LoginResponse, MessageResponse, ProfileResponse, RefreshResponse,
    RefreshTokenRequest, RegisterRequest, RegisterResponse,
};
use rpg_service::SessionService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /cadastro
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<RegisterResponse>>> {
    let response = SessionService::new(state.service_context())
        .register(request)
        .await?;
    Ok(Created(Json(response)))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = SessionService::new(state.service_context())
        .login(request)
        .await?;
    Ok(Json(response))
}

/// POST /refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let response = SessionService::new(state.service_context())
        .refresh(&request.refresh_token)
        .await?;
    Ok(Json(response))
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<MessageResponse>> {
    SessionService::new(state.service_context())
        .logout(&request.refresh_token)
        .await?;
    Ok(Json(MessageResponse::new("Logout realizado com sucesso")))
}

/// GET /perfil
pub async fn profile(auth: AuthUser) -> Json<ProfileResponse> {
    Json(auth.0.profile_response())
}
