//! Route definitions
//!
//! Paths keep the names the web client already calls. The socket shares the
//! same listener under `/socket`.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use rpg_common::RateLimitConfig;
use tower_http::services::{ServeDir, ServeFile};

use crate::handlers::{campaigns, chat, health, membership, notifications, session, users};
use crate::middleware::rate_limited;
use crate::state::AppState;

/// All REST, health and socket routes
pub fn create_router(rate_limit: &RateLimitConfig) -> Router<AppState> {
    Router::new()
        .merge(rate_limited(session_routes(), rate_limit))
        .merge(account_routes())
        .merge(campaign_routes())
        .merge(notification_routes())
        .merge(chat_routes())
        .merge(health_routes())
        .merge(rpg_gateway::gateway_routes::<AppState>())
}

/// Serve the built client, answering unknown paths with its `index.html`
pub fn with_static_client(router: Router<AppState>, static_dir: &str) -> Router<AppState> {
    let index = format!("{}/index.html", static_dir.trim_end_matches('/'));
    router.fallback_service(ServeDir::new(static_dir).not_found_service(ServeFile::new(index)))
}

/// Credential endpoints
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/cadastro", post(session::register))
        .route("/login", post(session::login))
        .route("/refresh-token", post(session::refresh_token))
        .route("/logout", post(session::logout))
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/perfil", get(session::profile))
        .route("/deletar-conta", delete(users::delete_account))
        .route("/procurar-usuario", post(users::find_user))
}

fn campaign_routes() -> Router<AppState> {
    Router::new()
        .route("/campanhas", get(campaigns::list_campaigns))
        .route("/criar-campanha", post(campaigns::create_campaign))
        .route(
            "/campanha/:id",
            get(campaigns::get_campaign).patch(campaigns::update_campaign),
        )
        .route("/campanha/:id/next-session", patch(campaigns::update_next_session))
        .route("/campanhas/:id/entrar", post(membership::request_join))
        .route("/campanhas/:id/aceitar-pedido", post(membership::accept_join_request))
        .route("/campanhas/:id/promover", patch(membership::promote))
        .route("/usuarios-da-campanha", post(campaigns::campaign_users))
        .route("/campanhas-do-usuario", post(campaigns::user_campaigns))
        .route(
            "/campanhas-do-usuario-detalhe",
            post(campaigns::user_campaign_details),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notificacoes", get(notifications::list_notifications))
        .route("/notificacoes/:id/lida", patch(notifications::mark_read))
        .route("/criar-notificacoes", post(notifications::create_notification))
}

fn chat_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/campanhas/:id/salas",
            get(chat::list_rooms).post(chat::create_room),
        )
        .route(
            "/salas/:id/mensagens",
            get(chat::list_messages).post(chat::post_message),
        )
}

/// Liveness and readiness probes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}
