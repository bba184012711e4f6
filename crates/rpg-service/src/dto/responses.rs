//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Keys keep the
//! vocabulary the web client already reads.

use chrono::{DateTime, Utc};
use serde::Serialize;

use rpg_core::{CampaignRole, JoinRequestStatus, NotificationKind};

// ============================================================================
// Common Response Types
// ============================================================================

/// `{"message": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{"message": ..., "rows": [...]}` as returned by the lookup endpoints
#[derive(Debug, Clone, Serialize)]
pub struct RowsResponse<T> {
    pub message: String,
    pub rows: Vec<T>,
}

impl<T> RowsResponse<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            message: "sucesso na busca".to_string(),
            rows,
        }
    }
}

// ============================================================================
// Session Responses
// ============================================================================

/// Identity carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUserResponse {
    pub id: i64,
    pub email: String,
    #[serde(rename = "nome")]
    pub display_name: String,
    #[serde(rename = "apelido")]
    pub nickname: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: SessionUserResponse,
}

/// Signup response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

/// `GET /perfil`
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub message: String,
    pub user: SessionUserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user record (no credentials)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    #[serde(rename = "nome")]
    pub display_name: String,
    #[serde(rename = "apelido")]
    pub nickname: String,
    pub email: String,
    #[serde(rename = "imagem_url")]
    pub image_url: Option<String>,
    #[serde(rename = "criado_em")]
    pub created_at: DateTime<Utc>,
}

/// `/procurar-usuario` response
#[derive(Debug, Clone, Serialize)]
pub struct FindUserResponse {
    pub message: String,
    #[serde(rename = "usuario")]
    pub user: UserResponse,
}

// ============================================================================
// Campaign Responses
// ============================================================================

/// Full campaign row
#[derive(Debug, Clone, Serialize)]
pub struct CampaignResponse {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    /// Display name of the creator
    #[serde(rename = "mestre")]
    pub master_name: String,
    #[serde(rename = "notas")]
    pub notes: Option<String>,
    pub tags: Option<String>,
    #[serde(rename = "sistema")]
    pub system_ref: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "imagem_url")]
    pub cover_image_url: Option<String>,
    pub next_session_datetime: Option<DateTime<Utc>>,
    pub next_session_local: Option<String>,
    pub next_session_link: Option<String>,
    #[serde(rename = "criado_em")]
    pub created_at: DateTime<Utc>,
}

/// `{"campanha": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct CampaignEnvelope<T> {
    #[serde(rename = "campanha")]
    pub campaign: T,
}

/// Create campaign response
#[derive(Debug, Clone, Serialize)]
pub struct CreateCampaignResponse {
    #[serde(rename = "campanhaId")]
    pub campaign_id: i64,
    #[serde(rename = "campanha")]
    pub campaign: CampaignResponse,
}

/// Campaign with its roster
#[derive(Debug, Clone, Serialize)]
pub struct CampaignDetailResponse {
    #[serde(flatten)]
    pub campaign: CampaignResponse,
    #[serde(rename = "participantes")]
    pub participants: Vec<ParticipantResponse>,
}

/// Roster entry of a campaign detail
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantResponse {
    pub id: i64,
    #[serde(rename = "nome")]
    pub display_name: String,
    #[serde(rename = "apelido")]
    pub nickname: String,
    #[serde(rename = "papel")]
    pub role: CampaignRole,
    #[serde(rename = "imagem_url")]
    pub image_url: Option<String>,
}

/// Row of `/usuarios-da-campanha`
#[derive(Debug, Clone, Serialize)]
pub struct CampaignUserResponse {
    pub id: i64,
    #[serde(rename = "nome")]
    pub display_name: String,
    #[serde(rename = "apelido")]
    pub nickname: String,
    pub email: String,
}

/// Row of the campaign listing
#[derive(Debug, Clone, Serialize)]
pub struct CampaignSummaryResponse {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    /// Comma-separated master names, `null` when there are none
    #[serde(rename = "mestres")]
    pub masters: Option<String>,
}

/// Member entry of `/campanhas-do-usuario-detalhe`
#[derive(Debug, Clone, Serialize)]
pub struct CampaignMemberResponse {
    pub id: i64,
    #[serde(rename = "nome")]
    pub display_name: String,
    #[serde(rename = "apelido")]
    pub nickname: String,
    pub email: String,
    #[serde(rename = "imagem_url")]
    pub image_url: Option<String>,
    #[serde(rename = "papel")]
    pub role: CampaignRole,
}

/// One campaign of `/campanhas-do-usuario-detalhe`
#[derive(Debug, Clone, Serialize)]
pub struct UserCampaignDetailResponse {
    #[serde(rename = "campanha")]
    pub campaign: CampaignSummaryResponse,
    #[serde(rename = "usuarios")]
    pub members: Vec<CampaignMemberResponse>,
}

/// `/campanhas-do-usuario-detalhe` response
#[derive(Debug, Clone, Serialize)]
pub struct UserCampaignDetailsResponse {
    #[serde(rename = "campanhas")]
    pub campaigns: Vec<UserCampaignDetailResponse>,
}

// ============================================================================
// Membership Responses
// ============================================================================

/// Stored join request
#[derive(Debug, Clone, Serialize)]
pub struct JoinRequestResponse {
    pub id: i64,
    #[serde(rename = "campanha_id")]
    pub campaign_id: i64,
    #[serde(rename = "usuario_id")]
    pub user_id: i64,
    #[serde(rename = "mensagem")]
    pub message: Option<String>,
    pub status: JoinRequestStatus,
    #[serde(rename = "criado_em")]
    pub created_at: DateTime<Utc>,
}

/// Join request response
#[derive(Debug, Clone, Serialize)]
pub struct JoinCampaignResponse {
    pub message: String,
    #[serde(rename = "pedido")]
    pub request: JoinRequestResponse,
}

/// Membership row
#[derive(Debug, Clone, Serialize)]
pub struct MembershipResponse {
    #[serde(rename = "usuario_id")]
    pub user_id: i64,
    #[serde(rename = "campanha_id")]
    pub campaign_id: i64,
    #[serde(rename = "papel")]
    pub role: CampaignRole,
    #[serde(rename = "entrou_em")]
    pub joined_at: DateTime<Utc>,
}

/// Accept join request response
#[derive(Debug, Clone, Serialize)]
pub struct AcceptJoinResponse {
    pub success: bool,
    #[serde(rename = "notificacao")]
    pub notification: NotificationResponse,
    #[serde(rename = "membro")]
    pub membership: MembershipResponse,
}

/// Promote response
#[derive(Debug, Clone, Serialize)]
pub struct PromoteResponse {
    pub message: String,
    #[serde(rename = "membro")]
    pub membership: MembershipResponse,
}

// ============================================================================
// Notification Responses
// ============================================================================

/// Inbox projection, used both by REST and by the `novaNotificacao` push
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationResponse {
    pub id: i64,
    #[serde(rename = "usuario_id")]
    pub recipient_id: i64,
    #[serde(rename = "usuario_id_referencia")]
    pub reference_user_id: Option<i64>,
    #[serde(rename = "campanha_id")]
    pub campaign_id: Option<i64>,
    #[serde(rename = "tipo")]
    pub kind: NotificationKind,
    #[serde(rename = "mensagem")]
    pub message: String,
    #[serde(rename = "lida")]
    pub read: bool,
    #[serde(rename = "criada_em")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "usuario_nome")]
    pub reference_user_name: Option<String>,
    #[serde(rename = "usuario_apelido")]
    pub reference_user_nickname: Option<String>,
    #[serde(rename = "campanha_nome")]
    pub campaign_name: Option<String>,
}

/// Manual notification response
#[derive(Debug, Clone, Serialize)]
pub struct CreateNotificationResponse {
    pub message: String,
    #[serde(rename = "notificacao")]
    pub notification: NotificationResponse,
}

// ============================================================================
// Chat Responses
// ============================================================================

/// Chat room
#[derive(Debug, Clone, Serialize)]
pub struct ChatRoomResponse {
    pub id: i64,
    #[serde(rename = "campanha_id")]
    pub campaign_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "criado_por")]
    pub created_by: i64,
    #[serde(rename = "criado_em")]
    pub created_at: DateTime<Utc>,
}

/// Create room response
#[derive(Debug, Clone, Serialize)]
pub struct CreateRoomResponse {
    pub message: String,
    #[serde(rename = "salaId")]
    pub room_id: i64,
    #[serde(rename = "sala")]
    pub room: ChatRoomResponse,
}

/// `{"salas": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct RoomListResponse {
    #[serde(rename = "salas")]
    pub rooms: Vec<ChatRoomResponse>,
}

/// Chat message with its author's names, used by REST and `novaMensagem`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessageResponse {
    pub id: i64,
    #[serde(rename = "sala_id")]
    pub room_id: i64,
    #[serde(rename = "usuario_id")]
    pub author_id: i64,
    #[serde(rename = "mensagem")]
    pub text: String,
    #[serde(rename = "enviada_em")]
    pub sent_at: DateTime<Utc>,
    #[serde(rename = "nome")]
    pub author_name: String,
    #[serde(rename = "apelido")]
    pub author_nickname: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
