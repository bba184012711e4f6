//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`, and the ones with free-form
//! input also implement `Validate`. JSON keys follow the client's vocabulary.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use validator::Validate;

use rpg_core::{CampaignChanges, NextSession, NotificationKind};

use super::ids::{deserialize_id, deserialize_id_list, deserialize_optional_id};

// ============================================================================
// Session Requests
// ============================================================================

/// Signup request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub display_name: String,

    #[serde(rename = "apelido")]
    #[validate(length(min = 1, max = 100, message = "Nickname must be 1-100 characters"))]
    pub nickname: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(rename = "senha")]
    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[serde(rename = "senha")]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Body of `/refresh-token` and `/logout`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// Lookup Requests
// ============================================================================

/// Body carrying a required `id`
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct IdRequest {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
}

/// Body carrying an optional `id`
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct OptionalIdRequest {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<i64>,
}

// ============================================================================
// Campaign Requests
// ============================================================================

/// Create campaign request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCampaignRequest {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 100, message = "Campaign name must be 1-100 characters"))]
    pub name: String,

    #[serde(rename = "descricao")]
    #[validate(length(min = 1, max = 2000, message = "Description must be 1-2000 characters"))]
    pub description: String,

    /// Co-master user ids
    #[serde(rename = "mestres", default, deserialize_with = "deserialize_id_list")]
    pub co_master_ids: Vec<i64>,
}

/// Partial campaign metadata update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCampaignRequest {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 100, message = "Campaign name must be 1-100 characters"))]
    pub name: Option<String>,

    #[serde(rename = "descricao")]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[serde(rename = "notas")]
    pub notes: Option<String>,

    pub tags: Option<String>,

    /// Free-form system name
    #[serde(rename = "sistema")]
    pub system_ref: Option<String>,

    /// Catalog system id, stored as the system reference when present
    #[serde(
        rename = "sistema_id",
        default,
        deserialize_with = "deserialize_optional_id"
    )]
    pub system_id: Option<i64>,

    pub status: Option<String>,

    #[serde(rename = "imagem_url")]
    #[validate(length(max = 2048, message = "Image URL must be at most 2048 characters"))]
    pub cover_image_url: Option<String>,
}

impl From<UpdateCampaignRequest> for CampaignChanges {
    fn from(req: UpdateCampaignRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            notes: req.notes,
            tags: req.tags,
            system_ref: req.system_id.map(|id| id.to_string()).or(req.system_ref),
            status: req.status,
            cover_image_url: req.cover_image_url,
        }
    }
}

/// Next session block. Every field is overwritten, absent ones are cleared.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NextSessionRequest {
    #[serde(default, deserialize_with = "deserialize_session_datetime")]
    pub datetime: Option<DateTime<Utc>>,

    #[serde(rename = "local")]
    #[validate(length(max = 255, message = "Location must be at most 255 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 2048, message = "Link must be at most 2048 characters"))]
    pub link: Option<String>,
}

impl From<NextSessionRequest> for NextSession {
    fn from(req: NextSessionRequest) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            datetime: req.datetime,
            location: non_blank(req.location),
            link: non_blank(req.link),
        }
    }
}

/// Accepts RFC 3339 and the zone-less `YYYY-MM-DDTHH:MM[:SS]` of an HTML
/// `datetime-local` input, read as UTC. Empty strings are absent.
fn deserialize_session_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| serde::de::Error::custom(format!("invalid datetime: {raw}")))
}

// ============================================================================
// Membership Requests
// ============================================================================

/// Join request body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct JoinCampaignRequest {
    /// Must match the caller when present
    #[serde(rename = "usuarioId", default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<i64>,

    #[serde(rename = "mensagem")]
    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
}

/// Accept join request body
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct AcceptJoinRequest {
    #[serde(rename = "usuarioId", deserialize_with = "deserialize_id")]
    pub user_id: i64,
}

/// Promote member body
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct PromoteRequest {
    #[serde(rename = "userId", deserialize_with = "deserialize_id")]
    pub user_id: i64,
}

// ============================================================================
// Notification Requests
// ============================================================================

/// Manual notification body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    #[serde(rename = "usuarioId", deserialize_with = "deserialize_id")]
    pub recipient_id: i64,

    /// Defaults to `geral`
    #[serde(rename = "tipo", default)]
    pub kind: Option<NotificationKind>,

    #[serde(rename = "mensagem")]
    #[validate(length(min = 1, max = 1000, message = "Message must be 1-1000 characters"))]
    pub message: String,
}

// ============================================================================
// Chat Requests
// ============================================================================

/// Create chat room body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 100, message = "Room name must be 1-100 characters"))]
    pub name: String,

    #[serde(rename = "usuarioId", default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<i64>,
}

/// Post chat message body. Blank text is rejected by the chat service.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostMessageRequest {
    #[serde(rename = "mensagem", default)]
    #[validate(length(max = 4000, message = "Message must be at most 4000 characters"))]
    pub text: Option<String>,

    #[serde(rename = "usuarioId", default, deserialize_with = "deserialize_optional_id")]
    pub user_id: Option<i64>,
}
