//! Notification entity - an inbox entry owned by its recipient

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

/// Kind of notification, stored as its wire name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NotificationKind {
    #[default]
    #[serde(rename = "geral")]
    General,
    #[serde(rename = "pedido")]
    JoinRequest,
    #[serde(rename = "pedido_aceito")]
    JoinAccepted,
    #[serde(rename = "convite")]
    Invite,
    #[serde(rename = "resposta")]
    Reply,
}

impl NotificationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "geral",
            Self::JoinRequest => "pedido",
            Self::JoinAccepted => "pedido_aceito",
            Self::Invite => "convite",
            Self::Reply => "resposta",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "geral" => Ok(Self::General),
            "pedido" => Ok(Self::JoinRequest),
            "pedido_aceito" => Ok(Self::JoinAccepted),
            "convite" => Ok(Self::Invite),
            "resposta" => Ok(Self::Reply),
            other => Err(DomainError::ValidationError(format!(
                "unknown notification type: {other}"
            ))),
        }
    }
}

/// Persisted notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: i64,
    pub recipient_id: i64,
    pub kind: NotificationKind,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    /// User that triggered the notification (lookup only)
    pub reference_user_id: Option<i64>,
    pub campaign_id: Option<i64>,
}

/// Values needed to insert a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub recipient_id: i64,
    pub kind: NotificationKind,
    pub message: String,
    pub reference_user_id: Option<i64>,
    pub campaign_id: Option<i64>,
}

impl NewNotification {
    /// A plain notification with no references
    pub fn new(recipient_id: i64, kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            recipient_id,
            kind,
            message: message.into(),
            reference_user_id: None,
            campaign_id: None,
        }
    }

    /// Tell a master that `requester_id` wants to join `campaign_id`
    pub fn join_requested(
        master_id: i64,
        requester_id: i64,
        campaign_id: i64,
        message: Option<&str>,
    ) -> Self {
        let note = message.filter(|m| !m.trim().is_empty()).unwrap_or("Nenhuma");
        Self {
            recipient_id: master_id,
            kind: NotificationKind::JoinRequest,
            message: format!("Usuário {requester_id} quer entrar na campanha. Mensagem: {note}"),
            reference_user_id: Some(requester_id),
            campaign_id: Some(campaign_id),
        }
    }

    /// Tell `user_id` that their request for `campaign_id` was accepted
    pub fn join_accepted(user_id: i64, campaign_id: i64) -> Self {
        Self {
            recipient_id: user_id,
            kind: NotificationKind::JoinAccepted,
            message: "Seu pedido para entrar na campanha foi aceito.".to_string(),
            reference_user_id: None,
            campaign_id: Some(campaign_id),
        }
    }

    pub fn with_reference_user(mut self, user_id: i64) -> Self {
        self.reference_user_id = Some(user_id);
        self
    }

    pub fn with_campaign(mut self, campaign_id: i64) -> Self {
        self.campaign_id = Some(campaign_id);
        self
    }
}

/// Inbox projection: a notification joined with the names it refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub notification: Notification,
    pub reference_user_name: Option<String>,
    pub reference_user_nickname: Option<String>,
    pub campaign_name: Option<String>,
}
