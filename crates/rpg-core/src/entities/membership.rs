//! Membership entity - a user's role inside a campaign

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Role held by a member of a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CampaignRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "mestre")]
    Master,
    #[serde(rename = "dm-assistant")]
    DmAssistant,
    #[serde(rename = "jogador")]
    Player,
}

impl CampaignRole {
    /// Stored and wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Master => "mestre",
            Self::DmAssistant => "dm-assistant",
            Self::Player => "jogador",
        }
    }
}

impl fmt::Display for CampaignRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "mestre" => Ok(Self::Master),
            "dm-assistant" => Ok(Self::DmAssistant),
            "jogador" => Ok(Self::Player),
            other => Err(DomainError::InternalError(format!("unknown campaign role: {other}"))),
        }
    }
}

/// Association of a user with a campaign.
///
/// Identified by `(user_id, campaign_id)`; at most one row per pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub user_id: i64,
    pub campaign_id: i64,
    pub role: CampaignRole,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(user_id: i64, campaign_id: i64, role: CampaignRole) -> Self {
        Self {
            user_id,
            campaign_id,
            role,
            joined_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_master(&self) -> bool {
        self.role == CampaignRole::Master
    }
}
