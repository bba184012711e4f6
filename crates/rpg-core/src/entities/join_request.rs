//! JoinRequest entity - a pending ask to enter a campaign

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinRequestStatus {
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "aceito")]
    Accepted,
}

impl JoinRequestStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Accepted => "aceito",
        }
    }
}

impl FromStr for JoinRequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendente" => Ok(Self::Pending),
            "aceito" => Ok(Self::Accepted),
            other => Err(DomainError::InternalError(format!(
                "unknown join request status: {other}"
            ))),
        }
    }
}

/// A user's request to join a campaign.
///
/// There is no rejected state: a refused request simply stays pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub id: i64,
    pub campaign_id: i64,
    pub user_id: i64,
    pub message: Option<String>,
    pub status: JoinRequestStatus,
    pub created_at: DateTime<Utc>,
}

impl JoinRequest {
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == JoinRequestStatus::Pending
    }
}
