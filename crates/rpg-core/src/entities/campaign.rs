//! Campaign entity and its read projections

use chrono::{DateTime, Utc};

use super::CampaignRole;

/// Scheduling details for the next game session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NextSession {
    pub datetime: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub link: Option<String>,
}

/// A tabletop campaign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Display name of the user that created the campaign
    pub master_name: String,
    pub notes: Option<String>,
    pub tags: Option<String>,
    pub system_ref: Option<String>,
    pub status: Option<String>,
    pub cover_image_url: Option<String>,
    pub next_session: NextSession,
    pub created_at: DateTime<Utc>,
}

/// Values needed to insert a campaign
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub name: String,
    pub description: String,
    pub master_name: String,
}

/// Partial metadata update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<String>,
    pub system_ref: Option<String>,
    pub status: Option<String>,
    pub cover_image_url: Option<String>,
}

impl CampaignChanges {
    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.notes.is_none()
            && self.tags.is_none()
            && self.system_ref.is_none()
            && self.status.is_none()
            && self.cover_image_url.is_none()
    }

    /// Names of the fields that will be written, in column order
    pub fn present_fields(&self) -> Vec<&'static str> {
        let candidates = [
            ("name", self.name.is_some()),
            ("description", self.description.is_some()),
            ("notes", self.notes.is_some()),
            ("tags", self.tags.is_some()),
            ("system_ref", self.system_ref.is_some()),
            ("status", self.status.is_some()),
            ("cover_image_url", self.cover_image_url.is_some()),
        ];
        candidates
            .into_iter()
            .filter_map(|(name, present)| present.then_some(name))
            .collect()
    }
}

/// Campaign listing row with the names of its masters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Comma-separated master display names, `None` when the campaign has none
    pub masters: Option<String>,
}

/// A member of a campaign joined with its user record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub campaign_id: i64,
    pub user_id: i64,
    pub display_name: String,
    pub nickname: String,
    pub email: String,
    pub image_url: Option<String>,
    pub role: CampaignRole,
}
