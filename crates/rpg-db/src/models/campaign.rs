//! Campaign database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the `campaigns` table
#[derive(Debug, Clone, FromRow)]
pub struct CampaignModel {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub master_name: String,
    pub notes: Option<String>,
    pub tags: Option<String>,
    pub system_ref: Option<String>,
    pub status: Option<String>,
    pub cover_image_url: Option<String>,
    pub next_session_at: Option<DateTime<Utc>>,
    pub next_session_location: Option<String>,
    pub next_session_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Campaign row aggregated with its master names
#[derive(Debug, Clone, FromRow)]
pub struct CampaignSummaryModel {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// `string_agg` over master display names, NULL when there are none
    pub masters: Option<String>,
}
