//! PostgreSQL implementation of CampaignRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rpg_core::{
    Campaign, CampaignChanges, CampaignRepository, CampaignRole, CampaignSummary, DomainError,
    NewCampaign, NextSession, RepoResult,
};

use crate::models::{CampaignModel, CampaignSummaryModel};

use super::error::{map_constraint_violation, map_db_error};

const CAMPAIGN_COLUMNS: &str = r"
    id, name, description, master_name, notes, tags, system_ref, status, cover_image_url,
    next_session_at, next_session_location, next_session_link, created_at
";

/// PostgreSQL implementation of CampaignRepository
#[derive(Clone)]
pub struct PgCampaignRepository {
    pool: PgPool,
}

impl PgCampaignRepository {
    /// Create a new PgCampaignRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampaignRepository for PgCampaignRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Campaign>> {
        let result = sqlx::query_as::<_, CampaignModel>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Campaign::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: i64) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM campaigns WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, campaign), fields(name = %campaign.name))]
    async fn create_with_masters(
        &self,
        campaign: &NewCampaign,
        master_ids: &[i64],
    ) -> RepoResult<Campaign> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, CampaignModel>(&format!(
            r"
            INSERT INTO campaigns (name, description, master_name)
            VALUES ($1, $2, $3)
            RETURNING {CAMPAIGN_COLUMNS}
            "
        ))
        .bind(&campaign.name)
        .bind(&campaign.description)
        .bind(&campaign.master_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for &user_id in master_ids {
            sqlx::query(
                r"
                INSERT INTO campaign_members (user_id, campaign_id, role)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, campaign_id) DO NOTHING
                ",
            )
            .bind(user_id)
            .bind(model.id)
            .bind(CampaignRole::Master.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                map_constraint_violation(e, |constraint| {
                    (constraint == "campaign_members_user_id_fkey")
                        .then_some(DomainError::UserNotFound(user_id))
                })
            })?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(model.into())
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: i64, changes: &CampaignChanges) -> RepoResult<Option<Campaign>> {
        let result = sqlx::query_as::<_, CampaignModel>(&format!(
            r"
            UPDATE campaigns
            SET name            = COALESCE($2, name),
                description     = COALESCE($3, description),
                notes           = COALESCE($4, notes),
                tags            = COALESCE($5, tags),
                system_ref      = COALESCE($6, system_ref),
                status          = COALESCE($7, status),
                cover_image_url = COALESCE($8, cover_image_url)
            WHERE id = $1
            RETURNING {CAMPAIGN_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.notes)
        .bind(&changes.tags)
        .bind(&changes.system_ref)
        .bind(&changes.status)
        .bind(&changes.cover_image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Campaign::from))
    }

    #[instrument(skip(self, next_session))]
    async fn update_next_session(
        &self,
        id: i64,
        next_session: &NextSession,
    ) -> RepoResult<Option<Campaign>> {
        let result = sqlx::query_as::<_, CampaignModel>(&format!(
            r"
            UPDATE campaigns
            SET next_session_at = $2, next_session_location = $3, next_session_link = $4
            WHERE id = $1
            RETURNING {CAMPAIGN_COLUMNS}
            "
        ))
        .bind(id)
        .bind(next_session.datetime)
        .bind(&next_session.location)
        .bind(&next_session.link)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Campaign::from))
    }

    #[instrument(skip(self))]
    async fn list_summaries(&self) -> RepoResult<Vec<CampaignSummary>> {
        let results = sqlx::query_as::<_, CampaignSummaryModel>(
            r"
            SELECT c.id, c.name, c.description,
                   string_agg(u.display_name, ',' ORDER BY u.display_name) AS masters
            FROM campaigns c
            LEFT JOIN campaign_members cm ON cm.campaign_id = c.id AND cm.role = 'mestre'
            LEFT JOIN users u ON u.id = cm.user_id
            GROUP BY c.id
            ORDER BY c.id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(CampaignSummary::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Campaign>> {
        let results = sqlx::query_as::<_, CampaignModel>(
            r"
            SELECT c.id, c.name, c.description, c.master_name, c.notes, c.tags, c.system_ref,
                   c.status, c.cover_image_url, c.next_session_at, c.next_session_location,
                   c.next_session_link, c.created_at
            FROM campaigns c
            JOIN campaign_members cm ON cm.campaign_id = c.id
            WHERE cm.user_id = $1
            ORDER BY cm.joined_at, c.id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Campaign::from).collect())
    }
}
