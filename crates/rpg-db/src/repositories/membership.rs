//! PostgreSQL implementation of MembershipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rpg_core::{CampaignRole, Membership, MembershipRepository, Participant, RepoResult};

use crate::mappers::parse_role;
use crate::models::{MembershipModel, ParticipantModel};

use super::error::map_db_error;

/// PostgreSQL implementation of MembershipRepository
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    /// Create a new PgMembershipRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    #[instrument(skip(self))]
    async fn find_role(&self, campaign_id: i64, user_id: i64) -> RepoResult<Option<CampaignRole>> {
        let role = sqlx::query_scalar::<_, String>(
            "SELECT role FROM campaign_members WHERE user_id = $1 AND campaign_id = $2",
        )
        .bind(user_id)
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(role.as_deref().map(parse_role))
    }

    #[instrument(skip(self))]
    async fn master_ids(&self, campaign_id: i64) -> RepoResult<Vec<i64>> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT user_id FROM campaign_members
            WHERE campaign_id = $1 AND role = 'mestre'
            ORDER BY joined_at, user_id
            ",
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn set_role(
        &self,
        campaign_id: i64,
        user_id: i64,
        role: CampaignRole,
    ) -> RepoResult<Option<Membership>> {
        let result = sqlx::query_as::<_, MembershipModel>(
            r"
            UPDATE campaign_members
            SET role = $3
            WHERE user_id = $1 AND campaign_id = $2
            RETURNING user_id, campaign_id, role, joined_at
            ",
        )
        .bind(user_id)
        .bind(campaign_id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Membership::from))
    }

    #[instrument(skip(self))]
    async fn participants(&self, campaign_id: i64) -> RepoResult<Vec<Participant>> {
        self.participants_of(&[campaign_id]).await
    }

    #[instrument(skip(self))]
    async fn participants_of(&self, campaign_ids: &[i64]) -> RepoResult<Vec<Participant>> {
        if campaign_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, ParticipantModel>(
            r"
            SELECT cm.campaign_id, u.id AS user_id, u.display_name, u.nickname, u.email,
                   u.image_url, cm.role
            FROM campaign_members cm
            JOIN users u ON u.id = cm.user_id
            WHERE cm.campaign_id = ANY($1)
            ORDER BY cm.campaign_id, cm.joined_at, u.id
            ",
        )
        .bind(campaign_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Participant::from).collect())
    }
}
