//! PostgreSQL implementation of JoinRequestRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use rpg_core::{
    CampaignRole, DomainError, JoinRequest, JoinRequestRepository, JoinRequestStatus, Membership,
    RepoResult,
};

use crate::models::{JoinRequestModel, MembershipModel};

use super::error::{map_constraint_violation, map_db_error, map_unique_violation};

/// PostgreSQL implementation of JoinRequestRepository
#[derive(Clone)]
pub struct PgJoinRequestRepository {
    pool: PgPool,
}

impl PgJoinRequestRepository {
    /// Create a new PgJoinRequestRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JoinRequestRepository for PgJoinRequestRepository {
    #[instrument(skip(self, message))]
    async fn create(
        &self,
        campaign_id: i64,
        user_id: i64,
        message: Option<&str>,
    ) -> RepoResult<JoinRequest> {
        let model = sqlx::query_as::<_, JoinRequestModel>(
            r"
            INSERT INTO join_requests (campaign_id, user_id, message, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, campaign_id, user_id, message, status, created_at
            ",
        )
        .bind(campaign_id)
        .bind(user_id)
        .bind(message)
        .bind(JoinRequestStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(e, |constraint| match constraint {
                "uq_join_requests_pending" => Some(DomainError::JoinRequestPending),
                "join_requests_campaign_id_fkey" => Some(DomainError::CampaignNotFound(campaign_id)),
                "join_requests_user_id_fkey" => Some(DomainError::UserNotFound(user_id)),
                _ => None,
            })
        })?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn find_pending(&self, campaign_id: i64, user_id: i64) -> RepoResult<Option<JoinRequest>> {
        let result = sqlx::query_as::<_, JoinRequestModel>(
            r"
            SELECT id, campaign_id, user_id, message, status, created_at
            FROM join_requests
            WHERE campaign_id = $1 AND user_id = $2 AND status = 'pendente'
            ",
        )
        .bind(campaign_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(JoinRequest::from))
    }

    #[instrument(skip(self))]
    async fn accept(&self, campaign_id: i64, user_id: i64) -> RepoResult<Option<Membership>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let accepted = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE join_requests
            SET status = $3
            WHERE campaign_id = $1 AND user_id = $2 AND status = 'pendente'
            RETURNING id
            ",
        )
        .bind(campaign_id)
        .bind(user_id)
        .bind(JoinRequestStatus::Accepted.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(request_id) = accepted else {
            debug!("No pending join request to accept");
            return Ok(None);
        };

        // Dropping the transaction on error rolls the status change back
        let membership = sqlx::query_as::<_, MembershipModel>(
            r"
            INSERT INTO campaign_members (user_id, campaign_id, role)
            VALUES ($1, $2, $3)
            RETURNING user_id, campaign_id, role, joined_at
            ",
        )
        .bind(user_id)
        .bind(campaign_id)
        .bind(CampaignRole::Player.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(request_id, "Join request accepted");
        Ok(Some(membership.into()))
    }
}
