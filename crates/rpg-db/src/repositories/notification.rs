//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rpg_core::{
    DomainError, NewNotification, Notification, NotificationRepository, NotificationView,
    RepoResult,
};

use crate::models::{NotificationModel, NotificationViewModel};

use super::error::{map_constraint_violation, map_db_error};

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, notification), fields(recipient_id = notification.recipient_id))]
    async fn create(&self, notification: &NewNotification) -> RepoResult<NotificationView> {
        let model = sqlx::query_as::<_, NotificationViewModel>(
            r"
            WITH inserted AS (
                INSERT INTO notifications (recipient_id, kind, message, reference_user_id, campaign_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, recipient_id, kind, message, is_read, reference_user_id,
                          campaign_id, created_at
            )
            SELECT n.id, n.recipient_id, n.kind, n.message, n.is_read, n.reference_user_id,
                   n.campaign_id, n.created_at,
                   ru.display_name AS reference_user_name,
                   ru.nickname AS reference_user_nickname,
                   c.name AS campaign_name
            FROM inserted n
            LEFT JOIN users ru ON ru.id = n.reference_user_id
            LEFT JOIN campaigns c ON c.id = n.campaign_id
            ",
        )
        .bind(notification.recipient_id)
        .bind(notification.kind.as_str())
        .bind(&notification.message)
        .bind(notification.reference_user_id)
        .bind(notification.campaign_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(e, |constraint| match constraint {
                "notifications_recipient_id_fkey" => {
                    Some(DomainError::UserNotFound(notification.recipient_id))
                }
                "notifications_reference_user_id_fkey" => notification
                    .reference_user_id
                    .map(DomainError::UserNotFound),
                "notifications_campaign_id_fkey" => {
                    notification.campaign_id.map(DomainError::CampaignNotFound)
                }
                _ => None,
            })
        })?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Notification>> {
        let result = sqlx::query_as::<_, NotificationModel>(
            r"
            SELECT id, recipient_id, kind, message, is_read, reference_user_id, campaign_id,
                   created_at
            FROM notifications
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Notification::from))
    }

    #[instrument(skip(self))]
    async fn list_for(&self, user_id: i64) -> RepoResult<Vec<NotificationView>> {
        let results = sqlx::query_as::<_, NotificationViewModel>(
            r"
            SELECT n.id, n.recipient_id, n.kind, n.message, n.is_read, n.reference_user_id,
                   n.campaign_id, n.created_at,
                   ru.display_name AS reference_user_name,
                   ru.nickname AS reference_user_nickname,
                   c.name AS campaign_name
            FROM notifications n
            LEFT JOIN users ru ON ru.id = n.reference_user_id
            LEFT JOIN campaigns c ON c.id = n.campaign_id
            WHERE n.recipient_id = $1
            ORDER BY n.created_at DESC, n.id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(NotificationView::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
