//! PostgreSQL implementation of ChatRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use rpg_core::{ChatMessageView, ChatRepository, ChatRoom, DomainError, RepoResult};

use crate::models::{ChatMessageModel, ChatRoomModel};

use super::error::{map_constraint_violation, map_db_error};

/// PostgreSQL implementation of ChatRepository
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    /// Create a new PgChatRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    #[instrument(skip(self))]
    async fn create_room(
        &self,
        campaign_id: i64,
        name: &str,
        created_by: i64,
    ) -> RepoResult<ChatRoom> {
        let model = sqlx::query_as::<_, ChatRoomModel>(
            r"
            INSERT INTO chat_rooms (campaign_id, name, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, campaign_id, name, created_by, created_at
            ",
        )
        .bind(campaign_id)
        .bind(name)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(e, |constraint| match constraint {
                "chat_rooms_campaign_id_fkey" => Some(DomainError::CampaignNotFound(campaign_id)),
                "chat_rooms_created_by_fkey" => Some(DomainError::UserNotFound(created_by)),
                _ => None,
            })
        })?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn find_room(&self, room_id: i64) -> RepoResult<Option<ChatRoom>> {
        let result = sqlx::query_as::<_, ChatRoomModel>(
            "SELECT id, campaign_id, name, created_by, created_at FROM chat_rooms WHERE id = $1",
        )
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ChatRoom::from))
    }

    #[instrument(skip(self))]
    async fn list_rooms(&self, campaign_id: i64) -> RepoResult<Vec<ChatRoom>> {
        let results = sqlx::query_as::<_, ChatRoomModel>(
            r"
            SELECT id, campaign_id, name, created_by, created_at
            FROM chat_rooms
            WHERE campaign_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChatRoom::from).collect())
    }

    #[instrument(skip(self, text))]
    async fn create_message(
        &self,
        room_id: i64,
        author_id: i64,
        text: &str,
    ) -> RepoResult<ChatMessageView> {
        let model = sqlx::query_as::<_, ChatMessageModel>(
            r"
            WITH inserted AS (
                INSERT INTO chat_messages (room_id, author_id, text)
                VALUES ($1, $2, $3)
                RETURNING id, room_id, author_id, text, sent_at
            )
            SELECT m.id, m.room_id, m.author_id, m.text, m.sent_at,
                   u.display_name AS author_name, u.nickname AS author_nickname
            FROM inserted m
            JOIN users u ON u.id = m.author_id
            ",
        )
        .bind(room_id)
        .bind(author_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(e, |constraint| match constraint {
                "chat_messages_room_id_fkey" => Some(DomainError::RoomNotFound(room_id)),
                "chat_messages_author_id_fkey" => Some(DomainError::UserNotFound(author_id)),
                _ => None,
            })
        })?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn list_messages(&self, room_id: i64) -> RepoResult<Vec<ChatMessageView>> {
        let results = sqlx::query_as::<_, ChatMessageModel>(
            r"
            SELECT m.id, m.room_id, m.author_id, m.text, m.sent_at,
                   u.display_name AS author_name, u.nickname AS author_nickname
            FROM chat_messages m
            JOIN users u ON u.id = m.author_id
            WHERE m.room_id = $1
            ORDER BY m.sent_at, m.id
            ",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ChatMessageView::from).collect())
    }
}
