//! Notification service
//!
//! Persists notifications and pushes them to the recipient's inbox room.
//! The row is always written before the push; a recipient with no live
//! connection simply reads it on the next fetch.

use rpg_core::{DomainError, NewNotification, ServerEvent};
use tracing::{debug, info, instrument};

use crate::dto::{CreateNotificationRequest, CreateNotificationResponse, NotificationResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Persist, then push `novaNotificacao` to `user_<recipient>`
    #[instrument(
        skip(self, notification),
        fields(recipient_id = notification.recipient_id, kind = notification.kind.as_str())
    )]
    pub async fn notify(&self, notification: NewNotification) -> ServiceResult<NotificationResponse> {
        let view = self.ctx.notification_repo().create(&notification).await?;
        let response = NotificationResponse::from(&view);

        let payload = serde_json::to_value(&response)
            .map_err(|e| ServiceError::internal(format!("Failed to encode notification: {e}")))?;
        let delivered =
            self.ctx
                .emitter()
                .emit_to_user(notification.recipient_id, ServerEvent::NewNotification, &payload);

        if delivered == 0 {
            debug!(notification_id = response.id, "Recipient offline, notification stored only");
        } else {
            debug!(notification_id = response.id, delivered, "Notification pushed");
        }

        Ok(response)
    }

    /// Inbox of a user, newest first
    #[instrument(skip(self))]
    pub async fn list_for(&self, user_id: i64) -> ServiceResult<Vec<NotificationResponse>> {
        let views = self.ctx.notification_repo().list_for(user_id).await?;
        Ok(views.iter().map(NotificationResponse::from).collect())
    }

    /// Set the read flag. Only the recipient may do it.
    #[instrument(skip(self))]
    pub async fn mark_read(&self, caller_id: i64, notification_id: i64) -> ServiceResult<()> {
        let notification = self
            .ctx
            .notification_repo()
            .find_by_id(notification_id)
            .await?
            .ok_or(DomainError::NotificationNotFound(notification_id))?;

        if notification.recipient_id != caller_id {
            return Err(DomainError::NotRecipient.into());
        }

        if !notification.read {
            self.ctx.notification_repo().mark_read(notification_id).await?;
        }
        Ok(())
    }

    /// Free-form notification to any existing user
    #[instrument(skip(self, request), fields(recipient_id = request.recipient_id))]
    pub async fn create_manual(
        &self,
        request: CreateNotificationRequest,
    ) -> ServiceResult<CreateNotificationResponse> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(ServiceError::validation("Message is required"));
        }

        if self
            .ctx
            .user_repo()
            .find_by_id(request.recipient_id)
            .await?
            .is_none()
        {
            return Err(DomainError::UserNotFound(request.recipient_id).into());
        }

        let notification = self
            .notify(NewNotification::new(
                request.recipient_id,
                request.kind.unwrap_or_default(),
                message,
            ))
            .await?;

        info!(notification_id = notification.id, "Manual notification created");
        Ok(CreateNotificationResponse {
            message: "Notificação criada".to_string(),
            notification,
        })
    }
}
