//! Notification model -> entity mappers

use rpg_core::{Notification, NotificationKind, NotificationView};

use crate::models::{NotificationModel, NotificationViewModel};

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: model.id,
            recipient_id: model.recipient_id,
            kind: model.kind.parse().unwrap_or(NotificationKind::General),
            message: model.message,
            read: model.is_read,
            created_at: model.created_at,
            reference_user_id: model.reference_user_id,
            campaign_id: model.campaign_id,
        }
    }
}

impl From<NotificationViewModel> for NotificationView {
    fn from(model: NotificationViewModel) -> Self {
        NotificationView {
            notification: model.notification.into(),
            reference_user_name: model.reference_user_name,
            reference_user_nickname: model.reference_user_nickname,
            campaign_name: model.campaign_name,
        }
    }
}
