//! Join request model -> entity mapper

use rpg_core::{JoinRequest, JoinRequestStatus};

use crate::models::JoinRequestModel;

impl From<JoinRequestModel> for JoinRequest {
    fn from(model: JoinRequestModel) -> Self {
        JoinRequest {
            id: model.id,
            campaign_id: model.campaign_id,
            user_id: model.user_id,
            message: model.message,
            status: model.status.parse().unwrap_or(JoinRequestStatus::Pending),
            created_at: model.created_at,
        }
    }
}
