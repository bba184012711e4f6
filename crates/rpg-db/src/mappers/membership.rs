//! Membership model -> entity mappers

use rpg_core::{CampaignRole, Membership, Participant};

use crate::models::{MembershipModel, ParticipantModel};

pub(crate) fn parse_role(role: &str) -> CampaignRole {
    role.parse().unwrap_or(CampaignRole::Player)
}

impl From<MembershipModel> for Membership {
    fn from(model: MembershipModel) -> Self {
        Membership {
            user_id: model.user_id,
            campaign_id: model.campaign_id,
            role: parse_role(&model.role),
            joined_at: model.joined_at,
        }
    }
}

impl From<ParticipantModel> for Participant {
    fn from(model: ParticipantModel) -> Self {
        Participant {
            campaign_id: model.campaign_id,
            user_id: model.user_id,
            display_name: model.display_name,
            nickname: model.nickname,
            email: model.email,
            image_url: model.image_url,
            role: parse_role(&model.role),
        }
    }
}
