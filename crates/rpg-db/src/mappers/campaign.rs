//! Campaign model -> entity mappers

use rpg_core::{Campaign, CampaignSummary, NextSession};

use crate::models::{CampaignModel, CampaignSummaryModel};

impl From<CampaignModel> for Campaign {
    fn from(model: CampaignModel) -> Self {
        Campaign {
            id: model.id,
            name: model.name,
            description: model.description,
            master_name: model.master_name,
            notes: model.notes,
            tags: model.tags,
            system_ref: model.system_ref,
            status: model.status,
            cover_image_url: model.cover_image_url,
            next_session: NextSession {
                datetime: model.next_session_at,
                location: model.next_session_location,
                link: model.next_session_link,
            },
            created_at: model.created_at,
        }
    }
}

impl From<CampaignSummaryModel> for CampaignSummary {
    fn from(model: CampaignSummaryModel) -> Self {
        CampaignSummary {
            id: model.id,
            name: model.name,
            description: model.description,
            masters: model.masters,
        }
    }
}
