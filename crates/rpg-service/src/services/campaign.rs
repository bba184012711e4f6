//! Campaign read model
//!
//! Listings and detail views. Nothing here mutates state.

use std::collections::HashMap;

use rpg_core::{CampaignRole, DomainError, Participant};
use tracing::instrument;

use crate::dto::{
    CampaignDetailResponse, CampaignEnvelope, CampaignMemberResponse, CampaignResponse,
    CampaignSummaryResponse, CampaignUserResponse, ParticipantResponse, RowsResponse,
    UserCampaignDetailResponse, UserCampaignDetailsResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Campaign service
pub struct CampaignService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CampaignService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All campaigns with their master names
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<CampaignSummaryResponse>> {
        let summaries = self.ctx.campaign_repo().list_summaries().await?;
        Ok(summaries.iter().map(CampaignSummaryResponse::from).collect())
    }

    /// Campaign with its participants
    #[instrument(skip(self))]
    pub async fn detail(
        &self,
        campaign_id: i64,
    ) -> ServiceResult<CampaignEnvelope<CampaignDetailResponse>> {
        let campaign = self
            .ctx
            .campaign_repo()
            .find_by_id(campaign_id)
            .await?
            .ok_or(DomainError::CampaignNotFound(campaign_id))?;

        let participants = self.ctx.membership_repo().participants(campaign_id).await?;

        Ok(CampaignEnvelope {
            campaign: CampaignDetailResponse {
                campaign: CampaignResponse::from(&campaign),
                participants: participants.iter().map(ParticipantResponse::from).collect(),
            },
        })
    }

    #[instrument(skip(self))]
    pub async fn users(&self, campaign_id: i64) -> ServiceResult<RowsResponse<CampaignUserResponse>> {
        let participants = self.ctx.membership_repo().participants(campaign_id).await?;
        Ok(RowsResponse::new(
            participants.iter().map(CampaignUserResponse::from).collect(),
        ))
    }

    #[instrument(skip(self))]
    pub async fn user_campaigns(&self, user_id: i64) -> ServiceResult<RowsResponse<CampaignResponse>> {
        let campaigns = self.ctx.campaign_repo().find_by_user(user_id).await?;
        Ok(RowsResponse::new(campaigns.iter().map(CampaignResponse::from).collect()))
    }

    /// Campaigns of a user, each with its members. Two queries regardless of
    /// how many campaigns the user belongs to.
    #[instrument(skip(self))]
    pub async fn user_campaign_details(
        &self,
        user_id: i64,
    ) -> ServiceResult<UserCampaignDetailsResponse> {
        let campaigns = self.ctx.campaign_repo().find_by_user(user_id).await?;
        let ids: Vec<i64> = campaigns.iter().map(|c| c.id).collect();

        let mut by_campaign: HashMap<i64, Vec<Participant>> = HashMap::new();
        if !ids.is_empty() {
            for participant in self.ctx.membership_repo().participants_of(&ids).await? {
                by_campaign
                    .entry(participant.campaign_id)
                    .or_default()
                    .push(participant);
            }
        }

        let campaigns = campaigns
            .into_iter()
            .map(|campaign| {
                let members = by_campaign.remove(&campaign.id).unwrap_or_default();
                UserCampaignDetailResponse {
                    campaign: CampaignSummaryResponse {
                        id: campaign.id,
                        name: campaign.name,
                        description: campaign.description,
                        masters: master_names(&members),
                    },
                    members: members.iter().map(CampaignMemberResponse::from).collect(),
                }
            })
            .collect();

        Ok(UserCampaignDetailsResponse { campaigns })
    }
}

/// Comma-separated master names in alphabetical order, `None` without masters
fn master_names(members: &[Participant]) -> Option<String> {
    let mut names: Vec<&str> = members
        .iter()
        .filter(|p| p.role == CampaignRole::Master)
        .map(|p| p.display_name.as_str())
        .collect();
    if names.is_empty() {
        return None;
    }
    names.sort_unstable();
    Some(names.join(","))
}
