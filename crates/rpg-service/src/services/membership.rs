//! Membership service
//!
//! Campaign creation, join requests, acceptance, promotion and metadata
//! edits. Mutating operations go through [`CapabilityService`] for their role
//! checks.

use rpg_core::{
    CampaignChanges, CampaignRole, DomainError, NewCampaign, NewNotification, NextSession,
    RoleSet,
};
use tracing::{info, instrument, warn};

use crate::dto::{
    AcceptJoinResponse, CampaignEnvelope, CampaignResponse, CreateCampaignRequest,
    CreateCampaignResponse, JoinCampaignRequest, JoinCampaignResponse, JoinRequestResponse,
    MembershipResponse, NextSessionRequest, PromoteResponse, UpdateCampaignRequest,
};

use super::capability::CapabilityService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

/// Membership service
pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn capabilities(&self) -> CapabilityService<'a> {
        CapabilityService::new(self.ctx)
    }

    fn notifications(&self) -> NotificationService<'a> {
        NotificationService::new(self.ctx)
    }

    /// Create a campaign with the creator and co-masters as masters
    #[instrument(skip(self, request), fields(co_masters = request.co_master_ids.len()))]
    pub async fn create_campaign(
        &self,
        creator_id: i64,
        request: CreateCampaignRequest,
    ) -> ServiceResult<CreateCampaignResponse> {
        let name = request.name.trim();
        let description = request.description.trim();
        if name.is_empty() || description.is_empty() {
            return Err(ServiceError::validation("Name and description are required"));
        }

        let creator = self
            .ctx
            .user_repo()
            .find_by_id(creator_id)
            .await?
            .ok_or(DomainError::UserNotFound(creator_id))?;

        let master_ids = master_roster(creator_id, &request.co_master_ids);

        let campaign = self
            .ctx
            .campaign_repo()
            .create_with_masters(
                &NewCampaign {
                    name: name.to_string(),
                    description: description.to_string(),
                    master_name: creator.display_name,
                },
                &master_ids,
            )
            .await?;

        info!(
            campaign_id = %campaign.id,
            creator_id = %creator_id,
            masters = master_ids.len(),
            "Campaign created"
        );

        Ok(CreateCampaignResponse {
            campaign_id: campaign.id,
            campaign: CampaignResponse::from(&campaign),
        })
    }

    /// Ask to join a campaign and notify every master
    #[instrument(skip(self, request))]
    pub async fn request_join(
        &self,
        caller_id: i64,
        campaign_id: i64,
        request: JoinCampaignRequest,
    ) -> ServiceResult<JoinCampaignResponse> {
        if request.user_id.is_some_and(|id| id != caller_id) {
            return Err(DomainError::UserMismatch.into());
        }

        self.capabilities().require_campaign(campaign_id).await?;

        if self
            .ctx
            .membership_repo()
            .find_role(campaign_id, caller_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyMember.into());
        }

        if self
            .ctx
            .join_request_repo()
            .find_pending(campaign_id, caller_id)
            .await?
            .is_some()
        {
            return Err(DomainError::JoinRequestPending.into());
        }

        let message = request
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());

        // A concurrent duplicate is caught by the pending-request unique index
        let join_request = self
            .ctx
            .join_request_repo()
            .create(campaign_id, caller_id, message)
            .await?;

        // The request is already stored; a failed notification must not fail it
        let masters = self.ctx.membership_repo().master_ids(campaign_id).await?;
        let mut notified = 0;
        for master_id in &masters {
            match self
                .notifications()
                .notify(NewNotification::join_requested(
                    *master_id,
                    caller_id,
                    campaign_id,
                    message,
                ))
                .await
            {
                Ok(_) => notified += 1,
                Err(e) => warn!(
                    campaign_id = %campaign_id,
                    master_id = %master_id,
                    error = %e,
                    "Failed to notify master of join request"
                ),
            }
        }

        info!(
            campaign_id = %campaign_id,
            user_id = %caller_id,
            notified,
            masters = masters.len(),
            "Join request created"
        );

        Ok(JoinCampaignResponse {
            message: "Pedido enviado com sucesso".to_string(),
            request: JoinRequestResponse::from(&join_request),
        })
    }

    /// Accept a pending request. Caller must be admin or master.
    #[instrument(skip(self))]
    pub async fn accept_join_request(
        &self,
        caller_id: i64,
        campaign_id: i64,
        user_id: i64,
    ) -> ServiceResult<AcceptJoinResponse> {
        self.capabilities().require_campaign(campaign_id).await?;
        self.capabilities()
            .require_capability(caller_id, campaign_id, RoleSet::MANAGERS)
            .await?;

        let membership = self
            .ctx
            .join_request_repo()
            .accept(campaign_id, user_id)
            .await?
            .ok_or(DomainError::JoinRequestNotFound)?;

        let notification = self
            .notifications()
            .notify(NewNotification::join_accepted(user_id, campaign_id))
            .await?;

        info!(
            campaign_id = %campaign_id,
            user_id = %user_id,
            accepted_by = %caller_id,
            "Join request accepted"
        );

        Ok(AcceptJoinResponse {
            success: true,
            notification,
            membership: MembershipResponse::from(&membership),
        })
    }

    /// Promote an existing member to master
    #[instrument(skip(self))]
    pub async fn promote(
        &self,
        caller_id: i64,
        campaign_id: i64,
        target_id: i64,
    ) -> ServiceResult<PromoteResponse> {
        self.capabilities().require_campaign(campaign_id).await?;
        self.capabilities()
            .require_capability(caller_id, campaign_id, RoleSet::MANAGERS)
            .await?;

        let membership = self
            .ctx
            .membership_repo()
            .set_role(campaign_id, target_id, CampaignRole::Master)
            .await?
            .ok_or(DomainError::MemberNotFound)?;

        info!(campaign_id = %campaign_id, user_id = %target_id, "Member promoted to master");

        Ok(PromoteResponse {
            message: "Usuário promovido a mestre".to_string(),
            membership: MembershipResponse::from(&membership),
        })
    }

    /// Apply the present metadata fields
    #[instrument(skip(self, request))]
    pub async fn update_metadata(
        &self,
        caller_id: i64,
        campaign_id: i64,
        request: UpdateCampaignRequest,
    ) -> ServiceResult<CampaignEnvelope<CampaignResponse>> {
        self.capabilities().require_campaign(campaign_id).await?;
        self.capabilities()
            .require_capability(caller_id, campaign_id, RoleSet::EDITORS)
            .await?;

        let changes = CampaignChanges::from(request);
        if changes.is_empty() {
            return Err(DomainError::NothingToUpdate.into());
        }
        if changes.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ServiceError::validation("Name cannot be blank"));
        }

        let campaign = self
            .ctx
            .campaign_repo()
            .update(campaign_id, &changes)
            .await?
            .ok_or(DomainError::CampaignNotFound(campaign_id))?;

        info!(
            campaign_id = %campaign_id,
            fields = ?changes.present_fields(),
            "Campaign metadata updated"
        );

        Ok(CampaignEnvelope {
            campaign: CampaignResponse::from(&campaign),
        })
    }

    /// Overwrite the next-session block
    #[instrument(skip(self, request))]
    pub async fn update_next_session(
        &self,
        caller_id: i64,
        campaign_id: i64,
        request: NextSessionRequest,
    ) -> ServiceResult<CampaignEnvelope<CampaignResponse>> {
        self.capabilities().require_campaign(campaign_id).await?;
        self.capabilities()
            .require_capability(caller_id, campaign_id, RoleSet::EDITORS)
            .await?;

        let next_session = NextSession::from(request);
        let campaign = self
            .ctx
            .campaign_repo()
            .update_next_session(campaign_id, &next_session)
            .await?
            .ok_or(DomainError::CampaignNotFound(campaign_id))?;

        info!(campaign_id = %campaign_id, "Next session updated");

        Ok(CampaignEnvelope {
            campaign: CampaignResponse::from(&campaign),
        })
    }
}

/// Creator first, then each co-master once
fn master_roster(creator_id: i64, co_master_ids: &[i64]) -> Vec<i64> {
    let mut roster = vec![creator_id];
    for id in co_master_ids {
        if !roster.contains(id) {
            roster.push(*id);
        }
    }
    roster
}
