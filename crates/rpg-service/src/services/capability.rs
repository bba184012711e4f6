//! Capability service
//!
//! Role-based authorization for campaign operations. Every check re-reads the
//! caller's current membership; roles are never taken from the token.

use rpg_core::{CampaignRole, DomainError, RoleSet};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Capability service for access control
pub struct CapabilityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CapabilityService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check whether the user's current role is in `allowed`
    #[instrument(skip(self))]
    pub async fn has_capability(
        &self,
        user_id: i64,
        campaign_id: i64,
        allowed: RoleSet,
    ) -> ServiceResult<bool> {
        let role = self.ctx.membership_repo().find_role(campaign_id, user_id).await?;
        Ok(role.is_some_and(|role| allowed.allows(role)))
    }

    /// Check capability and return the caller's role, or `InsufficientRole`
    #[instrument(skip(self))]
    pub async fn require_capability(
        &self,
        user_id: i64,
        campaign_id: i64,
        allowed: RoleSet,
    ) -> ServiceResult<CampaignRole> {
        match self.ctx.membership_repo().find_role(campaign_id, user_id).await? {
            Some(role) if allowed.allows(role) => Ok(role),
            role => {
                debug!(?role, "Capability denied");
                Err(DomainError::InsufficientRole.into())
            }
        }
    }

    /// Fail with `CampaignNotFound` unless the campaign exists
    #[instrument(skip(self))]
    pub async fn require_campaign(&self, campaign_id: i64) -> ServiceResult<()> {
        if self.ctx.campaign_repo().exists(campaign_id).await? {
            Ok(())
        } else {
            Err(DomainError::CampaignNotFound(campaign_id).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::harness;

    #[tokio::test]
    async fn test_capability_follows_current_role() {
        let h = harness();
        let user = h.store.seed_user("Ana");
        h.store.add_member(10, user, CampaignRole::DmAssistant);
        let service = CapabilityService::new(&h.ctx);

        assert!(service.has_capability(user, 10, RoleSet::EDITORS).await.unwrap());
        assert!(!service.has_capability(user, 10, RoleSet::MANAGERS).await.unwrap());
        assert!(!service.has_capability(user, 11, RoleSet::MEMBERS).await.unwrap());
    }

    #[tokio::test]
    async fn test_require_capability_returns_role_or_forbidden() {
        let h = harness();
        let user = h.store.seed_user("Ana");
        h.store.add_member(10, user, CampaignRole::Master);
        let service = CapabilityService::new(&h.ctx);

        let role = service
            .require_capability(user, 10, RoleSet::MANAGERS)
            .await
            .unwrap();
        assert_eq!(role, CampaignRole::Master);

        let err = service
            .require_capability(user, 12, RoleSet::MEMBERS)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_require_campaign() {
        let h = harness();
        let err = CapabilityService::new(&h.ctx)
            .require_campaign(5)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CAMPAIGN");
    }
}
