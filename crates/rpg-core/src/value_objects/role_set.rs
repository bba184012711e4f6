//! Capability sets expressed as a set of campaign roles
//!
//! An operation declares which roles may perform it; a caller is allowed when
//! their current role is in the set.

use bitflags::bitflags;

use crate::entities::CampaignRole;

bitflags! {
    /// Set of campaign roles allowed to perform an operation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RoleSet: u8 {
        const ADMIN        = 1 << 0;
        const MASTER       = 1 << 1;
        const DM_ASSISTANT = 1 << 2;
        const PLAYER       = 1 << 3;

        /// Accept join requests, promote members
        const MANAGERS = Self::ADMIN.bits() | Self::MASTER.bits();

        /// Edit campaign metadata and the next session
        const EDITORS = Self::ADMIN.bits()
            | Self::MASTER.bits()
            | Self::DM_ASSISTANT.bits();

        /// Any member of the campaign
        const MEMBERS = Self::ADMIN.bits()
            | Self::MASTER.bits()
            | Self::DM_ASSISTANT.bits()
            | Self::PLAYER.bits();
    }
}

impl RoleSet {
    /// Check whether `role` is allowed by this set
    #[inline]
    pub fn allows(self, role: CampaignRole) -> bool {
        self.contains(Self::from(role))
    }
}

impl From<CampaignRole> for RoleSet {
    fn from(role: CampaignRole) -> Self {
        match role {
            CampaignRole::Admin => Self::ADMIN,
            CampaignRole::Master => Self::MASTER,
            CampaignRole::DmAssistant => Self::DM_ASSISTANT,
            CampaignRole::Player => Self::PLAYER,
        }
    }
}
