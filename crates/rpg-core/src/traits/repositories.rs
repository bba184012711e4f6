//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Campaign, CampaignChanges, CampaignRole, CampaignSummary, ChatMessageView, ChatRoom,
    JoinRequest, Membership, NewCampaign, NewNotification, NewUser, NextSession, Notification,
    NotificationView, Participant, User,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if display name is already taken
    async fn display_name_exists(&self, display_name: &str) -> RepoResult<bool>;

    /// Create a new user and return it with its generated id
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Hard delete a user. Returns false when no row matched.
    async fn delete(&self, id: i64) -> RepoResult<bool>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>>;

    /// Get the single stored refresh token
    async fn get_refresh_token(&self, id: i64) -> RepoResult<Option<String>>;

    /// Overwrite the stored refresh token
    async fn set_refresh_token(&self, id: i64, token: &str) -> RepoResult<()>;

    /// Clear the stored refresh token wherever it equals `token`.
    /// Returns the number of rows changed.
    async fn clear_refresh_token(&self, token: &str) -> RepoResult<u64>;
}

// ============================================================================
// Campaign Repository
// ============================================================================

#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Find campaign by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Campaign>>;

    /// Check whether a campaign exists
    async fn exists(&self, id: i64) -> RepoResult<bool>;

    /// Insert a campaign and a master membership for each id, atomically
    async fn create_with_masters(
        &self,
        campaign: &NewCampaign,
        master_ids: &[i64],
    ) -> RepoResult<Campaign>;

    /// Apply the present fields. Returns None when the campaign does not exist.
    async fn update(&self, id: i64, changes: &CampaignChanges) -> RepoResult<Option<Campaign>>;

    /// Overwrite the next-session block
    async fn update_next_session(
        &self,
        id: i64,
        next_session: &NextSession,
    ) -> RepoResult<Option<Campaign>>;

    /// All campaigns with their master names
    async fn list_summaries(&self) -> RepoResult<Vec<CampaignSummary>>;

    /// Campaigns the user is a member of
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Campaign>>;
}

// ============================================================================
// Membership Repository
// ============================================================================

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Current role of a user in a campaign (single indexed lookup)
    async fn find_role(&self, campaign_id: i64, user_id: i64) -> RepoResult<Option<CampaignRole>>;

    /// User ids holding the master role
    async fn master_ids(&self, campaign_id: i64) -> RepoResult<Vec<i64>>;

    /// Change a member's role. Returns None when the user is not a member.
    async fn set_role(
        &self,
        campaign_id: i64,
        user_id: i64,
        role: CampaignRole,
    ) -> RepoResult<Option<Membership>>;

    /// Members of a campaign joined with their user records
    async fn participants(&self, campaign_id: i64) -> RepoResult<Vec<Participant>>;

    /// Members of several campaigns in one query
    async fn participants_of(&self, campaign_ids: &[i64]) -> RepoResult<Vec<Participant>>;
}

// ============================================================================
// Join Request Repository
// ============================================================================

#[async_trait]
pub trait JoinRequestRepository: Send + Sync {
    /// Insert a pending request.
    /// Fails with `JoinRequestPending` if one is already pending for the pair.
    async fn create(
        &self,
        campaign_id: i64,
        user_id: i64,
        message: Option<&str>,
    ) -> RepoResult<JoinRequest>;

    /// The pending request for a pair, if any
    async fn find_pending(&self, campaign_id: i64, user_id: i64) -> RepoResult<Option<JoinRequest>>;

    /// Mark the pending request accepted and add the user as a player, atomically.
    /// Returns None when no pending request exists. Fails with `AlreadyMember`
    /// if the membership already exists, leaving the request untouched.
    async fn accept(&self, campaign_id: i64, user_id: i64) -> RepoResult<Option<Membership>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persist a notification and return its inbox projection
    async fn create(&self, notification: &NewNotification) -> RepoResult<NotificationView>;

    /// Find notification by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Notification>>;

    /// Inbox of a user, newest first
    async fn list_for(&self, user_id: i64) -> RepoResult<Vec<NotificationView>>;

    /// Set the read flag. Returns false when no row matched.
    async fn mark_read(&self, id: i64) -> RepoResult<bool>;
}

// ============================================================================
// Chat Repository
// ============================================================================

#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Create a room in a campaign
    async fn create_room(&self, campaign_id: i64, name: &str, created_by: i64)
        -> RepoResult<ChatRoom>;

    /// Find room by ID
    async fn find_room(&self, room_id: i64) -> RepoResult<Option<ChatRoom>>;

    /// Rooms of a campaign in creation order
    async fn list_rooms(&self, campaign_id: i64) -> RepoResult<Vec<ChatRoom>>;

    /// Store a message and return it joined with the author's names
    async fn create_message(
        &self,
        room_id: i64,
        author_id: i64,
        text: &str,
    ) -> RepoResult<ChatMessageView>;

    /// Messages of a room, oldest first
    async fn list_messages(&self, room_id: i64) -> RepoResult<Vec<ChatMessageView>>;
}
