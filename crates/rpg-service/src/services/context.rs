//! Service context - dependency container for services
//!
//! Holds all repositories, the JWT service and the realtime emitter needed by services.

use std::sync::Arc;

use rpg_common::JwtService;
use rpg_core::traits::{
    CampaignRepository, ChatRepository, JoinRequestRepository, MembershipRepository,
    NotificationRepository, RealtimeEmitter, UserRepository,
};
use rpg_db::{
    PgCampaignRepository, PgChatRepository, PgJoinRequestRepository, PgMembershipRepository,
    PgNotificationRepository, PgPool, PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (behind the `rpg-core` traits)
/// - JWT service for session tokens
/// - Realtime emitter for live fan-out
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    campaign_repo: Arc<dyn CampaignRepository>,
    membership_repo: Arc<dyn MembershipRepository>,
    join_request_repo: Arc<dyn JoinRequestRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    chat_repo: Arc<dyn ChatRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    emitter: Arc<dyn RealtimeEmitter>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        campaign_repo: Arc<dyn CampaignRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
        join_request_repo: Arc<dyn JoinRequestRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        chat_repo: Arc<dyn ChatRepository>,
        jwt_service: Arc<JwtService>,
        emitter: Arc<dyn RealtimeEmitter>,
    ) -> Self {
        Self {
            user_repo,
            campaign_repo,
            membership_repo,
            join_request_repo,
            notification_repo,
            chat_repo,
            jwt_service,
            emitter,
        }
    }

    /// Wire every PostgreSQL repository over one pool
    pub fn postgres(
        pool: PgPool,
        jwt_service: Arc<JwtService>,
        emitter: Arc<dyn RealtimeEmitter>,
    ) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgCampaignRepository::new(pool.clone())),
            Arc::new(PgMembershipRepository::new(pool.clone())),
            Arc::new(PgJoinRequestRepository::new(pool.clone())),
            Arc::new(PgNotificationRepository::new(pool.clone())),
            Arc::new(PgChatRepository::new(pool)),
            jwt_service,
            emitter,
        )
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the campaign repository
    pub fn campaign_repo(&self) -> &dyn CampaignRepository {
        self.campaign_repo.as_ref()
    }

    /// Get the membership repository
    pub fn membership_repo(&self) -> &dyn MembershipRepository {
        self.membership_repo.as_ref()
    }

    /// Get the join request repository
    pub fn join_request_repo(&self) -> &dyn JoinRequestRepository {
        self.join_request_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    /// Get the chat repository
    pub fn chat_repo(&self) -> &dyn ChatRepository {
        self.chat_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the realtime emitter
    pub fn emitter(&self) -> &dyn RealtimeEmitter {
        self.emitter.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("emitter", &"dyn RealtimeEmitter")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom dependencies
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    campaign_repo: Option<Arc<dyn CampaignRepository>>,
    membership_repo: Option<Arc<dyn MembershipRepository>>,
    join_request_repo: Option<Arc<dyn JoinRequestRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    chat_repo: Option<Arc<dyn ChatRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    emitter: Option<Arc<dyn RealtimeEmitter>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn campaign_repo(mut self, repo: Arc<dyn CampaignRepository>) -> Self {
        self.campaign_repo = Some(repo);
        self
    }

    pub fn membership_repo(mut self, repo: Arc<dyn MembershipRepository>) -> Self {
        self.membership_repo = Some(repo);
        self
    }

    pub fn join_request_repo(mut self, repo: Arc<dyn JoinRequestRepository>) -> Self {
        self.join_request_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn chat_repo(mut self, repo: Arc<dyn ChatRepository>) -> Self {
        self.chat_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn emitter(mut self, emitter: Arc<dyn RealtimeEmitter>) -> Self {
        self.emitter = Some(emitter);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.campaign_repo.ok_or_else(|| ServiceError::validation("campaign_repo is required"))?,
            self.membership_repo
                .ok_or_else(|| ServiceError::validation("membership_repo is required"))?,
            self.join_request_repo
                .ok_or_else(|| ServiceError::validation("join_request_repo is required"))?,
            self.notification_repo
                .ok_or_else(|| ServiceError::validation("notification_repo is required"))?,
            self.chat_repo.ok_or_else(|| ServiceError::validation("chat_repo is required"))?,
            self.jwt_service.ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.emitter.ok_or_else(|| ServiceError::validation("emitter is required"))?,
        ))
    }
}
