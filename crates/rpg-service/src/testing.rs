//! In-memory repository fakes and a recording emitter for service tests

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use rpg_common::JwtService;
use rpg_core::{
    Campaign, CampaignChanges, CampaignRepository, CampaignRole, CampaignSummary, ChatMessage,
    ChatMessageView, ChatRepository, ChatRoom, DomainError, JoinRequest, JoinRequestRepository,
    JoinRequestStatus, Membership, MembershipRepository, NewCampaign, NewNotification, NewUser,
    NextSession, Notification, NotificationRepository, NotificationView, Participant,
    RealtimeEmitter, RepoResult, Room, ServerEvent, User, UserRepository,
};

use crate::services::ServiceContext;

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<(User, String, Option<String>)>,
    campaigns: Vec<Campaign>,
    members: Vec<Membership>,
    join_requests: Vec<JoinRequest>,
    notifications: Vec<Notification>,
    rooms: Vec<ChatRoom>,
    messages: Vec<ChatMessage>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user(&self, id: i64) -> Option<&User> {
        self.users.iter().map(|(u, _, _)| u).find(|u| u.id == id)
    }

    fn campaign_mut(&mut self, id: i64) -> Option<&mut Campaign> {
        self.campaigns.iter_mut().find(|c| c.id == id)
    }

    fn view(&self, n: &Notification) -> NotificationView {
        let reference = n.reference_user_id.and_then(|id| self.user(id));
        NotificationView {
            notification: n.clone(),
            reference_user_name: reference.map(|u| u.display_name.clone()),
            reference_user_nickname: reference.map(|u| u.nickname.clone()),
            campaign_name: n
                .campaign_id
                .and_then(|id| self.campaigns.iter().find(|c| c.id == id))
                .map(|c| c.name.clone()),
        }
    }

    fn participant(&self, m: &Membership) -> Option<Participant> {
        self.user(m.user_id).map(|u| Participant {
            campaign_id: m.campaign_id,
            user_id: u.id,
            display_name: u.display_name.clone(),
            nickname: u.nickname.clone(),
            email: u.email.clone(),
            image_url: u.image_url.clone(),
            role: m.role,
        })
    }
}

/// One store implementing every repository trait
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    /// Insert a user directly, returning its id
    pub fn seed_user(&self, display_name: &str) -> i64 {
        let mut t = self.lock();
        let id = t.next_id();
        let user = User::new(
            id,
            display_name.to_string(),
            display_name.to_lowercase(),
            format!("{}@example.com", display_name.to_lowercase()),
        );
        t.users.push((user, "unused-hash".to_string(), None));
        id
    }

    pub fn add_member(&self, campaign_id: i64, user_id: i64, role: CampaignRole) {
        self.lock().members.push(Membership::new(user_id, campaign_id, role));
    }

    pub fn role_of(&self, campaign_id: i64, user_id: i64) -> Option<CampaignRole> {
        self.lock()
            .members
            .iter()
            .find(|m| m.campaign_id == campaign_id && m.user_id == user_id)
            .map(|m| m.role)
    }

    pub fn member_count(&self, campaign_id: i64) -> usize {
        self.lock().members.iter().filter(|m| m.campaign_id == campaign_id).count()
    }

    pub fn notifications_for(&self, user_id: i64) -> Vec<Notification> {
        self.lock()
            .notifications
            .iter()
            .filter(|n| n.recipient_id == user_id)
            .cloned()
            .collect()
    }

    pub fn join_requests(&self) -> Vec<JoinRequest> {
        self.lock().join_requests.clone()
    }

    pub fn stored_refresh_token(&self, user_id: i64) -> Option<String> {
        self.lock()
            .users
            .iter()
            .find(|(u, _, _)| u.id == user_id)
            .and_then(|(_, _, token)| token.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.lock().user(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .map(|(u, _, _)| u)
            .find(|u| u.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.lock().users.iter().any(|(u, _, _)| u.email == email))
    }

    async fn display_name_exists(&self, display_name: &str) -> RepoResult<bool> {
        Ok(self
            .lock()
            .users
            .iter()
            .any(|(u, _, _)| u.display_name == display_name))
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut t = self.lock();
        if t.users.iter().any(|(u, _, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        let id = t.next_id();
        let created = User::new(
            id,
            user.display_name.clone(),
            user.nickname.clone(),
            user.email.clone(),
        );
        t.users.push((created.clone(), password_hash.to_string(), None));
        Ok(created)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut t = self.lock();
        let before = t.users.len();
        t.users.retain(|(u, _, _)| u.id != id);
        t.members.retain(|m| m.user_id != id);
        t.notifications.retain(|n| n.recipient_id != id);
        Ok(t.users.len() < before)
    }

    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _, _)| u.id == id)
            .map(|(_, hash, _)| hash.clone()))
    }

    async fn get_refresh_token(&self, id: i64) -> RepoResult<Option<String>> {
        Ok(self.stored_refresh_token(id))
    }

    async fn set_refresh_token(&self, id: i64, token: &str) -> RepoResult<()> {
        let mut t = self.lock();
        let row = t
            .users
            .iter_mut()
            .find(|(u, _, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        row.2 = Some(token.to_string());
        Ok(())
    }

    async fn clear_refresh_token(&self, token: &str) -> RepoResult<u64> {
        let mut cleared = 0;
        for row in &mut self.lock().users {
            if row.2.as_deref() == Some(token) {
                row.2 = None;
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}

#[async_trait]
impl CampaignRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Campaign>> {
        Ok(self.lock().campaigns.iter().find(|c| c.id == id).cloned())
    }

    async fn exists(&self, id: i64) -> RepoResult<bool> {
        Ok(self.lock().campaigns.iter().any(|c| c.id == id))
    }

    async fn create_with_masters(
        &self,
        campaign: &NewCampaign,
        master_ids: &[i64],
    ) -> RepoResult<Campaign> {
        let mut t = self.lock();
        if let Some(missing) = master_ids.iter().find(|id| t.user(**id).is_none()) {
            return Err(DomainError::UserNotFound(*missing));
        }
        let id = t.next_id();
        let created = Campaign {
            id,
            name: campaign.name.clone(),
            description: campaign.description.clone(),
            master_name: campaign.master_name.clone(),
            notes: None,
            tags: None,
            system_ref: None,
            status: None,
            cover_image_url: None,
            next_session: NextSession::default(),
            created_at: Utc::now(),
        };
        t.campaigns.push(created.clone());
        for master in master_ids {
            t.members.push(Membership::new(*master, id, CampaignRole::Master));
        }
        Ok(created)
    }

    async fn update(&self, id: i64, changes: &CampaignChanges) -> RepoResult<Option<Campaign>> {
        let mut t = self.lock();
        let Some(c) = t.campaign_mut(id) else {
            return Ok(None);
        };
        let apply = |target: &mut String, value: &Option<String>| {
            if let Some(v) = value {
                target.clone_from(v);
            }
        };
        apply(&mut c.name, &changes.name);
        apply(&mut c.description, &changes.description);
        for (target, value) in [
            (&mut c.notes, &changes.notes),
            (&mut c.tags, &changes.tags),
            (&mut c.system_ref, &changes.system_ref),
            (&mut c.status, &changes.status),
            (&mut c.cover_image_url, &changes.cover_image_url),
        ] {
            if value.is_some() {
                target.clone_from(value);
            }
        }
        Ok(Some(c.clone()))
    }

    async fn update_next_session(
        &self,
        id: i64,
        next_session: &NextSession,
    ) -> RepoResult<Option<Campaign>> {
        let mut t = self.lock();
        Ok(t.campaign_mut(id).map(|c| {
            c.next_session = next_session.clone();
            c.clone()
        }))
    }

    async fn list_summaries(&self) -> RepoResult<Vec<CampaignSummary>> {
        let t = self.lock();
        Ok(t.campaigns
            .iter()
            .map(|c| {
                let mut masters: Vec<String> = t
                    .members
                    .iter()
                    .filter(|m| m.campaign_id == c.id && m.is_master())
                    .filter_map(|m| t.user(m.user_id).map(|u| u.display_name.clone()))
                    .collect();
                masters.sort();
                CampaignSummary {
                    id: c.id,
                    name: c.name.clone(),
                    description: c.description.clone(),
                    masters: (!masters.is_empty()).then(|| masters.join(",")),
                }
            })
            .collect())
    }

    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Campaign>> {
        let t = self.lock();
        Ok(t.members
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| t.campaigns.iter().find(|c| c.id == m.campaign_id).cloned())
            .collect())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryStore {
    async fn find_role(&self, campaign_id: i64, user_id: i64) -> RepoResult<Option<CampaignRole>> {
        Ok(self.role_of(campaign_id, user_id))
    }

    async fn master_ids(&self, campaign_id: i64) -> RepoResult<Vec<i64>> {
        Ok(self
            .lock()
            .members
            .iter()
            .filter(|m| m.campaign_id == campaign_id && m.is_master())
            .map(|m| m.user_id)
            .collect())
    }

    async fn set_role(
        &self,
        campaign_id: i64,
        user_id: i64,
        role: CampaignRole,
    ) -> RepoResult<Option<Membership>> {
        let mut t = self.lock();
        Ok(t.members
            .iter_mut()
            .find(|m| m.campaign_id == campaign_id && m.user_id == user_id)
            .map(|m| {
                m.role = role;
                m.clone()
            }))
    }

    async fn participants(&self, campaign_id: i64) -> RepoResult<Vec<Participant>> {
        self.participants_of(&[campaign_id]).await
    }

    async fn participants_of(&self, campaign_ids: &[i64]) -> RepoResult<Vec<Participant>> {
        let t = self.lock();
        Ok(t.members
            .iter()
            .filter(|m| campaign_ids.contains(&m.campaign_id))
            .filter_map(|m| t.participant(m))
            .collect())
    }
}

#[async_trait]
impl JoinRequestRepository for InMemoryStore {
    async fn create(
        &self,
        campaign_id: i64,
        user_id: i64,
        message: Option<&str>,
    ) -> RepoResult<JoinRequest> {
        let mut t = self.lock();
        if t.join_requests
            .iter()
            .any(|r| r.campaign_id == campaign_id && r.user_id == user_id && r.is_pending())
        {
            return Err(DomainError::JoinRequestPending);
        }
        let id = t.next_id();
        let request = JoinRequest {
            id,
            campaign_id,
            user_id,
            message: message.map(str::to_string),
            status: JoinRequestStatus::Pending,
            created_at: Utc::now(),
        };
        t.join_requests.push(request.clone());
        Ok(request)
    }

    async fn find_pending(&self, campaign_id: i64, user_id: i64) -> RepoResult<Option<JoinRequest>> {
        Ok(self
            .lock()
            .join_requests
            .iter()
            .find(|r| r.campaign_id == campaign_id && r.user_id == user_id && r.is_pending())
            .cloned())
    }

    async fn accept(&self, campaign_id: i64, user_id: i64) -> RepoResult<Option<Membership>> {
        let mut t = self.lock();
        let Some(index) = t
            .join_requests
            .iter()
            .position(|r| r.campaign_id == campaign_id && r.user_id == user_id && r.is_pending())
        else {
            return Ok(None);
        };
        if t.members
            .iter()
            .any(|m| m.campaign_id == campaign_id && m.user_id == user_id)
        {
            return Err(DomainError::AlreadyMember);
        }
        t.join_requests[index].status = JoinRequestStatus::Accepted;
        let membership = Membership::new(user_id, campaign_id, CampaignRole::Player);
        t.members.push(membership.clone());
        Ok(Some(membership))
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn create(&self, notification: &NewNotification) -> RepoResult<NotificationView> {
        let mut t = self.lock();
        if t.user(notification.recipient_id).is_none() {
            return Err(DomainError::UserNotFound(notification.recipient_id));
        }
        let id = t.next_id();
        let stored = Notification {
            id,
            recipient_id: notification.recipient_id,
            kind: notification.kind,
            message: notification.message.clone(),
            read: false,
            created_at: Utc::now(),
            reference_user_id: notification.reference_user_id,
            campaign_id: notification.campaign_id,
        };
        t.notifications.push(stored.clone());
        Ok(t.view(&stored))
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Notification>> {
        Ok(self.lock().notifications.iter().find(|n| n.id == id).cloned())
    }

    async fn list_for(&self, user_id: i64) -> RepoResult<Vec<NotificationView>> {
        let t = self.lock();
        let mut views: Vec<NotificationView> = t
            .notifications
            .iter()
            .filter(|n| n.recipient_id == user_id)
            .map(|n| t.view(n))
            .collect();
        views.sort_by(|a, b| b.notification.id.cmp(&a.notification.id));
        Ok(views)
    }

    async fn mark_read(&self, id: i64) -> RepoResult<bool> {
        let mut t = self.lock();
        Ok(t.notifications
            .iter_mut()
            .find(|n| n.id == id)
            .map(|n| n.read = true)
            .is_some())
    }
}

#[async_trait]
impl ChatRepository for InMemoryStore {
    async fn create_room(
        &self,
        campaign_id: i64,
        name: &str,
        created_by: i64,
    ) -> RepoResult<ChatRoom> {
        let mut t = self.lock();
        let id = t.next_id();
        let room = ChatRoom {
            id,
            campaign_id,
            name: name.to_string(),
            created_by,
            created_at: Utc::now(),
        };
        t.rooms.push(room.clone());
        Ok(room)
    }

    async fn find_room(&self, room_id: i64) -> RepoResult<Option<ChatRoom>> {
        Ok(self.lock().rooms.iter().find(|r| r.id == room_id).cloned())
    }

    async fn list_rooms(&self, campaign_id: i64) -> RepoResult<Vec<ChatRoom>> {
        Ok(self
            .lock()
            .rooms
            .iter()
            .filter(|r| r.campaign_id == campaign_id)
            .cloned()
            .collect())
    }

    async fn create_message(
        &self,
        room_id: i64,
        author_id: i64,
        text: &str,
    ) -> RepoResult<ChatMessageView> {
        let mut t = self.lock();
        let author = t.user(author_id).cloned().ok_or(DomainError::UserNotFound(author_id))?;
        let id = t.next_id();
        let message = ChatMessage {
            id,
            room_id,
            author_id,
            text: text.to_string(),
            sent_at: Utc::now(),
        };
        t.messages.push(message.clone());
        Ok(ChatMessageView {
            message,
            author_name: author.display_name,
            author_nickname: author.nickname,
        })
    }

    async fn list_messages(&self, room_id: i64) -> RepoResult<Vec<ChatMessageView>> {
        let t = self.lock();
        Ok(t.messages
            .iter()
            .filter(|m| m.room_id == room_id)
            .filter_map(|m| {
                t.user(m.author_id).map(|u| ChatMessageView {
                    message: m.clone(),
                    author_name: u.display_name.clone(),
                    author_nickname: u.nickname.clone(),
                })
            })
            .collect())
    }
}

/// Emitter that records every emission
#[derive(Default)]
pub struct RecordingEmitter {
    sent: Mutex<Vec<(Room, ServerEvent, Value)>>,
}

impl RecordingEmitter {
    pub fn sent(&self) -> Vec<(Room, ServerEvent, Value)> {
        self.sent.lock().unwrap().clone()
    }
}

impl RealtimeEmitter for RecordingEmitter {
    fn emit_to_room(&self, room: Room, event: ServerEvent, payload: &Value) -> usize {
        self.sent.lock().unwrap().push((room, event, payload.clone()));
        1
    }
}

pub struct Harness {
    pub ctx: ServiceContext,
    pub store: Arc<InMemoryStore>,
    pub emitter: Arc<RecordingEmitter>,
}

pub fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::default());
    let emitter = Arc::new(RecordingEmitter::default());
    let ctx = ServiceContext::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(JwtService::new("test-access", "test-refresh", 3600, 604_800)),
        emitter.clone(),
    );
    Harness {
        ctx,
        store,
        emitter,
    }
}
