//! Chat service
//!
//! Rooms and messages scoped to a campaign. A posted message is stored first
//! and only then fanned out to `sala_<room>`.

use rpg_core::{ChatRoom, DomainError, RoleSet, Room, ServerEvent};
use tracing::{debug, info, instrument};

use crate::dto::{
    ChatMessageResponse, ChatRoomResponse, CreateRoomRequest, CreateRoomResponse,
    PostMessageRequest, RoomListResponse,
};

use super::capability::CapabilityService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Chat service
pub struct ChatService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ChatService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn capabilities(&self) -> CapabilityService<'a> {
        CapabilityService::new(self.ctx)
    }

    async fn require_room(&self, room_id: i64) -> ServiceResult<ChatRoom> {
        Ok(self
            .ctx
            .chat_repo()
            .find_room(room_id)
            .await?
            .ok_or(DomainError::RoomNotFound(room_id))?)
    }

    /// Create a room. Any member of the campaign may do it.
    #[instrument(skip(self, request))]
    pub async fn create_room(
        &self,
        caller_id: i64,
        campaign_id: i64,
        request: CreateRoomRequest,
    ) -> ServiceResult<CreateRoomResponse> {
        if request.user_id.is_some_and(|id| id != caller_id) {
            return Err(DomainError::UserMismatch.into());
        }
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation("Room name is required"));
        }

        self.capabilities().require_campaign(campaign_id).await?;
        self.capabilities()
            .require_capability(caller_id, campaign_id, RoleSet::MEMBERS)
            .await?;

        let room = self
            .ctx
            .chat_repo()
            .create_room(campaign_id, name, caller_id)
            .await?;

        info!(room_id = %room.id, campaign_id = %campaign_id, "Chat room created");

        Ok(CreateRoomResponse {
            message: "Sala criada".to_string(),
            room_id: room.id,
            room: ChatRoomResponse::from(&room),
        })
    }

    /// Rooms of a campaign in creation order
    #[instrument(skip(self))]
    pub async fn list_rooms(&self, caller_id: i64, campaign_id: i64) -> ServiceResult<RoomListResponse> {
        self.capabilities().require_campaign(campaign_id).await?;
        self.capabilities()
            .require_capability(caller_id, campaign_id, RoleSet::MEMBERS)
            .await?;

        let rooms = self.ctx.chat_repo().list_rooms(campaign_id).await?;
        Ok(RoomListResponse {
            rooms: rooms.iter().map(ChatRoomResponse::from).collect(),
        })
    }

    /// Store a message, then push `novaMensagem` to the room
    #[instrument(skip(self, request))]
    pub async fn post_message(
        &self,
        caller_id: i64,
        room_id: i64,
        request: PostMessageRequest,
    ) -> ServiceResult<ChatMessageResponse> {
        if request.user_id.is_some_and(|id| id != caller_id) {
            return Err(DomainError::UserMismatch.into());
        }
        let text = request
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ServiceError::validation("Message and author are required"))?;

        let room = self.require_room(room_id).await?;
        self.capabilities()
            .require_capability(caller_id, room.campaign_id, RoleSet::MEMBERS)
            .await?;

        let view = self
            .ctx
            .chat_repo()
            .create_message(room_id, caller_id, text)
            .await?;
        let response = ChatMessageResponse::from(&view);

        let payload = serde_json::to_value(&response)
            .map_err(|e| ServiceError::internal(format!("Failed to encode message: {e}")))?;
        let delivered = self
            .ctx
            .emitter()
            .emit_to_room(Room::chat(room_id), ServerEvent::NewMessage, &payload);

        debug!(message_id = response.id, delivered, "Chat message posted");
        Ok(response)
    }

    /// Messages of a room, oldest first
    #[instrument(skip(self))]
    pub async fn list_messages(
        &self,
        caller_id: i64,
        room_id: i64,
    ) -> ServiceResult<Vec<ChatMessageResponse>> {
        let room = self.require_room(room_id).await?;
        self.capabilities()
            .require_capability(caller_id, room.campaign_id, RoleSet::MEMBERS)
            .await?;

        let messages = self.ctx.chat_repo().list_messages(room_id).await?;
        Ok(messages.iter().map(ChatMessageResponse::from).collect())
    }

    /// Whether the user may subscribe to the room's live feed
    #[instrument(skip(self))]
    pub async fn can_join_room(&self, user_id: i64, room_id: i64) -> ServiceResult<bool> {
        let Some(room) = self.ctx.chat_repo().find_room(room_id).await? else {
            return Ok(false);
        };
        self.capabilities()
            .has_capability(user_id, room.campaign_id, RoleSet::MEMBERS)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{harness, Harness};
    use rpg_core::CampaignRole;

    struct Table {
        h: Harness,
        master: i64,
        player: i64,
        stranger: i64,
        missing_campaign: i64,
    }

    fn table() -> Table {
        let h = harness();
        let master = h.store.seed_user("Ana");
        let player = h.store.seed_user("Bruno");
        let stranger = h.store.seed_user("Carla");
        Table {
            h,
            master,
            player,
            stranger,
            missing_campaign: 500,
        }
    }

    async fn seeded_room(t: &Table) -> i64 {
        let created = crate::services::MembershipService::new(&t.h.ctx)
            .create_campaign(
                t.master,
                crate::dto::CreateCampaignRequest {
                    name: "Strahd".to_string(),
                    description: "desc".to_string(),
                    co_master_ids: vec![],
                },
            )
            .await
            .unwrap();
        t.h.store
            .add_member(created.campaign_id, t.player, CampaignRole::Player);

        ChatService::new(&t.h.ctx)
            .create_room(
                t.player,
                created.campaign_id,
                CreateRoomRequest {
                    name: "Taverna".to_string(),
                    user_id: None,
                },
            )
            .await
            .unwrap()
            .room_id
    }

    fn say(text: &str) -> PostMessageRequest {
        PostMessageRequest {
            text: Some(text.to_string()),
            user_id: None,
        }
    }

    #[tokio::test]
    async fn test_post_then_list_round_trip() {
        let t = table();
        let room = seeded_room(&t).await;
        let service = ChatService::new(&t.h.ctx);

        let first = service.post_message(t.player, room, say("Olá")).await.unwrap();
        let second = service.post_message(t.master, room, say("Bem-vindos")).await.unwrap();

        let listed = service.list_messages(t.player, room).await.unwrap();
        assert_eq!(listed, vec![first, second]);
        assert_eq!(listed[0].text, "Olá");
        assert_eq!(listed[0].author_id, t.player);
        assert_eq!(listed[0].author_name, "Bruno");
        assert!(listed[0].sent_at <= listed[1].sent_at);
    }

    #[tokio::test]
    async fn test_post_emits_to_chat_room() {
        let t = table();
        let room = seeded_room(&t).await;

        let posted = ChatService::new(&t.h.ctx)
            .post_message(t.player, room, say("Rolando iniciativa"))
            .await
            .unwrap();

        let sent = t.h.emitter.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, Room::Chat(room));
        assert_eq!(sent[0].1, ServerEvent::NewMessage);
        assert_eq!(sent[0].2["id"], posted.id);
        assert_eq!(sent[0].2["apelido"], "bruno");
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let t = table();
        let room = seeded_room(&t).await;
        let service = ChatService::new(&t.h.ctx);

        let err = service.post_message(t.player, room, say("   ")).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = service
            .post_message(t.player, room, PostMessageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(t.h.emitter.sent().is_empty());
    }

    #[tokio::test]
    async fn test_non_member_cannot_read_or_post() {
        let t = table();
        let room = seeded_room(&t).await;
        let service = ChatService::new(&t.h.ctx);

        let err = service.post_message(t.stranger, room, say("oi")).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        let err = service.list_messages(t.stranger, room).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        assert!(!service.can_join_room(t.stranger, room).await.unwrap());
        assert!(service.can_join_room(t.player, room).await.unwrap());
        assert!(!service.can_join_room(t.player, 9999).await.unwrap());
    }

    #[tokio::test]
    async fn test_room_errors() {
        let t = table();
        let service = ChatService::new(&t.h.ctx);

        let err = service.post_message(t.player, 9999, say("oi")).await.unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_ROOM");

        let err = service
            .create_room(
                t.master,
                t.missing_campaign,
                CreateRoomRequest {
                    name: "Taverna".to_string(),
                    user_id: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CAMPAIGN");

        let err = service
            .post_message(
                t.player,
                1,
                PostMessageRequest {
                    text: Some("oi".to_string()),
                    user_id: Some(t.master),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "USER_MISMATCH");
    }

    #[tokio::test]
    async fn test_rooms_listed_in_creation_order() {
        let t = table();
        let first = seeded_room(&t).await;
        let service = ChatService::new(&t.h.ctx);
        let room = service.require_room(first).await.unwrap();
        service
            .create_room(
                t.master,
                room.campaign_id,
                CreateRoomRequest {
                    name: "Masmorra".to_string(),
                    user_id: Some(t.master),
                },
            )
            .await
            .unwrap();

        let listed = service.list_rooms(t.player, room.campaign_id).await.unwrap();
        let names: Vec<&str> = listed.rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Taverna", "Masmorra"]);

        let err = service.list_rooms(t.stranger, room.campaign_id).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
