//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use rpg_common::AccessClaims;
use rpg_core::{
    Campaign, CampaignSummary, ChatMessageView, ChatRoom, JoinRequest, Membership,
    NotificationView, Participant, User,
};

use super::responses::{
    CampaignMemberResponse, CampaignResponse, CampaignSummaryResponse, CampaignUserResponse,
    ChatMessageResponse, ChatRoomResponse, JoinRequestResponse, MembershipResponse,
    NotificationResponse, ParticipantResponse, SessionUserResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name.clone(),
            nickname: user.nickname.clone(),
            email: user.email.clone(),
            image_url: user.image_url.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<&User> for SessionUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            nickname: user.nickname.clone(),
        }
    }
}

impl SessionUserResponse {
    /// Identity of an already-validated access token
    pub fn from_claims(user_id: i64, claims: &AccessClaims) -> Self {
        Self {
            id: user_id,
            email: claims.email.clone(),
            display_name: claims.display_name.clone(),
            nickname: claims.nickname.clone(),
        }
    }
}

// ============================================================================
// Campaign Mappers
// ============================================================================

impl From<&Campaign> for CampaignResponse {
    fn from(campaign: &Campaign) -> Self {
        Self {
            id: campaign.id,
            name: campaign.name.clone(),
            description: campaign.description.clone(),
            master_name: campaign.master_name.clone(),
            notes: campaign.notes.clone(),
            tags: campaign.tags.clone(),
            system_ref: campaign.system_ref.clone(),
            status: campaign.status.clone(),
            cover_image_url: campaign.cover_image_url.clone(),
            next_session_datetime: campaign.next_session.datetime,
            next_session_local: campaign.next_session.location.clone(),
            next_session_link: campaign.next_session.link.clone(),
            created_at: campaign.created_at,
        }
    }
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        Self::from(&campaign)
    }
}

impl From<&CampaignSummary> for CampaignSummaryResponse {
    fn from(summary: &CampaignSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name.clone(),
            description: summary.description.clone(),
            masters: summary.masters.clone(),
        }
    }
}

impl From<&Participant> for ParticipantResponse {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.user_id,
            display_name: p.display_name.clone(),
            nickname: p.nickname.clone(),
            role: p.role,
            image_url: p.image_url.clone(),
        }
    }
}

impl From<&Participant> for CampaignUserResponse {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.user_id,
            display_name: p.display_name.clone(),
            nickname: p.nickname.clone(),
            email: p.email.clone(),
        }
    }
}

impl From<&Participant> for CampaignMemberResponse {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.user_id,
            display_name: p.display_name.clone(),
            nickname: p.nickname.clone(),
            email: p.email.clone(),
            image_url: p.image_url.clone(),
            role: p.role,
        }
    }
}

// ============================================================================
// Membership Mappers
// ============================================================================

impl From<&JoinRequest> for JoinRequestResponse {
    fn from(request: &JoinRequest) -> Self {
        Self {
            id: request.id,
            campaign_id: request.campaign_id,
            user_id: request.user_id,
            message: request.message.clone(),
            status: request.status,
            created_at: request.created_at,
        }
    }
}

impl From<&Membership> for MembershipResponse {
    fn from(m: &Membership) -> Self {
        Self {
            user_id: m.user_id,
            campaign_id: m.campaign_id,
            role: m.role,
            joined_at: m.joined_at,
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&NotificationView> for NotificationResponse {
    fn from(view: &NotificationView) -> Self {
        let n = &view.notification;
        Self {
            id: n.id,
            recipient_id: n.recipient_id,
            reference_user_id: n.reference_user_id,
            campaign_id: n.campaign_id,
            kind: n.kind,
            message: n.message.clone(),
            read: n.read,
            created_at: n.created_at,
            reference_user_name: view.reference_user_name.clone(),
            reference_user_nickname: view.reference_user_nickname.clone(),
            campaign_name: view.campaign_name.clone(),
        }
    }
}

// ============================================================================
// Chat Mappers
// ============================================================================

impl From<&ChatRoom> for ChatRoomResponse {
    fn from(room: &ChatRoom) -> Self {
        Self {
            id: room.id,
            campaign_id: room.campaign_id,
            name: room.name.clone(),
            created_by: room.created_by,
            created_at: room.created_at,
        }
    }
}

impl From<&ChatMessageView> for ChatMessageResponse {
    fn from(view: &ChatMessageView) -> Self {
        Self {
            id: view.message.id,
            room_id: view.message.room_id,
            author_id: view.message.author_id,
            text: view.message.text.clone(),
            sent_at: view.message.sent_at,
            author_name: view.author_name.clone(),
            author_nickname: view.author_nickname.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rpg_core::{ChatMessage, Notification, NotificationKind};

    #[test]
    fn test_notification_projection_keys() {
        let view = NotificationView {
            notification: Notification {
                id: 9,
                recipient_id: 1,
                kind: NotificationKind::JoinRequest,
                message: "Usuário 2 quer entrar na campanha. Mensagem: oi".to_string(),
                read: false,
                created_at: Utc::now(),
                reference_user_id: Some(2),
                campaign_id: Some(5),
            },
            reference_user_name: Some("Bruno".to_string()),
            reference_user_nickname: Some("bru".to_string()),
            campaign_name: Some("Curse of Strahd".to_string()),
        };

        let json = serde_json::to_value(NotificationResponse::from(&view)).unwrap();
        assert_eq!(json["tipo"], "pedido");
        assert_eq!(json["lida"], false);
        assert_eq!(json["usuario_id_referencia"], 2);
        assert_eq!(json["usuario_nome"], "Bruno");
        assert_eq!(json["campanha_nome"], "Curse of Strahd");
    }

    #[test]
    fn test_chat_message_keys() {
        let view = ChatMessageView {
            message: ChatMessage {
                id: 1,
                room_id: 4,
                author_id: 2,
                text: "Rolando iniciativa".to_string(),
                sent_at: Utc::now(),
            },
            author_name: "Bruno".to_string(),
            author_nickname: "bru".to_string(),
        };

        let json = serde_json::to_value(ChatMessageResponse::from(&view)).unwrap();
        assert_eq!(json["sala_id"], 4);
        assert_eq!(json["mensagem"], "Rolando iniciativa");
        assert_eq!(json["apelido"], "bru");
    }

    #[test]
    fn test_participant_role_uses_wire_name() {
        let participant = Participant {
            campaign_id: 1,
            user_id: 2,
            display_name: "Bruno".to_string(),
            nickname: "bru".to_string(),
            email: "b@example.com".to_string(),
            image_url: None,
            role: rpg_core::CampaignRole::DmAssistant,
        };
        let json = serde_json::to_value(ParticipantResponse::from(&participant)).unwrap();
        assert_eq!(json["papel"], "dm-assistant");
    }
}
