//! Chat model -> entity mappers

use rpg_core::{ChatMessage, ChatMessageView, ChatRoom};

use crate::models::{ChatMessageModel, ChatRoomModel};

impl From<ChatRoomModel> for ChatRoom {
    fn from(model: ChatRoomModel) -> Self {
        ChatRoom {
            id: model.id,
            campaign_id: model.campaign_id,
            name: model.name,
            created_by: model.created_by,
            created_at: model.created_at,
        }
    }
}

impl From<ChatMessageModel> for ChatMessageView {
    fn from(model: ChatMessageModel) -> Self {
        ChatMessageView {
            message: ChatMessage {
                id: model.id,
                room_id: model.room_id,
                author_id: model.author_id,
                text: model.text,
                sent_at: model.sent_at,
            },
            author_name: model.author_name,
            author_nickname: model.author_nickname,
        }
    }
}
