//! User model -> entity mapper

use rpg_core::User;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            display_name: model.display_name,
            nickname: model.nickname,
            email: model.email,
            image_url: model.image_url,
            created_at: model.created_at,
        }
    }
}
