use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::user::{self, UserRole};
use crate::global::validator::not_blank;

/// 사용자 생성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email(message = "A valid email address is required."))]
    pub email: String,

    #[validate(
        length(min = 1, max = 50, message = "Name must be 1-50 characters."),
        custom(function = "not_blank")
    )]
    pub name: String,

    /// 생략 시 member
    pub role: Option<UserRole>,

    #[validate(url(message = "Avatar must be a valid URL."))]
    pub avatar_url: Option<String>,
}

/// 사용자 프로필 응답
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            user_id: model.user_id,
            email: model.email,
            name: model.name,
            role: model.role,
            avatar_url: model.avatar_url,
            created_at: model.created_at,
        }
    }
}
