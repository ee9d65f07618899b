use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::info;

use super::dto::{CreateUserRequest, UserResponse};
use super::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct UserService;

impl UserService {
    /// 사용자 생성
    ///
    /// 이메일은 대소문자 구분 없이 유니크하도록 소문자로 저장합니다.
    pub async fn create_user(
        state: AppState,
        req: CreateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let email = req.email.trim().to_lowercase();

        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(email.as_str()))
            .one(&state.db)
            .await?;

        if existing.is_some() {
            return Err(AppError::conflict("A user with this email already exists."));
        }

        let now = Utc::now().naive_utc();
        let model = user::ActiveModel {
            email: Set(email),
            name: Set(req.name.trim().to_string()),
            role: Set(req.role.unwrap_or_default()),
            avatar_url: Set(req.avatar_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(user_id = model.user_id, "User created");

        Ok(model.into())
    }

    /// 사용자 조회
    pub async fn get_user(state: &AppState, user_id: i64) -> Result<UserResponse, AppError> {
        user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::UserNotFound("User not found".to_string()))
    }
}
