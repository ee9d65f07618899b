use axum::{
    async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts,
};

use sea_orm::EntityTrait;

use crate::domain::user::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_access_token, Claims};

/// 인증된 사용자 정보를 담는 Extractor
///
/// 서명이 유효해도 `sub`에 해당하는 사용자가 없으면 401을 반환합니다.
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// JWT Claims에서 사용자 ID를 추출합니다.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid user id in token".to_string()))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

        let auth_header_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Malformed authorization header".to_string()))?;

        let token = auth_header_str
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Bearer token required".to_string()))?;

        let claims = decode_access_token(token, &state.config.jwt_secret)?;
        let auth_user = AuthUser(claims);

        let user_id = auth_user.user_id()?;
        if user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .is_none()
        {
            return Err(AppError::Unauthorized(
                "User for this token no longer exists".to_string(),
            ));
        }

        Ok(auth_user)
    }
}
