use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use super::dto::{CreateUserRequest, UserResponse};
use super::service::UserService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::BaseResponse;

/// 사용자 생성 API
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "사용자 생성 성공", body = UserResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 409, description = "이메일 중복", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    req.validate()?;

    let result = UserService::create_user(state, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 로그인된 사용자 프로필 조회 API
#[utoipa::path(
    get,
    path = "/api/users/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "프로필 조회 성공", body = UserResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    let user_id = user.user_id()?;
    let result = UserService::get_user(&state, user_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 사용자 조회 API
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(("user_id" = i64, Path, description = "사용자 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = UserResponse),
        (status = 404, description = "존재하지 않는 사용자", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    let result = UserService::get_user(&state, user_id).await?;

    Ok(Json(BaseResponse::success(result)))
}
