use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{MarkAllReadResponse, NotificationQueryParams, NotificationResponse};
use super::service::NotificationService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::extract::AppQuery;
use crate::utils::BaseResponse;

/// 내 알림 목록 API
#[utoipa::path(
    get,
    path = "/api/notifications",
    params(NotificationQueryParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [NotificationResponse]),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Notification"
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<NotificationQueryParams>,
) -> Result<Json<BaseResponse<Vec<NotificationResponse>>>, AppError> {
    let user_id = user.user_id()?;
    let result = NotificationService::list_for_user(state, user_id, params.unread_only).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 알림 읽음 처리 API
#[utoipa::path(
    patch,
    path = "/api/notifications/{notification_id}/read",
    params(("notification_id" = i64, Path, description = "알림 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "처리 성공", body = NotificationResponse),
        (status = 404, description = "존재하지 않는 알림", body = ErrorResponse)
    ),
    tag = "Notification"
)]
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(notification_id): Path<i64>,
) -> Result<Json<BaseResponse<NotificationResponse>>, AppError> {
    let user_id = user.user_id()?;
    let result = NotificationService::mark_read(state, user_id, notification_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 알림 모두 읽음 처리 API
#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "처리 성공", body = MarkAllReadResponse)
    ),
    tag = "Notification"
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<MarkAllReadResponse>>, AppError> {
    let user_id = user.user_id()?;
    let result = NotificationService::mark_all_read(state, user_id).await?;

    Ok(Json(BaseResponse::success(result)))
}
