use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{ActivityQueryParams, ActivityResponse};
use super::service::ActivityService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::extract::AppQuery;
use crate::utils::BaseResponse;

/// 프로젝트 활동 로그 조회 API
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/activities",
    params(
        ("project_id" = i64, Path, description = "프로젝트 ID"),
        ActivityQueryParams
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [ActivityResponse]),
        (status = 404, description = "존재하지 않는 프로젝트", body = ErrorResponse)
    ),
    tag = "Activity"
)]
pub async fn list_project_activities(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<i64>,
    AppQuery(params): AppQuery<ActivityQueryParams>,
) -> Result<Json<BaseResponse<Vec<ActivityResponse>>>, AppError> {
    let user_id = user.user_id()?;
    let result =
        ActivityService::list_for_project(state, user_id, project_id, params.effective_limit())
            .await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 태스크 활동 로그 조회 API
#[utoipa::path(
    get,
    path = "/api/tasks/{task_id}/activities",
    params(("task_id" = i64, Path, description = "태스크 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [ActivityResponse]),
        (status = 404, description = "존재하지 않는 태스크", body = ErrorResponse)
    ),
    tag = "Activity"
)]
pub async fn list_task_activities(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<ActivityResponse>>>, AppError> {
    let user_id = user.user_id()?;
    let result = ActivityService::list_for_task(state, user_id, task_id).await?;

    Ok(Json(BaseResponse::success(result)))
}
