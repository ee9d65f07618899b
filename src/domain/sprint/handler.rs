use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use super::dto::{CreateSprintRequest, SprintDetailResponse, SprintResponse, UpdateSprintRequest};
use super::service::SprintService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::BaseResponse;

/// 스프린트 생성 API (admin/manager)
///
/// `taskIds`로 전달한 태스크를 새 스프린트로 옮깁니다. 종료일은 시작일보다 빠를 수 없습니다.
#[utoipa::path(
    post,
    path = "/api/sprints/create",
    request_body = CreateSprintRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "생성 성공", body = SprintResponse),
        (status = 400, description = "잘못된 요청 또는 날짜 범위 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "Sprint"
)]
pub async fn create_sprint(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateSprintRequest>,
) -> Result<Json<BaseResponse<SprintResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = SprintService::create_sprint(state, user_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 스프린트 상세 조회 API
#[utoipa::path(
    get,
    path = "/api/sprints/{sprint_id}",
    params(("sprint_id" = i64, Path, description = "스프린트 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = SprintDetailResponse),
        (status = 404, description = "Sprint not found", body = ErrorResponse)
    ),
    tag = "Sprint"
)]
pub async fn get_sprint(
    State(state): State<AppState>,
    user: AuthUser,
    Path(sprint_id): Path<i64>,
) -> Result<Json<BaseResponse<SprintDetailResponse>>, AppError> {
    let user_id = user.user_id()?;
    let result = SprintService::get_sprint(state, user_id, sprint_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 프로젝트 스프린트 목록 API
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/sprints",
    params(("project_id" = i64, Path, description = "프로젝트 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [SprintResponse]),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "Sprint"
)]
pub async fn list_project_sprints(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<SprintResponse>>>, AppError> {
    let user_id = user.user_id()?;
    let result = SprintService::list_project_sprints(state, user_id, project_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 스프린트 수정 API (admin/manager)
#[utoipa::path(
    patch,
    path = "/api/sprints/{sprint_id}",
    params(("sprint_id" = i64, Path, description = "스프린트 ID")),
    request_body = UpdateSprintRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = SprintResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "Sprint not found", body = ErrorResponse)
    ),
    tag = "Sprint"
)]
pub async fn update_sprint(
    State(state): State<AppState>,
    user: AuthUser,
    Path(sprint_id): Path<i64>,
    AppJson(req): AppJson<UpdateSprintRequest>,
) -> Result<Json<BaseResponse<SprintResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = SprintService::update_sprint(state, user_id, sprint_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 스프린트 삭제 API (admin/manager). 태스크는 스프린트에서 분리만 됩니다.
#[utoipa::path(
    delete,
    path = "/api/sprints/{sprint_id}",
    params(("sprint_id" = i64, Path, description = "스프린트 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "Sprint not found", body = ErrorResponse)
    ),
    tag = "Sprint"
)]
pub async fn delete_sprint(
    State(state): State<AppState>,
    user: AuthUser,
    Path(sprint_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let user_id = user.user_id()?;
    SprintService::delete_sprint(state, user_id, sprint_id).await?;

    Ok(Json(BaseResponse::empty("Sprint deleted")))
}
