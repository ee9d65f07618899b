use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use super::dto::{CreateProjectRequest, ProjectResponse, ProjectStatsResponse, UpdateProjectRequest};
use super::service::ProjectService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::BaseResponse;

/// 프로젝트 생성 API (admin/manager)
///
/// status를 생략하면 active, progress를 생략하면 0으로 생성됩니다.
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "생성 성공", body = ProjectResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "워크스페이스 없음", body = ErrorResponse)
    ),
    tag = "Project"
)]
pub async fn create_project(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateProjectRequest>,
) -> Result<Json<BaseResponse<ProjectResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = ProjectService::create_project(state, user_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 프로젝트 조회 API
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}",
    params(("project_id" = i64, Path, description = "프로젝트 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = ProjectResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "Project"
)]
pub async fn get_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<i64>,
) -> Result<Json<BaseResponse<ProjectResponse>>, AppError> {
    let user_id = user.user_id()?;
    let result = ProjectService::get_project(state, user_id, project_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 워크스페이스 프로젝트 목록 API
#[utoipa::path(
    get,
    path = "/api/projects/workspace/{name}",
    params(("name" = String, Path, description = "워크스페이스 이름")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [ProjectResponse]),
        (status = 404, description = "존재하지 않거나 멤버가 아님", body = ErrorResponse)
    ),
    tag = "Project"
)]
pub async fn list_workspace_projects(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
) -> Result<Json<BaseResponse<Vec<ProjectResponse>>>, AppError> {
    let user_id = user.user_id()?;
    let result = ProjectService::list_by_workspace_name(state, user_id, &name).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 프로젝트 수정 API (admin/manager)
#[utoipa::path(
    patch,
    path = "/api/projects/{project_id}",
    params(("project_id" = i64, Path, description = "프로젝트 ID")),
    request_body = UpdateProjectRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = ProjectResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "Project"
)]
pub async fn update_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<i64>,
    AppJson(req): AppJson<UpdateProjectRequest>,
) -> Result<Json<BaseResponse<ProjectResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = ProjectService::update_project(state, user_id, project_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 프로젝트 삭제 API (admin/manager)
#[utoipa::path(
    delete,
    path = "/api/projects/{project_id}",
    params(("project_id" = i64, Path, description = "프로젝트 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "Project"
)]
pub async fn delete_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let user_id = user.user_id()?;
    ProjectService::delete_project(state, user_id, project_id).await?;

    Ok(Json(BaseResponse::empty("Project deleted")))
}

/// 프로젝트 태스크 통계 API
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/stats",
    params(("project_id" = i64, Path, description = "프로젝트 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = ProjectStatsResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "Project"
)]
pub async fn get_project_stats(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<i64>,
) -> Result<Json<BaseResponse<ProjectStatsResponse>>, AppError> {
    let user_id = user.user_id()?;
    let result = ProjectService::get_stats(state, user_id, project_id).await?;

    Ok(Json(BaseResponse::success(result)))
}
