use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use super::dto::{
    AddDependencyRequest, CreateMilestoneRequest, MilestoneResponse, UpdateMilestoneRequest,
};
use super::service::MilestoneService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::BaseResponse;

/// 마일스톤 생성 API (admin/manager)
#[utoipa::path(
    post,
    path = "/api/milestones",
    request_body = CreateMilestoneRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "생성 성공", body = MilestoneResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "Milestone"
)]
pub async fn create_milestone(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateMilestoneRequest>,
) -> Result<Json<BaseResponse<MilestoneResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = MilestoneService::create_milestone(state, user_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 마일스톤 조회 API
#[utoipa::path(
    get,
    path = "/api/milestones/{milestone_id}",
    params(("milestone_id" = i64, Path, description = "마일스톤 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = MilestoneResponse),
        (status = 404, description = "Milestone not found", body = ErrorResponse)
    ),
    tag = "Milestone"
)]
pub async fn get_milestone(
    State(state): State<AppState>,
    user: AuthUser,
    Path(milestone_id): Path<i64>,
) -> Result<Json<BaseResponse<MilestoneResponse>>, AppError> {
    let user_id = user.user_id()?;
    let result = MilestoneService::get_milestone(state, user_id, milestone_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 프로젝트 마일스톤 목록 API
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/milestones",
    params(("project_id" = i64, Path, description = "프로젝트 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [MilestoneResponse]),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "Milestone"
)]
pub async fn list_project_milestones(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<MilestoneResponse>>>, AppError> {
    let user_id = user.user_id()?;
    let result = MilestoneService::list_project_milestones(state, user_id, project_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 마일스톤 수정 API (admin/manager)
#[utoipa::path(
    patch,
    path = "/api/milestones/{milestone_id}",
    params(("milestone_id" = i64, Path, description = "마일스톤 ID")),
    request_body = UpdateMilestoneRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = MilestoneResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "Milestone not found", body = ErrorResponse)
    ),
    tag = "Milestone"
)]
pub async fn update_milestone(
    State(state): State<AppState>,
    user: AuthUser,
    Path(milestone_id): Path<i64>,
    AppJson(req): AppJson<UpdateMilestoneRequest>,
) -> Result<Json<BaseResponse<MilestoneResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = MilestoneService::update_milestone(state, user_id, milestone_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 마일스톤 삭제 API (admin/manager)
#[utoipa::path(
    delete,
    path = "/api/milestones/{milestone_id}",
    params(("milestone_id" = i64, Path, description = "마일스톤 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "Milestone not found", body = ErrorResponse)
    ),
    tag = "Milestone"
)]
pub async fn delete_milestone(
    State(state): State<AppState>,
    user: AuthUser,
    Path(milestone_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let user_id = user.user_id()?;
    MilestoneService::delete_milestone(state, user_id, milestone_id).await?;

    Ok(Json(BaseResponse::empty("Milestone deleted")))
}

/// 선행 마일스톤 목록 API
#[utoipa::path(
    get,
    path = "/api/milestones/{milestone_id}/dependencies",
    params(("milestone_id" = i64, Path, description = "마일스톤 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [MilestoneResponse]),
        (status = 404, description = "Milestone not found", body = ErrorResponse)
    ),
    tag = "Milestone"
)]
pub async fn list_dependencies(
    State(state): State<AppState>,
    user: AuthUser,
    Path(milestone_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<MilestoneResponse>>>, AppError> {
    let user_id = user.user_id()?;
    let result = MilestoneService::list_dependencies(state, user_id, milestone_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 의존성 추가 API (admin/manager)
///
/// 같은 프로젝트의 마일스톤만 연결할 수 있고, 순환이 생기면 400을 반환합니다.
#[utoipa::path(
    post,
    path = "/api/milestones/{milestone_id}/dependencies",
    params(("milestone_id" = i64, Path, description = "마일스톤 ID")),
    request_body = AddDependencyRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "추가 성공 (갱신된 선행 목록)", body = [MilestoneResponse]),
        (status = 400, description = "자기 자신/순환/다른 프로젝트", body = ErrorResponse),
        (status = 404, description = "Milestone not found", body = ErrorResponse),
        (status = 409, description = "이미 존재하는 의존성", body = ErrorResponse)
    ),
    tag = "Milestone"
)]
pub async fn add_dependency(
    State(state): State<AppState>,
    user: AuthUser,
    Path(milestone_id): Path<i64>,
    AppJson(req): AppJson<AddDependencyRequest>,
) -> Result<Json<BaseResponse<Vec<MilestoneResponse>>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = MilestoneService::add_dependency(state, user_id, milestone_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 의존성 제거 API (admin/manager)
#[utoipa::path(
    delete,
    path = "/api/milestones/{milestone_id}/dependencies/{depends_on_id}",
    params(
        ("milestone_id" = i64, Path, description = "마일스톤 ID"),
        ("depends_on_id" = i64, Path, description = "선행 마일스톤 ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "제거 성공"),
        (status = 404, description = "마일스톤 또는 의존성 없음", body = ErrorResponse)
    ),
    tag = "Milestone"
)]
pub async fn remove_dependency(
    State(state): State<AppState>,
    user: AuthUser,
    Path((milestone_id, depends_on_id)): Path<(i64, i64)>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let user_id = user.user_id()?;
    MilestoneService::remove_dependency(state, user_id, milestone_id, depends_on_id).await?;

    Ok(Json(BaseResponse::empty("Dependency removed")))
}
