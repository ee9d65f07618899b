use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use super::dto::{
    AddMemberRequest, CreateWorkspaceRequest, WorkspaceMemberResponse, WorkspaceResponse,
};
use super::service::WorkspaceService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::BaseResponse;

/// 워크스페이스 생성 API
///
/// 생성자를 admin 멤버로 등록합니다.
#[utoipa::path(
    post,
    path = "/api/workspaces",
    request_body = CreateWorkspaceRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "생성 성공", body = WorkspaceResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 409, description = "이름 중복", body = ErrorResponse)
    ),
    tag = "Workspace"
)]
pub async fn create_workspace(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateWorkspaceRequest>,
) -> Result<Json<BaseResponse<WorkspaceResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = WorkspaceService::create_workspace(state, user_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 내 워크스페이스 목록 API
#[utoipa::path(
    get,
    path = "/api/workspaces",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [WorkspaceResponse]),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Workspace"
)]
pub async fn list_my_workspaces(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<Vec<WorkspaceResponse>>>, AppError> {
    let user_id = user.user_id()?;
    let result = WorkspaceService::list_my_workspaces(state, user_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 워크스페이스 조회 API
#[utoipa::path(
    get,
    path = "/api/workspaces/{workspace_id}",
    params(("workspace_id" = i64, Path, description = "워크스페이스 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = WorkspaceResponse),
        (status = 404, description = "존재하지 않거나 멤버가 아님", body = ErrorResponse)
    ),
    tag = "Workspace"
)]
pub async fn get_workspace(
    State(state): State<AppState>,
    user: AuthUser,
    Path(workspace_id): Path<i64>,
) -> Result<Json<BaseResponse<WorkspaceResponse>>, AppError> {
    let user_id = user.user_id()?;
    let result = WorkspaceService::get_workspace(state, user_id, workspace_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 워크스페이스 이름으로 조회 API
#[utoipa::path(
    get,
    path = "/api/workspaces/by-name/{name}",
    params(("name" = String, Path, description = "워크스페이스 이름")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = WorkspaceResponse),
        (status = 404, description = "존재하지 않거나 멤버가 아님", body = ErrorResponse)
    ),
    tag = "Workspace"
)]
pub async fn get_workspace_by_name(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
) -> Result<Json<BaseResponse<WorkspaceResponse>>, AppError> {
    let user_id = user.user_id()?;
    let result = WorkspaceService::get_workspace_by_name(state, user_id, &name).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 워크스페이스 삭제 API (admin)
#[utoipa::path(
    delete,
    path = "/api/workspaces/{workspace_id}",
    params(("workspace_id" = i64, Path, description = "워크스페이스 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "존재하지 않거나 멤버가 아님", body = ErrorResponse)
    ),
    tag = "Workspace"
)]
pub async fn delete_workspace(
    State(state): State<AppState>,
    user: AuthUser,
    Path(workspace_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let user_id = user.user_id()?;
    WorkspaceService::delete_workspace(state, user_id, workspace_id).await?;

    Ok(Json(BaseResponse::empty("Workspace deleted")))
}

/// 멤버 목록 API
#[utoipa::path(
    get,
    path = "/api/workspaces/{workspace_id}/members",
    params(("workspace_id" = i64, Path, description = "워크스페이스 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [WorkspaceMemberResponse]),
        (status = 404, description = "존재하지 않거나 멤버가 아님", body = ErrorResponse)
    ),
    tag = "Workspace"
)]
pub async fn list_members(
    State(state): State<AppState>,
    user: AuthUser,
    Path(workspace_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<WorkspaceMemberResponse>>>, AppError> {
    let user_id = user.user_id()?;
    let result = WorkspaceService::list_members(state, user_id, workspace_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 멤버 추가 API (admin/manager)
#[utoipa::path(
    post,
    path = "/api/workspaces/{workspace_id}/members",
    params(("workspace_id" = i64, Path, description = "워크스페이스 ID")),
    request_body = AddMemberRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "추가 성공", body = WorkspaceMemberResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 409, description = "이미 멤버", body = ErrorResponse)
    ),
    tag = "Workspace"
)]
pub async fn add_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path(workspace_id): Path<i64>,
    AppJson(req): AppJson<AddMemberRequest>,
) -> Result<Json<BaseResponse<WorkspaceMemberResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = WorkspaceService::add_member(state, user_id, workspace_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 멤버 제거 API
#[utoipa::path(
    delete,
    path = "/api/workspaces/{workspace_id}/members/{user_id}",
    params(
        ("workspace_id" = i64, Path, description = "워크스페이스 ID"),
        ("user_id" = i64, Path, description = "제거할 사용자 ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "제거 성공"),
        (status = 400, description = "마지막 admin", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Workspace"
)]
pub async fn remove_member(
    State(state): State<AppState>,
    user: AuthUser,
    Path((workspace_id, target_user_id)): Path<(i64, i64)>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let user_id = user.user_id()?;
    WorkspaceService::remove_member(state, user_id, workspace_id, target_user_id).await?;

    Ok(Json(BaseResponse::empty("Member removed")))
}
