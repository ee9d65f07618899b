use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use super::dto::{AddTagRequest, CreateTaskRequest, TaskListQuery, TaskResponse, UpdateTaskRequest};
use super::service::TaskService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::extract::{AppJson, AppQuery};
use crate::utils::BaseResponse;

/// 태스크 생성 API (member 이상)
///
/// 담당자가 지정되면 담당자에게 알림을 보내고 프로젝트/스프린트 진행률을 갱신합니다.
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "생성 성공", body = TaskResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 403, description = "guest는 작성 불가", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "Task"
)]
pub async fn create_task(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateTaskRequest>,
) -> Result<Json<BaseResponse<TaskResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = TaskService::create_task(state, user_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 태스크 조회 API
#[utoipa::path(
    get,
    path = "/api/tasks/{task_id}",
    params(("task_id" = i64, Path, description = "태스크 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = TaskResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    tag = "Task"
)]
pub async fn get_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<i64>,
) -> Result<Json<BaseResponse<TaskResponse>>, AppError> {
    let user_id = user.user_id()?;
    let result = TaskService::get_task(state, user_id, task_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 프로젝트 태스크 목록 API
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/tasks",
    params(
        ("project_id" = i64, Path, description = "프로젝트 ID"),
        TaskListQuery
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [TaskResponse]),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "Task"
)]
pub async fn list_project_tasks(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<i64>,
    AppQuery(query): AppQuery<TaskListQuery>,
) -> Result<Json<BaseResponse<Vec<TaskResponse>>>, AppError> {
    let user_id = user.user_id()?;
    let result = TaskService::list_project_tasks(state, user_id, project_id, query).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 태스크 수정 API
#[utoipa::path(
    patch,
    path = "/api/tasks/{task_id}",
    params(("task_id" = i64, Path, description = "태스크 ID")),
    request_body = UpdateTaskRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = TaskResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 403, description = "guest는 수정 불가", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    tag = "Task"
)]
pub async fn update_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<i64>,
    AppJson(req): AppJson<UpdateTaskRequest>,
) -> Result<Json<BaseResponse<TaskResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = TaskService::update_task(state, user_id, task_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 태스크 삭제 API
#[utoipa::path(
    delete,
    path = "/api/tasks/{task_id}",
    params(("task_id" = i64, Path, description = "태스크 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "guest는 삭제 불가", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    tag = "Task"
)]
pub async fn delete_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let user_id = user.user_id()?;
    TaskService::delete_task(state, user_id, task_id).await?;

    Ok(Json(BaseResponse::empty("Task deleted")))
}

/// 태그 추가 API
#[utoipa::path(
    post,
    path = "/api/tasks/{task_id}/tags",
    params(("task_id" = i64, Path, description = "태스크 ID")),
    request_body = AddTagRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "추가 성공", body = TaskResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 409, description = "이미 있는 태그", body = ErrorResponse)
    ),
    tag = "Task"
)]
pub async fn add_tag(
    State(state): State<AppState>,
    user: AuthUser,
    Path(task_id): Path<i64>,
    AppJson(req): AppJson<AddTagRequest>,
) -> Result<Json<BaseResponse<TaskResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = TaskService::add_tag(state, user_id, task_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 태그 제거 API
#[utoipa::path(
    delete,
    path = "/api/tasks/{task_id}/tags/{name}",
    params(
        ("task_id" = i64, Path, description = "태스크 ID"),
        ("name" = String, Path, description = "태그 이름")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "제거 성공", body = TaskResponse),
        (status = 404, description = "태스크 또는 태그 없음", body = ErrorResponse)
    ),
    tag = "Task"
)]
pub async fn remove_tag(
    State(state): State<AppState>,
    user: AuthUser,
    Path((task_id, name)): Path<(i64, String)>,
) -> Result<Json<BaseResponse<TaskResponse>>, AppError> {
    let user_id = user.user_id()?;
    let result = TaskService::remove_tag(state, user_id, task_id, &name).await?;

    Ok(Json(BaseResponse::success(result)))
}
