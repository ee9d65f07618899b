use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use super::dto::{CreateProjectRequest, ProjectResponse, ProjectStatsResponse, UpdateProjectRequest};
use super::entity::project;
use crate::domain::task::progress::TaskCounts;
use crate::domain::workspace::entity::workspace_member;
use crate::domain::workspace::service::WorkspaceService;
use crate::global::validator::ensure_date_range;
use crate::state::AppState;
use crate::utils::error::AppError;

const PROJECT_NOT_FOUND: &str = "Project not found";

pub struct ProjectService;

impl ProjectService {
    /// 프로젝트 조회 및 워크스페이스 멤버십 확인 헬퍼
    ///
    /// 비멤버에게 프로젝트 존재 여부를 노출하지 않도록
    /// "존재하지 않음"과 "접근 권한 없음"을 동일한 404로 처리합니다.
    pub async fn find_project_for_member<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        project_id: i64,
    ) -> Result<(project::Model, workspace_member::Model), AppError> {
        let project_model = project::Entity::find_by_id(project_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::ProjectNotFound(PROJECT_NOT_FOUND.to_string()))?;

        let membership =
            WorkspaceService::find_membership(conn, project_model.workspace_id, user_id)
                .await?
                .ok_or_else(|| AppError::ProjectNotFound(PROJECT_NOT_FOUND.to_string()))?;

        Ok((project_model, membership))
    }

    /// 프로젝트/스프린트/마일스톤 관리 권한 (admin/manager)
    pub fn require_manager(membership: &workspace_member::Model) -> Result<(), AppError> {
        if membership.role.can_manage() {
            Ok(())
        } else {
            Err(AppError::WorkspaceAccessDenied(
                "Only admins and managers can perform this action.".to_string(),
            ))
        }
    }

    /// 프로젝트 생성 (admin/manager)
    pub async fn create_project(
        state: AppState,
        user_id: i64,
        req: CreateProjectRequest,
    ) -> Result<ProjectResponse, AppError> {
        let membership = WorkspaceService::require_member(&state.db, req.workspace_id, user_id).await?;
        Self::require_manager(&membership)?;
        ensure_date_range(req.start_date, req.end_date)?;

        let now = Utc::now().naive_utc();
        let created = project::ActiveModel {
            workspace_id: Set(req.workspace_id),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            status: Set(req.status.unwrap_or_default()),
            progress: Set(req.progress.unwrap_or(0)),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(
            project_id = created.project_id,
            workspace_id = created.workspace_id,
            "Project created"
        );

        Ok(created.into())
    }

    /// 프로젝트 조회
    pub async fn get_project(
        state: AppState,
        user_id: i64,
        project_id: i64,
    ) -> Result<ProjectResponse, AppError> {
        let (project_model, _) =
            Self::find_project_for_member(&state.db, user_id, project_id).await?;

        Ok(project_model.into())
    }

    /// 워크스페이스 이름으로 프로젝트 목록 조회 (최근 수정순)
    pub async fn list_by_workspace_name(
        state: AppState,
        user_id: i64,
        workspace_name: &str,
    ) -> Result<Vec<ProjectResponse>, AppError> {
        let (ws, _) =
            WorkspaceService::find_by_name_for_member(&state.db, user_id, workspace_name).await?;

        let projects = project::Entity::find()
            .filter(project::Column::WorkspaceId.eq(ws.workspace_id))
            .order_by_desc(project::Column::UpdatedAt)
            .order_by_desc(project::Column::ProjectId)
            .all(&state.db)
            .await?;

        Ok(projects.into_iter().map(ProjectResponse::from).collect())
    }

    /// 프로젝트 수정 (admin/manager)
    pub async fn update_project(
        state: AppState,
        user_id: i64,
        project_id: i64,
        req: UpdateProjectRequest,
    ) -> Result<ProjectResponse, AppError> {
        let (project_model, membership) =
            Self::find_project_for_member(&state.db, user_id, project_id).await?;
        Self::require_manager(&membership)?;

        let start_date = req.start_date.unwrap_or(project_model.start_date);
        let end_date = req.end_date.unwrap_or(project_model.end_date);
        ensure_date_range(start_date, end_date)?;

        let mut active: project::ActiveModel = project_model.into();
        if let Some(name) = req.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(description) = req.description {
            active.description = Set(description);
        }
        if let Some(status) = req.status {
            active.status = Set(status);
        }
        if let Some(progress) = req.progress {
            active.progress = Set(progress);
        }
        active.start_date = Set(start_date);
        active.end_date = Set(end_date);
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;

        Ok(updated.into())
    }

    /// 프로젝트 삭제 (admin/manager). 태스크/스프린트/마일스톤은 FK CASCADE로 삭제
    pub async fn delete_project(
        state: AppState,
        user_id: i64,
        project_id: i64,
    ) -> Result<(), AppError> {
        let (_, membership) = Self::find_project_for_member(&state.db, user_id, project_id).await?;
        Self::require_manager(&membership)?;

        project::Entity::delete_by_id(project_id)
            .exec(&state.db)
            .await?;

        info!(project_id, deleted_by = user_id, "Project deleted");

        Ok(())
    }

    /// 태스크 통계
    pub async fn get_stats(
        state: AppState,
        user_id: i64,
        project_id: i64,
    ) -> Result<ProjectStatsResponse, AppError> {
        Self::find_project_for_member(&state.db, user_id, project_id).await?;

        let counts = TaskCounts::for_project(&state.db, project_id).await?;

        Ok(ProjectStatsResponse {
            project_id,
            total_tasks: counts.total(),
            todo: counts.todo,
            in_progress: counts.in_progress,
            done: counts.done,
            archived: counts.archived,
            completion_percentage: counts.completion_percentage(),
        })
    }

    /// 태스크 완료율로 progress 재계산
    pub async fn recalculate_progress<C: ConnectionTrait>(
        conn: &C,
        project_id: i64,
    ) -> Result<i32, AppError> {
        let progress = TaskCounts::for_project(conn, project_id)
            .await?
            .completion_percentage();

        project::Entity::update_many()
            .col_expr(project::Column::Progress, Expr::value(progress))
            .filter(project::Column::ProjectId.eq(project_id))
            .exec(conn)
            .await?;

        Ok(progress)
    }
}
