use chrono::Utc;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{info, warn};

use super::dto::{
    AddDependencyRequest, CreateMilestoneRequest, MilestoneResponse, UpdateMilestoneRequest,
};
use super::entity::{milestone, milestone_dependency};
use super::graph::would_create_cycle;
use crate::domain::activity::service::{actions, ActivityService, NewActivity};
use crate::domain::project::service::ProjectService;
use crate::domain::workspace::entity::workspace_member;
use crate::state::AppState;
use crate::utils::error::AppError;

const MILESTONE_NOT_FOUND: &str = "Milestone not found";

pub struct MilestoneService;

impl MilestoneService {
    async fn find_milestone_for_member<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        milestone_id: i64,
    ) -> Result<(milestone::Model, workspace_member::Model), AppError> {
        let milestone_model = milestone::Entity::find_by_id(milestone_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::MilestoneNotFound(MILESTONE_NOT_FOUND.to_string()))?;

        let (_, membership) =
            ProjectService::find_project_for_member(conn, user_id, milestone_model.project_id)
                .await
                .map_err(|e| match e {
                    AppError::ProjectNotFound(_) => {
                        AppError::MilestoneNotFound(MILESTONE_NOT_FOUND.to_string())
                    }
                    other => other,
                })?;

        Ok((milestone_model, membership))
    }

    /// 마일스톤 생성 (admin/manager)
    pub async fn create_milestone(
        state: AppState,
        user_id: i64,
        req: CreateMilestoneRequest,
    ) -> Result<MilestoneResponse, AppError> {
        let (project_model, membership) =
            ProjectService::find_project_for_member(&state.db, user_id, req.project_id).await?;
        ProjectService::require_manager(&membership)?;

        let txn = state.db.begin().await?;
        let now = Utc::now().naive_utc();

        let created = milestone::ActiveModel {
            project_id: Set(project_model.project_id),
            owner_id: Set(user_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            due_date: Set(req.due_date),
            status: Set(req.status.unwrap_or_default()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        ActivityService::record(
            &txn,
            NewActivity {
                project_id: created.project_id,
                task_id: None,
                user_id,
                action: actions::MILESTONE_CREATED,
                description: format!("Created milestone '{}'", created.title),
            },
        )
        .await?;

        txn.commit().await?;

        info!(
            milestone_id = created.milestone_id,
            project_id = created.project_id,
            "Milestone created"
        );

        Ok(created.into())
    }

    pub async fn get_milestone(
        state: AppState,
        user_id: i64,
        milestone_id: i64,
    ) -> Result<MilestoneResponse, AppError> {
        let (milestone_model, _) =
            Self::find_milestone_for_member(&state.db, user_id, milestone_id).await?;

        Ok(milestone_model.into())
    }

    /// 프로젝트 마일스톤 목록 (마감일순, 마감일 없는 항목은 뒤로)
    pub async fn list_project_milestones(
        state: AppState,
        user_id: i64,
        project_id: i64,
    ) -> Result<Vec<MilestoneResponse>, AppError> {
        ProjectService::find_project_for_member(&state.db, user_id, project_id).await?;

        let mut milestones = milestone::Entity::find()
            .filter(milestone::Column::ProjectId.eq(project_id))
            .order_by_asc(milestone::Column::MilestoneId)
            .all(&state.db)
            .await?;

        milestones.sort_by_key(|m| (m.due_date.is_none(), m.due_date, m.milestone_id));

        Ok(milestones.into_iter().map(MilestoneResponse::from).collect())
    }

    /// 마일스톤 수정 (admin/manager)
    pub async fn update_milestone(
        state: AppState,
        user_id: i64,
        milestone_id: i64,
        req: UpdateMilestoneRequest,
    ) -> Result<MilestoneResponse, AppError> {
        let (milestone_model, membership) =
            Self::find_milestone_for_member(&state.db, user_id, milestone_id).await?;
        ProjectService::require_manager(&membership)?;

        let old_status = milestone_model.status;
        let mut active: milestone::ActiveModel = milestone_model.into();

        if let Some(title) = req.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
        }
        if let Some(due_date) = req.due_date {
            active.due_date = Set(Some(due_date));
        }
        if let Some(status) = req.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let txn = state.db.begin().await?;
        let updated = active.update(&txn).await?;

        if updated.status != old_status {
            ActivityService::record(
                &txn,
                NewActivity {
                    project_id: updated.project_id,
                    task_id: None,
                    user_id,
                    action: actions::MILESTONE_STATUS_CHANGED,
                    description: format!(
                        "Changed status of milestone '{}' from {} to {}",
                        updated.title,
                        old_status.to_value(),
                        updated.status.to_value()
                    ),
                },
            )
            .await?;
        }

        txn.commit().await?;

        Ok(updated.into())
    }

    /// 마일스톤 삭제. 양방향 의존성 행은 FK CASCADE로 삭제
    pub async fn delete_milestone(
        state: AppState,
        user_id: i64,
        milestone_id: i64,
    ) -> Result<(), AppError> {
        let (_, membership) =
            Self::find_milestone_for_member(&state.db, user_id, milestone_id).await?;
        ProjectService::require_manager(&membership)?;

        milestone::Entity::delete_by_id(milestone_id)
            .exec(&state.db)
            .await?;

        info!(milestone_id, deleted_by = user_id, "Milestone deleted");

        Ok(())
    }

    /// 의존성 추가
    ///
    /// - 같은 프로젝트의 마일스톤끼리만 연결
    /// - 자기 자신, 중복(409), 순환은 거부
    pub async fn add_dependency(
        state: AppState,
        user_id: i64,
        milestone_id: i64,
        req: AddDependencyRequest,
    ) -> Result<Vec<MilestoneResponse>, AppError> {
        let (milestone_model, membership) =
            Self::find_milestone_for_member(&state.db, user_id, milestone_id).await?;
        ProjectService::require_manager(&membership)?;

        if req.depends_on_id == milestone_id {
            return Err(AppError::DependencyCycle(
                "A milestone cannot depend on itself.".to_string(),
            ));
        }

        let prerequisite = milestone::Entity::find_by_id(req.depends_on_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::MilestoneNotFound(MILESTONE_NOT_FOUND.to_string()))?;

        if prerequisite.project_id != milestone_model.project_id {
            return Err(AppError::bad_request(
                "Milestones must belong to the same project.",
            ));
        }

        let project_milestone_ids: Vec<i64> = milestone::Entity::find()
            .select_only()
            .column(milestone::Column::MilestoneId)
            .filter(milestone::Column::ProjectId.eq(milestone_model.project_id))
            .into_tuple()
            .all(&state.db)
            .await?;

        let edges: Vec<(i64, i64)> = milestone_dependency::Entity::find()
            .select_only()
            .column(milestone_dependency::Column::MilestoneId)
            .column(milestone_dependency::Column::DependsOnId)
            .filter(milestone_dependency::Column::MilestoneId.is_in(project_milestone_ids))
            .into_tuple()
            .all(&state.db)
            .await?;

        if edges.contains(&(milestone_id, req.depends_on_id)) {
            return Err(AppError::conflict("This dependency already exists."));
        }

        if would_create_cycle(&edges, milestone_id, req.depends_on_id) {
            warn!(
                milestone_id,
                depends_on_id = req.depends_on_id,
                "Rejected cyclic milestone dependency"
            );
            return Err(AppError::DependencyCycle(
                "Adding this dependency would create a cycle.".to_string(),
            ));
        }

        milestone_dependency::ActiveModel {
            milestone_id: Set(milestone_id),
            depends_on_id: Set(req.depends_on_id),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        Self::load_dependencies(&state.db, milestone_id).await
    }

    /// 의존성 제거
    pub async fn remove_dependency(
        state: AppState,
        user_id: i64,
        milestone_id: i64,
        depends_on_id: i64,
    ) -> Result<(), AppError> {
        let (_, membership) =
            Self::find_milestone_for_member(&state.db, user_id, milestone_id).await?;
        ProjectService::require_manager(&membership)?;

        let result = milestone_dependency::Entity::delete_many()
            .filter(milestone_dependency::Column::MilestoneId.eq(milestone_id))
            .filter(milestone_dependency::Column::DependsOnId.eq(depends_on_id))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::MilestoneNotFound(
                "Dependency not found".to_string(),
            ));
        }

        Ok(())
    }

    /// 직접 선행 마일스톤 목록
    pub async fn list_dependencies(
        state: AppState,
        user_id: i64,
        milestone_id: i64,
    ) -> Result<Vec<MilestoneResponse>, AppError> {
        Self::find_milestone_for_member(&state.db, user_id, milestone_id).await?;

        Self::load_dependencies(&state.db, milestone_id).await
    }

    async fn load_dependencies<C: ConnectionTrait>(
        conn: &C,
        milestone_id: i64,
    ) -> Result<Vec<MilestoneResponse>, AppError> {
        let prerequisite_ids: Vec<i64> = milestone_dependency::Entity::find()
            .select_only()
            .column(milestone_dependency::Column::DependsOnId)
            .filter(milestone_dependency::Column::MilestoneId.eq(milestone_id))
            .into_tuple()
            .all(conn)
            .await?;

        if prerequisite_ids.is_empty() {
            return Ok(Vec::new());
        }

        let prerequisites = milestone::Entity::find()
            .filter(milestone::Column::MilestoneId.is_in(prerequisite_ids))
            .order_by_asc(milestone::Column::MilestoneId)
            .all(conn)
            .await?;

        Ok(prerequisites.into_iter().map(MilestoneResponse::from).collect())
    }
}
