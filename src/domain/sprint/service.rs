use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::dto::{CreateSprintRequest, SprintDetailResponse, SprintResponse, UpdateSprintRequest};
use super::entity::sprint;
use crate::domain::activity::service::{actions, ActivityService, NewActivity};
use crate::domain::project::service::ProjectService;
use crate::domain::task::entity::task;
use crate::domain::task::progress::TaskCounts;
use crate::domain::task::service::TaskService;
use crate::domain::workspace::entity::workspace_member;
use crate::global::validator::ensure_date_range;
use crate::state::AppState;
use crate::utils::error::AppError;

const SPRINT_NOT_FOUND: &str = "Sprint not found";

pub struct SprintService;

impl SprintService {
    /// 스프린트 조회 및 멤버십 확인. 비멤버는 404
    async fn find_sprint_for_member<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        sprint_id: i64,
    ) -> Result<(sprint::Model, workspace_member::Model), AppError> {
        let sprint_model = sprint::Entity::find_by_id(sprint_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::SprintNotFound(SPRINT_NOT_FOUND.to_string()))?;

        let (_, membership) =
            ProjectService::find_project_for_member(conn, user_id, sprint_model.project_id)
                .await
                .map_err(|e| match e {
                    AppError::ProjectNotFound(_) => {
                        AppError::SprintNotFound(SPRINT_NOT_FOUND.to_string())
                    }
                    other => other,
                })?;

        Ok((sprint_model, membership))
    }

    /// 스프린트 생성 (admin/manager)
    ///
    /// `taskIds`의 태스크는 같은 트랜잭션에서 새 스프린트로 옮겨집니다.
    pub async fn create_sprint(
        state: AppState,
        user_id: i64,
        req: CreateSprintRequest,
    ) -> Result<SprintResponse, AppError> {
        let (project_model, membership) =
            ProjectService::find_project_for_member(&state.db, user_id, req.project_id).await?;
        ProjectService::require_manager(&membership)?;
        ensure_date_range(req.start_date, req.end_date)?;

        let mut task_ids = req.task_ids.clone();
        task_ids.sort_unstable();
        task_ids.dedup();

        let txn = state.db.begin().await?;
        let now = Utc::now().naive_utc();

        let created = sprint::ActiveModel {
            project_id: Set(project_model.project_id),
            owner_id: Set(user_id),
            name: Set(req.name.trim().to_string()),
            goal: Set(req.goal),
            status: Set(req.status.unwrap_or_default()),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            progress: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !task_ids.is_empty() {
            // 이전 스프린트의 진행률도 다시 계산해야 하므로 먼저 조회
            let moved = task::Entity::find()
                .filter(task::Column::TaskId.is_in(task_ids.clone()))
                .filter(task::Column::ProjectId.eq(project_model.project_id))
                .all(&txn)
                .await?;

            if moved.len() != task_ids.len() {
                return Err(AppError::bad_request(
                    "Some tasks do not exist in this project.",
                ));
            }

            task::Entity::update_many()
                .col_expr(task::Column::SprintId, Expr::value(created.sprint_id))
                .col_expr(task::Column::UpdatedAt, Expr::value(now))
                .filter(task::Column::TaskId.is_in(task_ids.clone()))
                .exec(&txn)
                .await?;

            let mut previous: Vec<i64> = moved.iter().filter_map(|t| t.sprint_id).collect();
            previous.sort_unstable();
            previous.dedup();
            for sprint_id in previous {
                Self::recalculate_progress(&txn, sprint_id).await?;
            }
        }

        let progress = Self::recalculate_progress(&txn, created.sprint_id).await?;

        ActivityService::record(
            &txn,
            NewActivity {
                project_id: created.project_id,
                task_id: None,
                user_id,
                action: actions::SPRINT_CREATED,
                description: format!(
                    "Created sprint '{}' with {} task(s)",
                    created.name,
                    task_ids.len()
                ),
            },
        )
        .await?;

        txn.commit().await?;

        info!(
            sprint_id = created.sprint_id,
            project_id = created.project_id,
            tasks = task_ids.len(),
            "Sprint created"
        );

        let mut response = SprintResponse::from(created);
        response.progress = progress;
        Ok(response)
    }

    /// 스프린트 상세 (태스크 포함)
    pub async fn get_sprint(
        state: AppState,
        user_id: i64,
        sprint_id: i64,
    ) -> Result<SprintDetailResponse, AppError> {
        let (sprint_model, _) = Self::find_sprint_for_member(&state.db, user_id, sprint_id).await?;

        let tasks = task::Entity::find()
            .filter(task::Column::SprintId.eq(sprint_id))
            .order_by_asc(task::Column::TaskId)
            .all(&state.db)
            .await?;

        Ok(SprintDetailResponse {
            sprint: sprint_model.into(),
            tasks: TaskService::to_responses(&state.db, tasks).await?,
        })
    }

    /// 프로젝트 스프린트 목록 (시작일순, 날짜 없는 스프린트는 뒤로)
    pub async fn list_project_sprints(
        state: AppState,
        user_id: i64,
        project_id: i64,
    ) -> Result<Vec<SprintResponse>, AppError> {
        ProjectService::find_project_for_member(&state.db, user_id, project_id).await?;

        let mut sprints = sprint::Entity::find()
            .filter(sprint::Column::ProjectId.eq(project_id))
            .order_by_asc(sprint::Column::SprintId)
            .all(&state.db)
            .await?;

        // NULL 정렬 순서가 DB마다 달라 애플리케이션에서 정렬
        sprints.sort_by_key(|s| (s.start_date.is_none(), s.start_date, s.sprint_id));

        Ok(sprints.into_iter().map(SprintResponse::from).collect())
    }

    /// 스프린트 수정 (admin/manager)
    pub async fn update_sprint(
        state: AppState,
        user_id: i64,
        sprint_id: i64,
        req: UpdateSprintRequest,
    ) -> Result<SprintResponse, AppError> {
        let (sprint_model, membership) =
            Self::find_sprint_for_member(&state.db, user_id, sprint_id).await?;
        ProjectService::require_manager(&membership)?;

        let start_date = req.start_date.unwrap_or(sprint_model.start_date);
        let end_date = req.end_date.unwrap_or(sprint_model.end_date);
        ensure_date_range(start_date, end_date)?;

        let old_status = sprint_model.status;
        let mut active: sprint::ActiveModel = sprint_model.into();

        if let Some(name) = req.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(goal) = req.goal {
            active.goal = Set(goal);
        }
        if let Some(status) = req.status {
            active.status = Set(status);
        }
        active.start_date = Set(start_date);
        active.end_date = Set(end_date);
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
                    action: actions::SPRINT_STATUS_CHANGED,
                    description: format!(
                        "Changed status of sprint '{}' from {} to {}",
                        updated.name,
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

    /// 스프린트 삭제. 포함된 태스크는 삭제되지 않고 sprint_id만 NULL이 됩니다.
    pub async fn delete_sprint(
        state: AppState,
        user_id: i64,
        sprint_id: i64,
    ) -> Result<(), AppError> {
        let (_, membership) = Self::find_sprint_for_member(&state.db, user_id, sprint_id).await?;
        ProjectService::require_manager(&membership)?;

        let txn = state.db.begin().await?;

        // FK SET NULL에 기대지 않고 명시적으로 분리 (updated_at 갱신)
        task::Entity::update_many()
            .col_expr(task::Column::SprintId, Expr::value(Option::<i64>::None))
            .col_expr(task::Column::UpdatedAt, Expr::value(Utc::now().naive_utc()))
            .filter(task::Column::SprintId.eq(sprint_id))
            .exec(&txn)
            .await?;

        sprint::Entity::delete_by_id(sprint_id).exec(&txn).await?;

        txn.commit().await?;

        info!(sprint_id, deleted_by = user_id, "Sprint deleted");

        Ok(())
    }

    /// 포함된 태스크 완료율로 progress 재계산
    pub async fn recalculate_progress<C: ConnectionTrait>(
        conn: &C,
        sprint_id: i64,
    ) -> Result<i32, AppError> {
        let progress = TaskCounts::for_sprint(conn, sprint_id)
            .await?
            .completion_percentage();

        sprint::Entity::update_many()
            .col_expr(sprint::Column::Progress, Expr::value(progress))
            .filter(sprint::Column::SprintId.eq(sprint_id))
            .exec(conn)
            .await?;

        Ok(progress)
    }
}
