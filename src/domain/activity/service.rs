use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use super::dto::ActivityResponse;
use super::entity::activity;
use crate::domain::project::service::ProjectService;
use crate::domain::task::service::TaskService;
use crate::state::AppState;
use crate::utils::error::AppError;

/// 활동 로그 action 키
pub mod actions {
    pub const TASK_CREATED: &str = "task.created";
    pub const TASK_UPDATED: &str = "task.updated";
    pub const TASK_STATUS_CHANGED: &str = "task.status_changed";
    pub const TASK_ASSIGNED: &str = "task.assigned";
    pub const TASK_SPRINT_CHANGED: &str = "task.sprint_changed";
    pub const TASK_DELETED: &str = "task.deleted";
    pub const TASK_TAGGED: &str = "task.tagged";
    pub const SPRINT_CREATED: &str = "sprint.created";
    pub const SPRINT_STATUS_CHANGED: &str = "sprint.status_changed";
    pub const MILESTONE_CREATED: &str = "milestone.created";
    pub const MILESTONE_STATUS_CHANGED: &str = "milestone.status_changed";
}

/// 기록할 활동
pub struct NewActivity {
    pub project_id: i64,
    pub task_id: Option<i64>,
    pub user_id: i64,
    pub action: &'static str,
    pub description: String,
}

pub struct ActivityService;

impl ActivityService {
    /// 활동 기록. 호출 측 트랜잭션 안에서 실행됩니다.
    pub async fn record<C: ConnectionTrait>(
        conn: &C,
        new: NewActivity,
    ) -> Result<activity::Model, AppError> {
        let model = activity::ActiveModel {
            project_id: Set(new.project_id),
            task_id: Set(new.task_id),
            user_id: Set(new.user_id),
            action: Set(new.action.to_string()),
            description: Set(new.description),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(model)
    }

    /// 프로젝트 활동 목록 (최신순)
    pub async fn list_for_project(
        state: AppState,
        user_id: i64,
        project_id: i64,
        limit: u64,
    ) -> Result<Vec<ActivityResponse>, AppError> {
        ProjectService::find_project_for_member(&state.db, user_id, project_id).await?;

        let rows = activity::Entity::find()
            .filter(activity::Column::ProjectId.eq(project_id))
            .order_by_desc(activity::Column::CreatedAt)
            .order_by_desc(activity::Column::ActivityId)
            .limit(limit)
            .all(&state.db)
            .await?;

        Ok(rows.into_iter().map(ActivityResponse::from).collect())
    }

    /// 태스크 활동 목록 (최신순)
    pub async fn list_for_task(
        state: AppState,
        user_id: i64,
        task_id: i64,
    ) -> Result<Vec<ActivityResponse>, AppError> {
        TaskService::find_task_for_member(&state.db, user_id, task_id).await?;

        let rows = activity::Entity::find()
            .filter(activity::Column::TaskId.eq(task_id))
            .order_by_desc(activity::Column::CreatedAt)
            .order_by_desc(activity::Column::ActivityId)
            .all(&state.db)
            .await?;

        Ok(rows.into_iter().map(ActivityResponse::from).collect())
    }
}
