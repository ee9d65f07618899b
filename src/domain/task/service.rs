use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use super::dto::{AddTagRequest, CreateTaskRequest, TaskListQuery, TaskResponse, UpdateTaskRequest};
use super::entity::{task, task_tag};
use crate::domain::activity::service::{actions, ActivityService, NewActivity};
use crate::domain::notification::service::NotificationService;
use crate::domain::project::entity::project;
use crate::domain::project::service::ProjectService;
use crate::domain::sprint::entity::sprint;
use crate::domain::sprint::service::SprintService;
use crate::domain::workspace::entity::workspace_member;
use crate::domain::workspace::service::WorkspaceService;
use crate::global::validator::normalize_tag;
use crate::state::AppState;
use crate::utils::error::AppError;

const TASK_NOT_FOUND: &str = "Task not found";

pub struct TaskService;

impl TaskService {
    /// 태스크 조회 및 워크스페이스 멤버십 확인 헬퍼
    ///
    /// 비멤버에게는 태스크가 없는 것처럼 404를 반환합니다.
    pub async fn find_task_for_member<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        task_id: i64,
    ) -> Result<(task::Model, project::Model, workspace_member::Model), AppError> {
        let task_model = task::Entity::find_by_id(task_id)
            .one(conn)
            .await?
            .ok_or_else(|| AppError::TaskNotFound(TASK_NOT_FOUND.to_string()))?;

        let (project_model, membership) =
            ProjectService::find_project_for_member(conn, user_id, task_model.project_id)
                .await
                .map_err(|e| match e {
                    AppError::ProjectNotFound(_) => AppError::TaskNotFound(TASK_NOT_FOUND.to_string()),
                    other => other,
                })?;

        Ok((task_model, project_model, membership))
    }

    fn require_writer(membership: &workspace_member::Model) -> Result<(), AppError> {
        if membership.role.can_write() {
            Ok(())
        } else {
            Err(AppError::WorkspaceAccessDenied(
                "Guests cannot modify tasks.".to_string(),
            ))
        }
    }

    async fn ensure_sprint_in_project<C: ConnectionTrait>(
        conn: &C,
        sprint_id: i64,
        project_id: i64,
    ) -> Result<(), AppError> {
        let sprint_model = sprint::Entity::find_by_id(sprint_id).one(conn).await?;

        match sprint_model {
            Some(s) if s.project_id == project_id => Ok(()),
            _ => Err(AppError::bad_request(
                "Sprint does not belong to this project.",
            )),
        }
    }

    async fn ensure_assignee_is_member<C: ConnectionTrait>(
        conn: &C,
        workspace_id: i64,
        assignee_id: i64,
    ) -> Result<(), AppError> {
        if WorkspaceService::find_membership(conn, workspace_id, assignee_id)
            .await?
            .is_none()
        {
            return Err(AppError::bad_request(
                "Assignee must be a member of the workspace.",
            ));
        }
        Ok(())
    }

    /// 태스크별 태그 목록 (이름순)
    async fn load_tags<C: ConnectionTrait>(
        conn: &C,
        task_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<String>>, AppError> {
        if task_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = task_tag::Entity::find()
            .filter(task_tag::Column::TaskId.is_in(task_ids.to_vec()))
            .order_by_asc(task_tag::Column::Name)
            .all(conn)
            .await?;

        let mut tags: HashMap<i64, Vec<String>> = HashMap::new();
        for row in rows {
            tags.entry(row.task_id).or_default().push(row.name);
        }
        Ok(tags)
    }

    async fn to_response<C: ConnectionTrait>(
        conn: &C,
        model: task::Model,
    ) -> Result<TaskResponse, AppError> {
        let mut tags = Self::load_tags(conn, &[model.task_id]).await?;
        let task_tags = tags.remove(&model.task_id).unwrap_or_default();

        Ok(TaskResponse::from_model(model, task_tags))
    }

    /// 여러 태스크를 태그와 함께 응답으로 변환
    pub async fn to_responses<C: ConnectionTrait>(
        conn: &C,
        models: Vec<task::Model>,
    ) -> Result<Vec<TaskResponse>, AppError> {
        let ids: Vec<i64> = models.iter().map(|m| m.task_id).collect();
        let mut tags = Self::load_tags(conn, &ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let task_tags = tags.remove(&m.task_id).unwrap_or_default();
                TaskResponse::from_model(m, task_tags)
            })
            .collect())
    }

    async fn notify_assignee<C: ConnectionTrait>(
        conn: &C,
        actor_id: i64,
        assignee_id: i64,
        task_model: &task::Model,
    ) -> Result<(), AppError> {
        // 본인에게 배정한 경우 알림 생략
        if actor_id == assignee_id {
            return Ok(());
        }

        NotificationService::notify(
            conn,
            assignee_id,
            "Task assigned",
            format!("You have been assigned to '{}'.", task_model.title),
            Some(format!(
                "/projects/{}/tasks/{}",
                task_model.project_id, task_model.task_id
            )),
        )
        .await?;

        Ok(())
    }

    /// 프로젝트와 (있다면) 스프린트 진행률 갱신
    async fn refresh_progress<C: ConnectionTrait>(
        conn: &C,
        project_id: i64,
        sprint_ids: &[Option<i64>],
    ) -> Result<(), AppError> {
        ProjectService::recalculate_progress(conn, project_id).await?;

        let sprint_ids: BTreeSet<i64> = sprint_ids.iter().flatten().copied().collect();
        for sprint_id in sprint_ids {
            SprintService::recalculate_progress(conn, sprint_id).await?;
        }
        Ok(())
    }

    /// 태스크 생성 (member 이상)
    pub async fn create_task(
        state: AppState,
        user_id: i64,
        req: CreateTaskRequest,
    ) -> Result<TaskResponse, AppError> {
        let (project_model, membership) =
            ProjectService::find_project_for_member(&state.db, user_id, req.project_id).await?;
        Self::require_writer(&membership)?;

        if let Some(sprint_id) = req.sprint_id {
            Self::ensure_sprint_in_project(&state.db, sprint_id, project_model.project_id).await?;
        }
        if let Some(assignee_id) = req.assignee_id {
            Self::ensure_assignee_is_member(&state.db, project_model.workspace_id, assignee_id)
                .await?;
        }

        let tags = req
            .tags
            .iter()
            .map(|t| normalize_tag(t))
            .collect::<Result<BTreeSet<String>, AppError>>()?;

        let txn = state.db.begin().await?;
        let now = Utc::now().naive_utc();

        let created = task::ActiveModel {
            project_id: Set(project_model.project_id),
            sprint_id: Set(req.sprint_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            task_type: Set(req.task_type.unwrap_or_default()),
            status: Set(req.status.unwrap_or_default()),
            priority: Set(req.priority.unwrap_or_default()),
            story_points: Set(req.story_points),
            due_date: Set(req.due_date),
            assignee_id: Set(req.assignee_id),
            creator_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for name in &tags {
            task_tag::ActiveModel {
                task_id: Set(created.task_id),
                name: Set(name.clone()),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        ActivityService::record(
            &txn,
            NewActivity {
                project_id: created.project_id,
                task_id: Some(created.task_id),
                user_id,
                action: actions::TASK_CREATED,
                description: format!("Created task '{}'", created.title),
            },
        )
        .await?;

        if let Some(assignee_id) = created.assignee_id {
            Self::notify_assignee(&txn, user_id, assignee_id, &created).await?;
        }

        Self::refresh_progress(&txn, created.project_id, &[created.sprint_id]).await?;

        txn.commit().await?;

        info!(
            task_id = created.task_id,
            project_id = created.project_id,
            "Task created"
        );

        Ok(TaskResponse::from_model(created, tags.into_iter().collect()))
    }

    /// 태스크 조회
    pub async fn get_task(
        state: AppState,
        user_id: i64,
        task_id: i64,
    ) -> Result<TaskResponse, AppError> {
        let (task_model, _, _) = Self::find_task_for_member(&state.db, user_id, task_id).await?;

        Self::to_response(&state.db, task_model).await
    }

    /// 프로젝트 태스크 목록 (status / sprintId / assigneeId 필터)
    pub async fn list_project_tasks(
        state: AppState,
        user_id: i64,
        project_id: i64,
        query: TaskListQuery,
    ) -> Result<Vec<TaskResponse>, AppError> {
        ProjectService::find_project_for_member(&state.db, user_id, project_id).await?;

        let mut select = task::Entity::find().filter(task::Column::ProjectId.eq(project_id));

        if let Some(status) = query.status {
            select = select.filter(task::Column::Status.eq(status));
        }
        if let Some(sprint_id) = query.sprint_id {
            select = select.filter(task::Column::SprintId.eq(sprint_id));
        }
        if let Some(assignee_id) = query.assignee_id {
            select = select.filter(task::Column::AssigneeId.eq(assignee_id));
        }

        let models = select
            .order_by_asc(task::Column::TaskId)
            .all(&state.db)
            .await?;

        Self::to_responses(&state.db, models).await
    }

    /// 태스크 부분 수정
    ///
    /// 상태/담당자/스프린트 변경은 각각 활동으로 기록하고, 새 담당자에게 알림을 보냅니다.
    pub async fn update_task(
        state: AppState,
        user_id: i64,
        task_id: i64,
        req: UpdateTaskRequest,
    ) -> Result<TaskResponse, AppError> {
        if !req.story_points_in_range() {
            return Err(AppError::ValidationError(
                "Story points must be between 0 and 100.".to_string(),
            ));
        }

        let (task_model, project_model, membership) =
            Self::find_task_for_member(&state.db, user_id, task_id).await?;
        Self::require_writer(&membership)?;

        if let Some(Some(sprint_id)) = req.sprint_id {
            Self::ensure_sprint_in_project(&state.db, sprint_id, project_model.project_id).await?;
        }
        if let Some(Some(assignee_id)) = req.assignee_id {
            Self::ensure_assignee_is_member(&state.db, project_model.workspace_id, assignee_id)
                .await?;
        }

        let old_status = task_model.status;
        let old_assignee = task_model.assignee_id;
        let old_sprint = task_model.sprint_id;

        let mut active: task::ActiveModel = task_model.into();
        let mut detail_changed = false;

        if let Some(title) = req.title {
            active.title = Set(title.trim().to_string());
            detail_changed = true;
        }
        if let Some(description) = req.description {
            active.description = Set(Some(description));
            detail_changed = true;
        }
        if let Some(task_type) = req.task_type {
            active.task_type = Set(task_type);
            detail_changed = true;
        }
        if let Some(priority) = req.priority {
            active.priority = Set(priority);
            detail_changed = true;
        }
        if let Some(story_points) = req.story_points {
            active.story_points = Set(story_points);
            detail_changed = true;
        }
        if let Some(due_date) = req.due_date {
            active.due_date = Set(due_date);
            detail_changed = true;
        }
        if let Some(status) = req.status {
            active.status = Set(status);
        }
        if let Some(assignee_id) = req.assignee_id {
            active.assignee_id = Set(assignee_id);
        }
        if let Some(sprint_id) = req.sprint_id {
            active.sprint_id = Set(sprint_id);
        }
        active.updated_at = Set(Utc::now().naive_utc());

        let txn = state.db.begin().await?;
        let updated = active.update(&txn).await?;

        let mut changes = Vec::new();
        if updated.status != old_status {
            changes.push((
                actions::TASK_STATUS_CHANGED,
                format!(
                    "Changed status of '{}' from {} to {}",
                    updated.title,
                    old_status.as_str(),
                    updated.status.as_str()
                ),
            ));
        }
        if updated.assignee_id != old_assignee {
            let description = match updated.assignee_id {
                Some(assignee_id) => format!("Assigned '{}' to user {}", updated.title, assignee_id),
                None => format!("Unassigned '{}'", updated.title),
            };
            changes.push((actions::TASK_ASSIGNED, description));
        }
        if updated.sprint_id != old_sprint {
            let description = match updated.sprint_id {
                Some(sprint_id) => format!("Moved '{}' to sprint {}", updated.title, sprint_id),
                None => format!("Removed '{}' from its sprint", updated.title),
            };
            changes.push((actions::TASK_SPRINT_CHANGED, description));
        }
        if detail_changed {
            changes.push((actions::TASK_UPDATED, format!("Updated task '{}'", updated.title)));
        }

        for (action, description) in changes {
            ActivityService::record(
                &txn,
                NewActivity {
                    project_id: updated.project_id,
                    task_id: Some(updated.task_id),
                    user_id,
                    action,
                    description,
                },
            )
            .await?;
        }

        if let Some(assignee_id) = updated.assignee_id {
            if old_assignee != Some(assignee_id) {
                Self::notify_assignee(&txn, user_id, assignee_id, &updated).await?;
            }
        }

        if updated.status != old_status || updated.sprint_id != old_sprint {
            Self::refresh_progress(&txn, updated.project_id, &[old_sprint, updated.sprint_id])
                .await?;
        }

        let response = Self::to_response(&txn, updated).await?;
        txn.commit().await?;

        Ok(response)
    }

    /// 태스크 삭제. 태그는 CASCADE, 활동 로그는 task_id만 NULL로 남습니다.
    pub async fn delete_task(state: AppState, user_id: i64, task_id: i64) -> Result<(), AppError> {
        let (task_model, _, membership) =
            Self::find_task_for_member(&state.db, user_id, task_id).await?;
        Self::require_writer(&membership)?;

        let txn = state.db.begin().await?;

        ActivityService::record(
            &txn,
            NewActivity {
                project_id: task_model.project_id,
                task_id: None,
                user_id,
                action: actions::TASK_DELETED,
                description: format!("Deleted task '{}'", task_model.title),
            },
        )
        .await?;

        task::Entity::delete_by_id(task_id).exec(&txn).await?;

        Self::refresh_progress(&txn, task_model.project_id, &[task_model.sprint_id]).await?;

        txn.commit().await?;

        info!(task_id, deleted_by = user_id, "Task deleted");

        Ok(())
    }

    /// 태그 추가. 같은 태스크에 같은 이름이 있으면 409
    pub async fn add_tag(
        state: AppState,
        user_id: i64,
        task_id: i64,
        req: AddTagRequest,
    ) -> Result<TaskResponse, AppError> {
        let name = normalize_tag(&req.name)?;

        let (task_model, _, membership) =
            Self::find_task_for_member(&state.db, user_id, task_id).await?;
        Self::require_writer(&membership)?;

        let existing = task_tag::Entity::find()
            .filter(task_tag::Column::TaskId.eq(task_id))
            .filter(task_tag::Column::Name.eq(name.as_str()))
            .one(&state.db)
            .await?;

        if existing.is_some() {
            return Err(AppError::conflict(format!(
                "Tag '{}' already exists on this task.",
                name
            )));
        }

        let txn = state.db.begin().await?;

        task_tag::ActiveModel {
            task_id: Set(task_id),
            name: Set(name.clone()),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        ActivityService::record(
            &txn,
            NewActivity {
                project_id: task_model.project_id,
                task_id: Some(task_id),
                user_id,
                action: actions::TASK_TAGGED,
                description: format!("Tagged '{}' with '{}'", task_model.title, name),
            },
        )
        .await?;

        let response = Self::to_response(&txn, task_model).await?;
        txn.commit().await?;

        Ok(response)
    }

    /// 태그 제거
    pub async fn remove_tag(
        state: AppState,
        user_id: i64,
        task_id: i64,
        raw_name: &str,
    ) -> Result<TaskResponse, AppError> {
        let name = normalize_tag(raw_name)?;

        let (task_model, _, membership) =
            Self::find_task_for_member(&state.db, user_id, task_id).await?;
        Self::require_writer(&membership)?;

        let result = task_tag::Entity::delete_many()
            .filter(task_tag::Column::TaskId.eq(task_id))
            .filter(task_tag::Column::Name.eq(name.as_str()))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::TagNotFound("Tag not found".to_string()));
        }

        Self::to_response(&state.db, task_model).await
    }
}
