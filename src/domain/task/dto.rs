use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::task::{self, TaskPriority, TaskStatus, TaskType};
use crate::global::validator::not_blank;
use crate::utils::serde_ext::double_option;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(range(min = 1, message = "projectId must be a positive number."))]
    pub project_id: i64,

    pub sprint_id: Option<i64>,

    #[validate(
        length(min = 1, max = 200, message = "Task title must be 1-200 characters."),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters."))]
    pub description: Option<String>,

    pub task_type: Option<TaskType>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,

    #[validate(range(min = 0, max = 100, message = "Story points must be between 0 and 100."))]
    pub story_points: Option<i32>,

    pub due_date: Option<NaiveDate>,
    pub assignee_id: Option<i64>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// 부분 수정 요청
///
/// `sprintId`, `assigneeId`, `dueDate`, `storyPoints`는 null을 보내면 해제됩니다.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(
        length(min = 1, max = 200, message = "Task title must be 1-200 characters."),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters."))]
    pub description: Option<String>,

    pub task_type: Option<TaskType>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub story_points: Option<Option<i32>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub due_date: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub assignee_id: Option<Option<i64>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub sprint_id: Option<Option<i64>>,
}

impl UpdateTaskRequest {
    /// story points 범위 검사 (중첩 Option이라 derive 대신 직접 확인)
    pub fn story_points_in_range(&self) -> bool {
        match self.story_points {
            Some(Some(points)) => (0..=100).contains(&points),
            _ => true,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
    pub sprint_id: Option<i64>,
    pub assignee_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTagRequest {
    #[validate(length(min = 1, message = "Tag name must not be empty."))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub task_id: i64,
    pub project_id: i64,
    pub sprint_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub story_points: Option<i32>,
    pub due_date: Option<NaiveDate>,
    pub assignee_id: Option<i64>,
    pub creator_id: i64,
    pub tags: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TaskResponse {
    pub fn from_model(model: task::Model, tags: Vec<String>) -> Self {
        Self {
            task_id: model.task_id,
            project_id: model.project_id,
            sprint_id: model.sprint_id,
            title: model.title,
            description: model.description,
            task_type: model.task_type,
            status: model.status,
            priority: model.priority,
            story_points: model.story_points,
            due_date: model.due_date,
            assignee_id: model.assignee_id,
            creator_id: model.creator_id,
            tags,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_distinguish_missing_and_null_fields() {
        let req: UpdateTaskRequest =
            serde_json::from_str(r#"{"assigneeId": null, "sprintId": 3}"#).unwrap();

        assert_eq!(req.assignee_id, Some(None));
        assert_eq!(req.sprint_id, Some(Some(3)));
        assert_eq!(req.due_date, None);
    }

    #[test]
    fn should_parse_kebab_case_status() {
        let req: UpdateTaskRequest = serde_json::from_str(r#"{"status": "in-progress"}"#).unwrap();

        assert_eq!(req.status, Some(TaskStatus::InProgress));
    }

    #[test]
    fn should_reject_story_points_out_of_range() {
        let req: UpdateTaskRequest = serde_json::from_str(r#"{"storyPoints": 150}"#).unwrap();
        assert!(!req.story_points_in_range());

        let req: UpdateTaskRequest = serde_json::from_str(r#"{"storyPoints": null}"#).unwrap();
        assert!(req.story_points_in_range());
    }

    #[test]
    fn should_default_tags_to_empty() {
        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"projectId": 1, "title": "Write docs"}"#).unwrap();

        assert!(req.tags.is_empty());
        assert!(req.validate().is_ok());
    }
}
