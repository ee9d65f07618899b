use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::sprint::{self, SprintStatus};
use crate::domain::task::dto::TaskResponse;
use crate::global::validator::not_blank;
use crate::utils::serde_ext::double_option;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSprintRequest {
    #[validate(range(min = 1, message = "projectId must be a positive number."))]
    pub project_id: i64,

    #[validate(
        length(min = 1, max = 100, message = "Sprint name must be 1-100 characters."),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[validate(length(max = 500, message = "Sprint goal must be at most 500 characters."))]
    pub goal: Option<String>,

    pub status: Option<SprintStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    /// 스프린트로 옮길 태스크 ID (같은 프로젝트여야 함)
    #[serde(default)]
    pub task_ids: Vec<i64>,
}

/// `goal`, `startDate`, `endDate`는 null을 보내면 비워집니다.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSprintRequest {
    #[validate(
        length(min = 1, max = 100, message = "Sprint name must be 1-100 characters."),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 500, message = "Sprint goal must be at most 500 characters."))]
    pub goal: Option<Option<String>>,

    pub status: Option<SprintStatus>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub start_date: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub end_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SprintResponse {
    pub sprint_id: i64,
    pub project_id: i64,
    pub owner_id: i64,
    pub name: String,
    pub goal: Option<String>,
    pub status: SprintStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<sprint::Model> for SprintResponse {
    fn from(model: sprint::Model) -> Self {
        Self {
            sprint_id: model.sprint_id,
            project_id: model.project_id,
            owner_id: model.owner_id,
            name: model.name,
            goal: model.goal,
            status: model.status,
            start_date: model.start_date,
            end_date: model.end_date,
            progress: model.progress,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 스프린트 상세 (포함된 태스크 목록)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SprintDetailResponse {
    pub sprint: SprintResponse,
    pub tasks: Vec<TaskResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_create_request_with_tasks() {
        let req: CreateSprintRequest = serde_json::from_str(
            r#"{"projectId": 1, "name": "Sprint 1", "startDate": "2026-01-05", "endDate": "2026-01-19", "taskIds": [3, 4]}"#,
        )
        .unwrap();

        assert_eq!(req.task_ids, vec![3, 4]);
        assert_eq!(req.start_date, NaiveDate::from_ymd_opt(2026, 1, 5));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn should_reject_blank_name() {
        let req: CreateSprintRequest =
            serde_json::from_str(r#"{"projectId": 1, "name": ""}"#).unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn should_reject_whitespace_only_name() {
        let req: UpdateSprintRequest = serde_json::from_str(r#"{"name": " \t "}"#).unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn should_clear_goal_and_dates_with_null() {
        let req: UpdateSprintRequest =
            serde_json::from_str(r#"{"goal": null, "startDate": null}"#).unwrap();

        assert_eq!(req.goal, Some(None));
        assert_eq!(req.start_date, Some(None));
        assert!(req.end_date.is_none());
        assert!(req.validate().is_ok());
    }
}
