use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::project::{self, ProjectStatus};
use crate::global::validator::not_blank;
use crate::utils::serde_ext::double_option;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[validate(range(min = 1, message = "workspaceId must be a positive number."))]
    pub workspace_id: i64,

    #[validate(
        length(min = 1, max = 100, message = "Project name must be 1-100 characters."),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters."))]
    pub description: Option<String>,

    /// 생략 시 active
    pub status: Option<ProjectStatus>,

    #[validate(range(min = 0, max = 100, message = "Progress must be between 0 and 100."))]
    pub progress: Option<i32>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// 부분 수정 요청. 전달된 필드만 반영
///
/// `description`, `startDate`, `endDate`는 null을 보내면 비워집니다.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(
        length(min = 1, max = 100, message = "Project name must be 1-100 characters."),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters."))]
    pub description: Option<Option<String>>,

    pub status: Option<ProjectStatus>,

    #[validate(range(min = 0, max = 100, message = "Progress must be between 0 and 100."))]
    pub progress: Option<i32>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub start_date: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub end_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub project_id: i64,
    pub workspace_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub progress: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<project::Model> for ProjectResponse {
    fn from(model: project::Model) -> Self {
        Self {
            project_id: model.project_id,
            workspace_id: model.workspace_id,
            name: model.name,
            description: model.description,
            status: model.status,
            progress: model.progress,
            start_date: model.start_date,
            end_date: model.end_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 프로젝트 태스크 통계
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatsResponse {
    pub project_id: i64,
    pub total_tasks: u64,
    pub todo: u64,
    pub in_progress: u64,
    pub done: u64,
    pub archived: u64,
    /// archived를 제외한 태스크 중 done 비율 (0~100)
    pub completion_percentage: i32,
}
