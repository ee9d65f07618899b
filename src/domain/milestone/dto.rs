use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::milestone::{self, MilestoneStatus};
use crate::global::validator::not_blank;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMilestoneRequest {
    #[validate(range(min = 1, message = "projectId must be a positive number."))]
    pub project_id: i64,

    #[validate(
        length(min = 1, max = 200, message = "Milestone title must be 1-200 characters."),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters."))]
    pub description: Option<String>,

    pub due_date: Option<NaiveDate>,

    /// 생략 시 upcoming
    pub status: Option<MilestoneStatus>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMilestoneRequest {
    #[validate(
        length(min = 1, max = 200, message = "Milestone title must be 1-200 characters."),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters."))]
    pub description: Option<String>,

    pub due_date: Option<NaiveDate>,
    pub status: Option<MilestoneStatus>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddDependencyRequest {
    #[validate(range(min = 1, message = "dependsOnId must be a positive number."))]
    pub depends_on_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneResponse {
    pub milestone_id: i64,
    pub project_id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: MilestoneStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<milestone::Model> for MilestoneResponse {
    fn from(model: milestone::Model) -> Self {
        Self {
            milestone_id: model.milestone_id,
            project_id: model.project_id,
            owner_id: model.owner_id,
            title: model.title,
            description: model.description,
            due_date: model.due_date,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
