use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::entity::activity;

pub const DEFAULT_ACTIVITY_LIMIT: u64 = 50;
pub const MAX_ACTIVITY_LIMIT: u64 = 200;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub activity_id: i64,
    pub project_id: i64,
    pub task_id: Option<i64>,
    pub user_id: i64,
    pub action: String,
    pub description: String,
    pub created_at: NaiveDateTime,
}

impl From<activity::Model> for ActivityResponse {
    fn from(model: activity::Model) -> Self {
        Self {
            activity_id: model.activity_id,
            project_id: model.project_id,
            task_id: model.task_id,
            user_id: model.user_id,
            action: model.action,
            description: model.description,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQueryParams {
    /// 최대 개수 (기본 50, 최대 200)
    pub limit: Option<u64>,
}

impl ActivityQueryParams {
    pub fn effective_limit(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .clamp(1, MAX_ACTIVITY_LIMIT)
    }
}
