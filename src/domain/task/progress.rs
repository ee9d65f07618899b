//! 태스크 완료율 계산
//!
//! 프로젝트/스프린트의 progress는 스키마 제약이 없으므로 태스크가 바뀔 때마다 여기서 다시 계산합니다.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};

use super::entity::task::{self, TaskStatus};
use crate::utils::error::AppError;

/// 상태별 태스크 수
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskCounts {
    pub todo: u64,
    pub in_progress: u64,
    pub done: u64,
    pub archived: u64,
}

impl TaskCounts {
    pub fn from_statuses(statuses: &[TaskStatus]) -> Self {
        statuses.iter().fold(Self::default(), |mut acc, status| {
            match status {
                TaskStatus::Todo => acc.todo += 1,
                TaskStatus::InProgress => acc.in_progress += 1,
                TaskStatus::Done => acc.done += 1,
                TaskStatus::Archived => acc.archived += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> u64 {
        self.todo + self.in_progress + self.done + self.archived
    }

    /// archived를 제외한 태스크 중 done 비율 (반올림, 태스크가 없으면 0)
    pub fn completion_percentage(&self) -> i32 {
        let active = self.todo + self.in_progress + self.done;
        if active == 0 {
            return 0;
        }
        ((self.done * 100 + active / 2) / active) as i32
    }

    pub async fn for_project<C: ConnectionTrait>(conn: &C, project_id: i64) -> Result<Self, AppError> {
        let statuses: Vec<TaskStatus> = task::Entity::find()
            .select_only()
            .column(task::Column::Status)
            .filter(task::Column::ProjectId.eq(project_id))
            .into_tuple()
            .all(conn)
            .await?;

        Ok(Self::from_statuses(&statuses))
    }

    pub async fn for_sprint<C: ConnectionTrait>(conn: &C, sprint_id: i64) -> Result<Self, AppError> {
        let statuses: Vec<TaskStatus> = task::Entity::find()
            .select_only()
            .column(task::Column::Status)
            .filter(task::Column::SprintId.eq(sprint_id))
            .into_tuple()
            .all(conn)
            .await?;

        Ok(Self::from_statuses(&statuses))
    }
}
