use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::project::entity::project::ProjectStatus;
use crate::domain::sprint::entity::sprint::SprintStatus;
use crate::utils::serde_ext::null_as_default;

/// 서버 응답 공통 envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Option<T>,
}

/// 대시보드에서 쓰는 프로젝트 정보
///
/// 응답에 없거나 null인 선택 필드는 기본값(status=active, progress=0)으로 채웁니다.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub project_id: i64,
    pub workspace_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ProjectStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress: i32,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// 스프린트 생성 폼 입력
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSprint {
    pub project_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub task_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintView {
    pub sprint_id: i64,
    pub project_id: i64,
    pub name: String,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SprintStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_apply_defaults_for_missing_fields() {
        let project: ProjectView =
            serde_json::from_str(r#"{"projectId": 7, "workspaceId": 1, "name": "Website"}"#)
                .unwrap();

        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.progress, 0);
        assert!(project.description.is_none());
    }

    #[test]
    fn should_apply_defaults_for_null_fields() {
        let project: ProjectView = serde_json::from_str(
            r#"{"projectId": 7, "workspaceId": 1, "name": "W", "status": null, "progress": null}"#,
        )
        .unwrap();
        let sprint: SprintView = serde_json::from_str(
            r#"{"sprintId": 2, "projectId": 7, "name": "S", "status": null, "progress": null}"#,
        )
        .unwrap();

        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.progress, 0);
        assert_eq!(sprint.status, SprintStatus::Planning);
        assert_eq!(sprint.progress, 0);
    }

    #[test]
    fn should_keep_values_when_present() {
        let project: ProjectView = serde_json::from_str(
            r#"{"projectId": 7, "workspaceId": 1, "name": "Website", "status": "completed", "progress": 80}"#,
        )
        .unwrap();

        assert_eq!(project.status, ProjectStatus::Completed);
        assert_eq!(project.progress, 80);
    }

    #[test]
    fn should_omit_empty_optional_sprint_fields() {
        let sprint = NewSprint {
            project_id: 3,
            name: "Sprint 1".to_string(),
            goal: None,
            start_date: None,
            end_date: None,
            task_ids: Vec::new(),
        };

        let json = serde_json::to_value(&sprint).unwrap();

        assert_eq!(json, serde_json::json!({"projectId": 3, "name": "Sprint 1"}));
    }
}
