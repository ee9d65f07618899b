use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::workspace;
use crate::domain::user::entity::user::{self, UserRole};

/// 워크스페이스 이름은 URL 경로(`/api/projects/workspace/{name}`)에 쓰이므로 `/` 불가
fn validate_workspace_name(name: &str) -> Result<(), validator::ValidationError> {
    if name.contains('/') || name.trim() != name {
        let mut err = validator::ValidationError::new("workspace_name");
        err.message = Some("Workspace name must not contain '/' or surrounding spaces.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceRequest {
    #[validate(
        length(min = 1, max = 50, message = "Workspace name must be 1-50 characters."),
        custom(function = "validate_workspace_name")
    )]
    pub name: String,

    #[validate(length(max = 200, message = "Description must be at most 200 characters."))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceResponse {
    pub workspace_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
    /// 요청한 사용자의 역할
    pub my_role: UserRole,
    pub created_at: NaiveDateTime,
}

impl WorkspaceResponse {
    pub fn from_model(model: workspace::Model, my_role: UserRole) -> Self {
        Self {
            workspace_id: model.workspace_id,
            name: model.name,
            description: model.description,
            owner_id: model.owner_id,
            my_role,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    #[validate(range(min = 1, message = "userId must be a positive number."))]
    pub user_id: i64,
    /// 생략 시 member
    pub role: Option<UserRole>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMemberResponse {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub joined_at: NaiveDateTime,
}

impl WorkspaceMemberResponse {
    pub fn new(user: user::Model, role: UserRole, joined_at: NaiveDateTime) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            role,
            joined_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_workspace_name_with_slash() {
        let req = CreateWorkspaceRequest {
            name: "team/alpha".to_string(),
            description: None,
        };

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn should_reject_empty_workspace_name() {
        let req = CreateWorkspaceRequest {
            name: String::new(),
            description: None,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn should_accept_plain_workspace_name() {
        let req = CreateWorkspaceRequest {
            name: "Acme Engineering".to_string(),
            description: Some("Core platform team".to_string()),
        };

        assert!(req.validate().is_ok());
    }
}
