use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 사용자/워크스페이스 멤버 역할
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[default]
    #[sea_orm(string_value = "member")]
    Member,
    #[sea_orm(string_value = "guest")]
    Guest,
}

impl UserRole {
    /// 태스크 생성/수정 등 쓰기 권한 (guest 제외)
    pub fn can_write(self) -> bool {
        !matches!(self, UserRole::Guest)
    }

    /// 프로젝트/스프린트/마일스톤 관리 및 멤버 초대 권한
    pub fn can_manage(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Manager)
    }

    pub fn is_admin(self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::workspace::entity::workspace_member::Entity")]
    WorkspaceMember,
    #[sea_orm(has_many = "crate::domain::notification::entity::notification::Entity")]
    Notification,
    #[sea_orm(has_many = "crate::domain::room::entity::room::Entity")]
    Room,
}

impl Related<crate::domain::workspace::entity::workspace_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkspaceMember.def()
    }
}

impl Related<crate::domain::notification::entity::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notification.def()
    }
}

impl Related<crate::domain::room::entity::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
