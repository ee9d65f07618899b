use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 프로젝트 내 사용자 행동 감사 로그
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub activity_id: i64,
    pub project_id: i64,
    pub task_id: Option<i64>,
    pub user_id: i64,
    /// 예: "task.created", "task.status_changed"
    pub action: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::project::entity::project::Entity",
        from = "Column::ProjectId",
        to = "crate::domain::project::entity::project::Column::ProjectId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Project,
    #[sea_orm(
        belongs_to = "crate::domain::task::entity::task::Entity",
        from = "Column::TaskId",
        to = "crate::domain::task::entity::task::Column::TaskId",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Task,
    #[sea_orm(
        belongs_to = "crate::domain::user::entity::user::Entity",
        from = "Column::UserId",
        to = "crate::domain::user::entity::user::Column::UserId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
}

impl Related<crate::domain::project::entity::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<crate::domain::task::entity::task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Task.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
