use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 채팅/화이트보드 협업 공간
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "room")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub room_id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// 화이트보드 상태 (JSON 문서를 문자열로 저장, 최대 1MB라 MySQL TEXT로는 부족)
    #[sea_orm(column_type = "custom(\"MEDIUMTEXT\")", nullable)]
    pub whiteboard_state: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user::entity::user::Entity",
        from = "Column::OwnerId",
        to = "crate::domain::user::entity::user::Column::UserId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(has_many = "super::chat_message::Entity")]
    ChatMessage,
}

impl Related<crate::domain::user::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::chat_message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChatMessage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
