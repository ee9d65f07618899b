use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 마일스톤 간 의존 관계 (milestone_id가 depends_on_id 완료를 기다림)
///
/// (milestone_id, depends_on_id) 쌍은 유니크 인덱스로 보장. 순환 여부는 서비스에서 검사
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "milestone_dependency")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub milestone_dependency_id: i64,
    pub milestone_id: i64,
    pub depends_on_id: i64,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::milestone::Entity",
        from = "Column::MilestoneId",
        to = "super::milestone::Column::MilestoneId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Milestone,
    #[sea_orm(
        belongs_to = "super::milestone::Entity",
        from = "Column::DependsOnId",
        to = "super::milestone::Column::MilestoneId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    DependsOn,
}

impl ActiveModelBehavior for ActiveModel {}
