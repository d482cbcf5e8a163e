//! 行为记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "behavior_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub kind: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub date: Date,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_log(self) -> crate::models::behavior::BehaviorLog {
        use super::timestamp_to_datetime;
        use crate::models::behavior::{BehaviorKind, BehaviorLog};

        BehaviorLog {
            id: self.id,
            student_id: self.student_id,
            kind: self
                .kind
                .parse::<BehaviorKind>()
                .unwrap_or(BehaviorKind::Positive),
            description: self.description,
            date: self.date,
            created_at: timestamp_to_datetime(self.created_at),
        }
    }
}
