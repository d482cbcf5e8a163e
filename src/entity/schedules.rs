//! 课程表实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub day_of_week: i32,
    pub subject: String,
    pub class: String,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_schedule(self) -> crate::models::schedules::Schedule {
        crate::models::schedules::Schedule {
            id: self.id,
            teacher_id: self.teacher_id,
            day_of_week: self.day_of_week,
            subject: self.subject,
            class: self.class,
            start_time: self.start_time,
            end_time: self.end_time,
            room: self.room,
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
