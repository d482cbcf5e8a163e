//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub nisn: Option<String>,
    pub name: String,
    pub class: String,
    pub gender: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
    #[sea_orm(has_many = "super::behavior_logs::Entity")]
    BehaviorLogs,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl Related<super::behavior_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BehaviorLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::Student {
        use super::timestamp_to_datetime;
        use crate::models::students::{Gender, Student};

        Student {
            id: self.id,
            teacher_id: self.teacher_id,
            nisn: self.nisn,
            name: self.name,
            class: self.class,
            gender: self.gender.parse::<Gender>().unwrap_or(Gender::Male),
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
