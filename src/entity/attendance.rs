//! 考勤实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub date: Date,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub updated_at: i64,
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
    pub fn into_record(self) -> crate::models::attendance::AttendanceRecord {
        use crate::models::attendance::{AttendanceRecord, AttendanceStatus};

        AttendanceRecord {
            id: self.id,
            student_id: self.student_id,
            date: self.date,
            status: self
                .status
                .parse::<AttendanceStatus>()
                .unwrap_or(AttendanceStatus::Absent),
            notes: self.notes,
        }
    }
}
