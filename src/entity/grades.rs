//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject: String,
    pub assessment_date: Date,
    pub assessment_name: String,
    pub score: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
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
    pub fn into_record(self) -> crate::models::grades::GradeRecord {
        crate::models::grades::GradeRecord {
            id: self.id,
            student_id: self.student_id,
            subject: self.subject,
            assessment_date: self.assessment_date,
            assessment_name: self.assessment_name,
            score: self.score,
            remarks: self.remarks,
        }
    }
}
