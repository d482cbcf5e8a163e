//! 成绩存储操作

use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::prelude::Students;
use crate::entity::students::Column as StudentColumn;
use crate::errors::{ClassroomError, Result};
use crate::models::grades::{GradeEntryInput, GradeRecord};
use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 单次评估的成绩
    pub async fn list_grades_on_impl(
        &self,
        teacher_id: i64,
        date: NaiveDate,
        subject: &str,
        assessment_name: &str,
    ) -> Result<Vec<GradeRecord>> {
        let records = Grades::find()
            .inner_join(Students)
            .filter(StudentColumn::TeacherId.eq(teacher_id))
            .filter(Column::AssessmentDate.eq(date))
            .filter(Column::Subject.eq(subject))
            .filter(Column::AssessmentName.eq(assessment_name))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_record()).collect())
    }

    /// 某科目全部成绩，按日期升序
    pub async fn list_grades_for_subject_impl(
        &self,
        teacher_id: i64,
        subject: &str,
    ) -> Result<Vec<GradeRecord>> {
        let records = Grades::find()
            .inner_join(Students)
            .filter(StudentColumn::TeacherId.eq(teacher_id))
            .filter(Column::Subject.eq(subject))
            .order_by_asc(Column::AssessmentDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询科目成绩失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_record()).collect())
    }

    /// 覆盖写入成绩
    pub async fn upsert_grades_impl(
        &self,
        date: NaiveDate,
        subject: &str,
        assessment_name: &str,
        entries: Vec<GradeEntryInput>,
    ) -> Result<u64> {
        if entries.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let count = entries.len() as u64;
        let models = entries.into_iter().map(|entry| ActiveModel {
            student_id: Set(entry.student_id),
            subject: Set(subject.to_string()),
            assessment_date: Set(date),
            assessment_name: Set(assessment_name.to_string()),
            score: Set(entry.score),
            remarks: Set(entry.remarks.filter(|r| !r.trim().is_empty())),
            updated_at: Set(now),
            ..Default::default()
        });

        Grades::insert_many(models)
            .on_conflict(
                OnConflict::columns([
                    Column::StudentId,
                    Column::Subject,
                    Column::AssessmentDate,
                    Column::AssessmentName,
                ])
                .update_columns([Column::Score, Column::Remarks, Column::UpdatedAt])
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("保存成绩失败: {e}")))?;

        Ok(count)
    }
}
