//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::entity::prelude::Students;
use crate::entity::students::Column as StudentColumn;
use crate::errors::{ClassroomError, Result};
use crate::models::attendance::{AttendanceEntryInput, AttendanceRecord};
use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 某日考勤
    pub async fn list_attendance_on_impl(
        &self,
        teacher_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        let records = Attendance::find()
            .inner_join(Students)
            .filter(StudentColumn::TeacherId.eq(teacher_id))
            .filter(Column::Date.eq(date))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_record()).collect())
    }

    /// [start, end) 区间考勤
    pub async fn list_attendance_between_impl(
        &self,
        teacher_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        let records = Attendance::find()
            .inner_join(Students)
            .filter(StudentColumn::TeacherId.eq(teacher_id))
            .filter(Column::Date.gte(start))
            .filter(Column::Date.lt(end))
            .order_by_asc(Column::Date)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询考勤区间失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_record()).collect())
    }

    /// 覆盖写入考勤
    pub async fn upsert_attendance_impl(
        &self,
        date: NaiveDate,
        entries: Vec<AttendanceEntryInput>,
    ) -> Result<u64> {
        if entries.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let count = entries.len() as u64;
        let models = entries.into_iter().map(|entry| ActiveModel {
            student_id: Set(entry.student_id),
            date: Set(date),
            status: Set(entry.status.to_string()),
            notes: Set(entry.notes.filter(|n| !n.trim().is_empty())),
            updated_at: Set(now),
            ..Default::default()
        });

        Attendance::insert_many(models)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::Date])
                    .update_columns([Column::Status, Column::Notes, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("保存考勤失败: {e}")))?;

        Ok(count)
    }
}
