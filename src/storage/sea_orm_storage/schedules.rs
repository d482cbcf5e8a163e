//! 课程表存储操作

use super::SeaOrmStorage;
use crate::entity::schedules::{ActiveModel, Column, Entity as Schedules};
use crate::errors::{ClassroomError, Result};
use crate::models::schedules::{CreateScheduleRequest, Schedule};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 列出课程表，可按星期筛选
    pub async fn list_schedules_impl(
        &self,
        teacher_id: i64,
        day_of_week: Option<i32>,
    ) -> Result<Vec<Schedule>> {
        let mut select = Schedules::find().filter(Column::TeacherId.eq(teacher_id));
        if let Some(day) = day_of_week {
            select = select.filter(Column::DayOfWeek.eq(day));
        }

        let slots = select
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询课程表失败: {e}")))?;

        Ok(slots.into_iter().map(|m| m.into_schedule()).collect())
    }

    /// 新增课程表时段
    pub async fn create_schedule_impl(
        &self,
        teacher_id: i64,
        req: CreateScheduleRequest,
    ) -> Result<Schedule> {
        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            day_of_week: Set(req.day_of_week),
            subject: Set(req.subject),
            class: Set(req.class),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            room: Set(req.room),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建课程表失败: {e}")))?;

        Ok(result.into_schedule())
    }

    /// 删除课程表时段
    pub async fn delete_schedule_impl(&self, teacher_id: i64, schedule_id: i64) -> Result<bool> {
        let result = Schedules::delete_many()
            .filter(Column::Id.eq(schedule_id))
            .filter(Column::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("删除课程表失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 课程表中的科目
    pub async fn list_schedule_subjects_impl(&self, teacher_id: i64) -> Result<Vec<String>> {
        Schedules::find()
            .select_only()
            .column(Column::Subject)
            .distinct()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_asc(Column::Subject)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询课程表科目失败: {e}")))
    }
}
