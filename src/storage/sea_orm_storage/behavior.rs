//! 行为记录存储操作

use super::SeaOrmStorage;
use crate::entity::behavior_logs::{ActiveModel, Column, Entity as BehaviorLogs};
use crate::entity::prelude::Students;
use crate::entity::students::Column as StudentColumn;
use crate::errors::{ClassroomError, Result};
use crate::models::behavior::{
    BehaviorListQuery, BehaviorLog, BehaviorLogItem, CreateBehaviorRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出行为记录，附带学生姓名与班级
    pub async fn list_behavior_logs_impl(
        &self,
        teacher_id: i64,
        query: BehaviorListQuery,
    ) -> Result<Vec<BehaviorLogItem>> {
        let mut select = BehaviorLogs::find()
            .find_also_related(Students)
            .filter(StudentColumn::TeacherId.eq(teacher_id));

        if let Some(kind) = query.kind {
            select = select.filter(Column::Kind.eq(kind.to_string()));
        }

        let rows = select
            .order_by_desc(Column::Date)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询行为记录失败: {e}")))?;

        let search = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();

        Ok(rows
            .into_iter()
            .filter_map(|(log, student)| {
                let student = student?;
                Some(BehaviorLogItem {
                    log: log.into_log(),
                    student_name: student.name,
                    student_class: student.class,
                })
            })
            .filter(|item| item.matches_search(&search))
            .collect())
    }

    /// 新增行为记录
    pub async fn create_behavior_log_impl(
        &self,
        req: CreateBehaviorRequest,
    ) -> Result<BehaviorLog> {
        let model = ActiveModel {
            student_id: Set(req.student_id),
            kind: Set(req.kind.to_string()),
            description: Set(req.description),
            date: Set(req.date),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建行为记录失败: {e}")))?;

        Ok(result.into_log())
    }

    /// 删除行为记录，仅限本教师学生的记录
    pub async fn delete_behavior_log_impl(&self, teacher_id: i64, log_id: i64) -> Result<bool> {
        let owned = BehaviorLogs::find_by_id(log_id)
            .find_also_related(Students)
            .filter(StudentColumn::TeacherId.eq(teacher_id))
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询行为记录失败: {e}")))?;

        if owned.is_none() {
            return Ok(false);
        }

        let result = BehaviorLogs::delete_by_id(log_id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("删除行为记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
