//! 科目存储操作

use super::SeaOrmStorage;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{ClassroomError, Result};
use crate::models::subjects::Subject;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出科目
    pub async fn list_subjects_impl(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 新增科目，同名科目返回冲突
    pub async fn create_subject_impl(&self, teacher_id: i64, name: String) -> Result<Subject> {
        let existing = Subjects::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询科目失败: {e}")))?;

        if existing.is_some() {
            return Err(ClassroomError::conflict(format!(
                "Subject {name} already exists"
            )));
        }

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            name: Set(name),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    /// 删除科目
    pub async fn delete_subject_impl(&self, teacher_id: i64, subject_id: i64) -> Result<bool> {
        let result = Subjects::delete_many()
            .filter(Column::Id.eq(subject_id))
            .filter(Column::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
