//! 教师存储操作

use super::SeaOrmStorage;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    auth::{RegisterRequest, UpdateProfileRequest},
    teachers::Teacher,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(&self, req: RegisterRequest) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        if self.get_teacher_by_email_impl(&req.email).await?.is_some() {
            return Err(ClassroomError::conflict(format!(
                "Email {} is already registered",
                req.email
            )));
        }

        let model = ActiveModel {
            email: Set(req.email),
            password_hash: Set(req.password),
            full_name: Set(req.full_name),
            school_name: Set(req.school_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建教师失败: {e}")))?;

        Ok(result.into_teacher())
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 通过邮箱获取教师
    pub async fn get_teacher_by_email_impl(&self, email: &str) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 更新个人资料
    pub async fn update_teacher_profile_impl(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Teacher>> {
        if self.get_teacher_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }

        if let Some(school_name) = update.school_name {
            // 空字符串表示清除学校名
            model.school_name = Set(Some(school_name).filter(|s| !s.is_empty()));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("更新个人资料失败: {e}")))?;

        Ok(Some(result.into_teacher()))
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Teachers::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
