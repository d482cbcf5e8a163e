//! 学生存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::prelude::{Attendance, BehaviorLogs, Grades};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::entity::{attendance, behavior_logs, grades};
use crate::errors::{ClassroomError, Result};
use crate::models::students::{NewStudent, Student, StudentFields, StudentListQuery};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 列出学生
    pub async fn list_students_impl(
        &self,
        teacher_id: i64,
        query: StudentListQuery,
    ) -> Result<Vec<Student>> {
        let mut select = Students::find().filter(Column::TeacherId.eq(teacher_id));

        if let Some(class) = query.class.as_deref().map(str::trim)
            && !class.is_empty()
        {
            select = select.filter(Column::Class.eq(class));
        }

        let students = select
            .order_by_asc(Column::Class)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询学生列表失败: {e}")))?;

        // 搜索在内存中进行，姓名不区分大小写
        let search = query.search.as_deref().map(str::trim).unwrap_or("");
        Ok(students
            .into_iter()
            .map(|m| m.into_student())
            .filter(|s| s.matches_search(search))
            .collect())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(
        &self,
        teacher_id: i64,
        student_id: i64,
    ) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id)
            .filter(Column::TeacherId.eq(teacher_id))
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 创建学生
    pub async fn create_student_impl(
        &self,
        teacher_id: i64,
        student: NewStudent,
    ) -> Result<Student> {
        self.ensure_nisn_available(teacher_id, student.nisn.as_deref(), None)
            .await?;

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            nisn: Set(student.nisn),
            name: Set(student.name),
            class: Set(student.class),
            gender: Set(student.gender.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 更新学生
    pub async fn update_student_impl(
        &self,
        teacher_id: i64,
        student_id: i64,
        student: NewStudent,
    ) -> Result<Option<Student>> {
        if self
            .get_student_by_id_impl(teacher_id, student_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        self.ensure_nisn_available(teacher_id, student.nisn.as_deref(), Some(student_id))
            .await?;

        let model = ActiveModel {
            id: Set(student_id),
            nisn: Set(student.nisn),
            name: Set(student.name),
            class: Set(student.class),
            gender: Set(student.gender.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("更新学生失败: {e}")))?;

        Ok(Some(result.into_student()))
    }

    /// 删除学生及其考勤、成绩、行为记录
    pub async fn delete_student_impl(&self, teacher_id: i64, student_id: i64) -> Result<bool> {
        if self
            .get_student_by_id_impl(teacher_id, student_id)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassroomError::database_operation(format!("开启事务失败: {e}")))?;

        Attendance::delete_many()
            .filter(attendance::Column::StudentId.eq(student_id))
            .exec(&txn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("删除考勤记录失败: {e}")))?;

        Grades::delete_many()
            .filter(grades::Column::StudentId.eq(student_id))
            .exec(&txn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("删除成绩记录失败: {e}")))?;

        BehaviorLogs::delete_many()
            .filter(behavior_logs::Column::StudentId.eq(student_id))
            .exec(&txn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("删除行为记录失败: {e}")))?;

        let result = Students::delete_many()
            .filter(Column::Id.eq(student_id))
            .filter(Column::TeacherId.eq(teacher_id))
            .exec(&txn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("删除学生失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| ClassroomError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 班级列表
    pub async fn list_classes_impl(&self, teacher_id: i64) -> Result<Vec<String>> {
        Students::find()
            .select_only()
            .column(Column::Class)
            .distinct()
            .filter(Column::TeacherId.eq(teacher_id))
            .order_by_asc(Column::Class)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询班级列表失败: {e}")))
    }

    /// 学生总数
    pub async fn count_students_impl(&self, teacher_id: i64) -> Result<u64> {
        Students::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("统计学生数量失败: {e}")))
    }

    /// NISN 到学生 ID 的映射
    pub async fn find_student_ids_by_nisn_impl(
        &self,
        teacher_id: i64,
        nisns: &[String],
    ) -> Result<HashMap<String, i64>> {
        if nisns.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Students::find()
            .select_only()
            .column(Column::Nisn)
            .column(Column::Id)
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::Nisn.is_in(nisns.iter().cloned()))
            .into_tuple::<(Option<String>, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("按 NISN 查询学生失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(nisn, id)| nisn.map(|n| (n, id)))
            .collect())
    }

    /// 过滤出属于该教师的学生 ID
    pub async fn filter_owned_student_ids_impl(
        &self,
        teacher_id: i64,
        student_ids: &[i64],
    ) -> Result<HashSet<i64>> {
        if student_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let ids = Students::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::Id.is_in(student_ids.iter().copied()))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("校验学生归属失败: {e}")))?;

        Ok(ids.into_iter().collect())
    }

    /// 批量插入学生
    pub async fn insert_students_impl(
        &self,
        teacher_id: i64,
        students: Vec<NewStudent>,
    ) -> Result<u64> {
        if students.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let count = students.len() as u64;
        let models = students.into_iter().map(|s| ActiveModel {
            teacher_id: Set(teacher_id),
            nisn: Set(s.nisn),
            name: Set(s.name),
            class: Set(s.class),
            gender: Set(s.gender.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        });

        Students::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("批量插入学生失败: {e}")))?;

        Ok(count)
    }

    /// 导入更新：替换姓名、班级、性别
    pub async fn update_student_fields_impl(
        &self,
        teacher_id: i64,
        student_id: i64,
        fields: StudentFields,
    ) -> Result<bool> {
        let result = Students::update_many()
            .col_expr(Column::Name, sea_orm::sea_query::Expr::value(fields.name))
            .col_expr(Column::Class, sea_orm::sea_query::Expr::value(fields.class))
            .col_expr(
                Column::Gender,
                sea_orm::sea_query::Expr::value(fields.gender.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(student_id))
            .filter(Column::TeacherId.eq(teacher_id))
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("更新学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // 同一教师下 NISN 不可重复
    async fn ensure_nisn_available(
        &self,
        teacher_id: i64,
        nisn: Option<&str>,
        exclude_id: Option<i64>,
    ) -> Result<()> {
        let Some(nisn) = nisn else {
            return Ok(());
        };

        let mut select = Students::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::Nisn.eq(nisn));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let existing = select
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询学生失败: {e}")))?;

        if existing.is_some() {
            return Err(ClassroomError::conflict(format!(
                "NISN {nisn} is already used by another student"
            )));
        }
        Ok(())
    }
}
