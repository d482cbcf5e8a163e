//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendance;
mod behavior;
mod grades;
mod schedules;
mod students;
mod subjects;
mod teachers;

use crate::config::AppConfig;
use crate::errors::{ClassroomError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClassroomError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ClassroomError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ClassroomError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ClassroomError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    attendance::{AttendanceEntryInput, AttendanceRecord},
    auth::{RegisterRequest, UpdateProfileRequest},
    behavior::{BehaviorListQuery, BehaviorLog, BehaviorLogItem, CreateBehaviorRequest},
    grades::{GradeEntryInput, GradeRecord},
    schedules::{CreateScheduleRequest, Schedule},
    students::{NewStudent, Student, StudentFields, StudentListQuery},
    subjects::Subject,
    teachers::Teacher,
};
use crate::storage::{RosterWriter, Storage};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

#[async_trait]
impl RosterWriter for SeaOrmStorage {
    async fn insert_students(&self, teacher_id: i64, students: Vec<NewStudent>) -> Result<u64> {
        self.insert_students_impl(teacher_id, students).await
    }

    async fn update_student_fields(
        &self,
        teacher_id: i64,
        student_id: i64,
        fields: StudentFields,
    ) -> Result<bool> {
        self.update_student_fields_impl(teacher_id, student_id, fields)
            .await
    }
}

#[async_trait]
impl Storage for SeaOrmStorage {
    // 教师模块
    async fn create_teacher(&self, req: RegisterRequest) -> Result<Teacher> {
        self.create_teacher_impl(req).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_email_impl(email).await
    }

    async fn update_teacher_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_profile_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 学生模块
    async fn list_students(
        &self,
        teacher_id: i64,
        query: StudentListQuery,
    ) -> Result<Vec<Student>> {
        self.list_students_impl(teacher_id, query).await
    }

    async fn get_student_by_id(
        &self,
        teacher_id: i64,
        student_id: i64,
    ) -> Result<Option<Student>> {
        self.get_student_by_id_impl(teacher_id, student_id).await
    }

    async fn create_student(&self, teacher_id: i64, student: NewStudent) -> Result<Student> {
        self.create_student_impl(teacher_id, student).await
    }

    async fn update_student(
        &self,
        teacher_id: i64,
        student_id: i64,
        student: NewStudent,
    ) -> Result<Option<Student>> {
        self.update_student_impl(teacher_id, student_id, student)
            .await
    }

    async fn delete_student(&self, teacher_id: i64, student_id: i64) -> Result<bool> {
        self.delete_student_impl(teacher_id, student_id).await
    }

    async fn list_classes(&self, teacher_id: i64) -> Result<Vec<String>> {
        self.list_classes_impl(teacher_id).await
    }

    async fn count_students(&self, teacher_id: i64) -> Result<u64> {
        self.count_students_impl(teacher_id).await
    }

    async fn find_student_ids_by_nisn(
        &self,
        teacher_id: i64,
        nisns: &[String],
    ) -> Result<HashMap<String, i64>> {
        self.find_student_ids_by_nisn_impl(teacher_id, nisns).await
    }

    async fn filter_owned_student_ids(
        &self,
        teacher_id: i64,
        student_ids: &[i64],
    ) -> Result<HashSet<i64>> {
        self.filter_owned_student_ids_impl(teacher_id, student_ids)
            .await
    }

    // 考勤模块
    async fn list_attendance_on(
        &self,
        teacher_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_on_impl(teacher_id, date).await
    }

    async fn list_attendance_between(
        &self,
        teacher_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_between_impl(teacher_id, start, end)
            .await
    }

    async fn upsert_attendance(
        &self,
        date: NaiveDate,
        entries: Vec<AttendanceEntryInput>,
    ) -> Result<u64> {
        self.upsert_attendance_impl(date, entries).await
    }

    // 成绩模块
    async fn list_grades_on(
        &self,
        teacher_id: i64,
        date: NaiveDate,
        subject: &str,
        assessment_name: &str,
    ) -> Result<Vec<GradeRecord>> {
        self.list_grades_on_impl(teacher_id, date, subject, assessment_name)
            .await
    }

    async fn list_grades_for_subject(
        &self,
        teacher_id: i64,
        subject: &str,
    ) -> Result<Vec<GradeRecord>> {
        self.list_grades_for_subject_impl(teacher_id, subject).await
    }

    async fn upsert_grades(
        &self,
        date: NaiveDate,
        subject: &str,
        assessment_name: &str,
        entries: Vec<GradeEntryInput>,
    ) -> Result<u64> {
        self.upsert_grades_impl(date, subject, assessment_name, entries)
            .await
    }

    // 行为记录模块
    async fn list_behavior_logs(
        &self,
        teacher_id: i64,
        query: BehaviorListQuery,
    ) -> Result<Vec<BehaviorLogItem>> {
        self.list_behavior_logs_impl(teacher_id, query).await
    }

    async fn create_behavior_log(&self, req: CreateBehaviorRequest) -> Result<BehaviorLog> {
        self.create_behavior_log_impl(req).await
    }

    async fn delete_behavior_log(&self, teacher_id: i64, log_id: i64) -> Result<bool> {
        self.delete_behavior_log_impl(teacher_id, log_id).await
    }

    // 课程表模块
    async fn list_schedules(&self, teacher_id: i64) -> Result<Vec<Schedule>> {
        self.list_schedules_impl(teacher_id, None).await
    }

    async fn list_schedules_on_day(
        &self,
        teacher_id: i64,
        day_of_week: i32,
    ) -> Result<Vec<Schedule>> {
        self.list_schedules_impl(teacher_id, Some(day_of_week))
            .await
    }

    async fn create_schedule(
        &self,
        teacher_id: i64,
        req: CreateScheduleRequest,
    ) -> Result<Schedule> {
        self.create_schedule_impl(teacher_id, req).await
    }

    async fn delete_schedule(&self, teacher_id: i64, schedule_id: i64) -> Result<bool> {
        self.delete_schedule_impl(teacher_id, schedule_id).await
    }

    async fn list_schedule_subjects(&self, teacher_id: i64) -> Result<Vec<String>> {
        self.list_schedule_subjects_impl(teacher_id).await
    }

    // 科目模块
    async fn list_subjects(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        self.list_subjects_impl(teacher_id).await
    }

    async fn create_subject(&self, teacher_id: i64, name: String) -> Result<Subject> {
        self.create_subject_impl(teacher_id, name).await
    }

    async fn delete_subject(&self, teacher_id: i64, subject_id: i64) -> Result<bool> {
        self.delete_subject_impl(teacher_id, subject_id).await
    }
}
