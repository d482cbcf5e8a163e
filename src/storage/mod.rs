use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 花名册批量写入
///
/// 导入执行器只依赖这两个写操作，测试中可以用内存实现替换。
#[async_trait::async_trait]
pub trait RosterWriter: Send + Sync {
    // 批量插入学生，返回插入行数
    async fn insert_students(&self, teacher_id: i64, students: Vec<NewStudent>) -> Result<u64>;
    // 替换已有学生的姓名、班级、性别
    async fn update_student_fields(
        &self,
        teacher_id: i64,
        student_id: i64,
        fields: StudentFields,
    ) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait Storage: RosterWriter {
    /// 教师管理方法
    // 创建教师（password 字段为已哈希的密码）
    async fn create_teacher(&self, req: RegisterRequest) -> Result<Teacher>;
    // 通过ID获取教师信息
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    // 通过邮箱获取教师信息
    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>>;
    // 更新个人资料
    async fn update_teacher_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Teacher>>;
    // 更新最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 学生管理方法
    // 列出学生，按班级、姓名排序
    async fn list_students(&self, teacher_id: i64, query: StudentListQuery)
    -> Result<Vec<Student>>;
    async fn get_student_by_id(&self, teacher_id: i64, student_id: i64)
    -> Result<Option<Student>>;
    async fn create_student(&self, teacher_id: i64, student: NewStudent) -> Result<Student>;
    async fn update_student(
        &self,
        teacher_id: i64,
        student_id: i64,
        student: NewStudent,
    ) -> Result<Option<Student>>;
    // 删除学生，连带删除考勤、成绩、行为记录
    async fn delete_student(&self, teacher_id: i64, student_id: i64) -> Result<bool>;
    // 去重排序后的班级列表
    async fn list_classes(&self, teacher_id: i64) -> Result<Vec<String>>;
    async fn count_students(&self, teacher_id: i64) -> Result<u64>;
    // NISN -> 学生 ID
    async fn find_student_ids_by_nisn(
        &self,
        teacher_id: i64,
        nisns: &[String],
    ) -> Result<HashMap<String, i64>>;
    // 过滤出属于该教师的学生 ID
    async fn filter_owned_student_ids(
        &self,
        teacher_id: i64,
        student_ids: &[i64],
    ) -> Result<HashSet<i64>>;

    /// 考勤方法
    async fn list_attendance_on(&self, teacher_id: i64, date: NaiveDate)
    -> Result<Vec<AttendanceRecord>>;
    // [start, end) 区间内的考勤，按日期排序
    async fn list_attendance_between(
        &self,
        teacher_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>>;
    // 按 (student_id, date) 覆盖写入
    async fn upsert_attendance(
        &self,
        date: NaiveDate,
        entries: Vec<AttendanceEntryInput>,
    ) -> Result<u64>;

    /// 成绩方法
    async fn list_grades_on(
        &self,
        teacher_id: i64,
        date: NaiveDate,
        subject: &str,
        assessment_name: &str,
    ) -> Result<Vec<GradeRecord>>;
    // 某科目全部成绩，按日期升序
    async fn list_grades_for_subject(
        &self,
        teacher_id: i64,
        subject: &str,
    ) -> Result<Vec<GradeRecord>>;
    // 按 (student_id, subject, date, assessment_name) 覆盖写入
    async fn upsert_grades(
        &self,
        date: NaiveDate,
        subject: &str,
        assessment_name: &str,
        entries: Vec<GradeEntryInput>,
    ) -> Result<u64>;

    /// 行为记录方法
    async fn list_behavior_logs(
        &self,
        teacher_id: i64,
        query: BehaviorListQuery,
    ) -> Result<Vec<BehaviorLogItem>>;
    async fn create_behavior_log(&self, req: CreateBehaviorRequest) -> Result<BehaviorLog>;
    async fn delete_behavior_log(&self, teacher_id: i64, log_id: i64) -> Result<bool>;

    /// 课程表方法
    // 按星期、开始时间排序
    async fn list_schedules(&self, teacher_id: i64) -> Result<Vec<Schedule>>;
    async fn list_schedules_on_day(&self, teacher_id: i64, day_of_week: i32)
    -> Result<Vec<Schedule>>;
    async fn create_schedule(&self, teacher_id: i64, req: CreateScheduleRequest)
    -> Result<Schedule>;
    async fn delete_schedule(&self, teacher_id: i64, schedule_id: i64) -> Result<bool>;
    // 课程表中出现过的科目，去重排序
    async fn list_schedule_subjects(&self, teacher_id: i64) -> Result<Vec<String>>;

    /// 科目方法
    async fn list_subjects(&self, teacher_id: i64) -> Result<Vec<Subject>>;
    async fn create_subject(&self, teacher_id: i64, name: String) -> Result<Subject>;
    async fn delete_subject(&self, teacher_id: i64, subject_id: i64) -> Result<bool>;
}

/// 创建存储后端并执行迁移
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
