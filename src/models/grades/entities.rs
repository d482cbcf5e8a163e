use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

// 成绩记录，(student_id, subject, assessment_date, assessment_name) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeRecord {
    pub id: i64,
    pub student_id: i64,
    pub subject: String,
    pub assessment_date: NaiveDate,
    /// 未命名的评估为空字符串
    pub assessment_name: String,
    pub score: f64,
    pub remarks: Option<String>,
}
