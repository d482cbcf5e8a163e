use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use super::{AttendanceStatus, StatusCounts};
use crate::models::students::Student;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSheetRow {
    pub student: Student,
    pub status: Option<AttendanceStatus>,
    pub notes: Option<String>,
}

// 日考勤表
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSheet {
    pub date: NaiveDate,
    pub class: Option<String>,
    pub rows: Vec<AttendanceSheetRow>,
    pub counts: StatusCounts,
    /// 已填写考勤的学生数
    pub filled: u32,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SaveAttendanceResponse {
    pub saved: u64,
}
