use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::AttendanceStatus;

// 日考勤表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSheetQuery {
    pub date: NaiveDate,
    pub class: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceEntryInput {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

// 保存考勤请求，按 (student_id, date) 覆盖写入
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SaveAttendanceRequest {
    pub date: NaiveDate,
    pub records: Vec<AttendanceEntryInput>,
}
