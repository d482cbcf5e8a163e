use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

// 考勤汇总查询：month=YYYY-MM，或 start/end（end 不含）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/recap.ts")]
pub struct AttendanceRecapQuery {
    pub month: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub class: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/recap.ts")]
pub struct GradeRecapQuery {
    pub subject: String,
    pub class: Option<String>,
}
