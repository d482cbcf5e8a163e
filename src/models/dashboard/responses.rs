use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use crate::models::attendance::StatusCounts;
use crate::models::schedules::Schedule;

// 首页概览
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardResponse {
    pub student_count: u64,
    pub today: NaiveDate,
    pub day_name: String,
    pub attendance: StatusCounts,
    pub attendance_filled: u32,
    pub schedule: Vec<Schedule>,
}
