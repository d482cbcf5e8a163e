use serde::Serialize;
use ts_rs::TS;

use super::Schedule;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleDay {
    pub day_of_week: i32,
    pub day_name: String,
    pub slots: Vec<Schedule>,
}

// 按周一到周日分组，空的日子也保留
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct ScheduleWeekResponse {
    pub days: Vec<ScheduleDay>,
}
