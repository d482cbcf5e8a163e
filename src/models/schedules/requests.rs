use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct CreateScheduleRequest {
    pub day_of_week: i32,
    pub subject: String,
    pub class: String,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
}
