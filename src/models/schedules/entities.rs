use serde::{Deserialize, Serialize};
use ts_rs::TS;

const DAY_NAMES: [&str; 7] = [
    "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu",
];

/// 星期名，1 = 周一 … 7 = 周日
pub fn day_name(day_of_week: i32) -> &'static str {
    match day_of_week {
        1..=7 => DAY_NAMES[(day_of_week - 1) as usize],
        _ => "",
    }
}

// 课程表时段
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct Schedule {
    pub id: i64,
    #[ts(skip)]
    #[serde(skip_serializing, default)]
    pub teacher_id: i64,
    pub day_of_week: i32,
    pub subject: String,
    pub class: String,
    /// HH:MM
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
