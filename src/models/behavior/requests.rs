use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::BehaviorKind;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub struct BehaviorListQuery {
    #[serde(rename = "type")]
    #[ts(rename = "type")]
    pub kind: Option<BehaviorKind>,
    /// 匹配学生姓名或描述（不区分大小写）
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub struct CreateBehaviorRequest {
    pub student_id: i64,
    #[serde(rename = "type")]
    #[ts(rename = "type")]
    pub kind: BehaviorKind,
    pub description: String,
    pub date: NaiveDate,
}
