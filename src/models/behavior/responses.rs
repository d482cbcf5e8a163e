use serde::Serialize;
use ts_rs::TS;

use super::BehaviorLogItem;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/behavior.ts")]
pub struct BehaviorListResponse {
    pub items: Vec<BehaviorLogItem>,
}
