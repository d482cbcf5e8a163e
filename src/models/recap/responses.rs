use serde::Serialize;
use ts_rs::TS;

use super::LoadState;

// 一次汇总加载的结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/recap.ts")]
pub struct RecapResponse<T: TS> {
    pub token: u64,
    /// 加载期间已有更新的请求，本结果未写入槽位
    pub superseded: bool,
    pub state: LoadState,
    pub recap: Option<T>,
}

// 槽位当前内容
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/recap.ts")]
pub struct LoadSlotResponse<T: TS> {
    pub token: u64,
    pub state: LoadState,
    pub recap: Option<T>,
}
