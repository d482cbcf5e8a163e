use serde::Serialize;
use ts_rs::TS;

use super::SubjectItem;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListResponse {
    pub items: Vec<SubjectItem>,
    /// 列表取自课程表
    pub from_schedule: bool,
}
