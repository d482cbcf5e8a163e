use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 科目
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    #[ts(skip)]
    #[serde(skip_serializing, default)]
    pub teacher_id: i64,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 科目列表项；来自课程表的科目没有 id
#[derive(Debug, Clone, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectItem {
    pub id: Option<i64>,
    pub name: String,
}
