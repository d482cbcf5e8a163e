use serde::Serialize;
use ts_rs::TS;

use super::{ImportJobStatus, ImportPlan, ImportTally, InvalidRow, ValidRow};

// 导入预览
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/import.ts")]
pub struct ImportPreviewResponse {
    pub valid: Vec<ValidRow>,
    pub invalid: Vec<InvalidRow>,
    pub plan: ImportPlan,
    /// 文件内重复的 NISN，写入时所在批次会失败
    pub duplicate_nisns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/import.ts")]
pub struct StartImportResponse {
    pub job_id: String,
    pub plan: ImportPlan,
    /// 被跳过的无效行
    pub invalid: Vec<InvalidRow>,
    pub duplicate_nisns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/import.ts")]
pub struct ImportProgressResponse {
    pub job_id: String,
    pub status: ImportJobStatus,
    pub plan: ImportPlan,
    pub tally: ImportTally,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
}
