use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::students::{Gender, NewStudent, StudentFields};

// CSV 中的一行原始数据，缺失列读作空字符串
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawImportRow {
    pub nisn: String,
    pub name: String,
    pub class: String,
    pub gender: String,
}

// 通过校验的行
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/import.ts")]
pub struct ValidRow {
    pub nisn: Option<String>,
    pub name: String,
    pub class: String,
    pub gender: Gender,
}

impl ValidRow {
    pub fn to_new_student(&self) -> NewStudent {
        NewStudent {
            nisn: self.nisn.clone(),
            name: self.name.clone(),
            class: self.class.clone(),
            gender: self.gender,
        }
    }

    pub fn to_fields(&self) -> StudentFields {
        StudentFields {
            name: self.name.clone(),
            class: self.class.clone(),
            gender: self.gender,
        }
    }
}

// 未通过校验的行，line 从表头 = 1 起算
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/import.ts")]
pub struct InvalidRow {
    pub line: usize,
    pub errors: Vec<String>,
}

// 对账结果：插入与更新互不重叠
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciledRows {
    pub to_insert: Vec<ValidRow>,
    /// (已存在学生 id, 新数据)
    pub to_update: Vec<(i64, ValidRow)>,
}

impl ReconciledRows {
    pub fn plan(&self) -> ImportPlan {
        ImportPlan {
            insert: self.to_insert.len(),
            update: self.to_update.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/import.ts")]
pub struct ImportPlan {
    pub insert: usize,
    pub update: usize,
}

// 导入进度累计
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/import.ts")]
pub struct ImportTally {
    pub inserted: u64,
    pub updated: u64,
    pub failed: u64,
    /// 0..=100
    pub progress: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/import.ts")]
pub enum ImportJobStatus {
    Running,
    Done,
}
