use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use crate::models::students::Student;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSheetRow {
    pub student: Student,
    pub score: Option<f64>,
    pub remarks: Option<String>,
}

// 单次评估的成绩表
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSheet {
    pub date: NaiveDate,
    pub subject: String,
    pub assessment_name: String,
    pub class: Option<String>,
    pub rows: Vec<GradeSheetRow>,
    /// 已有成绩的平均分
    pub average: Option<f64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct SaveGradesResponse {
    pub saved: u64,
}
