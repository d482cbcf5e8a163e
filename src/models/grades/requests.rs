use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

// 成绩表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSheetQuery {
    pub date: NaiveDate,
    pub subject: String,
    pub class: Option<String>,
    pub assessment_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeEntryInput {
    pub student_id: i64,
    pub score: f64,
    pub remarks: Option<String>,
}

// 保存成绩请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct SaveGradesRequest {
    pub date: NaiveDate,
    pub subject: String,
    pub assessment_name: Option<String>,
    pub records: Vec<GradeEntryInput>,
}
