use serde::Deserialize;
use ts_rs::TS;

use super::Gender;

// 学生列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    /// 按姓名（不区分大小写）或 NISN 子串搜索
    pub search: Option<String>,
    pub class: Option<String>,
}

// 创建学生请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub nisn: Option<String>,
    pub name: String,
    pub class: String,
    pub gender: Gender,
}

// 更新学生请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub nisn: Option<String>,
    pub name: String,
    pub class: String,
    pub gender: Gender,
}
