use serde::Serialize;
use ts_rs::TS;

use super::Student;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub items: Vec<Student>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ClassListResponse {
    pub classes: Vec<String>,
}
