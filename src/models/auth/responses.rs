use crate::models::teachers::Teacher;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub teacher: Teacher,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct TeacherInfoResponse {
    pub teacher: Teacher,
}
