use serde::Deserialize;
use ts_rs::TS;

// 教师登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}

// 教师注册请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub school_name: Option<String>,
}

// 更新个人资料请求，未提供的字段保持不变
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub school_name: Option<String>,
}
