use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub full_name: String,
    pub school_name: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Teacher {
    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, refresh_token_expiry)
            .map_err(|e| format!("生成 token 对失败: {e}"))
    }

    /// 报表抬头使用的学校名
    pub fn school_label(&self) -> &str {
        self.school_name.as_deref().unwrap_or("")
    }
}
