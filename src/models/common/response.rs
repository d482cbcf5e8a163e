use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_empty_omits_data() {
        let resp = ApiResponse::error_empty(ErrorCode::StudentNotFound, "Student not found");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 2000);
        assert_eq!(json["message"], "Student not found");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_success_carries_data() {
        let resp = ApiResponse::success(vec!["7A".to_string()], "ok");
        assert_eq!(resp.code, 0);
        assert_eq!(resp.data.as_deref(), Some(&["7A".to_string()][..]));
    }
}
