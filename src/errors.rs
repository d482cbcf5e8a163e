//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_classroom_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ClassroomError {
            $($variant(String),)*
        }

        impl ClassroomError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ClassroomError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ClassroomError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ClassroomError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ClassroomError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ClassroomError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_classroom_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    FileOperation("E005", "File Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    CsvParse("E010", "CSV Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    Conflict("E013", "Conflict Error"),
}

impl ClassroomError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ClassroomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClassroomError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ClassroomError {
    fn from(err: sea_orm::DbErr) -> Self {
        ClassroomError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ClassroomError {
    fn from(err: std::io::Error) -> Self {
        ClassroomError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ClassroomError {
    fn from(err: serde_json::Error) -> Self {
        ClassroomError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ClassroomError {
    fn from(err: chrono::ParseError) -> Self {
        ClassroomError::DateParse(err.to_string())
    }
}

impl From<csv::Error> for ClassroomError {
    fn from(err: csv::Error) -> Self {
        ClassroomError::CsvParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClassroomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClassroomError::cache_connection("test").code(), "E001");
        assert_eq!(ClassroomError::database_operation("test").code(), "E004");
        assert_eq!(ClassroomError::validation("test").code(), "E006");
        assert_eq!(ClassroomError::csv_parse("test").code(), "E010");
        assert_eq!(ClassroomError::conflict("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ClassroomError::authentication("test").error_type(),
            "Authentication Error"
        );
        assert_eq!(
            ClassroomError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = ClassroomError::not_found("Student 42 not found");
        assert_eq!(err.message(), "Student 42 not found");
    }

    #[test]
    fn test_format_simple() {
        let err = ClassroomError::validation("score must be between 0 and 100");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("score must be between 0 and 100"));
    }

    #[test]
    fn test_from_chrono_parse_error() {
        let parse_err = chrono::NaiveDate::parse_from_str("2024-13-40", "%Y-%m-%d").unwrap_err();
        let err: ClassroomError = parse_err.into();
        assert_eq!(err.code(), "E009");
    }
}
