pub mod attendance;
pub mod auth;
pub mod behavior;
pub mod dashboard;
pub mod grades;
pub mod imports;
pub mod recap;
pub mod reports;
pub mod schedules;
pub mod students;
pub mod subjects;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use behavior::BehaviorService;
pub use dashboard::DashboardService;
pub use grades::GradeService;
pub use imports::ImportService;
pub use recap::RecapService;
pub use reports::ReportService;
pub use schedules::ScheduleService;
pub use students::StudentService;
pub use subjects::SubjectService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::errors::ClassroomError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app_data 取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

/// 当前教师 ID，缺失时返回 401 响应
pub(crate) fn current_teacher_id(request: &HttpRequest) -> Result<i64, HttpResponse> {
    RequireJWT::extract_teacher_id(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

/// 按错误类型选择状态码，消息原样透传
pub(crate) fn error_response(err: &ClassroomError, code: ErrorCode) -> HttpResponse {
    let body = ApiResponse::error_empty(code, err.message());
    match err {
        ClassroomError::Validation(_) | ClassroomError::DateParse(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ClassroomError::NotFound(_) => HttpResponse::NotFound().json(body),
        ClassroomError::Conflict(_) => HttpResponse::Conflict().json(body),
        ClassroomError::Authentication(_) => HttpResponse::Unauthorized().json(body),
        ClassroomError::Authorization(_) => HttpResponse::Forbidden().json(body),
        _ => {
            tracing::error!("{}", err);
            HttpResponse::InternalServerError().json(body)
        }
    }
}
