use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_teacher_id, error_response};

// 连同考勤、成绩、行为记录一并删除
pub async fn delete_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.delete_student(teacher_id, student_id).await {
        Ok(true) => {
            info!("Teacher {} deleted student {}", teacher_id, student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}
