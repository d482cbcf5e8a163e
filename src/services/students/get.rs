use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_teacher_id, error_response};

pub async fn get_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.get_student_by_id(teacher_id, student_id).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}
