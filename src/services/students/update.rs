use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, normalize_student};
use crate::errors::ClassroomError;
use crate::models::students::UpdateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_teacher_id, error_response};

pub async fn update_student(
    service: &StudentService,
    student_id: i64,
    update_data: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };

    let student = match normalize_student(
        update_data.nisn,
        &update_data.name,
        &update_data.class,
        update_data.gender,
    ) {
        Ok(student) => student,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::StudentInvalid, msg)));
        }
    };

    let storage = service.get_storage(request);

    match storage.update_student(teacher_id, student_id, student).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e @ ClassroomError::Conflict(_)) => {
            Ok(error_response(&e, ErrorCode::StudentNisnConflict))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}
