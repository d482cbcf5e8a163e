use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, normalize_student};
use crate::errors::ClassroomError;
use crate::models::students::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_teacher_id, error_response};

pub async fn create_student(
    service: &StudentService,
    student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };

    let student = match normalize_student(
        student_data.nisn,
        &student_data.name,
        &student_data.class,
        student_data.gender,
    ) {
        Ok(student) => student,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::StudentInvalid, msg)));
        }
    };

    let storage = service.get_storage(request);

    match storage.create_student(teacher_id, student).await {
        Ok(student) => {
            info!("Teacher {} created student {}", teacher_id, student.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Student created successfully",
            )))
        }
        Err(e @ ClassroomError::Conflict(_)) => {
            Ok(error_response(&e, ErrorCode::StudentNisnConflict))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}
