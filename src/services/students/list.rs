use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::students::{ClassListResponse, StudentListQuery, StudentListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_teacher_id, error_response};

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentListQuery,
) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.list_students(teacher_id, query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentListResponse { items },
            "Students retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}

pub async fn list_classes(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let teacher_id = match current_teacher_id(request) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.list_classes(teacher_id).await {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassListResponse { classes },
            "Classes retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}
