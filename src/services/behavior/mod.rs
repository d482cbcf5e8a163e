//! 学生行为记录

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::models::behavior::{BehaviorListQuery, BehaviorListResponse, CreateBehaviorRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

use super::{current_teacher_id, error_response};

pub struct BehaviorService {
    storage: Option<Arc<dyn Storage>>,
}

impl BehaviorService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 按日期倒序列出
    pub async fn list_logs(
        &self,
        request: &HttpRequest,
        query: BehaviorListQuery,
    ) -> ActixResult<HttpResponse> {
        let teacher_id = match current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };
        let storage = self.get_storage(request);

        match storage.list_behavior_logs(teacher_id, query).await {
            Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                BehaviorListResponse { items },
                "Behavior logs retrieved successfully",
            ))),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }

    pub async fn create_log(
        &self,
        request: &HttpRequest,
        mut create_request: CreateBehaviorRequest,
    ) -> ActixResult<HttpResponse> {
        let teacher_id = match current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };

        create_request.description = create_request.description.trim().to_string();
        if create_request.description.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BehaviorLogInvalid,
                "Description cannot be empty",
            )));
        }

        let storage = self.get_storage(request);

        // 只能为自己的学生记录
        match storage
            .get_student_by_id(teacher_id, create_request.student_id)
            .await
        {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::StudentNotFound,
                    "Student not found",
                )));
            }
            Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
        }

        match storage.create_behavior_log(create_request).await {
            Ok(log) => {
                info!(
                    "Teacher {} logged {} behavior for student {}",
                    teacher_id, log.kind, log.student_id
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    log,
                    "Behavior log created successfully",
                )))
            }
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }

    pub async fn delete_log(&self, request: &HttpRequest, log_id: i64) -> ActixResult<HttpResponse> {
        let teacher_id = match current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };
        let storage = self.get_storage(request);

        match storage.delete_behavior_log(teacher_id, log_id).await {
            Ok(true) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success_empty("Behavior log deleted successfully"))),
            Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::BehaviorLogNotFound,
                "Behavior log not found",
            ))),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }
}
