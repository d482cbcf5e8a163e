//! 科目管理

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{ClassroomError, Result};
use crate::models::subjects::{CreateSubjectRequest, SubjectItem, SubjectListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

use super::{current_teacher_id, error_response};

/// 教师自己的科目；没有时退回课程表中出现过的科目
pub async fn load_subjects(storage: &dyn Storage, teacher_id: i64) -> Result<SubjectListResponse> {
    let subjects = storage.list_subjects(teacher_id).await?;
    if !subjects.is_empty() {
        return Ok(SubjectListResponse {
            items: subjects
                .into_iter()
                .map(|s| SubjectItem {
                    id: Some(s.id),
                    name: s.name,
                })
                .collect(),
            from_schedule: false,
        });
    }

    let names = storage.list_schedule_subjects(teacher_id).await?;
    Ok(SubjectListResponse {
        items: names
            .into_iter()
            .map(|name| SubjectItem { id: None, name })
            .collect(),
        from_schedule: true,
    })
}

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let teacher_id = match current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };
        let storage = self.get_storage(request);

        match load_subjects(storage.as_ref(), teacher_id).await {
            Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                list,
                "Subjects retrieved successfully",
            ))),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        create_request: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        let teacher_id = match current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };

        let name = create_request.name.trim().to_string();
        if name.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::SubjectInvalid,
                "Subject name cannot be empty",
            )));
        }

        let storage = self.get_storage(request);
        match storage.create_subject(teacher_id, name).await {
            Ok(subject) => Ok(HttpResponse::Created().json(ApiResponse::success(
                subject,
                "Subject created successfully",
            ))),
            Err(e @ ClassroomError::Conflict(_)) => {
                Ok(error_response(&e, ErrorCode::SubjectAlreadyExists))
            }
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }

    pub async fn delete_subject(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        let teacher_id = match current_teacher_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };
        let storage = self.get_storage(request);

        match storage.delete_subject(teacher_id, subject_id).await {
            Ok(true) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted successfully")))
            }
            Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotFound,
                "Subject not found",
            ))),
            Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
        }
    }
}
