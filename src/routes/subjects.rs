use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::subjects::CreateSubjectRequest;
use crate::services::SubjectService;
use crate::utils::SafeIDI64;

static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

pub async fn list_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req).await
}

pub async fn create_subject(
    req: HttpRequest,
    subject_data: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_subject(&req, subject_data.into_inner())
        .await
}

pub async fn delete_subject(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(&req, subject_id.0).await
}

pub fn configure_subjects_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subjects")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_subjects))
            .route("", web::post().to(create_subject))
            .route("/{id}", web::delete().to(delete_subject)),
    );
}
