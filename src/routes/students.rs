use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::students::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest};
use crate::services::{ImportService, StudentService};
use crate::utils::{SafeIDI64, SafeJobId};

// 懒加载的全局服务实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static IMPORT_SERVICE: Lazy<ImportService> = Lazy::new(ImportService::new_lazy);

// HTTP处理程序
pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_students(&req, query.into_inner())
        .await
}

pub async fn list_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_classes(&req).await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, student_data.into_inner())
        .await
}

pub async fn get_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(&req, student_id.0).await
}

pub async fn update_student(
    req: HttpRequest,
    student_id: SafeIDI64,
    update_data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, student_id.0, update_data.into_inner())
        .await
}

pub async fn delete_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(&req, student_id.0).await
}

pub async fn import_template() -> ActixResult<HttpResponse> {
    IMPORT_SERVICE.template().await
}

pub async fn preview_import(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    IMPORT_SERVICE.preview(payload, &req).await
}

pub async fn start_import(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    IMPORT_SERVICE.start(payload, &req).await
}

pub async fn import_progress(req: HttpRequest, job_id: SafeJobId) -> ActixResult<HttpResponse> {
    IMPORT_SERVICE.progress(job_id.0, &req).await
}

// 配置路由
pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_students))
            .route("", web::post().to(create_student))
            .route("/classes", web::get().to(list_classes))
            .route("/import/template", web::get().to(import_template))
            .route("/import/preview", web::post().to(preview_import))
            .route("/import", web::post().to(start_import))
            .route("/import/{job_id}", web::get().to(import_progress))
            .route("/{id}", web::get().to(get_student))
            .route("/{id}", web::put().to(update_student))
            .route("/{id}", web::delete().to(delete_student)),
    );
}
