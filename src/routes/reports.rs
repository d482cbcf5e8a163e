use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::AttendanceSheetQuery;
use crate::models::grades::GradeSheetQuery;
use crate::models::recap::{AttendanceRecapQuery, GradeRecapQuery};
use crate::services::ReportService;

static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

pub async fn attendance_sheet(
    req: HttpRequest,
    query: web::Query<AttendanceSheetQuery>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .attendance_sheet(&req, query.into_inner())
        .await
}

pub async fn grade_sheet(
    req: HttpRequest,
    query: web::Query<GradeSheetQuery>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.grade_sheet(&req, query.into_inner()).await
}

pub async fn attendance_recap(
    req: HttpRequest,
    query: web::Query<AttendanceRecapQuery>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE
        .attendance_recap(&req, query.into_inner())
        .await
}

pub async fn grade_recap(
    req: HttpRequest,
    query: web::Query<GradeRecapQuery>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.grade_recap(&req, query.into_inner()).await
}

pub fn configure_reports_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/reports")
            .wrap(middlewares::RequireJWT)
            .route("/attendance-sheet", web::get().to(attendance_sheet))
            .route("/grade-sheet", web::get().to(grade_sheet))
            .route("/attendance-recap", web::get().to(attendance_recap))
            .route("/grade-recap", web::get().to(grade_recap)),
    );
}
