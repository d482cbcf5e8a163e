use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::recap::{AttendanceRecapQuery, GradeRecapQuery};
use crate::services::RecapService;
use crate::utils::SafeRecapKind;

// 槽位状态保存在服务实例中
static RECAP_SERVICE: Lazy<RecapService> = Lazy::new(RecapService::new_lazy);

pub async fn attendance_recap(
    req: HttpRequest,
    query: web::Query<AttendanceRecapQuery>,
) -> ActixResult<HttpResponse> {
    RECAP_SERVICE.attendance(query.into_inner(), &req).await
}

pub async fn grade_recap(
    req: HttpRequest,
    query: web::Query<GradeRecapQuery>,
) -> ActixResult<HttpResponse> {
    RECAP_SERVICE.grades(query.into_inner(), &req).await
}

pub async fn latest(req: HttpRequest, kind: SafeRecapKind) -> ActixResult<HttpResponse> {
    RECAP_SERVICE.latest(kind.0, &req).await
}

pub fn configure_recap_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/recap")
            .wrap(middlewares::RequireJWT)
            .route("/attendance", web::get().to(attendance_recap))
            .route("/grades", web::get().to(grade_recap))
            .route("/{kind}/latest", web::get().to(latest)),
    );
}
