use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::{AttendanceSheetQuery, SaveAttendanceRequest};
use crate::services::AttendanceService;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn get_sheet(
    req: HttpRequest,
    query: web::Query<AttendanceSheetQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_sheet(&req, query.into_inner()).await
}

pub async fn save_attendance(
    req: HttpRequest,
    save_data: web::Json<SaveAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.save(&req, save_data.into_inner()).await
}

pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_sheet))
            .route("", web::put().to(save_attendance)),
    );
}
