use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::schedules::CreateScheduleRequest;
use crate::services::ScheduleService;
use crate::utils::SafeIDI64;

static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);

pub async fn list_week(req: HttpRequest) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.list_week(&req).await
}

pub async fn create_slot(
    req: HttpRequest,
    slot_data: web::Json<CreateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.create_slot(&req, slot_data.into_inner()).await
}

pub async fn delete_slot(req: HttpRequest, schedule_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.delete_slot(&req, schedule_id.0).await
}

pub fn configure_schedules_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schedules")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_week))
            .route("", web::post().to(create_slot))
            .route("/{id}", web::delete().to(delete_slot)),
    );
}
