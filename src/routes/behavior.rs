use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::behavior::{BehaviorListQuery, CreateBehaviorRequest};
use crate::services::BehaviorService;
use crate::utils::SafeIDI64;

static BEHAVIOR_SERVICE: Lazy<BehaviorService> = Lazy::new(BehaviorService::new_lazy);

pub async fn list_logs(
    req: HttpRequest,
    query: web::Query<BehaviorListQuery>,
) -> ActixResult<HttpResponse> {
    BEHAVIOR_SERVICE.list_logs(&req, query.into_inner()).await
}

pub async fn create_log(
    req: HttpRequest,
    log_data: web::Json<CreateBehaviorRequest>,
) -> ActixResult<HttpResponse> {
    BEHAVIOR_SERVICE.create_log(&req, log_data.into_inner()).await
}

pub async fn delete_log(req: HttpRequest, log_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BEHAVIOR_SERVICE.delete_log(&req, log_id.0).await
}

pub fn configure_behavior_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/behavior")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_logs))
            .route("", web::post().to(create_log))
            .route("/{id}", web::delete().to(delete_log)),
    );
}
