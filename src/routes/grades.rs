use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::grades::{GradeSheetQuery, SaveGradesRequest};
use crate::services::GradeService;

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn get_sheet(
    req: HttpRequest,
    query: web::Query<GradeSheetQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.get_sheet(&req, query.into_inner()).await
}

pub async fn save_grades(
    req: HttpRequest,
    save_data: web::Json<SaveGradesRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.save(&req, save_data.into_inner()).await
}

pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_sheet))
            .route("", web::put().to(save_grades)),
    );
}
