use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::middlewares::require_jwt::session_cache_key;
use crate::models::auth::{TeacherInfoResponse, UpdateProfileRequest};
use crate::models::{ApiResponse, ErrorCode};

use super::AuthService;

pub async fn handle_update_profile(
    service: &AuthService,
    mut update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher_id = match crate::services::current_teacher_id(request) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };

    update_data.full_name = update_data.full_name.map(|n| n.trim().to_string());
    update_data.school_name = update_data.school_name.map(|n| n.trim().to_string());

    if update_data.full_name.as_deref() == Some("") {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Full name cannot be empty",
        )));
    }

    match storage.update_teacher_profile(teacher_id, update_data).await {
        Ok(Some(teacher)) => {
            // 会话缓存中的教师信息已过期
            if let (Some(session), Some(cache)) = (
                RequireJWT::extract_session(request),
                service.get_cache(request),
            ) {
                cache.remove(&session_cache_key(&session.jti)).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                TeacherInfoResponse { teacher },
                "Profile updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Teacher not found",
        ))),
        Err(e) => Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ProfileUpdateFailed,
            e.message(),
        ))),
    }
}
