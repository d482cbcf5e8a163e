use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::{RefreshTokenResponse, TeacherInfoResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt;

use super::AuthService;

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    match jwt::JwtUtils::refresh_access_token(&refresh_token) {
        Ok(new_access_token) => {
            let response = RefreshTokenResponse {
                access_token: new_access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);

            // 清除无效的 refresh token cookie
            let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();

            Ok(HttpResponse::Unauthorized()
                .cookie(empty_cookie)
                .json(ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Login expired or invalid, please login again",
                )))
        }
    }
}

pub async fn handle_get_me(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_teacher(request) {
        Some(teacher) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherInfoResponse { teacher },
            "Teacher information retrieved successfully",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))),
    }
}
