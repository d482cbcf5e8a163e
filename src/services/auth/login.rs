use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();
    let email = login_request.email.trim().to_lowercase();

    // 1. 按邮箱查找教师
    let teacher = match storage.get_teacher_by_email(&email).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::AuthFailed, INVALID_CREDENTIALS)));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &teacher.password_hash) {
        tracing::info!("Failed login attempt for {}", email);
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::AuthFailed, INVALID_CREDENTIALS)));
    }

    // 3. 更新最后登录时间
    if let Err(e) = storage.update_last_login(teacher.id).await {
        tracing::warn!("Failed to update last login for teacher {}: {}", teacher.id, e);
    }

    // 4. 生成令牌对
    let remember_me_expiry = login_request
        .remember_me
        .then(|| chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry));
    match teacher.generate_token_pair(remember_me_expiry) {
        Ok(token_pair) => {
            tracing::info!("Teacher {} logged in successfully", teacher.email);

            let response = LoginResponse {
                access_token: token_pair.access_token,
                expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                teacher,
                created_at: chrono::Utc::now(),
            };

            let refresh_cookie = jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}
