use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::ClassroomError;
use crate::models::{ApiResponse, ErrorCode, auth::RegisterRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_optional, validate_email, validate_password};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    mut register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    register_request.email = register_request.email.trim().to_lowercase();
    register_request.full_name = register_request.full_name.trim().to_string();
    register_request.school_name = normalize_optional(register_request.school_name);

    // 1. 校验输入
    if let Err(msg) = validate_email(&register_request.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::EmailInvalid, msg)));
    }

    if let Err(msg) = validate_password(&register_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PasswordTooWeak, msg)));
    }

    if register_request.full_name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Full name is required",
        )));
    }

    // 2. 哈希密码，明文替换为哈希
    register_request.password = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Register failed: {e}"),
                )),
            );
        }
    };

    // 3. 创建教师，存储层的错误信息原样返回
    match storage.create_teacher(register_request).await {
        Ok(teacher) => {
            tracing::info!("Teacher {} registered", teacher.email);
            Ok(HttpResponse::Created().json(ApiResponse::success(teacher, "Register successful")))
        }
        Err(ClassroomError::Conflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::EmailAlreadyExists, msg))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                e.message(),
            )),
        ),
    }
}
